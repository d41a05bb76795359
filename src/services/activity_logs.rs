use uuid::Uuid;

use crate::database::models::{ActivityLogItem, ActivityLogRow};
use crate::database::{Database, DatabaseError};
use crate::error::ApiError;

/// Read side of the audit trail
#[derive(Clone)]
pub struct ActivityLogService {
    db: Database,
}

impl ActivityLogService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Entries for every company the owner has, newest first.
    pub async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<ActivityLogItem>, ApiError> {
        let rows = sqlx::query_as::<_, ActivityLogRow>(
            r#"
            SELECT al.id, al.company_id, al.event_description, al.created_at, c.name AS company_name
            FROM activity_logs al
            JOIN companies c ON c.id = al.company_id
            WHERE c.user_id = $1
            ORDER BY al.created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(self.db.pool())
        .await
        .map_err(DatabaseError::from)?;

        Ok(rows.into_iter().map(ActivityLogItem::from).collect())
    }
}
