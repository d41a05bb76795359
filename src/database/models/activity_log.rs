use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::models::company::CompanyRef;

/// Immutable audit record attached to a company
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: Uuid,
    pub company_id: Uuid,
    pub event_description: String,
    pub created_at: DateTime<Utc>,
}

/// Feed item: an entry plus the company it belongs to
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogItem {
    #[serde(flatten)]
    pub entry: ActivityLogEntry,
    pub company: CompanyRef,
}

#[derive(Debug, Clone, FromRow)]
pub struct ActivityLogRow {
    #[sqlx(flatten)]
    pub entry: ActivityLogEntry,
    pub company_name: String,
}

impl From<ActivityLogRow> for ActivityLogItem {
    fn from(row: ActivityLogRow) -> Self {
        let company = CompanyRef {
            id: row.entry.company_id,
            name: row.company_name,
        };
        Self {
            entry: row.entry,
            company,
        }
    }
}
