//! Audit trail recorder.
//!
//! Entries are append-only. Every append takes the caller's connection so it
//! lands in the same transaction as the change it describes.

use sqlx::PgConnection;
use uuid::Uuid;

use crate::database::models::ActivityLogEntry;
use crate::database::DatabaseError;
use crate::types::CompanyStatus;

pub fn creation_description(company_name: &str) -> String {
    format!("Company '{}' created.", company_name)
}

pub fn transition_description(from: CompanyStatus, to: CompanyStatus) -> String {
    format!("Status changed from {} to {}.", from, to)
}

pub fn assignment_description(person: &str, company: &str, role: Option<&str>) -> String {
    match role {
        Some(role) => format!("Person '{}' assigned to '{}' as {}.", person, company, role),
        None => format!("Person '{}' assigned to '{}'.", person, company),
    }
}

pub fn removal_description(person: &str, company: &str) -> String {
    format!("Person '{}' removed from '{}'.", person, company)
}

/// The transition to record, if any: only a requested status that differs
/// from the current one counts.
pub fn status_transition(
    current: CompanyStatus,
    requested: Option<CompanyStatus>,
) -> Option<(CompanyStatus, CompanyStatus)> {
    match requested {
        Some(next) if next != current => Some((current, next)),
        _ => None,
    }
}

pub async fn append(
    conn: &mut PgConnection,
    company_id: Uuid,
    description: &str,
) -> Result<ActivityLogEntry, DatabaseError> {
    let entry = sqlx::query_as::<_, ActivityLogEntry>(
        "INSERT INTO activity_logs (company_id, event_description) VALUES ($1, $2) RETURNING *",
    )
    .bind(company_id)
    .bind(description)
    .fetch_one(conn)
    .await?;

    tracing::debug!(company_id = %company_id, "Activity recorded: {}", description);
    Ok(entry)
}

/// Append a transition entry when the status actually changes.
pub async fn record_if_changed(
    conn: &mut PgConnection,
    company_id: Uuid,
    current: CompanyStatus,
    requested: Option<CompanyStatus>,
) -> Result<Option<ActivityLogEntry>, DatabaseError> {
    match status_transition(current, requested) {
        Some((from, to)) => {
            let entry = append(conn, company_id, &transition_description(from, to)).await?;
            Ok(Some(entry))
        }
        None => Ok(None),
    }
}
