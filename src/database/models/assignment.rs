use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::models::company::CompanyRef;
use crate::database::models::person::PersonCompany;

/// Person to company link, unique per pair
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub person_id: Uuid,
    pub company_id: Uuid,
    pub role: Option<String>,
    pub assigned_at: DateTime<Utc>,
}

/// Flat join row used to build `PersonCompany` lists
#[derive(Debug, Clone, FromRow)]
pub struct MembershipRow {
    pub person_id: Uuid,
    pub company_id: Uuid,
    pub role: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub company_name: String,
}

impl From<MembershipRow> for PersonCompany {
    fn from(row: MembershipRow) -> Self {
        Self {
            person_id: row.person_id,
            company_id: row.company_id,
            role: row.role,
            assigned_at: row.assigned_at,
            company: CompanyRef {
                id: row.company_id,
                name: row.company_name,
            },
        }
    }
}
