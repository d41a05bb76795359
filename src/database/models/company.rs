use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

use crate::database::repository::OwnedEntity;
use crate::types::{CompanyStatus, CompanyType};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub company_type: Option<CompanyType>,
    pub status: CompanyStatus,
    pub country: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub career_website: Option<String>,
    pub linkedin_url: Option<String>,
    pub instagram_url: Option<String>,
    pub behance_url: Option<String>,
    pub notes: Option<String>,
    pub interest_level: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// `type` and `status` are stored as text and parsed on the way out.
impl<'r> FromRow<'r, PgRow> for Company {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let status = status.parse::<CompanyStatus>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: Box::new(e),
        })?;

        let company_type: Option<String> = row.try_get("type")?;
        let company_type = company_type
            .map(|t| t.parse::<CompanyType>())
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "type".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            name: row.try_get("name")?,
            company_type,
            status,
            country: row.try_get("country")?,
            city: row.try_get("city")?,
            email: row.try_get("email")?,
            website: row.try_get("website")?,
            career_website: row.try_get("career_website")?,
            linkedin_url: row.try_get("linkedin_url")?,
            instagram_url: row.try_get("instagram_url")?,
            behance_url: row.try_get("behance_url")?,
            notes: row.try_get("notes")?,
            interest_level: row.try_get("interest_level")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl OwnedEntity for Company {
    const TABLE: &'static str = "companies";
    const LABEL: &'static str = "Company";
    const ORDER_BY: &'static str = "\"created_at\" DESC";
}

/// `{id, name}` reference embedded in other resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CompanyRef {
    pub id: Uuid,
    pub name: String,
}
