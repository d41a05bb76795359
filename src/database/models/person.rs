use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::models::company::CompanyRef;
use crate::database::repository::OwnedEntity;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedEntity for Person {
    const TABLE: &'static str = "people";
    const LABEL: &'static str = "Person";
    const ORDER_BY: &'static str = "\"name\" ASC, \"created_at\" ASC";
}

/// One of a person's company memberships, as listed on the person
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonCompany {
    pub person_id: Uuid,
    pub company_id: Uuid,
    pub role: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub company: CompanyRef,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonWithCompanies {
    #[serde(flatten)]
    pub person: Person,
    pub companies: Vec<PersonCompany>,
}

/// A person as seen from a company, carrying the assignment role
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AssignedPerson {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub person: Person,
    pub role: Option<String>,
}
