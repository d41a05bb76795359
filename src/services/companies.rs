use uuid::Uuid;

use super::{audit, put_int, put_text};
use crate::database::models::Company;
use crate::database::{ColumnSet, Database, DatabaseError, ScopedRepository};
use crate::error::ApiError;
use crate::validation::schemas::CompanyFields;
use crate::validation::{CompanyPatch, NewCompany};

#[derive(Clone)]
pub struct CompanyService {
    db: Database,
}

impl CompanyService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<Company>, ApiError> {
        let mut conn = self.db.acquire().await?;
        Ok(ScopedRepository::<Company>::new(owner).list(&mut conn).await?)
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Company, ApiError> {
        let mut conn = self.db.acquire().await?;
        Ok(ScopedRepository::<Company>::new(owner).find(&mut conn, id).await?)
    }

    /// Insert the company and its creation entry together.
    pub async fn create(&self, owner: Uuid, input: NewCompany) -> Result<Company, ApiError> {
        let mut columns = ColumnSet::new();
        columns.text("name", Some(input.name));
        columns.text("status", Some(input.status.unwrap_or_default().to_string()));
        company_columns(&mut columns, input.fields);

        let company = self
            .db
            .unit_of_work(move |conn| {
                Box::pin(async move {
                    let company = ScopedRepository::<Company>::new(owner)
                        .insert(conn, &columns)
                        .await?;
                    audit::append(conn, company.id, &audit::creation_description(&company.name)).await?;
                    Ok::<_, DatabaseError>(company)
                })
            })
            .await?;

        tracing::info!(company_id = %company.id, user_id = %owner, "Company created");
        Ok(company)
    }

    /// Apply a partial update. The row is locked while the previous status is
    /// compared, so the recorded transition matches what commits.
    pub async fn update(&self, owner: Uuid, id: Uuid, patch: CompanyPatch) -> Result<Company, ApiError> {
        let requested_status = patch.status;

        let mut columns = ColumnSet::new();
        if let Some(name) = patch.name {
            columns.text("name", Some(name));
        }
        if let Some(status) = patch.status {
            columns.text("status", Some(status.to_string()));
        }
        company_columns(&mut columns, patch.fields);

        let company = self
            .db
            .unit_of_work(move |conn| {
                Box::pin(async move {
                    let repo = ScopedRepository::<Company>::new(owner);
                    let current = repo.find_locked(conn, id).await?;
                    let updated = repo.update(conn, id, &columns).await?;
                    audit::record_if_changed(conn, id, current.status, requested_status).await?;
                    Ok::<_, DatabaseError>(updated)
                })
            })
            .await?;

        tracing::info!(company_id = %company.id, user_id = %owner, "Company updated");
        Ok(company)
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), ApiError> {
        let mut conn = self.db.acquire().await?;
        ScopedRepository::<Company>::new(owner).delete(&mut conn, id).await?;
        tracing::info!(company_id = %id, user_id = %owner, "Company deleted");
        Ok(())
    }
}

fn company_columns(columns: &mut ColumnSet, fields: CompanyFields) {
    put_text(columns, "type", fields.company_type.map(|t| t.to_string()));
    put_text(columns, "country", fields.country);
    put_text(columns, "city", fields.city);
    put_text(columns, "email", fields.email);
    put_text(columns, "website", fields.website);
    put_text(columns, "career_website", fields.career_website);
    put_text(columns, "linkedin_url", fields.linkedin_url);
    put_text(columns, "instagram_url", fields.instagram_url);
    put_text(columns, "behance_url", fields.behance_url);
    put_text(columns, "notes", fields.notes);
    put_int(columns, "interest_level", fields.interest_level);
}
