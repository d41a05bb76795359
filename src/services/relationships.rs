//! Person to company assignments.

use uuid::Uuid;

use super::audit;
use crate::database::models::{AssignedPerson, Assignment, Company, Person};
use crate::database::{Database, DatabaseError, ScopedRepository};
use crate::error::ApiError;
use crate::validation::AssignPersonRequest;

const ALREADY_ASSIGNED: &str = "This person is already assigned to this company";

#[derive(Clone)]
pub struct RelationshipService {
    db: Database,
}

impl RelationshipService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Link a person to a company and record it. Both must belong to `owner`;
    /// a pair can only be linked once.
    pub async fn assign(
        &self,
        owner: Uuid,
        company_id: Uuid,
        req: AssignPersonRequest,
    ) -> Result<Assignment, ApiError> {
        let assignment = self
            .db
            .unit_of_work(move |conn| {
                Box::pin(async move {
                    let company = ScopedRepository::<Company>::new(owner).find(conn, company_id).await?;
                    let person = ScopedRepository::<Person>::new(owner).find(conn, req.person_id).await?;

                    let assignment = sqlx::query_as::<_, Assignment>(
                        r#"
                        INSERT INTO company_people (person_id, company_id, role)
                        VALUES ($1, $2, $3)
                        ON CONFLICT (person_id, company_id) DO NOTHING
                        RETURNING *
                        "#,
                    )
                    .bind(person.id)
                    .bind(company.id)
                    .bind(req.role.as_deref())
                    .fetch_optional(&mut *conn)
                    .await
                    .map_err(DatabaseError::from)?
                    .ok_or_else(|| ApiError::conflict(ALREADY_ASSIGNED))?;

                    let description =
                        audit::assignment_description(&person.name, &company.name, req.role.as_deref());
                    audit::append(conn, company.id, &description).await?;

                    Ok::<_, ApiError>(assignment)
                })
            })
            .await?;

        tracing::info!(
            company_id = %assignment.company_id,
            person_id = %assignment.person_id,
            "Person assigned"
        );
        Ok(assignment)
    }

    /// Remove a link. The deletion and its log entry commit together.
    pub async fn unassign(&self, owner: Uuid, company_id: Uuid, person_id: Uuid) -> Result<(), ApiError> {
        self.db
            .unit_of_work(move |conn| {
                Box::pin(async move {
                    let company = ScopedRepository::<Company>::new(owner).find(conn, company_id).await?;

                    let person_name = sqlx::query_scalar::<_, String>(
                        r#"
                        DELETE FROM company_people cp
                        USING people p
                        WHERE cp.company_id = $1 AND cp.person_id = $2 AND p.id = cp.person_id
                        RETURNING p.name
                        "#,
                    )
                    .bind(company.id)
                    .bind(person_id)
                    .fetch_optional(&mut *conn)
                    .await?
                    .ok_or_else(|| DatabaseError::not_found("Assignment"))?;

                    audit::append(conn, company.id, &audit::removal_description(&person_name, &company.name))
                        .await?;
                    Ok::<_, DatabaseError>(())
                })
            })
            .await?;

        tracing::info!(company_id = %company_id, person_id = %person_id, "Person unassigned");
        Ok(())
    }

    /// People assigned to one of the owner's companies, each with their role.
    pub async fn list_people_for_company(
        &self,
        owner: Uuid,
        company_id: Uuid,
    ) -> Result<Vec<AssignedPerson>, ApiError> {
        let mut conn = self.db.acquire().await?;
        let company = ScopedRepository::<Company>::new(owner)
            .find(&mut conn, company_id)
            .await?;

        let people = sqlx::query_as::<_, AssignedPerson>(
            r#"
            SELECT p.*, cp.role
            FROM people p
            JOIN company_people cp ON cp.person_id = p.id
            WHERE cp.company_id = $1 AND p.user_id = $2
            ORDER BY p.name ASC
            "#,
        )
        .bind(company.id)
        .bind(owner)
        .fetch_all(&mut *conn)
        .await
        .map_err(DatabaseError::from)?;

        Ok(people)
    }
}
