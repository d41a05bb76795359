use std::collections::HashMap;
use uuid::Uuid;

use super::put_text;
use crate::database::models::{MembershipRow, Person, PersonCompany, PersonWithCompanies};
use crate::database::{ColumnSet, Database, DatabaseError, ScopedRepository};
use crate::error::ApiError;
use crate::validation::schemas::PersonFields;
use crate::validation::{NewPerson, PersonPatch};

#[derive(Clone)]
pub struct PersonService {
    db: Database,
}

impl PersonService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All of the owner's people by name, each with their company memberships.
    pub async fn list(&self, owner: Uuid) -> Result<Vec<PersonWithCompanies>, ApiError> {
        let mut conn = self.db.acquire().await?;
        let people = ScopedRepository::<Person>::new(owner).list(&mut conn).await?;

        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT cp.person_id, cp.company_id, cp.role, cp.assigned_at, c.name AS company_name
            FROM company_people cp
            JOIN people p ON p.id = cp.person_id
            JOIN companies c ON c.id = cp.company_id
            WHERE p.user_id = $1
            ORDER BY cp.assigned_at ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&mut *conn)
        .await
        .map_err(DatabaseError::from)?;

        Ok(attach_memberships(people, rows))
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Person, ApiError> {
        let mut conn = self.db.acquire().await?;
        Ok(ScopedRepository::<Person>::new(owner).find(&mut conn, id).await?)
    }

    pub async fn create(&self, owner: Uuid, input: NewPerson) -> Result<Person, ApiError> {
        let mut columns = ColumnSet::new();
        columns.text("name", Some(input.name));
        person_columns(&mut columns, input.fields);

        let mut conn = self.db.acquire().await?;
        let person = ScopedRepository::<Person>::new(owner)
            .insert(&mut conn, &columns)
            .await?;

        tracing::info!(person_id = %person.id, user_id = %owner, "Person created");
        Ok(person)
    }

    pub async fn update(&self, owner: Uuid, id: Uuid, patch: PersonPatch) -> Result<Person, ApiError> {
        let mut columns = ColumnSet::new();
        if let Some(name) = patch.name {
            columns.text("name", Some(name));
        }
        person_columns(&mut columns, patch.fields);

        let mut conn = self.db.acquire().await?;
        let person = ScopedRepository::<Person>::new(owner)
            .update(&mut conn, id, &columns)
            .await?;

        tracing::info!(person_id = %person.id, user_id = %owner, "Person updated");
        Ok(person)
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), ApiError> {
        let mut conn = self.db.acquire().await?;
        ScopedRepository::<Person>::new(owner).delete(&mut conn, id).await?;
        tracing::info!(person_id = %id, user_id = %owner, "Person deleted");
        Ok(())
    }
}

fn person_columns(columns: &mut ColumnSet, fields: PersonFields) {
    put_text(columns, "email", fields.email);
    put_text(columns, "linkedin_url", fields.linkedin_url);
    put_text(columns, "notes", fields.notes);
}

fn attach_memberships(people: Vec<Person>, rows: Vec<MembershipRow>) -> Vec<PersonWithCompanies> {
    let mut by_person: HashMap<Uuid, Vec<PersonCompany>> = HashMap::new();
    for row in rows {
        by_person.entry(row.person_id).or_default().push(row.into());
    }

    people
        .into_iter()
        .map(|person| {
            let companies = by_person.remove(&person.id).unwrap_or_default();
            PersonWithCompanies { person, companies }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn person(name: &str) -> Person {
        let now = Utc::now();
        Person {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            email: None,
            linkedin_url: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn memberships_attach_to_their_person_in_order() {
        let jane = person("Jane");
        let john = person("John");
        let acme = Uuid::new_v4();
        let globex = Uuid::new_v4();
        let row = |person_id, company_id, name: &str| MembershipRow {
            person_id,
            company_id,
            role: None,
            assigned_at: Utc::now(),
            company_name: name.to_string(),
        };

        let listed = attach_memberships(
            vec![jane.clone(), john.clone()],
            vec![row(jane.id, acme, "Acme"), row(jane.id, globex, "Globex")],
        );

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].person.name, "Jane");
        let names: Vec<_> = listed[0].companies.iter().map(|c| c.company.name.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Globex"]);
        assert!(listed[1].companies.is_empty());

        let json = serde_json::to_value(&listed[0]).unwrap();
        assert_eq!(json["name"], "Jane");
        assert_eq!(json["companies"][0]["companyId"], acme.to_string());
        assert_eq!(json["companies"][0]["company"]["name"], "Acme");
    }
}
