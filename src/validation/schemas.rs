use uuid::Uuid;

use super::{Field, Validate, Validator};
use crate::types::{CompanyStatus, CompanyType};

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(v: &mut Validator<'_>) -> Option<Self> {
        let username = v.string_min("username", 3, "Username must be at least 3 characters long");
        let username = v.require("username", username);
        let password = v.string_min("password", 6, "Password must be at least 6 characters long");
        let password = v.require("password", password);

        Some(Self {
            username: username?,
            password: password?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(v: &mut Validator<'_>) -> Option<Self> {
        let username = v.string("username");
        let username = v.require("username", username);
        let password = v.string("password");
        let password = v.require("password", password);

        Some(Self {
            username: username?,
            password: password?,
        })
    }
}

/// Fields shared by company create and update payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyFields {
    pub company_type: Field<CompanyType>,
    pub country: Field<String>,
    pub city: Field<String>,
    pub email: Field<String>,
    pub website: Field<String>,
    pub career_website: Field<String>,
    pub linkedin_url: Field<String>,
    pub instagram_url: Field<String>,
    pub behance_url: Field<String>,
    pub notes: Field<String>,
    pub interest_level: Field<i32>,
}

impl CompanyFields {
    fn read(v: &mut Validator<'_>) -> Self {
        Self {
            company_type: v.one_of("type", &CompanyType::ALL),
            country: v.string("country"),
            city: v.string("city"),
            email: v.email("email"),
            website: v.url("website"),
            career_website: v.url("careerWebsite"),
            linkedin_url: v.url("linkedinUrl"),
            instagram_url: v.url("instagramUrl"),
            behance_url: v.url("behanceUrl"),
            notes: v.string("notes"),
            interest_level: v.integer_between("interestLevel", 1, 3),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub status: Option<CompanyStatus>,
    pub fields: CompanyFields,
}

impl Validate for NewCompany {
    fn validate(v: &mut Validator<'_>) -> Option<Self> {
        let name = v.string_min("name", 1, "Company name is required");
        let name = v.require("name", name);
        let fields = CompanyFields::read(v);
        let status = v.one_of("status", &CompanyStatus::ALL);
        let status = v.not_null("status", status);

        Some(Self {
            name: name?,
            status: status.value(),
            fields,
        })
    }
}

/// Partial company update; absent fields are left untouched
#[derive(Debug, Clone)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub status: Option<CompanyStatus>,
    pub fields: CompanyFields,
}

impl Validate for CompanyPatch {
    fn validate(v: &mut Validator<'_>) -> Option<Self> {
        let name = v.string_min("name", 1, "Company name is required");
        let fields = CompanyFields::read(v);
        let status = v.one_of("status", &CompanyStatus::ALL);
        let status = v.not_null("status", status);

        Some(Self {
            name: name.value(),
            status: status.value(),
            fields,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFields {
    pub email: Field<String>,
    pub linkedin_url: Field<String>,
    pub notes: Field<String>,
}

impl PersonFields {
    fn read(v: &mut Validator<'_>) -> Self {
        Self {
            email: v.email("email"),
            linkedin_url: v.url("linkedinUrl"),
            notes: v.string("notes"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPerson {
    pub name: String,
    pub fields: PersonFields,
}

impl Validate for NewPerson {
    fn validate(v: &mut Validator<'_>) -> Option<Self> {
        let name = v.string_min("name", 1, "Name is required");
        let name = v.require("name", name);
        let fields = PersonFields::read(v);

        Some(Self { name: name?, fields })
    }
}

#[derive(Debug, Clone)]
pub struct PersonPatch {
    pub name: Option<String>,
    pub fields: PersonFields,
}

impl Validate for PersonPatch {
    fn validate(v: &mut Validator<'_>) -> Option<Self> {
        let name = v.string_min("name", 1, "Name is required");
        let fields = PersonFields::read(v);

        Some(Self {
            name: name.value(),
            fields,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AssignPersonRequest {
    pub person_id: Uuid,
    pub role: Option<String>,
}

impl Validate for AssignPersonRequest {
    fn validate(v: &mut Validator<'_>) -> Option<Self> {
        let person_id = v.uuid("personId", "Invalid Person ID format");
        let person_id = v.require("personId", person_id);
        let role = v.string("role");

        Some(Self {
            person_id: person_id?,
            role: role.value().filter(|r| !r.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::validation::{validate, FieldError};
    use serde_json::json;

    fn field_names(err: ApiError) -> Vec<String> {
        match err {
            ApiError::InvalidInput { details, .. } => details.into_iter().map(|d| d.field).collect(),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn register_reports_every_missing_field() {
        let err = validate::<RegisterRequest>(&json!({})).unwrap_err();
        assert_eq!(field_names(err), vec!["username", "password"]);
    }

    #[test]
    fn register_enforces_minimum_lengths() {
        let err = validate::<RegisterRequest>(&json!({ "username": "al", "password": "12345" })).unwrap_err();
        match err {
            ApiError::InvalidInput { details, .. } => assert_eq!(
                details,
                vec![
                    FieldError::new("username", "Username must be at least 3 characters long"),
                    FieldError::new("password", "Password must be at least 6 characters long"),
                ]
            ),
            other => panic!("unexpected {:?}", other),
        }

        let ok = validate::<RegisterRequest>(&json!({ "username": "alice", "password": "secret1" })).unwrap();
        assert_eq!(ok.username, "alice");
    }

    #[test]
    fn login_only_requires_strings() {
        assert!(validate::<LoginRequest>(&json!({ "username": "a", "password": "b" })).is_ok());
        let err = validate::<LoginRequest>(&json!({ "username": 42 })).unwrap_err();
        assert_eq!(field_names(err), vec!["username", "password"]);
    }

    #[test]
    fn company_create_defaults_and_checks() {
        let company = validate::<NewCompany>(&json!({ "name": "Acme" })).unwrap();
        assert_eq!(company.name, "Acme");
        assert_eq!(company.status, None);
        assert!(company.fields.company_type.is_absent());

        let err = validate::<NewCompany>(&json!({
            "type": "BAKERY",
            "website": "nope",
            "interestLevel": 9,
            "status": "LOST",
        }))
        .unwrap_err();
        assert_eq!(field_names(err), vec!["name", "type", "website", "interestLevel", "status"]);
    }

    #[test]
    fn company_patch_is_partial() {
        let patch = validate::<CompanyPatch>(&json!({ "status": "IN_PROGRESS" })).unwrap();
        assert_eq!(patch.status, Some(CompanyStatus::InProgress));
        assert_eq!(patch.name, None);
        assert!(patch.fields.notes.is_absent());

        let patch = validate::<CompanyPatch>(&json!({ "email": "", "notes": null })).unwrap();
        assert_eq!(patch.fields.email, Field::Null);
        assert_eq!(patch.fields.notes, Field::Null);

        let err = validate::<CompanyPatch>(&json!({ "name": "", "status": null })).unwrap_err();
        assert_eq!(field_names(err), vec!["name", "status"]);
    }

    #[test]
    fn person_requires_name() {
        let err = validate::<NewPerson>(&json!({ "email": "bad" })).unwrap_err();
        assert_eq!(field_names(err), vec!["name", "email"]);

        let person = validate::<NewPerson>(&json!({ "name": "Jane Doe", "linkedinUrl": "" })).unwrap();
        assert_eq!(person.name, "Jane Doe");
        assert_eq!(person.fields.linkedin_url, Field::Null);
    }

    #[test]
    fn assign_requires_uuid() {
        let err = validate::<AssignPersonRequest>(&json!({ "personId": "42", "role": "CEO" })).unwrap_err();
        match err {
            ApiError::InvalidInput { details, .. } => {
                assert_eq!(details, vec![FieldError::new("personId", "Invalid Person ID format")])
            }
            other => panic!("unexpected {:?}", other),
        }

        let id = Uuid::new_v4();
        let req = validate::<AssignPersonRequest>(&json!({ "personId": id.to_string() })).unwrap();
        assert_eq!(req.person_id, id);
        assert_eq!(req.role, None);
    }
}
