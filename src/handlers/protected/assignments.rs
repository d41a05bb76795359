// handlers/protected/assignments.rs - /api/companies/:id/people(/:personId)

use axum::{
    extract::{Path, State},
    Extension,
};

use super::parse_id;
use crate::app::AppState;
use crate::database::models::{AssignedPerson, Assignment};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidJson};
use crate::validation::AssignPersonRequest;

pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(company_id): Path<String>,
) -> ApiResult<Vec<AssignedPerson>> {
    let company_id = parse_id(&company_id, "Company")?;
    let people = state
        .relationships()
        .list_people_for_company(auth.user_id, company_id)
        .await?;
    Ok(ApiResponse::ok(people))
}

pub async fn assign(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(company_id): Path<String>,
    ValidJson(req): ValidJson<AssignPersonRequest>,
) -> ApiResult<Assignment> {
    let company_id = parse_id(&company_id, "Company")?;
    let assignment = state.relationships().assign(auth.user_id, company_id, req).await?;
    Ok(ApiResponse::created(assignment))
}

pub async fn unassign(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((company_id, person_id)): Path<(String, String)>,
) -> ApiResult<()> {
    let company_id = parse_id(&company_id, "Company")?;
    let person_id = parse_id(&person_id, "Assignment")?;
    state
        .relationships()
        .unassign(auth.user_id, company_id, person_id)
        .await?;
    Ok(ApiResponse::no_content())
}
