// handlers/protected/people.rs - /api/people

use axum::{
    extract::{Path, State},
    Extension,
};

use super::parse_id;
use crate::app::AppState;
use crate::database::models::{Person, PersonWithCompanies};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidJson};
use crate::validation::{NewPerson, PersonPatch};

pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Vec<PersonWithCompanies>> {
    Ok(ApiResponse::ok(state.people().list(auth.user_id).await?))
}

pub async fn show(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Person> {
    let id = parse_id(&id, "Person")?;
    Ok(ApiResponse::ok(state.people().get(auth.user_id, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidJson(input): ValidJson<NewPerson>,
) -> ApiResult<Person> {
    Ok(ApiResponse::created(state.people().create(auth.user_id, input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    ValidJson(patch): ValidJson<PersonPatch>,
) -> ApiResult<Person> {
    let id = parse_id(&id, "Person")?;
    Ok(ApiResponse::ok(state.people().update(auth.user_id, id, patch).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id, "Person")?;
    state.people().delete(auth.user_id, id).await?;
    Ok(ApiResponse::no_content())
}
