// handlers/protected/companies.rs - /api/companies

use axum::{
    extract::{Path, State},
    Extension,
};

use super::parse_id;
use crate::app::AppState;
use crate::database::models::Company;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidJson};
use crate::validation::{CompanyPatch, NewCompany};

pub async fn list(State(state): State<AppState>, Extension(auth): Extension<AuthUser>) -> ApiResult<Vec<Company>> {
    Ok(ApiResponse::ok(state.companies().list(auth.user_id).await?))
}

pub async fn show(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Company> {
    let id = parse_id(&id, "Company")?;
    Ok(ApiResponse::ok(state.companies().get(auth.user_id, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidJson(input): ValidJson<NewCompany>,
) -> ApiResult<Company> {
    Ok(ApiResponse::created(state.companies().create(auth.user_id, input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    ValidJson(patch): ValidJson<CompanyPatch>,
) -> ApiResult<Company> {
    let id = parse_id(&id, "Company")?;
    Ok(ApiResponse::ok(state.companies().update(auth.user_id, id, patch).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id, "Company")?;
    state.companies().delete(auth.user_id, id).await?;
    Ok(ApiResponse::no_content())
}
