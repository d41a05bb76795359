// handlers/public/auth.rs - POST /api/auth/register, POST /api/auth/login

use axum::extract::State;
use serde::Serialize;

use crate::app::AppState;
use crate::database::models::UserProfile;
use crate::middleware::{ApiResponse, ApiResult, ValidJson};
use crate::validation::{LoginRequest, RegisterRequest};

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/auth/register → 201 `{id, username}`
pub async fn register(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> ApiResult<UserProfile> {
    let user = state.users().register(req).await?;
    Ok(ApiResponse::created(user))
}

/// POST /api/auth/login → 200 `{token}`
pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> ApiResult<TokenResponse> {
    let token = state.users().login(req).await?;
    Ok(ApiResponse::ok(TokenResponse { token }))
}
