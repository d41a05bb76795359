// handlers/protected/auth.rs - GET /api/auth/me

use axum::{extract::State, Extension};

use crate::app::AppState;
use crate::auth::Identity;
use crate::database::models::UserProfile;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

pub async fn me(State(state): State<AppState>, Extension(auth): Extension<AuthUser>) -> ApiResult<UserProfile> {
    let profile = state.users().profile(&Identity::from(&auth)).await?;
    Ok(ApiResponse::ok(profile))
}
