// handlers/protected/activity_logs.rs - GET /api/activity-logs

use axum::{extract::State, Extension};

use crate::app::AppState;
use crate::database::models::ActivityLogItem;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Vec<ActivityLogItem>> {
    Ok(ApiResponse::ok(state.activity_logs().list_for_owner(auth.user_id).await?))
}
