use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::validation::{validate, Validate};

/// JSON body checked against schema `T` before the handler runs
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state)
            .await
            .map_err(body_error)?;

        Ok(ValidJson(validate::<T>(&payload)?))
    }
}

fn body_error(rejection: JsonRejection) -> ApiError {
    tracing::debug!("Unreadable request body: {}", rejection.body_text());

    // The body limit surfaces as a buffering failure carrying 413
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::payload_too_large("Request body too large");
    }

    match rejection {
        JsonRejection::MissingJsonContentType(_) => ApiError::invalid_field(
            "body",
            "Expected request with `Content-Type: application/json`",
        ),
        JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
            ApiError::invalid_field("body", "Request body must be valid JSON")
        }
        _ => ApiError::invalid_field("body", "Failed to read request body"),
    }
}
