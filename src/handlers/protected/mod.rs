// handlers/protected/mod.rs - Protected handlers (JWT authentication required)

pub mod activity_logs;
pub mod assignments;
pub mod auth;
pub mod companies;
pub mod people;

use uuid::Uuid;

use crate::error::ApiError;

/// Parse a path id. Anything that is not a UUID cannot name an existing
/// row, so it is reported as not found.
pub(crate) fn parse_id(raw: &str, label: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(format!("{} not found", label)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_ids_are_not_found() {
        let err = parse_id("42", "Company").unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Company not found");

        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "Company").unwrap(), id);
    }
}
