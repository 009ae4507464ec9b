//! Error types for the StudyHub API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::validate::FieldError;

/// Errors that can occur while handling a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed validation.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Missing, invalid or expired session token.
    #[error("unauthorized")]
    Unauthorized,

    /// Requested entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] database::DatabaseError),

    /// Content generation error.
    #[error("Content generation failed: {0}")]
    Tutor(#[from] tutor_core::TutorError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": "Validation failed",
                    "fields": fields,
                }),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "error": "Unauthorized" }),
            ),
            ApiError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({ "error": format!("{entity} not found") }),
            ),
            ApiError::Database(err) => match &err {
                database::DatabaseError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    serde_json::json!({ "error": format!("{entity} not found") }),
                ),
                database::DatabaseError::AlreadyExists { entity, .. } => (
                    StatusCode::CONFLICT,
                    serde_json::json!({ "error": format!("{entity} already exists") }),
                ),
                _ => {
                    tracing::error!("Database error: {}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        serde_json::json!({ "error": "Internal server error" }),
                    )
                }
            },
            ApiError::Tutor(err) => {
                tracing::error!("Content generation failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": format!("Content generation failed: {err}") }),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use database::DatabaseError;
    use tutor_core::TutorError;

    fn status_of(error: ApiError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(ApiError::Validation(vec![FieldError::new(
                "name",
                "name cannot be empty"
            )])),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(ApiError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(ApiError::NotFound("Workspace")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::Database(DatabaseError::NotFound {
                entity: "Message",
                id: "7".to_string(),
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::Database(DatabaseError::AlreadyExists {
                entity: "Bookmark",
                id: "1/2".to_string(),
            })),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ApiError::Tutor(TutorError::Network("timed out".to_string()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ApiError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
