use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by the matching engine itself.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A required field (candidate skills, posting requirements) is missing.
    #[error("Malformed input: required field '{field}' is missing or empty")]
    MalformedInput { field: String },

    /// Nothing left to rank once already-applied postings are excluded.
    #[error("No postings to rank after exclusion")]
    EmptyPostingPool,

    #[error("Invalid matching configuration: {0}")]
    InvalidConfig(String),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Match(MatchError::MalformedInput { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MALFORMED_INPUT",
                self.to_string(),
            ),
            AppError::Match(MatchError::EmptyPostingPool) => (
                StatusCode::NOT_FOUND,
                "NO_JOBS_TO_RECOMMEND",
                "No new jobs to recommend. You may have already applied to all available positions."
                    .to_string(),
            ),
            AppError::Match(e @ MatchError::InvalidConfig(_)) => {
                tracing::error!("Matching config error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_maps_to_user_visible_404() {
        let response = AppError::from(MatchError::EmptyPostingPool).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_malformed_input_maps_to_422() {
        let err = AppError::from(MatchError::MalformedInput {
            field: "candidate.skills".to_string(),
        });
        assert!(err.to_string().contains("candidate.skills"));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("limit must be positive".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
