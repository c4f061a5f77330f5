use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::LocationField;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Planning request failed: {0}")]
    RequestFailed(String),

    #[error("Planning service unreachable: {0}")]
    Unreachable(String),

    #[error("Impact sample failed: {0}")]
    SampleFailed(String),

    #[error("Unknown route candidate: {0}")]
    UnknownCandidate(String),

    #[error("No place selected for {0} location")]
    PlaceUnresolved(LocationField),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.clone()),
            AppError::RequestFailed(ref e) | AppError::Unreachable(ref e) => {
                tracing::error!("Upstream error: {}", e);
                (StatusCode::BAD_GATEWAY, "Planning service error".to_string())
            }
            AppError::SampleFailed(ref e) => {
                tracing::warn!("Impact sample failed: {}", e);
                (StatusCode::BAD_GATEWAY, "Impact service error".to_string())
            }
            AppError::UnknownCandidate(ref id) => {
                (StatusCode::NOT_FOUND, format!("Unknown route candidate: {}", id))
            }
            AppError::PlaceUnresolved(field) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("No place selected for {} location", field),
            ),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
