use axum::{
    extract::multipart::MultipartError,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json
};
use thiserror::Error;
use tracing::error;

use crate::generator::GenerationError;
use crate::repo::RepoError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Storage error: {0}")]
    Storage(RepoError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Error generating flashcards: {0}")]
    Generation(#[from] GenerationError),
    #[error("Flashcard generation is not configured")]
    GeneratorUnavailable,
    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(what) => ApiError::NotFound(format!("{} not found", what)),
            RepoError::Conflict(message) => ApiError::Conflict(message),
            other => ApiError::Storage(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Storage(err) => {
                error!("Storage failure: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Generation(err) => {
                error!("Generation failure: {}", err);
                StatusCode::BAD_GATEWAY
            }
            ApiError::GeneratorUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            // Oversized bodies surface here as 413
            ApiError::Multipart(err) => err.status(),
        };

        let body = Json(serde_json::json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
