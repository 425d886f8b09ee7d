//! Server error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("forbidden")]
    Forbidden,

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Command channel error: {0}")]
    Command(String),

    #[error("Command channel not configured")]
    CommandNotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Forbidden => StatusCode::FORBIDDEN,
            ServerError::Backend(_) => StatusCode::BAD_GATEWAY,
            ServerError::Command(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::CommandNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Http(_) => StatusCode::BAD_GATEWAY,
            ServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Json(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
