//! Error types for fraggate-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid identity digits: {digits}")]
    InvalidIdentity { digits: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
