//! Statistics source errors

use thiserror::Error;

/// Result type for statistics queries
pub type StatisticsResult<T> = Result<T, StatisticsError>;

#[derive(Debug, Error)]
pub enum StatisticsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("statistics query failed: {code}: {message}")]
    Query { code: String, message: String },

    #[error("statistics query timed out after {0:?}")]
    Timeout(std::time::Duration),
}
