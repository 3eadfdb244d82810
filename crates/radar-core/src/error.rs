use thiserror::Error;

/// Application-wide error types for Research Radar.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// An upstream payload could not be parsed.
    #[error("Parse error ({adapter}): {message}")]
    ParseError { adapter: String, message: String },

    /// Configuration document could not be read or interpreted.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Snapshot or archive file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    pub fn parse(adapter: impl Into<String>, message: impl ToString) -> Self {
        AppError::ParseError {
            adapter: adapter.into(),
            message: message.to_string(),
        }
    }

    /// Returns true for transport-level failures (the ones the retry
    /// wrapper is allowed to repeat).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::HttpError(_) | AppError::Timeout(_) | AppError::NetworkError(_)
        )
    }
}
