use thiserror::Error;

/// Engine-wide error type, consolidating all possible failures into a single enum.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// Represents data validation errors (e.g., malformed request input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents a failure reported by an external classification provider
    /// (non-success status, malformed model response, unreachable endpoint).
    #[error("Provider error: {0}")]
    Provider(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::time::error::Elapsed> for EngineError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        EngineError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Provider(format!("JSON error: {}", err))
    }
}

impl From<url::ParseError> for EngineError {
    fn from(err: url::ParseError) -> Self {
        EngineError::Validation(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(err: validator::ValidationErrors) -> Self {
        EngineError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EngineError::Timeout(format!("HTTP request timed out: {}", err))
        } else {
            EngineError::Provider(format!("HTTP error: {}", err))
        }
    }
}
