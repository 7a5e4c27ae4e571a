//! LLM error types

use thiserror::Error;

/// Errors that can occur during a completion request
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// HTTP status code, if this error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_api_error() {
        let err = LlmError::ApiError {
            status: 500,
            message: "Server error".to_string(),
        };
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_status_for_other_errors() {
        assert_eq!(LlmError::InvalidResponse("bad".to_string()).status(), None);
    }

    #[test]
    fn test_error_display() {
        let err = LlmError::ApiError {
            status: 429,
            message: "slow down".to_string(),
        };
        assert_eq!(err.to_string(), "API error 429: slow down");

        let err = LlmError::InvalidResponse("no content".to_string());
        assert_eq!(err.to_string(), "Invalid response: no content");
    }
}
