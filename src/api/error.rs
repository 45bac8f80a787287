//! API error types for the Issuetrak client.
//!
//! Only transport-level failures are errors here. A response with a
//! non-success status code is still a response and is handed back to the
//! caller untouched.

use thiserror::Error;

/// Errors that can occur when talking to the Issuetrak API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured base URL cannot be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The API key cannot be sent as a header value.
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    /// A request body could not be serialized to JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Keyring error when storing/retrieving API keys.
    #[error("Keyring error: {0}")]
    Keyring(String),

    /// Every attempt of a retried request failed.
    #[error("Request failed after {0} attempts")]
    RetriesExhausted(u32),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Check if the error is a transient transport failure worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Network(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_display() {
        let err = ApiError::InvalidUrl("not a url".to_string());
        assert_eq!(err.to_string(), "Invalid URL: not a url");
    }

    #[test]
    fn test_retries_exhausted_display() {
        let err = ApiError::RetriesExhausted(3);
        assert_eq!(err.to_string(), "Request failed after 3 attempts");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ApiError = json_err.into();
        assert!(matches!(err, ApiError::Serialization(_)));
        assert!(err.to_string().starts_with("Failed to serialize request body"));
    }

    #[test]
    fn test_non_network_errors_are_not_transient() {
        assert!(!ApiError::InvalidUrl("x".to_string()).is_transient());
        assert!(!ApiError::Keyring("x".to_string()).is_transient());
        assert!(!ApiError::RetriesExhausted(3).is_transient());
    }
}
