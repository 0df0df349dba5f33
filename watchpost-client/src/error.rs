//! Error types for the monitoring API client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the monitoring client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Writing a downloaded body failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Check if retrying the same call could succeed
    ///
    /// Transport failures, timeouts, rate limiting and 5xx responses are
    /// transient. Other 4xx responses (bad credentials, malformed queries)
    /// and local errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed(e) => !e.is_builder() && !e.is_decode(),
            Self::ApiError { status, .. } => {
                *status == 408 || *status == 429 || *status >= 500
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let not_found = ClientError::api_error(404, "no such rule");
        assert!(not_found.is_not_found());
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());
        assert!(!not_found.is_transient());

        let unavailable = ClientError::api_error(503, "try later");
        assert!(unavailable.is_server_error());
        assert!(unavailable.is_transient());

        assert!(ClientError::api_error(429, "slow down").is_transient());
        assert!(ClientError::api_error(408, "timeout").is_transient());
        assert!(!ClientError::api_error(403, "forbidden").is_transient());
    }

    #[test]
    fn test_local_errors_are_not_transient() {
        assert!(ClientError::NotFound("rule".into()).is_not_found());
        assert!(!ClientError::ParseError("bad json".into()).is_transient());
        assert!(!ClientError::InvalidRequest("empty id".into()).is_transient());
    }
}
