//! Error types for the end-to-end fixture

use thiserror::Error;
use watchpost_client::ClientError;

/// Result type alias for fixture operations
pub type Result<T> = std::result::Result<T, FixtureError>;

/// Errors surfaced to test cases
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A search returned no data: either on a single lookup, or on every
    /// attempt of a poll
    #[error("no data matched `{query}` after {attempts} attempt(s)")]
    LookupFailed {
        /// The search query
        query: String,
        /// Number of lookups performed
        attempts: u32,
    },

    /// The API call itself failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Local file handling failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A retry schedule violated its invariants
    #[error("invalid retry schedule: {0}")]
    InvalidSchedule(String),
}

impl FixtureError {
    pub fn lookup_failed(query: impl Into<String>, attempts: u32) -> Self {
        Self::LookupFailed {
            query: query.into(),
            attempts,
        }
    }

    /// Check if this error means "data not observed in time"
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::LookupFailed { .. })
    }
}
