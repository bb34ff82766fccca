//! Error types for SPD harvest
//!
//! All fetch-side failures funnel into [`HarvestError`]. Retry exhaustion and
//! non-retryable statuses carry the offending URL so a failed run can be
//! resumed by hand.

use thiserror::Error;

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Main error type for harvest operations
#[derive(Error, Debug)]
pub enum HarvestError {
    /// HTTP transport failure (connection, timeout, TLS)
    #[error("Network request failed: {0}. Check your internet connection.")]
    Http(#[from] reqwest::Error),

    /// Retryable server errors persisted past the retry budget
    #[error("Server error {status} from '{url}' persisted after {attempts} attempts. The service may be down; retry later.")]
    RetriesExhausted {
        url: String,
        status: u16,
        attempts: u32,
    },

    /// A non-retryable HTTP status (e.g. 4xx) was returned
    #[error("Request to '{url}' failed with status {status}. Check the query URL.")]
    Status { url: String, status: u16 },

    /// Response body was not the expected JSON shape
    #[error("Failed to parse API response: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),
}
