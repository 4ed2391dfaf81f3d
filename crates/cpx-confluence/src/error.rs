//! Error types for the Confluence client.

/// Error from Confluence API operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfluenceError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// Server rejected the credentials.
    #[error("authentication rejected (HTTP {status}), check username and API token")]
    Unauthorized {
        /// HTTP status code (401 or 403).
        status: u16,
    },

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Response payload is not the expected JSON.
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
}
