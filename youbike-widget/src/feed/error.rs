//! Station feed error types.

/// Errors that can occur when fetching or decoding the station feed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A record decoded but holds impossible values
    #[error("invalid station {id}: {reason}")]
    InvalidStation { id: String, reason: String },

    /// Non-HTTP source failed (mock feed file, test transports)
    #[error("transport error: {0}")]
    Transport(String),
}
