//! Error types for `apisearch-tools`.

use thiserror::Error;

/// Main error type for API-search tooling.
///
/// Everything that can go wrong during a single tool call is a variant here;
/// callers at the protocol boundary convert any of these into an
/// error-flagged tool result rather than letting them propagate.
#[derive(Error, Debug)]
pub enum ApiSearchError {
    /// A call named a tool absent from the registry.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A required call argument was omitted.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// A call argument was present but had the wrong type or value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The upstream service answered with a non-2xx status.
    ///
    /// The display carries the raw response body so the upstream's own
    /// message reaches the caller unchanged; the status is kept for logging.
    #[error("{body}")]
    Upstream { status: u16, body: String },

    /// Network-level failure reaching the upstream (DNS, connect, timeout).
    #[error("http transport error: {0}")]
    Transport(String),

    /// The upstream claimed success but the body failed JSON parsing when
    /// JSON output was requested.
    #[error("upstream returned malformed JSON: {source}")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for API-search tooling operations.
pub type Result<T> = std::result::Result<T, ApiSearchError>;

impl From<reqwest::Error> for ApiSearchError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}
