//! Configuration types for the upstream gateway.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production API-search service host.
pub const DEFAULT_BASE_URL: &str = "https://oapis.org";

/// Immutable upstream configuration, constructed once at process start.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the API-search service. Trailing slashes are tolerated.
    pub base_url: String,
    /// Per-request timeout. `None` (the default) applies no timeout beyond
    /// whatever the transport itself enforces; a single attempt is made
    /// either way, with no retry.
    pub timeout: Option<Duration>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Requested encoding of a tool result.
///
/// Drives the `Accept` header on the upstream request and whether the
/// response body is re-encoded before being returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// `Accept` header value sent upstream for this format.
    #[must_use]
    pub const fn accept_header(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Yaml => "text/yaml",
        }
    }

    /// Parse a tool-call `format` argument. Only the two wire spellings are
    /// accepted; anything else is a caller error.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "json" => Some(Self::Json),
            "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}
