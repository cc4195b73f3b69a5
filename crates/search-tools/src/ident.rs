//! API identifier formatting.
//!
//! The upstream service addresses specifications by a single path segment.
//! Known identifiers (e.g. `openai`) are used as-is; URL-shaped identifiers
//! are flattened into a delimiter-safe segment by stripping the protocol and
//! replacing `/` with `__`.

/// Canonicalize an API identifier into the path segment the upstream expects.
///
/// If `id` starts with `http://` or `https://` (case-sensitive, exactly
/// those two schemes), the prefix is stripped once and every `/` in the
/// remainder becomes `__`. Consecutive slashes are not collapsed. Any other
/// input, including the empty string, is returned unchanged, which makes the
/// function idempotent on its own output.
#[must_use]
pub fn format_api_id(id: &str) -> String {
    for scheme in ["https://", "http://"] {
        if let Some(rest) = id.strip_prefix(scheme) {
            return rest.replace('/', "__");
        }
    }
    id.to_string()
}
