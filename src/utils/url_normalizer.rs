//! Target URL normalization before dispatch to the upstream.
//!
//! Callers often submit bare hosts such as `example.com`. These get an
//! `https://` scheme prepended; the rest of the URL is passed through as typed
//! so the upstream sees what the caller asked for.

use url::Url;

/// Scheme prepended to URLs submitted without one.
pub const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL has no host")]
    MissingHost,
}

/// Normalizes a caller-supplied target URL.
///
/// # Normalization Rules
///
/// 1. **Whitespace**: Leading and trailing whitespace is trimmed
/// 2. **Scheme**: `https://` is prepended unless the input already starts with
///    `http://` or `https://` (case-insensitive)
/// 3. **Everything else**: Preserved as-is (no trailing slash is added)
///
/// The result must parse as an absolute URL with a host.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::Empty`] for blank input.
/// Returns [`UrlNormalizationError::InvalidFormat`] when the prefixed URL does not parse.
/// Returns [`UrlNormalizationError::MissingHost`] when it parses without a host.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
/// assert_eq!(normalize_url("http://example.com/a").unwrap(), "http://example.com/a");
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    let prefixed = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{trimmed}")
    };

    let parsed =
        Url::parse(&prefixed).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::MissingHost);
    }

    Ok(prefixed)
}

fn has_http_scheme(input: &str) -> bool {
    let lower = input
        .get(..8)
        .unwrap_or(input)
        .to_ascii_lowercase();

    lower.starts_with("http://") || lower.starts_with("https://")
}
