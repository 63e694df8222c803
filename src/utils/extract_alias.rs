//! Alias extraction from short links.

use crate::AppError;
use serde_json::json;

/// Extracts the alias from a short link or returns a bare alias unchanged.
///
/// Handles:
/// - Full links (e.g., `https://ulvis.net/AbCd`)
/// - Trailing slashes (e.g., `ulvis.net/AbCd/`)
/// - Bare aliases (e.g., `AbCd`)
///
/// Query strings and fragments are ignored.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no alias segment can be found.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_alias("https://ulvis.net/AbCd/").unwrap(), "AbCd");
/// assert_eq!(extract_alias("AbCd").unwrap(), "AbCd");
/// ```
pub fn extract_alias(link: &str) -> Result<String, AppError> {
    let trimmed = link.trim();

    let (has_scheme, without_scheme) = match trimmed.find("://") {
        Some(pos) => (true, &trimmed[pos + 3..]),
        None => (false, trimmed),
    };

    let without_suffix = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or(without_scheme);

    let path = without_suffix.trim_end_matches('/');
    let alias = path.rsplit('/').next().unwrap_or_default();

    // A link that is only a host (`https://ulvis.net/`) has no alias segment.
    let host_only = (has_scheme || without_scheme.contains('/')) && !path.contains('/');

    if alias.is_empty() || host_only {
        return Err(AppError::bad_request(
            "Could not find an alias in the link",
            json!({ "link": link }),
        ));
    }

    Ok(alias.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_alias_full_link() {
        assert_eq!(extract_alias("https://ulvis.net/AbCd").unwrap(), "AbCd");
    }

    #[test]
    fn test_extract_alias_trailing_slash() {
        assert_eq!(extract_alias("https://ulvis.net/AbCd/").unwrap(), "AbCd");
    }

    #[test]
    fn test_extract_alias_without_scheme() {
        assert_eq!(extract_alias("ulvis.net/x9Yz").unwrap(), "x9Yz");
    }

    #[test]
    fn test_extract_alias_bare() {
        assert_eq!(extract_alias("Q1w2").unwrap(), "Q1w2");
    }

    #[test]
    fn test_extract_alias_ignores_query() {
        assert_eq!(
            extract_alias("https://ulvis.net/AbCd?ref=mail#top").unwrap(),
            "AbCd"
        );
    }

    #[test]
    fn test_extract_alias_trims_whitespace() {
        assert_eq!(extract_alias("  https://ulvis.net/AbCd  ").unwrap(), "AbCd");
    }

    #[test]
    fn test_extract_alias_empty() {
        assert!(extract_alias("").is_err());
    }

    #[test]
    fn test_extract_alias_host_only() {
        assert!(extract_alias("https://ulvis.net/").is_err());
        assert!(extract_alias("https://ulvis.net").is_err());
    }
}
