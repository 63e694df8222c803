//! Random alias generation for upstream custom slugs.
//!
//! Aliases are proposed to the upstream as the `custom` parameter. Nothing here
//! checks uniqueness; the upstream rejects taken aliases and the link service
//! retries with a fresh one.

use rand::Rng;

/// Alphabet aliases are drawn from: `A-Z`, `a-z`, `0-9`.
pub const ALIAS_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Alias length used when none is configured.
pub const DEFAULT_ALIAS_LENGTH: usize = 4;

/// Generates a random alias of exactly `length` characters.
///
/// Each character is chosen independently and uniformly from [`ALIAS_CHARSET`]
/// using the thread-local RNG, so concurrent callers share no state.
///
/// # Examples
///
/// ```ignore
/// let alias = generate_alias(4);
/// assert_eq!(alias.len(), 4);
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_alias(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ALIAS_CHARSET.len());
            ALIAS_CHARSET[idx] as char
        })
        .collect()
}
