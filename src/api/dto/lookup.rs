//! DTOs for the read and verify endpoints.

use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::sync::LazyLock;
use validator::Validate;

use crate::error::AppError;

/// Compiled regex for alias validation.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Query of `GET /read`.
#[derive(Debug, Deserialize, Validate)]
pub struct ReadQuery {
    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = *ALIAS_REGEX, message = "alias may only contain letters, digits, '-' and '_'"))]
    pub alias: Option<String>,
}

impl ReadQuery {
    /// Returns the validated alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `alias` is absent or malformed.
    pub fn into_alias(self) -> Result<String, AppError> {
        self.validate()?;

        self.alias.ok_or_else(|| {
            AppError::bad_request("Missing 'alias' parameter", json!({ "parameter": "alias" }))
        })
    }
}

/// Query of `GET /verify`.
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyQuery {
    /// Short link or bare alias.
    #[validate(length(min = 1, max = 2048))]
    pub url: Option<String>,
}

impl VerifyQuery {
    /// Returns the short link to verify.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `url` is absent or blank.
    pub fn into_link(self) -> Result<String, AppError> {
        self.validate()?;

        match self.url {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(AppError::bad_request(
                "Missing 'url' parameter",
                json!({ "parameter": "url" }),
            )),
        }
    }
}
