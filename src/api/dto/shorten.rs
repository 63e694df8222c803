//! DTOs for the single and bulk shortening endpoints.

use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

use crate::error::AppError;

/// Query of `GET /short`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortQuery {
    /// Target URL; a missing scheme is filled in later.
    #[validate(length(max = 8192, message = "url must be at most 8192 characters"))]
    pub url: Option<String>,
}

impl ShortQuery {
    /// Returns the URL, rejecting a missing or blank parameter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `url` is absent, blank or too long.
    pub fn into_url(self) -> Result<String, AppError> {
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

/// Body of `POST /bulk`.
#[derive(Debug)]
pub struct BulkRequest {
    pub urls: Vec<String>,
}

impl BulkRequest {
    /// Parses a raw request body.
    ///
    /// The body is decoded by hand so that malformed JSON, a missing `urls`
    /// field and a wrongly typed `urls` field all become 400 responses with
    /// distinct messages, regardless of the request's content type.
    ///
    /// An empty `urls` list is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - the body is not valid JSON
    /// - `urls` is missing or null
    /// - `urls` is not a list of strings
    pub fn from_slice(body: &[u8]) -> Result<Self, AppError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            AppError::bad_request("Invalid JSON body", json!({ "reason": e.to_string() }))
        })?;

        let urls = match value.get("urls") {
            None | Some(Value::Null) => {
                return Err(AppError::bad_request(
                    "Missing 'urls' list in JSON",
                    json!({ "field": "urls" }),
                ));
            }
            Some(urls) => urls.clone(),
        };

        let urls: Vec<String> = serde_json::from_value(urls).map_err(|e| {
            AppError::bad_request(
                "'urls' must be a list of strings",
                json!({ "field": "urls", "reason": e.to_string() }),
            )
        })?;

        Ok(Self { urls })
    }
}
