//! Interpretation of upstream JSON replies.
//!
//! The upstream is inconsistent about types: the success flag arrives as
//! `true`, `1`, `"1"` or `"true"`, numeric fields sometimes arrive as strings,
//! and `error` is either a string or an object with a `msg` field. Everything
//! here is pure and synchronous.

use serde_json::Value;

/// Maximum number of characters of a non-JSON body kept for diagnostics.
pub const PREVIEW_CHARS: usize = 200;

/// Fallback message when a failed reply carries no error field.
const UNKNOWN_ERROR: &str = "unknown upstream error";

/// Returned when a reply body is not JSON.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("upstream reply is not JSON")]
pub struct NotJson {
    pub preview: String,
}

/// A parsed upstream reply.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    body: Value,
}

impl UpstreamReply {
    /// Parses a raw reply body.
    ///
    /// # Errors
    ///
    /// Returns [`NotJson`] carrying the first [`PREVIEW_CHARS`] characters of the
    /// body when it does not decode as JSON (typically an HTML block page).
    pub fn parse(raw: &str) -> Result<Self, NotJson> {
        serde_json::from_str::<Value>(raw)
            .map(|body| Self { body })
            .map_err(|_| NotJson {
                preview: preview(raw),
            })
    }

    /// Whether the upstream reported success.
    pub fn is_success(&self) -> bool {
        self.body.get("success").is_some_and(is_truthy_flag)
    }

    /// Short link from the nested `data.url` field, if present and non-empty.
    pub fn short_url(&self) -> Option<String> {
        self.body
            .pointer("/data/url")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }

    /// Error message coerced to a string.
    ///
    /// Prefers `error.msg`, then a plain string `error`, then the JSON text of
    /// `error`.
    pub fn error_message(&self) -> String {
        match self.body.get("error") {
            None | Some(Value::Null) => UNKNOWN_ERROR.to_string(),
            Some(Value::String(message)) => message.clone(),
            Some(error) => match error.get("msg") {
                Some(Value::String(message)) => message.clone(),
                _ => error.to_string(),
            },
        }
    }

    /// Whether the failure is an alias collision.
    ///
    /// Checks both the coerced message and the full JSON text of `error`, case-insensitively.
    pub fn is_alias_taken(&self) -> bool {
        if self.is_success() {
            return false;
        }

        let raw_error = self
            .body
            .get("error")
            .map(Value::to_string)
            .unwrap_or_default();

        contains_taken(&self.error_message()) || contains_taken(&raw_error)
    }

    /// Integer field under `data`, accepting numbers and numeric strings.
    ///
    /// Missing or unparseable values read as 0.
    pub fn data_int(&self, field: &str) -> i64 {
        match self.body.get("data").and_then(|data| data.get(field)) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn into_value(self) -> Value {
        self.body
    }
}

/// Maps the upstream's success-flag encodings to a strict boolean.
///
/// True for `true`, `1`, `"1"` and `"true"` (case-insensitive, whitespace
/// ignored). Everything else, including `"yes"`, `2`, `null` and objects, is false.
pub fn is_truthy_flag(flag: &Value) -> bool {
    match flag {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
        Value::String(s) => {
            let s = s.trim();
            s == "1" || s.eq_ignore_ascii_case("true")
        }
        _ => false,
    }
}

/// First [`PREVIEW_CHARS`] characters of a body, cut on a char boundary.
pub fn preview(raw: &str) -> String {
    raw.chars().take(PREVIEW_CHARS).collect()
}

fn contains_taken(text: &str) -> bool {
    text.to_ascii_lowercase().contains("taken")
}
