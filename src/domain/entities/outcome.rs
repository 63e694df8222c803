//! Shortening outcome entities.

use serde::{Deserialize, Serialize};

use crate::domain::gateways::GatewayError;

/// A link the upstream accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub short_url: String,
    pub alias: String,
}

/// Terminal failure of one link creation run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkFailure {
    #[error("could not generate a unique alias after {attempts} attempts")]
    AliasExhausted { attempts: u32 },

    #[error("invalid upstream response (likely blocked)")]
    InvalidResponse { preview: String },

    #[error("upstream request timed out")]
    TimedOut,

    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<GatewayError> for LinkFailure {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::Timeout => LinkFailure::TimedOut,
            GatewayError::Transport(message) => LinkFailure::Transport(message),
        }
    }
}

impl LinkFailure {
    /// Raw body snippet kept for operators when the upstream reply was not JSON.
    pub fn preview(&self) -> Option<&str> {
        match self {
            LinkFailure::InvalidResponse { preview } => Some(preview),
            _ => None,
        }
    }
}

/// Normalized result of shortening one URL.
///
/// Exactly one of (`short_url`, `alias`) or `error` is present, depending on
/// `success`. Build values through [`ShortenOutcome::succeeded`] and
/// [`ShortenOutcome::failed`] to keep that shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenOutcome {
    pub success: bool,
    pub original_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_preview: Option<String>,
}

impl ShortenOutcome {
    pub fn succeeded(original_url: impl Into<String>, link: CreatedLink) -> Self {
        Self {
            success: true,
            original_url: original_url.into(),
            short_url: Some(link.short_url),
            alias: Some(link.alias),
            error: None,
            raw_preview: None,
        }
    }

    pub fn failed(original_url: impl Into<String>, failure: &LinkFailure) -> Self {
        Self {
            success: false,
            original_url: original_url.into(),
            short_url: None,
            alias: None,
            error: Some(failure.to_string()),
            raw_preview: failure.preview().map(str::to_string),
        }
    }

    pub fn from_result(
        original_url: impl Into<String>,
        result: Result<CreatedLink, LinkFailure>,
    ) -> Self {
        match result {
            Ok(link) => Self::succeeded(original_url, link),
            Err(failure) => Self::failed(original_url, &failure),
        }
    }
}

/// Ordered outcomes of a batch, one per input URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub success: bool,
    pub total_processed: usize,
    pub results: Vec<ShortenOutcome>,
}

impl BatchResult {
    pub fn new(results: Vec<ShortenOutcome>) -> Self {
        Self {
            success: true,
            total_processed: results.len(),
            results,
        }
    }

    /// Number of outcomes with `success == true`.
    pub fn successful(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }
}
