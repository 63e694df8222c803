//! Gateway trait for the upstream shortening service.

use async_trait::async_trait;

/// Parameters of one create call.
///
/// The one-time-use and private flags are always set by implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLinkRequest {
    /// Normalized target URL.
    pub url: String,
    /// Requested custom slug.
    pub alias: String,
}

/// Transport-level failures of a gateway call.
///
/// Non-2xx statuses are not errors here: the body is returned and interpreted
/// by the caller, since the upstream reports failures inside the body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream transport error: {0}")]
    Transport(String),
}

/// Access to the upstream link-shortening API.
///
/// Implementations must be cheap to share across tasks; the link service calls
/// them concurrently from one instance.
///
/// # Implementations
///
/// - [`crate::infrastructure::upstream::UlvisGateway`] - reqwest-backed HTTP client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortenerGateway: Send + Sync {
    /// Asks the upstream to create a link and returns the raw reply body.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Timeout`] when the call exceeds the configured timeout.
    /// Returns [`GatewayError::Transport`] on connection or body read failures.
    async fn create(&self, request: &CreateLinkRequest) -> Result<String, GatewayError>;

    /// Reads metadata of an existing alias and returns the raw reply body.
    ///
    /// # Errors
    ///
    /// Same as [`ShortenerGateway::create`].
    async fn read(&self, alias: &str) -> Result<String, GatewayError>;
}
