//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{LinkService, LookupService};
use crate::config::Config;
use crate::infrastructure::upstream::{GatewayBuildError, UlvisGateway};

/// Services shared by all handlers.
///
/// Both services hold the same gateway, so every request reuses one HTTP
/// connection pool.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<UlvisGateway>>,
    pub lookup_service: Arc<LookupService<UlvisGateway>>,
}

impl AppState {
    pub fn new(gateway: Arc<UlvisGateway>, config: &Config) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(gateway.clone(), config.link_policy())),
            lookup_service: Arc::new(LookupService::new(gateway)),
        }
    }

    /// Builds the gateway and services from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayBuildError`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, GatewayBuildError> {
        let gateway = Arc::new(UlvisGateway::from_config(config)?);
        Ok(Self::new(gateway, config))
    }
}
