//! Read-back of existing short links.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::domain::entities::LinkReport;
use crate::domain::gateways::{GatewayError, ShortenerGateway};
use crate::domain::upstream_reply::UpstreamReply;
use crate::error::AppError;
use crate::utils::extract_alias::extract_alias;

/// Service for reading link metadata back from the upstream.
pub struct LookupService<G: ShortenerGateway> {
    gateway: Arc<G>,
}

impl<G: ShortenerGateway> LookupService<G> {
    /// Creates a new lookup service.
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Returns the upstream's JSON for an alias verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadGateway`] if the upstream reply is not JSON or
    /// the transport fails.
    /// Returns [`AppError::GatewayTimeout`] if the call times out.
    pub async fn read(&self, alias: &str) -> Result<Value, AppError> {
        Ok(self.fetch(alias).await?.into_value())
    }

    /// Reports whether the link behind a short URL (or bare alias) was opened.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if no alias can be extracted.
    /// Returns [`AppError::NotFound`] if the upstream does not know the alias.
    /// Otherwise the same errors as [`Self::read`].
    pub async fn verify(&self, link: &str) -> Result<LinkReport, AppError> {
        let alias = extract_alias(link)?;
        let reply = self.fetch(&alias).await?;

        if !reply.is_success() {
            debug!(alias, "Upstream does not know alias");
            return Err(AppError::not_found(
                "Link not found",
                json!({ "alias": alias }),
            ));
        }

        let hits = reply.data_int("hits").max(0) as u64;
        let last = reply.data_int("last");

        Ok(LinkReport::new(alias, hits, last))
    }

    async fn fetch(&self, alias: &str) -> Result<UpstreamReply, AppError> {
        let body = self
            .gateway
            .read(alias)
            .await
            .map_err(|e| map_gateway_error(alias, e))?;

        UpstreamReply::parse(&body).map_err(|e| {
            warn!(alias, preview = %e.preview, "Upstream returned a non-JSON reply");
            AppError::bad_gateway(
                "Invalid upstream response",
                json!({ "alias": alias, "raw_preview": e.preview }),
            )
        })
    }
}

fn map_gateway_error(alias: &str, error: GatewayError) -> AppError {
    warn!(alias, "Upstream read failed: {}", error);

    match error {
        GatewayError::Timeout => {
            AppError::gateway_timeout("Upstream request timed out", json!({ "alias": alias }))
        }
        GatewayError::Transport(reason) => AppError::bad_gateway(
            "Upstream request failed",
            json!({ "alias": alias, "reason": reason }),
        ),
    }
}
