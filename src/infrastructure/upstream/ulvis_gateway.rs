//! ulvis.net implementation of the shortener gateway.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, REFERER, USER_AGENT};
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::domain::gateways::{CreateLinkRequest, GatewayError, ShortenerGateway};

const ACCEPT_VALUE: &str = "application/json, text/javascript, */*; q=0.01";
const REFERER_VALUE: &str = "https://ulvis.net/";
const REQUESTED_WITH_HEADER: &str = "x-requested-with";
const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

/// Errors raised while building the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayBuildError {
    #[error("invalid upstream endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// HTTP gateway to the ulvis.net API.
///
/// Holds one connection-pooled [`Client`] shared by every concurrent call.
/// Requests carry browser-like headers because the upstream tends to block
/// obvious bots; this only improves the odds of a JSON reply.
#[derive(Clone)]
pub struct UlvisGateway {
    client: Client,
    create_endpoint: Url,
    read_endpoint: Url,
}

impl UlvisGateway {
    /// Builds a gateway from the upstream section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayBuildError`] if an endpoint or the user agent is invalid,
    /// or the TLS backend cannot be initialised.
    pub fn from_config(config: &Config) -> Result<Self, GatewayBuildError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.upstream_user_agent)?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(REFERER, HeaderValue::from_static(REFERER_VALUE));
        headers.insert(
            REQUESTED_WITH_HEADER,
            HeaderValue::from_static(REQUESTED_WITH_VALUE),
        );

        let client = Client::builder()
            .timeout(config.upstream_timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            create_endpoint: Url::parse(&config.upstream_create_url)?,
            read_endpoint: Url::parse(&config.upstream_read_url)?,
        })
    }

    /// Create-call URL with the fixed one-time and private flags.
    pub fn create_url(&self, request: &CreateLinkRequest) -> Url {
        let mut url = self.create_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("url", &request.url)
            .append_pair("type", "json")
            .append_pair("uses", "1")
            .append_pair("private", "1")
            .append_pair("custom", &request.alias);
        url
    }

    pub fn read_url(&self, alias: &str) -> Url {
        let mut url = self.read_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("id", alias)
            .append_pair("type", "json");
        url
    }

    async fn fetch_text(&self, url: Url) -> Result<String, GatewayError> {
        debug!(endpoint = %url.path(), "Calling upstream");

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;

        debug!(status = status.as_u16(), bytes = body.len(), "Upstream replied");
        Ok(body)
    }
}

fn map_reqwest_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Transport(error.to_string())
    }
}

#[async_trait]
impl ShortenerGateway for UlvisGateway {
    async fn create(&self, request: &CreateLinkRequest) -> Result<String, GatewayError> {
        self.fetch_text(self.create_url(request)).await
    }

    async fn read(&self, alias: &str) -> Result<String, GatewayError> {
        self.fetch_text(self.read_url(alias)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> UlvisGateway {
        UlvisGateway::from_config(&Config::default()).unwrap()
    }

    #[test]
    fn test_create_url_carries_all_parameters() {
        let url = gateway().create_url(&CreateLinkRequest {
            url: "https://example.com/a?b=c&d=e".to_string(),
            alias: "AbCd".to_string(),
        });

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(url.host_str(), Some("ulvis.net"));
        assert_eq!(url.path(), "/API/write/get");
        assert_eq!(
            pairs,
            vec![
                ("url".to_string(), "https://example.com/a?b=c&d=e".to_string()),
                ("type".to_string(), "json".to_string()),
                ("uses".to_string(), "1".to_string()),
                ("private".to_string(), "1".to_string()),
                ("custom".to_string(), "AbCd".to_string()),
            ]
        );
    }

    #[test]
    fn test_read_url() {
        let url = gateway().read_url("x9Yz");

        assert_eq!(url.path(), "/API/read/get");
        assert_eq!(url.query(), Some("id=x9Yz&type=json"));
    }

    #[test]
    fn test_invalid_user_agent_is_rejected() {
        let config = Config {
            upstream_user_agent: "bad\nagent".to_string(),
            ..Config::default()
        };

        assert!(matches!(
            UlvisGateway::from_config(&config),
            Err(GatewayBuildError::Header(_))
        ));
    }
}
