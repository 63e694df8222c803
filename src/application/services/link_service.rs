//! Link creation through the upstream, single and batched.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::entities::{BatchResult, CreatedLink, LinkFailure, ShortenOutcome};
use crate::domain::gateways::{CreateLinkRequest, ShortenerGateway};
use crate::domain::upstream_reply::UpstreamReply;
use crate::utils::alias_generator::{DEFAULT_ALIAS_LENGTH, generate_alias};
use crate::utils::url_normalizer::normalize_url;

/// Settings of the alias-retry protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPolicy {
    /// Retries allowed after alias collisions. A run makes at most
    /// `max_alias_retries + 1` upstream calls.
    pub max_alias_retries: u32,
    pub alias_length: usize,
    /// Base for short links the upstream reports as created but omits.
    pub short_url_base: String,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            max_alias_retries: 3,
            alias_length: DEFAULT_ALIAS_LENGTH,
            short_url_base: "https://ulvis.net/".to_string(),
        }
    }
}

/// Service for creating short links through the upstream.
///
/// Every run owns its attempt counter; the only shared piece is the gateway,
/// which is used read-only. Cloning is cheap and yields a handle to the same
/// gateway and policy.
pub struct LinkService<G: ShortenerGateway> {
    gateway: Arc<G>,
    policy: Arc<LinkPolicy>,
}

impl<G: ShortenerGateway> Clone for LinkService<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            policy: Arc::clone(&self.policy),
        }
    }
}

impl<G: ShortenerGateway> LinkService<G> {
    /// Creates a new link service.
    pub fn new(gateway: Arc<G>, policy: LinkPolicy) -> Self {
        Self {
            gateway,
            policy: Arc::new(policy),
        }
    }

    /// Normalizes a caller-supplied URL and creates a link for it.
    ///
    /// Blank or unparseable input yields a failed outcome without any upstream
    /// call; `original_url` then holds the input as given.
    pub async fn shorten(&self, raw_url: &str) -> ShortenOutcome {
        match normalize_url(raw_url) {
            Ok(url) => self.create_link(&url).await,
            Err(e) => {
                debug!(url = raw_url, "Rejected input URL: {}", e);
                ShortenOutcome::failed(raw_url, &LinkFailure::InvalidInput(e.to_string()))
            }
        }
    }

    /// Creates a short link for an already normalized URL.
    ///
    /// # Protocol
    ///
    /// 1. Generate a random alias
    /// 2. Ask the upstream for a one-time, private link with that alias
    /// 3. On a "taken" reply, go back to 1 with a fresh alias
    /// 4. Anything else is terminal
    ///
    /// Attempts are strictly sequential. After `max_alias_retries` retries the
    /// run fails with an exhaustion outcome. Timeouts, non-JSON replies and
    /// other upstream errors are never retried.
    ///
    /// Always returns an outcome; no failure escapes as an error.
    pub async fn create_link(&self, url: &str) -> ShortenOutcome {
        let result = self.run_protocol(url).await;

        match &result {
            Ok(link) => info!(url, alias = %link.alias, "Short link created"),
            Err(failure) => warn!(url, "Short link creation failed: {}", failure),
        }

        ShortenOutcome::from_result(url, result)
    }

    /// Shortens every URL concurrently and returns outcomes in input order.
    ///
    /// Each URL runs in its own task, all spawned before any is awaited. A
    /// failure or panic in one task only affects that URL's outcome. There is
    /// no batch deadline: the call returns once every task has finished.
    pub async fn create_links_batch(&self, urls: Vec<String>) -> BatchResult
    where
        G: 'static,
    {
        info!(count = urls.len(), "Processing batch");

        let handles: Vec<_> = urls
            .into_iter()
            .map(|url| {
                let service = self.clone();
                let input = url.clone();
                let handle = tokio::spawn(async move { service.shorten(&url).await });
                (input, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (input, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(url = %input, "Shortening task failed: {}", e);
                    ShortenOutcome::failed(
                        input,
                        &LinkFailure::Internal("shortening task failed".to_string()),
                    )
                }
            };
            results.push(outcome);
        }

        let batch = BatchResult::new(results);
        info!(
            total = batch.total_processed,
            successful = batch.successful(),
            "Batch finished"
        );
        batch
    }

    async fn run_protocol(&self, url: &str) -> Result<CreatedLink, LinkFailure> {
        let mut attempt: u32 = 0;

        loop {
            if attempt > self.policy.max_alias_retries {
                return Err(LinkFailure::AliasExhausted { attempts: attempt });
            }

            let request = CreateLinkRequest {
                url: url.to_string(),
                alias: generate_alias(self.policy.alias_length),
            };
            debug!(url, alias = %request.alias, attempt, "Requesting short link");

            let body = self.gateway.create(&request).await?;

            let reply = UpstreamReply::parse(&body).map_err(|e| {
                warn!(url, preview = %e.preview, "Upstream returned a non-JSON reply");
                LinkFailure::InvalidResponse { preview: e.preview }
            })?;

            if reply.is_success() {
                let short_url = reply
                    .short_url()
                    .unwrap_or_else(|| self.fallback_short_url(&request.alias));

                return Ok(CreatedLink {
                    short_url,
                    alias: request.alias,
                });
            }

            if reply.is_alias_taken() {
                warn!(url, alias = %request.alias, attempt, "Alias taken, retrying");
                attempt += 1;
                continue;
            }

            return Err(LinkFailure::Rejected(reply.error_message()));
        }
    }

    /// Builds the short link for an alias from the configured base.
    fn fallback_short_url(&self, alias: &str) -> String {
        format!(
            "{}/{}",
            self.policy.short_url_base.trim_end_matches('/'),
            alias
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::{GatewayError, MockShortenerGateway};
    use async_trait::async_trait;
    use mockall::Sequence;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    fn success_body(alias: &str) -> String {
        json!({ "success": 1, "data": { "url": format!("https://ulvis.net/{alias}") } })
            .to_string()
    }

    fn taken_body() -> String {
        json!({ "success": 0, "error": { "msg": "Custom alias is already taken" } }).to_string()
    }

    fn service(mock: MockShortenerGateway) -> LinkService<MockShortenerGateway> {
        LinkService::new(Arc::new(mock), LinkPolicy::default())
    }

    #[tokio::test]
    async fn test_create_link_success_first_attempt() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_create()
            .times(1)
            .withf(|req| req.url == "https://example.com" && req.alias.len() == 4)
            .returning(|req| Ok(success_body(&req.alias)));

        let outcome = service(mock).create_link("https://example.com").await;

        assert!(outcome.success);
        assert_eq!(outcome.original_url, "https://example.com");
        let alias = outcome.alias.unwrap();
        assert_eq!(alias.len(), 4);
        assert_eq!(outcome.short_url.unwrap(), format!("https://ulvis.net/{alias}"));
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_create_link_accepts_string_flags() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_create().times(1).returning(|_| {
            Ok(json!({ "success": "TRUE", "data": { "url": "https://ulvis.net/zz" } }).to_string())
        });

        let outcome = service(mock).create_link("https://example.com").await;

        assert!(outcome.success);
        assert_eq!(outcome.short_url.as_deref(), Some("https://ulvis.net/zz"));
    }

    #[tokio::test]
    async fn test_create_link_retries_after_collision() {
        let mut mock = MockShortenerGateway::new();
        let mut seq = Sequence::new();
        mock.expect_create()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(taken_body()));
        mock.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|req| Ok(success_body(&req.alias)));

        let outcome = service(mock).create_link("https://example.com").await;

        assert!(outcome.success);
    }

    #[tokio::test]
    async fn test_create_link_uses_fresh_alias_per_attempt() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);

        let mut mock = MockShortenerGateway::new();
        mock.expect_create().times(4).returning(move |req| {
            recorder.lock().unwrap().push(req.alias.clone());
            Ok(taken_body())
        });

        let policy = LinkPolicy {
            alias_length: 16,
            ..LinkPolicy::default()
        };
        let outcome = LinkService::new(Arc::new(mock), policy)
            .create_link("https://example.com")
            .await;

        assert!(!outcome.success);
        let aliases = seen.lock().unwrap();
        let unique: HashSet<_> = aliases.iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[tokio::test]
    async fn test_create_link_exhausts_retry_budget() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_create().times(4).returning(|_| Ok(taken_body()));

        let outcome = service(mock).create_link("https://example.com").await;

        assert!(!outcome.success);
        assert!(outcome.short_url.is_none());
        assert!(outcome.alias.is_none());
        assert_eq!(
            outcome.error.as_deref(),
            Some("could not generate a unique alias after 4 attempts")
        );
    }

    #[tokio::test]
    async fn test_create_link_zero_retries_makes_one_call() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_create().times(1).returning(|_| Ok(taken_body()));

        let policy = LinkPolicy {
            max_alias_retries: 0,
            ..LinkPolicy::default()
        };
        let outcome = LinkService::new(Arc::new(mock), policy)
            .create_link("https://example.com")
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("unique alias"));
    }

    #[tokio::test]
    async fn test_create_link_non_json_is_not_retried() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_create()
            .times(1)
            .returning(|_| Ok("<html><title>Just a moment...</title></html>".to_string()));

        let outcome = service(mock).create_link("https://example.com").await;

        assert!(!outcome.success);
        assert_eq!(
            outcome.error.as_deref(),
            Some("invalid upstream response (likely blocked)")
        );
        assert_eq!(
            outcome.raw_preview.as_deref(),
            Some("<html><title>Just a moment...</title></html>")
        );
    }

    #[tokio::test]
    async fn test_create_link_timeout_is_not_retried() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_create()
            .times(1)
            .returning(|_| Err(GatewayError::Timeout));

        let outcome = service(mock).create_link("https://example.com").await;

        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("upstream request timed out"));
    }

    #[tokio::test]
    async fn test_create_link_transport_error_is_reported() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_create()
            .times(1)
            .returning(|_| Err(GatewayError::Transport("connection refused".to_string())));

        let outcome = service(mock).create_link("https://example.com").await;

        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn test_create_link_other_error_is_verbatim() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_create().times(1).returning(|_| {
            Ok(json!({ "success": false, "error": { "msg": "URL is blacklisted" } }).to_string())
        });

        let outcome = service(mock).create_link("https://example.com").await;

        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("URL is blacklisted"));
        assert!(outcome.raw_preview.is_none());
    }

    #[tokio::test]
    async fn test_create_link_success_without_url_uses_base() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_create()
            .times(1)
            .returning(|_| Ok(json!({ "success": 1, "data": {} }).to_string()));

        let outcome = service(mock).create_link("https://example.com").await;

        assert!(outcome.success);
        let alias = outcome.alias.unwrap();
        assert_eq!(outcome.short_url.unwrap(), format!("https://ulvis.net/{alias}"));
    }

    #[tokio::test]
    async fn test_shorten_prepends_scheme() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_create()
            .times(1)
            .withf(|req| req.url == "https://example.com")
            .returning(|req| Ok(success_body(&req.alias)));

        let outcome = service(mock).shorten("example.com").await;

        assert!(outcome.success);
        assert_eq!(outcome.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_shorten_blank_input_skips_upstream() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_create().never();

        let outcome = service(mock).shorten("   ").await;

        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("URL must not be empty"));
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_isolates_failures() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_create().returning(|req| {
            if req.url.contains("blocked") {
                Ok("<html>denied</html>".to_string())
            } else {
                Ok(success_body(&req.alias))
            }
        });

        let urls = vec![
            "https://a.example".to_string(),
            "https://blocked.example".to_string(),
            "c.example".to_string(),
        ];
        let batch = service(mock).create_links_batch(urls).await;

        assert_eq!(batch.total_processed, 3);
        assert_eq!(batch.successful(), 2);

        assert_eq!(batch.results[0].original_url, "https://a.example");
        assert!(batch.results[0].success);

        assert_eq!(batch.results[1].original_url, "https://blocked.example");
        assert!(!batch.results[1].success);
        assert_eq!(
            batch.results[1].raw_preview.as_deref(),
            Some("<html>denied</html>")
        );

        assert_eq!(batch.results[2].original_url, "https://c.example");
        assert!(batch.results[2].success);
    }

    #[tokio::test]
    async fn test_batch_empty_list() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_create().never();

        let batch = service(mock).create_links_batch(Vec::new()).await;

        assert!(batch.success);
        assert_eq!(batch.total_processed, 0);
        assert!(batch.results.is_empty());
    }

    /// Gateway whose replies take a per-URL delay.
    struct DelayedGateway;

    impl DelayedGateway {
        fn delay_for(url: &str) -> Duration {
            let millis = url
                .rsplit('/')
                .next()
                .and_then(|segment| segment.parse().ok())
                .unwrap_or(10);
            Duration::from_millis(millis)
        }
    }

    #[async_trait]
    impl ShortenerGateway for DelayedGateway {
        async fn create(&self, request: &CreateLinkRequest) -> Result<String, GatewayError> {
            if request.url.contains("panic") {
                panic!("gateway exploded");
            }
            tokio::time::sleep(Self::delay_for(&request.url)).await;
            Ok(success_body(&request.alias))
        }

        async fn read(&self, _alias: &str) -> Result<String, GatewayError> {
            Ok("{}".to_string())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_runs_concurrently() {
        let service = LinkService::new(Arc::new(DelayedGateway), LinkPolicy::default());
        let urls: Vec<String> = [500, 400, 300, 200, 100]
            .iter()
            .map(|ms| format!("https://slow.example/{ms}"))
            .collect();

        let started = Instant::now();
        let batch = service.create_links_batch(urls.clone()).await;
        let elapsed = started.elapsed();

        // Sequential processing would take 1500ms.
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed < Duration::from_millis(600));

        let originals: Vec<_> = batch.results.iter().map(|r| r.original_url.clone()).collect();
        assert_eq!(originals, urls);
        assert!(batch.results.iter().all(|r| r.success));
    }

    #[tokio::test]
    async fn test_batch_task_panic_is_isolated() {
        let service = LinkService::new(Arc::new(DelayedGateway), LinkPolicy::default());
        let urls = vec![
            "https://ok.example/5".to_string(),
            "https://panic.example/5".to_string(),
            "https://ok2.example/5".to_string(),
        ];

        let batch = service.create_links_batch(urls).await;

        assert_eq!(batch.total_processed, 3);
        assert!(batch.results[0].success);
        assert!(!batch.results[1].success);
        assert_eq!(batch.results[1].original_url, "https://panic.example/5");
        assert_eq!(
            batch.results[1].error.as_deref(),
            Some("internal error: shortening task failed")
        );
        assert!(batch.results[2].success);
    }
}
