//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! Nothing here changes at runtime; services receive copies of the values they need.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `UPSTREAM_CREATE_URL` - Create endpoint (default: `https://ulvis.net/API/write/get`)
//! - `UPSTREAM_READ_URL` - Read endpoint (default: `https://ulvis.net/API/read/get`)
//! - `UPSTREAM_TIMEOUT_SECS` - Per-call timeout (default: 15, range: 1-120)
//! - `MAX_ALIAS_RETRIES` - Retries after an alias collision (default: 3, max: 10)
//! - `ALIAS_LENGTH` - Length of generated aliases (default: 4, range: 1-32)
//! - `SHORT_URL_BASE` - Base for short links the upstream omits (default: `https://ulvis.net/`)
//! - `UPSTREAM_USER_AGENT` - User-Agent sent upstream (default: desktop Chrome)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::application::services::LinkPolicy;
use crate::utils::alias_generator::DEFAULT_ALIAS_LENGTH;

pub const DEFAULT_CREATE_URL: &str = "https://ulvis.net/API/write/get";
pub const DEFAULT_READ_URL: &str = "https://ulvis.net/API/read/get";
pub const DEFAULT_SHORT_URL_BASE: &str = "https://ulvis.net/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,

    // ── Upstream ────────────────────────────────────────────────────────────
    pub upstream_create_url: String,
    pub upstream_read_url: String,
    /// Timeout applied to every upstream call in seconds (`UPSTREAM_TIMEOUT_SECS`).
    pub upstream_timeout_secs: u64,
    pub upstream_user_agent: String,

    // ── Alias protocol ──────────────────────────────────────────────────────
    /// Retries allowed after alias collisions; a run makes at most
    /// `max_alias_retries + 1` upstream calls.
    pub max_alias_retries: u32,
    pub alias_length: usize,
    /// Used to build the short link when the upstream reports success without one.
    pub short_url_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            upstream_create_url: DEFAULT_CREATE_URL.to_string(),
            upstream_read_url: DEFAULT_READ_URL.to_string(),
            upstream_timeout_secs: 15,
            upstream_user_agent: DEFAULT_USER_AGENT.to_string(),
            max_alias_retries: 3,
            alias_length: DEFAULT_ALIAS_LENGTH,
            short_url_base: DEFAULT_SHORT_URL_BASE.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset variables fall back to [`Config::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but does not parse.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            listen_addr: env::var("LISTEN").unwrap_or(defaults.listen_addr),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
            upstream_create_url: env::var("UPSTREAM_CREATE_URL")
                .unwrap_or(defaults.upstream_create_url),
            upstream_read_url: env::var("UPSTREAM_READ_URL").unwrap_or(defaults.upstream_read_url),
            upstream_timeout_secs: parse_var("UPSTREAM_TIMEOUT_SECS")?
                .unwrap_or(defaults.upstream_timeout_secs),
            upstream_user_agent: env::var("UPSTREAM_USER_AGENT")
                .unwrap_or(defaults.upstream_user_agent),
            max_alias_retries: parse_var("MAX_ALIAS_RETRIES")?
                .unwrap_or(defaults.max_alias_retries),
            alias_length: parse_var("ALIAS_LENGTH")?.unwrap_or(defaults.alias_length),
            short_url_base: env::var("SHORT_URL_BASE").unwrap_or(defaults.short_url_base),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - an upstream URL or the short URL base is not an absolute http(s) URL
    /// - `upstream_timeout_secs`, `max_alias_retries` or `alias_length` is out of range
    /// - `upstream_user_agent` is empty
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        validate_http_url("UPSTREAM_CREATE_URL", &self.upstream_create_url)?;
        validate_http_url("UPSTREAM_READ_URL", &self.upstream_read_url)?;
        validate_http_url("SHORT_URL_BASE", &self.short_url_base)?;

        if self.upstream_timeout_secs == 0 || self.upstream_timeout_secs > 120 {
            anyhow::bail!(
                "UPSTREAM_TIMEOUT_SECS must be between 1 and 120, got {}",
                self.upstream_timeout_secs
            );
        }

        if self.max_alias_retries > 10 {
            anyhow::bail!(
                "MAX_ALIAS_RETRIES is too large (max: 10), got {}",
                self.max_alias_retries
            );
        }

        if self.alias_length == 0 || self.alias_length > 32 {
            anyhow::bail!(
                "ALIAS_LENGTH must be between 1 and 32, got {}",
                self.alias_length
            );
        }

        if self.upstream_user_agent.trim().is_empty() {
            anyhow::bail!("UPSTREAM_USER_AGENT must not be empty");
        }

        Ok(())
    }

    /// Per-call upstream timeout.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Settings of the alias-retry protocol.
    pub fn link_policy(&self) -> LinkPolicy {
        LinkPolicy {
            max_alias_retries: self.max_alias_retries,
            alias_length: self.alias_length,
            short_url_base: self.short_url_base.clone(),
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Upstream create: {}", self.upstream_create_url);
        tracing::info!("  Upstream read: {}", self.upstream_read_url);
        tracing::info!("  Upstream timeout: {}s", self.upstream_timeout_secs);
        tracing::info!("  Max alias retries: {}", self.max_alias_retries);
        tracing::info!("  Alias length: {}", self.alias_length);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads and parses an optional environment variable.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} has an invalid value: '{raw}'")),
        Err(_) => Ok(None),
    }
}

fn validate_http_url(name: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{name} is not a valid URL: '{value}'"))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("{name} must start with 'http://' or 'https://', got '{value}'");
    }

    Ok(())
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable does not parse or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
