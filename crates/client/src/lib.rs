//! Filmtrack API client
//!
//! Provides typed access to the Filmtrack HTTP API with:
//! - `ProjectClient`, one async method per API operation
//! - `ProjectQueries`, a read cache with retry on transient failures
//! - Configurable base URL, retry budget and request timeout

pub mod cache;
pub mod http;
pub mod queries;

use std::time::Duration;

use thiserror::Error;

pub use cache::{CachedValue, Generation, QueryCache, QueryKey};
pub use http::ProjectClient;
pub use queries::ProjectQueries;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Client configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Transient failures worth retrying for idempotent reads
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Unavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, without the `/v1` prefix
    pub api_url: String,
    /// Extra attempts for reads failing with `Unavailable`
    pub max_read_retries: u32,
    /// Delay before the first retry, doubled on each further attempt
    pub retry_base_delay: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// How long a cached read is served before it is refetched
    pub cache_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            max_read_retries: 3,
            retry_base_delay: Duration::from_millis(100),
            request_timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    /// Config for a given base URL with default retry settings
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Create client config from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let api_url = std::env::var("FILMTRACK_API_URL").unwrap_or(defaults.api_url);
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ClientError::Configuration(format!(
                "FILMTRACK_API_URL must be an http(s) URL, got {}",
                api_url
            )));
        }

        let max_read_retries = parse_env("FILMTRACK_CLIENT_MAX_RETRIES")?
            .unwrap_or(defaults.max_read_retries);
        let retry_base_delay = parse_env("FILMTRACK_CLIENT_RETRY_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_base_delay);
        let request_timeout = parse_env("FILMTRACK_CLIENT_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.request_timeout);
        let cache_ttl = parse_env("FILMTRACK_CLIENT_CACHE_TTL_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.cache_ttl);

        Ok(Self {
            api_url,
            max_read_retries,
            retry_base_delay,
            request_timeout,
            cache_ttl,
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw.parse().map(Some).map_err(|_| {
            ClientError::Configuration(format!("{} has an invalid value: {}", name, raw))
        }),
        Err(_) => Ok(None),
    }
}
