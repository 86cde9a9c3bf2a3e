//! Client configuration
//!
//! `ClientConfig` can be assembled with its builder, read from the
//! environment, or loaded from a YAML file:
//!
//! ```yaml
//! base_url: http://sandbox.local:8090
//! api_key: s3cret
//! timeout_secs: 30
//! pagination:
//!   page_size: 10
//!   max_retries: 3
//!   retry_delay_ms: 2000
//! ```

use crate::error::{Error, Result};
use crate::pagination::PaginationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the API base URL
pub const ENV_BASE_URL: &str = "CUCKOO_BASE_URL";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "CUCKOO_API_KEY";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Client Config
// ============================================================================

/// Configuration for a [`Client`](crate::Client)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, e.g. `http://localhost:8090`
    pub base_url: String,
    /// Sent as `Authorization: Bearer <api_key>`
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Task enumeration settings
    pub pagination: PaginationConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            api_key: String::new(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("cuckoo-api/{}", env!("CARGO_PKG_VERSION")),
            pagination: PaginationConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a config for the given server and key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Read `CUCKOO_BASE_URL` and `CUCKOO_API_KEY`.
    ///
    /// The base URL is required, a missing key means an empty key.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(ENV_BASE_URL)
            .ok_or_else(|| Error::config(format!("{ENV_BASE_URL} is not set")))?;
        let api_key = lookup(ENV_API_KEY).unwrap_or_default();

        let config = Self::new(base_url, api_key);
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML config document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(yaml)?;
        let config = Self::from(file);
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Check the config for values the client cannot work with
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "unsupported URL scheme '{}' in base_url",
                url.scheme()
            )));
        }
        self.pagination.validate()
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the pagination settings
    pub fn pagination(mut self, pagination: PaginationConfig) -> Self {
        self.config.pagination = pagination;
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

// ============================================================================
// YAML File Format
// ============================================================================

/// On-disk form of [`ClientConfig`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Base URL of the REST API
    pub base_url: String,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Task enumeration settings
    #[serde(default)]
    pub pagination: PaginationFile,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

/// On-disk form of [`PaginationConfig`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationFile {
    pub page_size: u32,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub transient_marker: String,
    pub channel_capacity: usize,
}

impl Default for PaginationFile {
    fn default() -> Self {
        let defaults = PaginationConfig::default();
        Self {
            page_size: defaults.page_size,
            max_retries: defaults.max_retries,
            retry_delay_ms: defaults.retry_delay.as_millis() as u64,
            transient_marker: defaults.transient_marker,
            channel_capacity: defaults.channel_capacity,
        }
    }
}

impl From<PaginationFile> for PaginationConfig {
    fn from(file: PaginationFile) -> Self {
        Self {
            page_size: file.page_size,
            max_retries: file.max_retries,
            retry_delay: Duration::from_millis(file.retry_delay_ms),
            transient_marker: file.transient_marker,
            channel_capacity: file.channel_capacity,
        }
    }
}

impl From<ConfigFile> for ClientConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            base_url: file.base_url,
            api_key: file.api_key,
            timeout: Duration::from_secs(file.timeout_secs),
            pagination: file.pagination.into(),
            ..Default::default()
        }
    }
}
