//! Pluggable configuration provider system.
//!
//! ```rust,no_run
//! use ai_query::config::{ConfigBuilder, MemoryConfigProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigBuilder::new()
//!     .memory(MemoryConfigProvider::named("cli").value("endpoint", "/api/query"))
//!     .env()
//!     .load()
//!     .await?;
//! println!("{}", config.resolved_endpoint()?);
//! # Ok(())
//! # }
//! ```

pub mod composite;
pub mod env;
pub mod memory;
pub mod provider;

pub use composite::CompositeConfigProvider;
pub use env::{ENV_PREFIX, EnvConfigProvider};
pub use memory::MemoryConfigProvider;
pub use provider::{ConfigProvider, ConfigProviderExt};

use thiserror::Error;
use url::Url;

use crate::proxy::ProxyRule;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/query";

/// Key for the endpoint URL or proxied path.
pub const KEY_ENDPOINT: &str = "endpoint";
pub const KEY_PROXY_SOURCE: &str = "proxy.source";
pub const KEY_PROXY_DESTINATION: &str = "proxy.destination";

/// Errors that can occur in configuration operations
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Resolved settings for the query form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormConfig {
    /// Absolute URL, or a path resolved through `proxy`.
    pub endpoint: String,
    pub proxy: ProxyRule,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            proxy: ProxyRule::default(),
        }
    }
}

impl FormConfig {
    /// Read settings from `provider`, falling back to defaults per key.
    pub async fn load<P: ConfigProvider + ?Sized>(provider: &P) -> ConfigResult<Self> {
        let defaults = Self::default();

        let endpoint = provider
            .get_raw(KEY_ENDPOINT)
            .await?
            .map(|s| s.trim().to_string())
            .unwrap_or(defaults.endpoint);

        let source = provider
            .get_raw(KEY_PROXY_SOURCE)
            .await?
            .unwrap_or_else(|| defaults.proxy.source().to_string());

        let destination = match provider.get_parsed::<Url>(KEY_PROXY_DESTINATION).await? {
            Some(url) => url,
            None => defaults.proxy.destination().clone(),
        };

        let config = Self {
            endpoint,
            proxy: ProxyRule::new(source, destination),
        };
        config.validate()?;

        tracing::debug!(
            endpoint = %config.endpoint,
            proxy_source = config.proxy.source(),
            proxy_destination = %config.proxy.destination(),
            "Loaded form configuration"
        );
        Ok(config)
    }

    /// Check that the endpoint resolves to a URL.
    pub fn validate(&self) -> ConfigResult<()> {
        self.resolve().map(|_| ())
    }

    /// The URL requests are sent to.
    pub fn resolved_endpoint(&self) -> crate::Result<Url> {
        Ok(self.resolve()?)
    }

    fn resolve(&self) -> ConfigResult<Url> {
        if self.endpoint.starts_with('/') {
            return self
                .proxy
                .rewrite(&self.endpoint)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: KEY_ENDPOINT.to_string(),
                    message: format!(
                        "path '{}' does not match proxy source '{}'",
                        self.endpoint,
                        self.proxy.source()
                    ),
                });
        }
        Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidValue {
            key: KEY_ENDPOINT.to_string(),
            message: e.to_string(),
        })
    }
}

/// Configuration builder for fluent API
pub struct ConfigBuilder {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl ConfigBuilder {
    /// Create a builder with no providers
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add environment variable provider (`AI_QUERY_` prefix)
    pub fn env(mut self) -> Self {
        self.providers.push(Box::new(EnvConfigProvider::new()));
        self
    }

    /// Add an in-memory provider
    pub fn memory(mut self, provider: MemoryConfigProvider) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Build the composite provider
    pub fn build(self) -> CompositeConfigProvider {
        self.providers
            .into_iter()
            .fold(CompositeConfigProvider::new(), |composite, provider| {
                composite.provider(provider)
            })
    }

    /// Build and read a [`FormConfig`]
    pub async fn load(self) -> ConfigResult<FormConfig> {
        FormConfig::load(&self.build()).await
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
