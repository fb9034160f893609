//! Environment Variable Configuration Provider
//!
//! Read-only: environment variables are not modified at runtime.

use super::provider::ConfigProvider;
use super::{ConfigError, ConfigResult};

/// Prefix used for this application's environment variables.
pub const ENV_PREFIX: &str = "AI_QUERY_";

/// Read-only environment variable configuration provider.
///
/// Keys map to variable names by upper-casing and replacing `.` with `_`,
/// so `proxy.source` reads `AI_QUERY_PROXY_SOURCE`.
#[derive(Debug, Clone)]
pub struct EnvConfigProvider {
    prefix: String,
}

impl EnvConfigProvider {
    /// Provider using [`ENV_PREFIX`]
    pub fn new() -> Self {
        Self::prefixed(ENV_PREFIX)
    }

    /// Provider with a custom prefix
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn env_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key.to_uppercase().replace('.', "_"))
    }
}

impl Default for EnvConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ConfigProvider for EnvConfigProvider {
    fn name(&self) -> &str {
        "env"
    }

    async fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        let env_key = self.env_key(key);
        match std::env::var(&env_key) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(ConfigError::Env(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_key_conversion() {
        let provider = EnvConfigProvider::new();
        assert_eq!(provider.env_key("endpoint"), "AI_QUERY_ENDPOINT");
        assert_eq!(provider.env_key("proxy.source"), "AI_QUERY_PROXY_SOURCE");
    }

    #[tokio::test]
    async fn test_env_provider_not_found() {
        let provider = EnvConfigProvider::prefixed("AI_QUERY_NONEXISTENT_PREFIX_");
        let value = provider.get_raw("some.key").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_env_provider_get() {
        let provider = EnvConfigProvider::prefixed("AI_QUERY_TEST_");

        // SAFETY: Test-only environment setup, unique variable name
        unsafe { std::env::set_var("AI_QUERY_TEST_ENDPOINT", "http://example.test/q") };
        let value = provider.get_raw("endpoint").await.unwrap();
        assert_eq!(value.as_deref(), Some("http://example.test/q"));
        unsafe { std::env::remove_var("AI_QUERY_TEST_ENDPOINT") };
    }
}
