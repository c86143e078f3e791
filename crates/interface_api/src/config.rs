//! API configuration
//!
//! Everything is read from `API_`-prefixed environment variables. The store
//! connection string may also come from a plain `DATABASE_URL`, which is
//! only consulted when `API_DATABASE_URL` is unset.

use std::collections::HashMap;

use serde::Deserialize;

use core_kernel::CoreError;
use domain_billing::RequiredFieldPolicy;

/// Environment variable prefix for every setting
pub const ENV_PREFIX: &str = "API";
/// Unprefixed fallback for the store connection string
pub const DATABASE_URL_FALLBACK: &str = "DATABASE_URL";

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Database URL; the server refuses to start without one
    #[serde(default)]
    pub database_url: Option<String>,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// How required bill fields are checked on insert
    #[serde(default)]
    pub required_field_policy: RequiredFieldPolicy,
    /// Upper bound on pooled store connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_connections() -> u32 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            log_level: default_log_level(),
            required_field_policy: RequiredFieldPolicy::default(),
            max_connections: default_max_connections(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the process environment
    ///
    /// # Errors
    ///
    /// `CoreError::Configuration` if a variable cannot be parsed.
    pub fn from_env() -> Result<Self, CoreError> {
        let mut config = Self::load(None)?;
        if config.database_url.is_none() {
            config.database_url = std::env::var(DATABASE_URL_FALLBACK).ok();
        }
        Ok(config)
    }

    /// Loads configuration from an explicit variable map instead of the environment
    ///
    /// Keys carry the `API_` prefix, as they would in the environment.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, CoreError> {
        Self::load(Some(vars))
    }

    fn load(vars: Option<HashMap<String, String>>) -> Result<Self, CoreError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(vars),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))
    }

    /// Returns the store connection string
    ///
    /// # Errors
    ///
    /// `CoreError::Configuration` if none was configured.
    pub fn database_url(&self) -> Result<&str, CoreError> {
        match self.database_url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(CoreError::configuration(format!(
                "no store connection string, set {ENV_PREFIX}_DATABASE_URL or {DATABASE_URL_FALLBACK}"
            ))),
        }
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_vars(HashMap::new()).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.required_field_policy, RequiredFieldPolicy::Truthy);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_reads_prefixed_variables() {
        let config = ApiConfig::from_vars(vars(&[
            ("API_PORT", "8081"),
            ("API_HOST", "127.0.0.1"),
            ("API_DATABASE_URL", "postgres://bills@localhost/bills"),
            ("API_REQUIRED_FIELD_POLICY", "present"),
            ("API_MAX_CONNECTIONS", "4"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr(), "127.0.0.1:8081");
        assert_eq!(config.database_url().unwrap(), "postgres://bills@localhost/bills");
        assert_eq!(config.required_field_policy, RequiredFieldPolicy::Present);
        assert_eq!(config.max_connections, 4);
    }

    #[test]
    fn test_missing_database_url_is_a_configuration_error() {
        let config = ApiConfig::default();
        let err = config.database_url().unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));

        let blank = ApiConfig {
            database_url: Some("  ".to_string()),
            ..ApiConfig::default()
        };
        assert!(blank.database_url().is_err());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = ApiConfig::from_vars(vars(&[("API_PORT", "not-a-port")])).unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }
}
