//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use axum::http::HeaderValue;
use std::env;
use std::path::PathBuf;
use storefront_cart::{CartConfig, ReadPolicy};
use storefront_core::DEFAULT_CURRENCY;
use tower_http::cors::{Any, CorsLayer};

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP port (`STOREFRONT_PORT`, default 8000)
    pub port: u16,

    /// SQLite file (`STOREFRONT_DB_PATH`, default `./storefront.db`)
    pub database_path: PathBuf,

    /// HS256 secret for bearer tokens (`JWT_SECRET`)
    pub jwt_secret: String,

    /// Lifetime of tokens issued by [`JwtManager::generate_token`](crate::auth::JwtManager::generate_token)
    /// (`JWT_LIFETIME_SECS`, default 1 hour)
    pub jwt_lifetime_secs: i64,

    /// Currency label on checkout summaries (`STOREFRONT_CURRENCY`)
    pub currency: String,

    /// `self_heal` or `flag_stale` (`STOREFRONT_READ_POLICY`)
    pub read_policy: ReadPolicy,

    /// Attempts per cart write before giving up (`STOREFRONT_MAX_WRITE_ATTEMPTS`)
    pub max_write_attempts: u32,

    /// Allowed browser origin (`CORS_ORIGIN`). `None` allows any origin.
    pub cors_origin: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = ApiConfig {
            port: get("STOREFRONT_PORT", "8000")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_PORT".to_string()))?,

            database_path: PathBuf::from(get("STOREFRONT_DB_PATH", "./storefront.db")),

            // Must be set in production.
            jwt_secret: get("JWT_SECRET", "storefront-dev-secret-change-in-production"),

            jwt_lifetime_secs: get("JWT_LIFETIME_SECS", "3600")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JWT_LIFETIME_SECS".to_string()))?,

            currency: get("STOREFRONT_CURRENCY", DEFAULT_CURRENCY),

            read_policy: get("STOREFRONT_READ_POLICY", "self_heal")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_READ_POLICY".to_string()))?,

            max_write_attempts: get("STOREFRONT_MAX_WRITE_ATTEMPTS", "3")
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("STOREFRONT_MAX_WRITE_ATTEMPTS".to_string())
                })?,

            cors_origin: lookup("CORS_ORIGIN").filter(|origin| origin != "*"),
        };

        if config.jwt_secret.is_empty() {
            return Err(ConfigError::MissingRequired("JWT_SECRET".to_string()));
        }
        if config.max_write_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "STOREFRONT_MAX_WRITE_ATTEMPTS".to_string(),
            ));
        }
        config.cors_layer()?;

        Ok(config)
    }

    pub fn cart_config(&self) -> CartConfig {
        CartConfig::default()
            .read_policy(self.read_policy)
            .max_write_attempts(self.max_write_attempts)
            .currency(self.currency.clone())
    }

    pub fn cors_layer(&self) -> Result<CorsLayer, ConfigError> {
        let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        match &self.cors_origin {
            Some(origin) => {
                let origin = HeaderValue::from_str(origin)
                    .map_err(|_| ConfigError::InvalidValue("CORS_ORIGIN".to_string()))?;
                Ok(layer.allow_origin(origin))
            }
            None => Ok(layer.allow_origin(Any)),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.database_path, PathBuf::from("./storefront.db"));
        assert_eq!(config.currency, "INR");
        assert_eq!(config.read_policy, ReadPolicy::SelfHeal);
        assert_eq!(config.max_write_attempts, 3);
        assert!(config.cors_origin.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_PORT", "9001"),
            ("STOREFRONT_READ_POLICY", "flag_stale"),
            ("STOREFRONT_CURRENCY", "USD"),
            ("CORS_ORIGIN", "http://localhost:5173"),
        ])
        .unwrap();

        assert_eq!(config.port, 9001);
        assert_eq!(config.read_policy, ReadPolicy::FlagStale);
        assert_eq!(config.cart_config().currency, "USD");
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:5173"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("STOREFRONT_PORT", "eighty")]),
            Err(ConfigError::InvalidValue(key)) if key == "STOREFRONT_PORT"
        ));
        assert!(load(&[("STOREFRONT_READ_POLICY", "lazy")]).is_err());
        assert!(load(&[("STOREFRONT_MAX_WRITE_ATTEMPTS", "0")]).is_err());
        assert!(load(&[("JWT_SECRET", "")]).is_err());
        assert!(load(&[("CORS_ORIGIN", "bad\norigin")]).is_err());
    }
}
