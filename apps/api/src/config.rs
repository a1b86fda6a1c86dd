//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! `main` loads a `.env` file first, so anything set there counts as the
//! environment too.

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use tally_store::{Backend, StoreConfig};

/// Which origins may call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigin {
    /// `*`: any origin, without credentials.
    Any,

    /// A single origin, with credentials allowed.
    Exact(HeaderValue),
}

/// API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// HTTP listen address
    pub bind_addr: IpAddr,

    /// Directory holding the table files
    pub data_dir: PathBuf,

    /// Table backing (xlsx or memory)
    pub backend: Backend,

    /// Allowed CORS origin
    pub cors_origin: CorsOrigin,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        ApiConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cors_origin = match var("CORS_ORIGIN", "*").as_str() {
            "*" => CorsOrigin::Any,
            origin => HeaderValue::from_str(origin)
                .map(CorsOrigin::Exact)
                .map_err(|_| ConfigError::InvalidValue("CORS_ORIGIN".to_string()))?,
        };

        Ok(ApiConfig {
            port: var("PORT", "3000")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            bind_addr: var("BIND_ADDR", "0.0.0.0")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BIND_ADDR".to_string()))?,

            data_dir: PathBuf::from(var("DATA_DIR", ".")),

            backend: var("STORAGE_BACKEND", "xlsx")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STORAGE_BACKEND".to_string()))?,

            cors_origin,
        })
    }

    /// Address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Store settings derived from this configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.data_dir.clone()).backend(self.backend)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.backend, Backend::Xlsx);
        assert_eq!(config.cors_origin, CorsOrigin::Any);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("BIND_ADDR", "127.0.0.1"),
            ("DATA_DIR", "/srv/tally"),
            ("STORAGE_BACKEND", "memory"),
            ("CORS_ORIGIN", "http://localhost:5173"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.data_dir, PathBuf::from("/srv/tally"));
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(
            config.cors_origin,
            CorsOrigin::Exact(HeaderValue::from_static("http://localhost:5173"))
        );
        assert_eq!(config.store_config().backend, Backend::Memory);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT");

        let err = load(&[("PORT", "70000")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT");

        let err = load(&[("STORAGE_BACKEND", "postgres")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for STORAGE_BACKEND");

        let err = load(&[("BIND_ADDR", "localhost")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for BIND_ADDR");
    }
}
