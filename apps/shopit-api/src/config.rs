//! API server configuration.
//!
//! Configuration is loaded from environment variables (after `.env`, if
//! present) with fallback to defaults.

use std::env;
use std::path::PathBuf;

use shopit_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind host
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Allow any origin (the storefront dev server runs on another port)
    pub cors_permissive: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = ApiConfig {
            host: lookup("SHOPIT_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: lookup("SHOPIT_PORT")
                .unwrap_or_else(|| "8001".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SHOPIT_PORT".to_string()))?,

            database_path: lookup("SHOPIT_DATABASE_PATH")
                .unwrap_or_else(|| "./shopit.db".to_string())
                .into(),

            db_max_connections: lookup("SHOPIT_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SHOPIT_DB_MAX_CONNECTIONS".to_string()))?,

            cors_permissive: lookup("SHOPIT_CORS_PERMISSIVE")
                .unwrap_or_else(|| "true".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SHOPIT_CORS_PERMISSIVE".to_string()))?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "SHOPIT_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Address to bind, as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone()).max_connections(self.db_max_connections)
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

        assert_eq!(config.port, 8001);
        assert_eq!(config.database_path, PathBuf::from("./shopit.db"));
        assert_eq!(config.db_max_connections, 5);
        assert!(config.cors_permissive);
        assert_eq!(config.bind_address(), "0.0.0.0:8001");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SHOPIT_HOST", "127.0.0.1"),
            ("SHOPIT_PORT", "9000"),
            ("SHOPIT_CORS_PERMISSIVE", "false"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert!(!config.cors_permissive);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("SHOPIT_PORT", "eighty")]),
            Err(ConfigError::InvalidValue(key)) if key == "SHOPIT_PORT"
        ));
        assert!(load(&[("SHOPIT_DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(load(&[("SHOPIT_CORS_PERMISSIVE", "maybe")]).is_err());
    }
}
