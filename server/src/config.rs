//! Server configuration from environment variables.

use axum::http::HeaderValue;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Default maximum number of pooled database connections.
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Default time to wait for a pooled connection, in seconds.
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    pub pool_size: u32,
    pub connection_timeout: Duration,
    /// Add an `X-DB-Query-Count` header to every response.
    pub track_db_query_count: bool,
    /// Origins allowed to make cross-origin requests. Empty allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`: Postgres connection string
    ///
    /// Optional:
    /// - `LARDER_BIND_ADDR`: listen address (default: "0.0.0.0:3000")
    /// - `LARDER_DB_POOL_SIZE`: max pooled connections (default: 10)
    /// - `LARDER_DB_CONNECTION_TIMEOUT_SECS`: pool checkout timeout (default: 30)
    /// - `LARDER_TRACK_DB_QUERY_COUNT`: "1" or "true" to emit query counts
    /// - `LARDER_CORS_ALLOWED_ORIGINS`: comma-separated origins (default: any)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let bind_addr =
            lookup("LARDER_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let pool_size = parse_or(&lookup, "LARDER_DB_POOL_SIZE", DEFAULT_POOL_SIZE)?;
        if pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "LARDER_DB_POOL_SIZE".to_string(),
                value: "0".to_string(),
            });
        }

        let timeout_secs = parse_or(
            &lookup,
            "LARDER_DB_CONNECTION_TIMEOUT_SECS",
            DEFAULT_CONNECTION_TIMEOUT_SECS,
        )?;

        let track_db_query_count = lookup("LARDER_TRACK_DB_QUERY_COUNT")
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);

        let cors_allowed_origins = match lookup("LARDER_CORS_ALLOWED_ORIGINS") {
            Some(value) => parse_origins(&value)?,
            None => Vec::new(),
        };

        Ok(Self {
            database_url,
            bind_addr,
            pool_size,
            connection_timeout: Duration::from_secs(timeout_secs),
            track_db_query_count,
            cors_allowed_origins,
        })
    }
}

fn parse_origins(value: &str) -> Result<Vec<String>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map(|_| origin.to_string())
                .map_err(|_| ConfigError::InvalidValue {
                    name: "LARDER_CORS_ALLOWED_ORIGINS".to_string(),
                    value: origin.to_string(),
                })
        })
        .collect()
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db/larder")]))
                .unwrap();
        assert_eq!(config.database_url, "postgres://db/larder");
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(
            config.connection_timeout,
            Duration::from_secs(DEFAULT_CONNECTION_TIMEOUT_SECS)
        );
        assert!(!config.track_db_query_count);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn test_cors_origins() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/larder"),
            (
                "LARDER_CORS_ALLOWED_ORIGINS",
                "http://localhost:8080, https://larder.example.com,",
            ),
        ]))
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:8080", "https://larder.example.com"]
        );

        let err = ServerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/larder"),
            ("LARDER_CORS_ALLOWED_ORIGINS", "http://ok.example\nbad"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "LARDER_CORS_ALLOWED_ORIGINS"));
    }

    #[test]
    fn test_missing_database_url() {
        let err = ServerConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar("DATABASE_URL".to_string()));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/larder"),
            ("LARDER_BIND_ADDR", "127.0.0.1:8080"),
            ("LARDER_DB_POOL_SIZE", "4"),
            ("LARDER_DB_CONNECTION_TIMEOUT_SECS", "5"),
            ("LARDER_TRACK_DB_QUERY_COUNT", "1"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.connection_timeout, Duration::from_secs(5));
        assert!(config.track_db_query_count);
    }

    #[test]
    fn test_invalid_pool_size() {
        let err = ServerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/larder"),
            ("LARDER_DB_POOL_SIZE", "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "LARDER_DB_POOL_SIZE"));

        let err = ServerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/larder"),
            ("LARDER_DB_POOL_SIZE", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
