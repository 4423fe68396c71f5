//! Environment-driven configuration
//!
//! `.env` is loaded by the binary before [`Config::from_env`] runs, so every
//! value can come from either the process environment or the dotenv file.

use std::env;
use std::net::SocketAddr;

/// Default SQLite file created next to the binary when `DATABASE_URL` is unset
pub const DEFAULT_DATABASE_URL: &str = "sqlite://cmt-quickstart.db?mode=rwc";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// A REQUIRES_NEW boundary holds a second connection while the caller's
/// transaction holds the first.
pub const MIN_MAX_CONNECTIONS: u32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub sqlx_logging: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections < MIN_MAX_CONNECTIONS {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                reason: format!("must be at least {}", MIN_MAX_CONNECTIONS),
            });
        }

        let sqlx_logging = match lookup("DB_SQLX_LOGGING") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                key: "DB_SQLX_LOGGING",
                reason: format!("expected true/false, got '{}'", raw),
            })?,
            None => false,
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            sqlx_logging,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(!config.sqlx_logging);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://cmt@localhost/cmt"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("DB_SQLX_LOGGING", "yes"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "postgres://cmt@localhost/cmt");
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.max_connections, 12);
        assert!(config.sqlx_logging);
    }

    #[test]
    fn test_pool_too_small_for_requires_new() {
        let err = Config::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", "1")])).unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Config::from_lookup(lookup_from(&[("BIND_ADDR", "nowhere")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("DB_SQLX_LOGGING", "maybe")])).is_err());
    }
}
