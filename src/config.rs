//! Environment configuration
//!
//! Read once at startup (after `dotenvy::dotenv()`); every value except
//! `DATABASE_URL` has a default.

use std::env;
use thiserror::Error;

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_ANALYTICS_TTL_HOURS: &str = "ANALYTICS_TTL_HOURS";
pub const ENV_BATCH_CONCURRENCY: &str = "ANALYTICS_BATCH_CONCURRENCY";
pub const ENV_REFRESH_ENABLED: &str = "ANALYTICS_REFRESH_ENABLED";
pub const ENV_REFRESH_INTERVAL_SECS: &str = "ANALYTICS_REFRESH_INTERVAL_SECS";
pub const ENV_CORS_ALLOW_ANY: &str = "CORS_ALLOW_ANY";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TTL_HOURS: i64 = 24;
const DEFAULT_BATCH_CONCURRENCY: usize = 4;
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 3600; // 1 hour

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Analytics younger than this are served without recalculation
    pub analytics_ttl_hours: i64,
    pub batch_concurrency: usize,
    pub refresh_enabled: bool,
    pub refresh_interval_secs: u64,
    pub cors_allow_any: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any key lookup (tests pass a map instead of the process env)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(ENV_DATABASE_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(ENV_DATABASE_URL))?;

        let analytics_ttl_hours = parse_or(&lookup, ENV_ANALYTICS_TTL_HOURS, DEFAULT_TTL_HOURS)?;
        if analytics_ttl_hours < 0 {
            return Err(ConfigError::Invalid {
                name: ENV_ANALYTICS_TTL_HOURS,
                value: analytics_ttl_hours.to_string(),
            });
        }

        let batch_concurrency =
            parse_or(&lookup, ENV_BATCH_CONCURRENCY, DEFAULT_BATCH_CONCURRENCY)?;
        if batch_concurrency == 0 {
            return Err(ConfigError::Invalid {
                name: ENV_BATCH_CONCURRENCY,
                value: "0".to_string(),
            });
        }

        Ok(Self {
            database_url,
            bind_addr: lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            analytics_ttl_hours,
            batch_concurrency,
            refresh_enabled: parse_bool_or(&lookup, ENV_REFRESH_ENABLED, true),
            refresh_interval_secs: parse_or(
                &lookup,
                ENV_REFRESH_INTERVAL_SECS,
                DEFAULT_REFRESH_INTERVAL_SECS,
            )?,
            cors_allow_any: parse_bool_or(&lookup, ENV_CORS_ALLOW_ANY, true),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw,
        }),
    }
}

fn parse_bool_or<F>(lookup: &F, name: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(default)
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
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[(
            ENV_DATABASE_URL,
            "postgres://localhost/realty",
        )]))
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.analytics_ttl_hours, 24);
        assert_eq!(config.batch_concurrency, 4);
        assert!(config.refresh_enabled);
        assert_eq!(config.refresh_interval_secs, 3600);
        assert!(config.cors_allow_any);
    }

    #[test]
    fn test_missing_database_url() {
        assert_eq!(
            AppConfig::from_lookup(lookup_from(&[])),
            Err(ConfigError::Missing(ENV_DATABASE_URL))
        );
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_DATABASE_URL, "postgres://db/realty"),
            (ENV_ANALYTICS_TTL_HOURS, "6"),
            (ENV_BATCH_CONCURRENCY, "16"),
            (ENV_REFRESH_ENABLED, "false"),
        ]))
        .unwrap();
        assert_eq!(config.analytics_ttl_hours, 6);
        assert_eq!(config.batch_concurrency, 16);
        assert!(!config.refresh_enabled);
    }

    #[test]
    fn test_invalid_numbers() {
        let err = AppConfig::from_lookup(lookup_from(&[
            (ENV_DATABASE_URL, "postgres://db/realty"),
            (ENV_BATCH_CONCURRENCY, "many"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(ENV_BATCH_CONCURRENCY));

        assert!(AppConfig::from_lookup(lookup_from(&[
            (ENV_DATABASE_URL, "postgres://db/realty"),
            (ENV_BATCH_CONCURRENCY, "0"),
        ]))
        .is_err());
    }
}
