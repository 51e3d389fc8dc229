use crate::error::AppError;
use std::env;
use std::str::FromStr;

/// Which persistence backend the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(AppError::InternalServerError(format!(
                "STORE_BACKEND must be 'postgres' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

pub struct Config {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = match lookup("STORE_BACKEND") {
            Some(value) => value.parse()?,
            None => StoreBackend::Postgres,
        };

        let database_url = lookup("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(AppError::InternalServerError(
                "DATABASE_URL must be set when STORE_BACKEND is postgres".into(),
            ));
        }

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| AppError::InternalServerError("JWT_SECRET must be set".into()))?;

        Ok(Self {
            store_backend,
            database_url,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            server_port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt_secret,
            access_token_ttl_secs: parse_ttl(&lookup, "ACCESS_TOKEN_TTL_SECS", 3600)?,
            refresh_token_ttl_secs: parse_ttl(&lookup, "REFRESH_TOKEN_TTL_SECS", 14 * 24 * 3600)?,
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::InternalServerError(format!("{} must be a number", key))),
        None => Ok(default),
    }
}

/// Token lifetimes must be positive and representable as a `chrono::Duration`.
fn parse_ttl<F>(lookup: &F, key: &str, default: i64) -> Result<i64, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: i64 = parse_or(lookup, key, default)?;
    if secs <= 0 || chrono::Duration::try_seconds(secs).is_none() {
        return Err(AppError::InternalServerError(format!(
            "{} must be a positive number of seconds, got {}",
            key, secs
        )));
    }
    Ok(secs)
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
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert_eq!(config.database_url.as_deref(), Some("postgres://test"));
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.access_token_ttl_secs, 3600);
        assert_eq!(config.refresh_token_ttl_secs, 1_209_600);
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_config_custom_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("JWT_SECRET", "secret"),
            ("SERVER_PORT", "3000"),
            ("SERVER_HOST", "0.0.0.0"),
            ("BCRYPT_COST", "4"),
        ]))
        .unwrap();

        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert!(config.database_url.is_none());
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.bcrypt_cost, 4);
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let result = Config::from_lookup(lookup_from(&[("JWT_SECRET", "secret")]));
        assert!(matches!(result, Err(AppError::InternalServerError(_))));
    }

    #[test]
    fn test_jwt_secret_is_required() {
        let result = Config::from_lookup(lookup_from(&[("STORE_BACKEND", "memory")]));
        assert!(result.is_err());

        let result = Config::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("JWT_SECRET", ""),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("JWT_SECRET", "secret"),
            ("SERVER_PORT", "eighty"),
        ]));
        match result {
            Err(AppError::InternalServerError(msg)) => assert!(msg.contains("SERVER_PORT")),
            _ => panic!("expected a configuration error"),
        }
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "sqlite"),
            ("JWT_SECRET", "secret"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_token_lifetimes_must_be_positive_and_in_range() {
        for (key, value) in [
            ("ACCESS_TOKEN_TTL_SECS", "0"),
            ("ACCESS_TOKEN_TTL_SECS", "-60"),
            ("ACCESS_TOKEN_TTL_SECS", "9223372036854775807"),
            ("REFRESH_TOKEN_TTL_SECS", "9223372036854775807"),
        ] {
            let result = Config::from_lookup(lookup_from(&[
                ("STORE_BACKEND", "memory"),
                ("JWT_SECRET", "secret"),
                (key, value),
            ]));
            match result {
                Err(AppError::InternalServerError(msg)) => assert!(msg.contains(key), "{}", msg),
                _ => panic!("expected {}={} to be rejected", key, value),
            }
        }
    }

    #[test]
    fn test_custom_token_lifetimes() {
        let config = Config::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("JWT_SECRET", "secret"),
            ("ACCESS_TOKEN_TTL_SECS", "60"),
            ("REFRESH_TOKEN_TTL_SECS", "120"),
        ]))
        .unwrap();

        assert_eq!(config.access_token_ttl_secs, 60);
        assert_eq!(config.refresh_token_ttl_secs, 120);
    }
}
