//! Runtime configuration read from the environment (and `.env`, loaded in
//! `main` before anything else runs).

use std::env;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_SERVICE_NAME: &str = "blog-posts";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    /// Redis is optional; without it the cache lives in-process.
    pub redis_url: Option<String>,
    pub cache_ttl_seconds: u64,
    pub service_name: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        Ok(AppConfig {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080)?,
            database_url,
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            cache_ttl_seconds: non_zero("CACHE_TTL_SECONDS", parse_var("CACHE_TTL_SECONDS", 300)?)?,
            service_name: service_name(),
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

/// TTLs must be positive: Redis rejects `SET EX 0`.
fn non_zero(name: &'static str, value: u64) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// Name reported in health and error payloads.
pub fn service_name() -> String {
    env::var("SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string())
}
