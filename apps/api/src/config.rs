use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::search::SearchSettings;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Directory uploaded documents are written to.
    pub upload_dir: String,
    pub search: SearchSettings,
    pub search_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = SearchSettings::default();
        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "pdfs".to_string()),
            search: SearchSettings {
                max_workers: positive_env_or("SEARCH_MAX_WORKERS", defaults.max_workers)?,
                batch_size: positive_env_or("SEARCH_BATCH_SIZE", defaults.batch_size)?,
                wave_size: positive_env_or("SEARCH_WAVE_SIZE", defaults.wave_size)?,
            },
            search_timeout_secs: env_or("SEARCH_TIMEOUT_SECS", 300)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn positive_env_or(key: &str, default: usize) -> Result<usize> {
    let value = env_or(key, default)?;
    if value == 0 {
        bail!("{key} must be at least 1");
    }
    Ok(value)
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} has an invalid value '{raw}'"))
}
