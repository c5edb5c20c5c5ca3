// src/config.rs
use std::{net::SocketAddr, path::PathBuf, time::Duration};

use thiserror::Error;

use crate::services::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Gemini credential. `None` keeps the assistant in "unavailable" mode.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub bind_addr: SocketAddr,
    pub session_ttl: Duration,
    pub purge_interval: Duration,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            session_ttl: Duration::from_secs(30 * 60),
            purge_interval: Duration::from_secs(60),
            static_dir: PathBuf::from("public"),
        }
    }
}

impl Config {
    /// Read settings from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY"));

        let bind_addr = match non_empty("BIND_ADDR") {
            Some(v) => v
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::Invalid { key: "BIND_ADDR", value: v })?,
            None => defaults.bind_addr,
        };

        Ok(Self {
            api_key,
            model: non_empty("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: non_empty("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            bind_addr,
            session_ttl: secs(non_empty("SESSION_TTL_SECS"), "SESSION_TTL_SECS")?
                .unwrap_or(defaults.session_ttl),
            purge_interval: secs(non_empty("PURGE_INTERVAL_SECS"), "PURGE_INTERVAL_SECS")?
                .unwrap_or(defaults.purge_interval),
            static_dir: non_empty("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
        })
    }
}

fn secs(raw: Option<String>, key: &'static str) -> Result<Option<Duration>, ConfigError> {
    match raw {
        None => Ok(None),
        Some(v) => match v.trim().parse::<u64>() {
            Ok(n) if n > 0 => Ok(Some(Duration::from_secs(n))),
            _ => Err(ConfigError::Invalid { key, value: v }),
        },
    }
}
