use std::{env, fmt::Display, net::SocketAddr, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub stale_after: Duration,
    /// `None` runs against the in memory store.
    pub backend: Option<BackendConfig>,
}

impl Config {
    /// Reads the process environment, after loading `.env` when one exists.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            info!(path = %path.display(), "loaded environment file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match lookup("BACKEND_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => Some(BackendConfig {
                url: url.trim().to_string(),
                api_key: lookup("BACKEND_API_KEY").unwrap_or_default(),
                timeout: Duration::from_secs(try_load(&lookup, "BACKEND_TIMEOUT_SECS", "10")?),
            }),
            None => {
                info!("BACKEND_URL not set, using the in memory store");
                None
            }
        };
        Ok(Self {
            bind_addr: try_load(&lookup, "BIND_ADDR", "0.0.0.0:8080")?,
            stale_after: Duration::from_secs(try_load(&lookup, "CACHE_STALE_AFTER_SECS", "30")?),
            backend,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}
