use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

use crate::agents::SimulatedExecutor;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// How long each simulated step takes
    pub step_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3001,
            step_delay: SimulatedExecutor::DEFAULT_DELAY,
        }
    }
}

impl Config {
    /// Load from process environment variables
    ///
    /// Reads `HOST`, `PORT` and `STEP_DELAY_MS`. Unset variables fall back to
    /// defaults; set-but-unparsable ones are rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_or(&lookup, "HOST", defaults.host)?;
        let port = parse_or(&lookup, "PORT", defaults.port)?;
        let step_delay = parse_or(
            &lookup,
            "STEP_DELAY_MS",
            defaults.step_delay.as_millis() as u64,
        )
        .map(Duration::from_millis)?;

        Ok(Self {
            host,
            port,
            step_delay,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => {
            tracing::warn!("{} not set, using default {}", key, default);
            Ok(default)
        }
    }
}
