use std::str::FromStr;
use std::time::Duration;

use super::ConfigError;

const CHANNEL_BUFFER: &str = "CART_CHANNEL_BUFFER";
const REMOVAL_DELAY_MS: &str = "CART_REMOVAL_DELAY_MS";
const LOG_FILTER: &str = "CART_LOG_FILTER";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Mailbox capacity of every actor.
    pub channel_buffer: usize,
    /// How long a removed row lingers before the cart drops it.
    pub removal_delay: Duration,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            removal_delay: Duration::from_millis(500),
            log_filter: "info".to_string(),
        }
    }
}

fn parse<T>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let channel_buffer = match lookup(CHANNEL_BUFFER) {
            Some(raw) => parse::<usize>(CHANNEL_BUFFER, raw)?,
            None => defaults.channel_buffer,
        };
        if channel_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: CHANNEL_BUFFER,
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let removal_delay = match lookup(REMOVAL_DELAY_MS) {
            Some(raw) => Duration::from_millis(parse::<u64>(REMOVAL_DELAY_MS, raw)?),
            None => defaults.removal_delay,
        };

        let log_filter = lookup(LOG_FILTER)
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        let config = Self {
            channel_buffer,
            removal_delay,
            log_filter,
        };
        tracing::debug!(?config, "Config loaded");
        Ok(config)
    }
}
