use std::time::Duration;

use jobboard_engine::{updates_endpoint, FetchSettings};
use log::LevelFilter;

use super::logging::LogDestination;

pub const ENV_API_URL: &str = "JOBBOARD_API_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "JOBBOARD_REQUEST_TIMEOUT_SECS";
pub const ENV_MAX_RESPONSE_BYTES: &str = "JOBBOARD_MAX_RESPONSE_BYTES";
pub const ENV_LOG: &str = "JOBBOARD_LOG";
pub const ENV_LOG_LEVEL: &str = "JOBBOARD_LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fetch: FetchSettings,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{variable} must be {expected}, got {value:?}")]
    Invalid {
        variable: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from a variable lookup; unset or blank values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut fetch = FetchSettings::default();

        if let Some(base_url) = read(ENV_API_URL) {
            if updates_endpoint(&base_url).is_err() {
                return Err(invalid(ENV_API_URL, "an absolute URL", base_url));
            }
            fetch.base_url = base_url.trim().to_string();
        }

        if let Some(raw) = read(ENV_REQUEST_TIMEOUT_SECS) {
            let secs = parse_positive(&raw)
                .ok_or_else(|| invalid(ENV_REQUEST_TIMEOUT_SECS, "a positive integer", raw))?;
            fetch.request_timeout = Some(Duration::from_secs(secs));
        }

        if let Some(raw) = read(ENV_MAX_RESPONSE_BYTES) {
            fetch.max_bytes = parse_positive(&raw)
                .ok_or_else(|| invalid(ENV_MAX_RESPONSE_BYTES, "a positive integer", raw))?;
        }

        let log_destination = match read(ENV_LOG) {
            Some(raw) => LogDestination::parse(&raw)
                .ok_or_else(|| invalid(ENV_LOG, "one of file, terminal, both, off", raw))?,
            None => LogDestination::File,
        };

        let log_level = match read(ENV_LOG_LEVEL) {
            Some(raw) => board_logging::parse_level(&raw)
                .ok_or_else(|| invalid(ENV_LOG_LEVEL, "a log level", raw))?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            fetch,
            log_destination,
            log_level,
        })
    }
}

fn parse_positive(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|value| *value > 0)
}

fn invalid(variable: &'static str, expected: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid {
        variable,
        expected,
        value,
    }
}
