//! Daemon configuration loaded from environment variables.
//!
//! Loading is fail-fast: required variables must be present and valid or
//! startup is refused with a clear error message.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PAPERLESS_TOKEN environment variable is required")]
    MissingToken,

    #[error("invalid {name} value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// How the daemon runs: webhook server, periodic sync, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Webhook,
    Schedule,
    Hybrid,
}

impl RunMode {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_lowercase().as_str() {
            "webhook" => Ok(Self::Webhook),
            "schedule" => Ok(Self::Schedule),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(ConfigError::Invalid {
                name: "SYNC_MODE",
                value: other.to_string(),
                reason: "expected webhook, schedule, or hybrid".to_string(),
            }),
        }
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Webhook => write!(f, "webhook"),
            Self::Schedule => write!(f, "schedule"),
            Self::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// Daemon configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Paperless instance.
    pub base_url: String,
    /// API token (required).
    pub token: String,
    /// Prefix for auto-generated owner tags.
    pub tag_prefix: String,
    /// Path to the owner-to-tag mapping file.
    pub mapping_file: PathBuf,
    pub mode: RunMode,
    /// Webhook bind host.
    pub host: String,
    /// Webhook bind port.
    pub port: u16,
    /// Hours between scheduled full syncs.
    pub sync_interval_hours: u64,
    /// Default log filter, overridable via `RUST_LOG`.
    pub log_filter: String,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env::var("PAPERLESS_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let base_url =
            env::var("PAPERLESS_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        let tag_prefix = env::var("OWNER_TAG_PREFIX").unwrap_or_else(|_| "owner:".to_string());
        let mapping_file = env::var("OWNER_MAPPING_FILE")
            .unwrap_or_else(|_| "owner_tag_mapping.json".to_string())
            .into();

        let mode = match env::var("SYNC_MODE") {
            Ok(value) => RunMode::parse(&value)?,
            Err(_) => RunMode::Webhook,
        };

        let host = env::var("WEBHOOK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var("WEBHOOK_PORT", 5000)?;
        let sync_interval_hours = parse_var("SYNC_INTERVAL_HOURS", 6)?;
        if sync_interval_hours == 0 {
            return Err(ConfigError::Invalid {
                name: "SYNC_INTERVAL_HOURS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            base_url,
            token,
            tag_prefix,
            mapping_file,
            mode,
            host,
            port,
            sync_interval_hours,
            log_filter,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            value,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_mode_parses_known_values() {
        assert_eq!(RunMode::parse("webhook").unwrap(), RunMode::Webhook);
        assert_eq!(RunMode::parse("Hybrid").unwrap(), RunMode::Hybrid);
        assert_eq!(RunMode::parse("SCHEDULE").unwrap(), RunMode::Schedule);
    }

    #[test]
    fn run_mode_rejects_unknown_values() {
        assert!(RunMode::parse("daemon").is_err());
    }

    #[test]
    fn zero_sync_interval_refuses_startup() {
        // Sole test touching process environment; keep it that way.
        env::set_var("PAPERLESS_TOKEN", "test-token");
        env::set_var("SYNC_INTERVAL_HOURS", "0");

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::Invalid { name, .. } => assert_eq!(name, "SYNC_INTERVAL_HOURS"),
            other => panic!("expected Invalid error, got {other:?}"),
        }

        env::remove_var("SYNC_INTERVAL_HOURS");
        env::remove_var("PAPERLESS_TOKEN");
    }
}
