//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout stays machine-readable JSON.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use crate::config::LoggingConfig;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("telemetry error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level;
/// `verbose` raises the configured level to debug.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<(), TelemetryError> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|source| TelemetryError::EnvFilter {
            value: level.to_string(),
            source,
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.format == "json" {
        builder.json().try_init().map_err(TelemetryError::Subscriber)
    } else {
        builder.compact().try_init().map_err(TelemetryError::Subscriber)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_reported() {
        // Only reachable when RUST_LOG is unset
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "travel_advisor=loud".to_string(),
            format: "pretty".to_string(),
        };
        let err = init(&config, false).unwrap_err();
        assert!(err.to_string().contains("travel_advisor=loud"));
    }
}
