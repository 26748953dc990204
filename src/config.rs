//! Configuration management for the travel advisor
//!
//! Handles loading configuration from files and environment variables,
//! and validates every setting before the advisor is wired up.

use crate::AdvisorError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Maximum forecast horizon a trip request may ask for
pub const MAX_FORECAST_DAYS: usize = 90;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Forecast provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default trip parameters used when the CLI omits them
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Where daily forecasts come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastSource {
    /// Seeded synthetic forecast, no network access
    #[default]
    Mock,
    /// Open-Meteo, falling back to the mock on failure
    Live,
}

impl fmt::Display for ForecastSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastSource::Mock => write!(f, "mock"),
            ForecastSource::Live => write!(f, "live"),
        }
    }
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default)]
    pub source: ForecastSource,
    /// Base URL for the forecast API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_weather_max_retries")]
    pub max_retries: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default trip settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_traveler_id")]
    pub traveler_id: String,
    #[serde(default = "default_destination")]
    pub destination: String,
    #[serde(default = "default_origin_airport")]
    pub origin_airport: String,
    #[serde(default = "default_destination_airport")]
    pub destination_airport: String,
    /// Days of forecast to analyze
    #[serde(default = "default_forecast_days")]
    pub forecast_days: usize,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_weather_max_retries() -> u32 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_traveler_id() -> String {
    "alex".to_string()
}

fn default_destination() -> String {
    "Maui, HI".to_string()
}

fn default_origin_airport() -> String {
    "SFO".to_string()
}

fn default_destination_airport() -> String {
    "OGG".to_string()
}

fn default_forecast_days() -> usize {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            source: ForecastSource::default(),
            base_url: default_weather_base_url(),
            geocoding_url: default_geocoding_url(),
            timeout_seconds: default_weather_timeout(),
            max_retries: default_weather_max_retries(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            traveler_id: default_traveler_id(),
            destination: default_destination(),
            origin_airport: default_origin_airport(),
            destination_airport: default_destination_airport(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl AdvisorConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from an explicit path, falling back to the default location
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRAVEL_ADVISOR_WEATHER__SOURCE=live
        builder = builder.add_source(
            Environment::with_prefix("TRAVEL_ADVISOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AdvisorConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to deserialize configuration from {}", config_file.display()))?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travel-advisor").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.geocoding_url.is_empty() {
            self.weather.geocoding_url = default_geocoding_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.traveler_id.is_empty() {
            self.defaults.traveler_id = default_traveler_id();
        }
        if self.defaults.destination.is_empty() {
            self.defaults.destination = default_destination();
        }
        if self.defaults.forecast_days == 0 {
            self.defaults.forecast_days = default_forecast_days();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(AdvisorError::config("Weather API timeout cannot exceed 300 seconds").into());
        }

        if self.weather.max_retries > 10 {
            return Err(AdvisorError::config("Weather API max retries cannot exceed 10").into());
        }

        if !(1..=MAX_FORECAST_DAYS).contains(&self.defaults.forecast_days) {
            return Err(AdvisorError::config(format!(
                "Default forecast days must be between 1 and {MAX_FORECAST_DAYS}"
            ))
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AdvisorError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AdvisorError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("base URL", &self.weather.base_url),
            ("geocoding URL", &self.weather.geocoding_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AdvisorError::config(format!(
                    "Weather API {name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Environment variables are process-wide
    static ENV_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = AdvisorConfig::default();
        assert_eq!(config.weather.source, ForecastSource::Mock);
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.traveler_id, "alex");
        assert_eq!(config.defaults.forecast_days, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = AdvisorConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = AdvisorConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = AdvisorConfig::default();
        config.defaults.forecast_days = 91;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = AdvisorConfig::default();
        config.weather.geocoding_url = "ftp://geocoding.invalid".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("geocoding URL"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_fields() {
        let mut config = AdvisorConfig::default();
        config.weather.base_url.clear();
        config.defaults.forecast_days = 0;
        config.apply_defaults();
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.defaults.forecast_days, 30);
    }

    #[test]
    fn test_load_from_toml_file() {
        let _guard = ENV_GUARD.lock().unwrap();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[weather]
source = "live"
max_retries = 5

[defaults]
traveler_id = "jordan"
forecast_days = 14
"#
        )
        .unwrap();

        let config = AdvisorConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.weather.source, ForecastSource::Live);
        assert_eq!(config.weather.max_retries, 5);
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.defaults.traveler_id, "jordan");
        assert_eq!(config.defaults.forecast_days, 14);
        assert_eq!(config.defaults.destination, "Maui, HI");
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let _guard = ENV_GUARD.lock().unwrap();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nformat = \"xml\"").unwrap();

        let result = AdvisorConfig::load_from_path(Some(file.path().to_path_buf()));
        assert!(result.unwrap_err().to_string().contains("Invalid log format"));
    }

    #[test]
    fn test_environment_variable_override() {
        let _guard = ENV_GUARD.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        // SAFETY: serialized by ENV_GUARD
        unsafe {
            env::set_var("TRAVEL_ADVISOR_WEATHER__SOURCE", "live");
        }
        let result = AdvisorConfig::load_from_path(Some(missing));
        // SAFETY: serialized by ENV_GUARD
        unsafe {
            env::remove_var("TRAVEL_ADVISOR_WEATHER__SOURCE");
        }

        assert_eq!(result.unwrap().weather.source, ForecastSource::Live);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = AdvisorConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("travel-advisor"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
