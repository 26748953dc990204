//! Daily forecast providers and window scoring

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::config::{ForecastSource, WeatherConfig};
use crate::models::DayForecast;
use crate::Result;

pub mod mock;
pub mod open_meteo;
pub mod window;

pub use mock::MockForecastProvider;
pub use open_meteo::OpenMeteoForecastProvider;
pub use window::{ScoredWindow, WeatherFinding, WeatherWindowResult, WeatherWindowScorer};

/// Source of daily forecasts for a destination
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Produce up to `days` consecutive daily forecasts beginning at `start`.
    async fn produce_forecast(
        &self,
        destination: &str,
        start: NaiveDate,
        days: usize,
    ) -> Result<Vec<DayForecast>>;
}

/// Build the forecast provider selected by configuration
pub fn forecast_provider(config: &WeatherConfig) -> Result<Arc<dyn ForecastProvider>> {
    let provider: Arc<dyn ForecastProvider> = match config.source {
        ForecastSource::Mock => Arc::new(MockForecastProvider::default()),
        ForecastSource::Live => Arc::new(OpenMeteoForecastProvider::new(config)?),
    };
    Ok(provider)
}
