//! Live forecasts from the Open-Meteo API
//!
//! The destination is geocoded first, then daily highs, lows, rain chance,
//! wind and weather codes are fetched in Fahrenheit and mph. Any transport or
//! decoding failure falls back to the seeded mock so the advisor keeps
//! working offline.

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{ForecastProvider, MockForecastProvider};
use crate::config::WeatherConfig;
use crate::models::DayForecast;
use crate::{AdvisorError, Result};

/// Open-Meteo serves at most 16 days of daily forecast
pub const MAX_FORECAST_DAYS: usize = 16;

const THUNDERSTORM_CODES: [u8; 3] = [95, 96, 99];

/// Forecast provider backed by Open-Meteo with retry and mock fallback
pub struct OpenMeteoForecastProvider {
    client: ClientWithMiddleware,
    base_url: String,
    geocoding_url: String,
    fallback: MockForecastProvider,
}

impl OpenMeteoForecastProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("travel-advisor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AdvisorError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            geocoding_url: config.geocoding_url.trim_end_matches('/').to_string(),
            fallback: MockForecastProvider::default(),
        })
    }

    async fn geocode(&self, destination: &str) -> anyhow::Result<GeocodingResult> {
        // "Maui, HI" -> "Maui"; the search endpoint matches place names only
        let name = destination.split(',').next().unwrap_or(destination).trim();
        let url = format!(
            "{}/search?name={}&count=1&language=en&format=json",
            self.geocoding_url,
            urlencoding::encode(name)
        );

        let response: GeocodingResponse = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Geocoding request for '{name}' failed"))?
            .error_for_status()?
            .json()
            .await
            .with_context(|| "Failed to parse OpenMeteo geocoding response")?;

        response
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No location found for '{destination}'"))
    }

    async fn fetch(
        &self,
        destination: &str,
        start: NaiveDate,
        days: usize,
    ) -> anyhow::Result<Vec<DayForecast>> {
        let location = self.geocode(destination).await?;
        debug!(
            name = %location.name,
            latitude = location.latitude,
            longitude = location.longitude,
            "Geocoded destination"
        );

        let days = days.min(MAX_FORECAST_DAYS);
        let end = start
            .checked_add_days(Days::new(days.saturating_sub(1) as u64))
            .ok_or_else(|| anyhow!("forecast end date after {start} is out of range"))?;
        let url = format!(
            "{}/forecast?latitude={}&longitude={}\
             &daily=temperature_2m_max,temperature_2m_min,precipitation_probability_max,wind_speed_10m_max,weather_code\
             &temperature_unit=fahrenheit&wind_speed_unit=mph&timezone=auto&start_date={start}&end_date={end}",
            self.base_url, location.latitude, location.longitude
        );

        let response: ForecastResponse = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Forecast request for '{destination}' failed"))?
            .error_for_status()?
            .json()
            .await
            .with_context(|| "Failed to parse OpenMeteo forecast response")?;

        let daily = response
            .daily
            .ok_or_else(|| anyhow!("OpenMeteo response has no daily block"))?;
        Ok(daily.into_day_forecasts())
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoForecastProvider {
    #[tracing::instrument(skip(self))]
    async fn produce_forecast(
        &self,
        destination: &str,
        start: NaiveDate,
        days: usize,
    ) -> Result<Vec<DayForecast>> {
        if days == 0 {
            return Ok(Vec::new());
        }

        match self.fetch(destination, start, days).await {
            Ok(forecast) if !forecast.is_empty() => {
                info!(days = forecast.len(), "Fetched live forecast");
                Ok(forecast)
            }
            Ok(_) => {
                warn!("Live forecast was empty, using synthetic forecast");
                self.fallback.produce_forecast(destination, start, days).await
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Live forecast unavailable, using synthetic forecast");
                self.fallback.produce_forecast(destination, start, days).await
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyData>,
}

/// Daily arrays, one entry per date in `time`
#[derive(Debug, Default, Deserialize)]
struct DailyData {
    time: Vec<String>,
    #[serde(rename = "temperature_2m_max", default)]
    temperature_max: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_min", default)]
    temperature_min: Vec<Option<f64>>,
    #[serde(rename = "precipitation_probability_max", default)]
    precipitation_probability: Vec<Option<f64>>,
    #[serde(rename = "wind_speed_10m_max", default)]
    wind_speed_max: Vec<Option<f64>>,
    #[serde(default)]
    weather_code: Vec<Option<u8>>,
}

impl DailyData {
    /// Days missing a date or temperature are dropped; other gaps read as zero.
    fn into_day_forecasts(self) -> Vec<DayForecast> {
        let at = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

        self.time
            .iter()
            .enumerate()
            .filter_map(|(i, time)| {
                let Ok(date) = NaiveDate::parse_from_str(time, "%Y-%m-%d") else {
                    debug!(time, "Skipping day with unparseable date");
                    return None;
                };
                let (Some(high), Some(low)) = (at(&self.temperature_max, i), at(&self.temperature_min, i)) else {
                    debug!(%date, "Skipping day without temperatures");
                    return None;
                };
                let code = self.weather_code.get(i).copied().flatten().unwrap_or(0);
                let precipitation = at(&self.precipitation_probability, i).unwrap_or(0.0);
                let wind = at(&self.wind_speed_max, i).unwrap_or(0.0);

                Some(DayForecast {
                    date,
                    high_f: high.round() as i32,
                    low_f: low.round() as i32,
                    condition: weather_code_to_description(code).to_string(),
                    precipitation_pct: precipitation.round().clamp(0.0, 100.0) as u8,
                    wind_mph: wind.round().max(0.0) as u32,
                    storm_risk: THUNDERSTORM_CODES.contains(&code),
                })
            })
            .collect()
    }
}

/// Convert an Open-Meteo WMO weather code to a condition label
#[must_use]
pub fn weather_code_to_description(code: u8) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mainly Clear",
        2 => "Partly Cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing Drizzle",
        61 | 63 => "Rain",
        65 => "Heavy Rain",
        66 | 67 => "Freezing Rain",
        71 | 73 | 75 | 77 => "Snow",
        80 | 81 => "Scattered Showers",
        82 => "Heavy Showers",
        85 | 86 => "Snow Showers",
        95 => "Thunderstorms",
        96 | 99 => "Thunderstorms with Hail",
        _ => "Unknown",
    }
}
