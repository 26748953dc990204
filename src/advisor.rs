//! Travel advisor service
//!
//! Wires the profile repository and the three data providers to the
//! analyzers. Every operation resolves the traveler first; an unknown
//! traveler is an error, never a default profile.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{AdvisorConfig, MAX_FORECAST_DAYS};
use crate::flights::{FlightAnalysisResult, FlightBudgetAnalyzer, FlightProvider, FlightQuery, MockFlightProvider};
use crate::hotels::{HotelAnalysisResult, HotelProvider, HotelQuery, HotelScorer, InventoryHotelProvider};
use crate::models::{DateWindow, DayForecast, PreferenceProfile};
use crate::profiles::{InMemoryProfileRepository, ProfileRepository};
use crate::synthesis::{RecommendationSynthesizer, TravelRecommendation};
use crate::weather::{self, ForecastProvider, MockForecastProvider, WeatherWindowResult, WeatherWindowScorer};
use crate::{AdvisorError, Result};

/// Parameters shared by the weather, flight and recommendation operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub traveler_id: String,
    /// Destination name, e.g. "Maui, HI"
    pub destination: String,
    pub origin_airport: String,
    pub destination_airport: String,
    /// First day of the forecast and earliest departure
    pub start_date: NaiveDate,
    /// Days of forecast to analyze, also the departure search span
    pub forecast_days: usize,
}

impl TripRequest {
    /// Request with the configured defaults for everything but the start date
    #[must_use]
    pub fn from_defaults(config: &AdvisorConfig, start_date: NaiveDate) -> Self {
        let defaults = &config.defaults;
        Self {
            traveler_id: defaults.traveler_id.clone(),
            destination: defaults.destination.clone(),
            origin_airport: defaults.origin_airport.clone(),
            destination_airport: defaults.destination_airport.clone(),
            start_date,
            forecast_days: defaults.forecast_days,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("destination", &self.destination),
            ("origin airport", &self.origin_airport),
            ("destination airport", &self.destination_airport),
        ] {
            if value.trim().is_empty() {
                return Err(AdvisorError::validation(format!("{field} must not be empty")));
            }
        }
        if !(1..=MAX_FORECAST_DAYS).contains(&self.forecast_days) {
            return Err(AdvisorError::validation(format!(
                "forecast days must be between 1 and {MAX_FORECAST_DAYS}, got {}",
                self.forecast_days
            )));
        }
        Ok(())
    }

    /// The forecast span plus one full stay must stay within the calendar
    fn check_date_range(&self, profile: &PreferenceProfile) -> Result<()> {
        add_days(self.start_date, self.forecast_days.saturating_add(profile.window_length())).map(|_| ())
    }

    fn flight_query(&self, profile: &PreferenceProfile) -> Result<FlightQuery> {
        self.check_date_range(profile)?;
        Ok(FlightQuery {
            origin: self.origin_airport.clone(),
            destination: self.destination_airport.clone(),
            earliest_departure: self.start_date,
            latest_departure: add_days(self.start_date, self.forecast_days)?,
            trip_nights: profile.trip_length_nights,
        })
    }
}

fn add_days(date: NaiveDate, days: usize) -> Result<NaiveDate> {
    u64::try_from(days)
        .ok()
        .and_then(|days| date.checked_add_days(Days::new(days)))
        .ok_or_else(|| AdvisorError::validation(format!("{days} days after {date} is out of range")))
}

fn validate_stay(query: &HotelQuery) -> Result<()> {
    if query.destination.trim().is_empty() {
        return Err(AdvisorError::validation("destination must not be empty"));
    }
    if query.check_out <= query.check_in {
        return Err(AdvisorError::validation(format!(
            "check-out {} must be after check-in {}",
            query.check_out, query.check_in
        )));
    }
    Ok(())
}

/// Whether any storm-flagged day falls inside the stay. Check-out night is
/// not slept at the hotel.
#[must_use]
pub fn stay_overlaps_storm(forecast: &[DayForecast], check_in: NaiveDate, check_out: NaiveDate) -> bool {
    let Some(last_night) = check_out.pred_opt() else {
        return false;
    };
    let nights = DateWindow::new(check_in, last_night);
    forecast
        .iter()
        .any(|day| day.storm_risk && nights.contains(day.date))
}

pub struct TravelAdvisor {
    profiles: Arc<dyn ProfileRepository>,
    forecasts: Arc<dyn ForecastProvider>,
    flights: Arc<dyn FlightProvider>,
    hotels: Arc<dyn HotelProvider>,
}

impl TravelAdvisor {
    #[must_use]
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        forecasts: Arc<dyn ForecastProvider>,
        flights: Arc<dyn FlightProvider>,
        hotels: Arc<dyn HotelProvider>,
    ) -> Self {
        Self {
            profiles,
            forecasts,
            flights,
            hotels,
        }
    }

    /// Sample travelers with seeded mock providers; no network access.
    #[must_use]
    pub fn with_mock_providers() -> Self {
        Self::new(
            Arc::new(InMemoryProfileRepository::with_sample_travelers()),
            Arc::new(MockForecastProvider::default()),
            Arc::new(MockFlightProvider::default()),
            Arc::new(InventoryHotelProvider::default()),
        )
    }

    /// Sample travelers with the forecast source chosen by configuration
    pub fn from_config(config: &AdvisorConfig) -> Result<Self> {
        info!(source = %config.weather.source, "Configuring forecast provider");
        Ok(Self::new(
            Arc::new(InMemoryProfileRepository::with_sample_travelers()),
            weather::forecast_provider(&config.weather)?,
            Arc::new(MockFlightProvider::default()),
            Arc::new(InventoryHotelProvider::default()),
        ))
    }

    /// Known traveler identifiers
    #[must_use]
    pub fn travelers(&self) -> Vec<String> {
        self.profiles.traveler_ids()
    }

    pub fn profile(&self, traveler_id: &str) -> Result<PreferenceProfile> {
        self.profiles
            .find(traveler_id)
            .ok_or_else(|| AdvisorError::profile_not_found(traveler_id, self.profiles.traveler_ids()))
    }

    #[tracing::instrument(skip(self, request), fields(traveler = %request.traveler_id))]
    pub async fn weather_report(&self, request: &TripRequest) -> Result<WeatherWindowResult> {
        request.validate()?;
        let profile = self.profile(&request.traveler_id)?;
        request.check_date_range(&profile)?;
        let forecast = self
            .forecasts
            .produce_forecast(&request.destination, request.start_date, request.forecast_days)
            .await?;
        Ok(WeatherWindowScorer::analyze(&forecast, &profile))
    }

    #[tracing::instrument(skip(self, request), fields(traveler = %request.traveler_id))]
    pub async fn flight_report(&self, request: &TripRequest) -> Result<FlightAnalysisResult> {
        request.validate()?;
        let profile = self.profile(&request.traveler_id)?;
        let flights = self.flights.search_flights(&request.flight_query(&profile)?).await?;
        Ok(FlightBudgetAnalyzer::analyze(&flights, &profile))
    }

    #[tracing::instrument(skip(self, stay))]
    pub async fn hotel_report(&self, traveler_id: &str, stay: &HotelQuery) -> Result<HotelAnalysisResult> {
        validate_stay(stay)?;
        let profile = self.profile(traveler_id)?;
        self.evaluate_stay(&profile, stay).await
    }

    async fn evaluate_stay(&self, profile: &PreferenceProfile, stay: &HotelQuery) -> Result<HotelAnalysisResult> {
        let hotels = self.hotels.search_hotels(stay).await?;
        Ok(HotelScorer::evaluate(&hotels, profile).for_stay(&stay.destination, stay.check_in, stay.check_out))
    }

    /// Full pipeline: forecast and flights are fetched concurrently, hotels
    /// are priced for the best weather window, then everything is combined.
    #[tracing::instrument(skip(self, request), fields(traveler = %request.traveler_id))]
    pub async fn recommend(&self, request: &TripRequest) -> Result<TravelRecommendation> {
        request.validate()?;
        let profile = self.profile(&request.traveler_id)?;
        let flight_query = request.flight_query(&profile)?;

        let (forecast, flights) = futures::try_join!(
            self.forecasts
                .produce_forecast(&request.destination, request.start_date, request.forecast_days),
            self.flights.search_flights(&flight_query),
        )?;
        debug!(days = forecast.len(), flights = flights.len(), "Fetched trip data");

        let weather = WeatherWindowScorer::analyze(&forecast, &profile);
        let flights = FlightBudgetAnalyzer::analyze(&flights, &profile);

        let check_in = weather
            .best_window
            .map_or(request.start_date, |best| best.window.start);
        let check_out = add_days(check_in, profile.window_length())?;
        let stay = HotelQuery {
            destination: request.destination.clone(),
            check_in,
            check_out,
            storm_period: stay_overlaps_storm(&forecast, check_in, check_out),
        };
        let hotels = self.evaluate_stay(&profile, &stay).await?;

        let recommendation = RecommendationSynthesizer::synthesize(&profile, &weather, &flights, &hotels);
        info!(
            window = %recommendation
                .recommended_window
                .map_or_else(|| "N/A".to_string(), |w: DateWindow| w.to_string()),
            confidence = %recommendation.confidence,
            "Recommendation ready"
        );
        Ok(recommendation)
    }
}
