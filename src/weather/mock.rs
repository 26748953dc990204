//! Seeded synthetic forecast
//!
//! Produces a repeatable month with a recognizable shape: a pleasant first
//! week, a storm system on days 7-11, a mixed stretch and then the best
//! weather from day 20 on.

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use rand::{RngExt, SeedableRng, rngs::StdRng};
use std::ops::RangeInclusive;
use tracing::debug;

use super::ForecastProvider;
use crate::models::DayForecast;
use crate::Result;

pub const DEFAULT_SEED: u64 = 42;

struct Phase {
    high_f: RangeInclusive<i32>,
    low_f: RangeInclusive<i32>,
    precipitation_pct: RangeInclusive<u8>,
    wind_mph: RangeInclusive<u32>,
    conditions: &'static [&'static str],
    storm_risk: bool,
}

const PLEASANT: Phase = Phase {
    high_f: 82..=87,
    low_f: 70..=74,
    precipitation_pct: 5..=20,
    wind_mph: 5..=12,
    conditions: &["Sunny", "Partly Cloudy", "Clear"],
    storm_risk: false,
};

const STORM: Phase = Phase {
    high_f: 78..=83,
    low_f: 72..=76,
    precipitation_pct: 60..=95,
    wind_mph: 15..=30,
    conditions: &["Rain", "Thunderstorms", "Heavy Rain"],
    storm_risk: true,
};

const MIXED: Phase = Phase {
    high_f: 80..=86,
    low_f: 71..=75,
    precipitation_pct: 15..=45,
    wind_mph: 8..=15,
    conditions: &["Partly Cloudy", "Sunny", "Scattered Showers"],
    storm_risk: false,
};

const BEST: Phase = Phase {
    high_f: 83..=88,
    low_f: 71..=75,
    precipitation_pct: 5..=15,
    wind_mph: 5..=10,
    conditions: &["Sunny", "Clear", "Partly Cloudy"],
    storm_risk: false,
};

fn phase_for(offset: usize) -> &'static Phase {
    match offset {
        0..=6 => &PLEASANT,
        7..=11 => &STORM,
        12..=19 => &MIXED,
        _ => &BEST,
    }
}

/// Forecast provider backed by a seeded random generator. The destination is
/// ignored; the same seed always yields the same forecast.
#[derive(Debug, Clone, Copy)]
pub struct MockForecastProvider {
    seed: u64,
}

impl Default for MockForecastProvider {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl MockForecastProvider {
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// Generate `days` forecasts starting at `start`, stopping early at the
    /// end of the calendar
    #[must_use]
    pub fn generate(&self, start: NaiveDate, days: usize) -> Vec<DayForecast> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..days)
            .map_while(|offset| {
                let date = start.checked_add_days(Days::new(offset as u64))?;
                let phase = phase_for(offset);
                let condition = phase.conditions[rng.random_range(0..phase.conditions.len())];
                Some(DayForecast {
                    date,
                    high_f: rng.random_range(phase.high_f.clone()),
                    low_f: rng.random_range(phase.low_f.clone()),
                    condition: condition.to_string(),
                    precipitation_pct: rng.random_range(phase.precipitation_pct.clone()),
                    wind_mph: rng.random_range(phase.wind_mph.clone()),
                    storm_risk: phase.storm_risk,
                })
            })
            .collect()
    }
}

#[async_trait]
impl ForecastProvider for MockForecastProvider {
    async fn produce_forecast(
        &self,
        destination: &str,
        start: NaiveDate,
        days: usize,
    ) -> Result<Vec<DayForecast>> {
        debug!(destination, %start, days, seed = self.seed, "Generating synthetic forecast");
        Ok(self.generate(start, days))
    }
}
