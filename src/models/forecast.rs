//! Daily forecast model and date windows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Precipitation probability above which a day counts as rainy
pub const RAINY_DAY_PRECIPITATION_PCT: u8 = 40;

/// Weather for one calendar day, pre-summarized by a forecast provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    /// Daily high in Fahrenheit
    pub high_f: i32,
    /// Daily low in Fahrenheit
    pub low_f: i32,
    /// Condition label, e.g. "Sunny" or "Thunderstorms"
    pub condition: String,
    /// Chance of rain (0-100)
    pub precipitation_pct: u8,
    /// Average wind speed in mph
    pub wind_mph: u32,
    /// Explicit severe-weather flag
    pub storm_risk: bool,
}

impl DayForecast {
    #[must_use]
    pub fn is_rainy(&self) -> bool {
        self.precipitation_pct > RAINY_DAY_PRECIPITATION_PCT
    }
}

/// An inclusive span of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window covering `days[start..start + len]`, clipped to the slice.
    /// Returns `None` for an empty slice or an out-of-range start.
    #[must_use]
    pub fn spanning(days: &[DayForecast], start: usize, len: usize) -> Option<Self> {
        let first = days.get(start)?;
        let last_index = (start + len.max(1) - 1).min(days.len() - 1);
        Some(Self::new(first.date, days[last_index].date))
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A day that lands inside `[72, 85]` with calm wind and no rain.
    pub fn pleasant_day(date: NaiveDate) -> DayForecast {
        DayForecast {
            date,
            high_f: 80,
            low_f: 72,
            condition: "Sunny".to_string(),
            precipitation_pct: 10,
            wind_mph: 15,
            storm_risk: false,
        }
    }

    pub fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 10).unwrap() + chrono::Duration::days(offset)
    }

    /// `count` consecutive pleasant days starting at 2025-07-10
    pub fn pleasant_run(count: usize) -> Vec<DayForecast> {
        (0..count).map(|i| pleasant_day(day(i as i64))).collect()
    }
}
