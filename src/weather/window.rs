//! Sliding-window weather scoring
//!
//! Scores contiguous spans of daily forecasts against a traveler's
//! preferences and finds the best and worst trip-length windows in a longer
//! forecast. Scores are arbitrary units; they only rank windows for one
//! traveler against each other.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{DateWindow, DayForecast, PreferenceProfile};

const IN_RANGE_POINTS: f64 = 10.0;
const PENALTY_PER_DEGREE: f64 = 1.5;
const STORM_PENALTY_PER_COMFORT: f64 = 5.0;
const RAIN_PENALTY: f64 = 3.0;
const HIGH_WIND_MPH: u32 = 20;
const HIGH_WIND_PENALTY: f64 = 5.0;
const CALM_WIND_MPH: u32 = 10;
const CALM_WIND_BONUS: f64 = 2.0;

/// A window together with where it sits in the forecast and its score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredWindow {
    pub window: DateWindow,
    /// Index of the first day in the analyzed forecast
    pub start_index: usize,
    /// Number of forecast days covered
    pub length: usize,
    pub score: f64,
}

impl ScoredWindow {
    fn over(days: &[DayForecast], start_index: usize, length: usize, profile: &PreferenceProfile) -> Self {
        let slice = &days[start_index..start_index + length];
        Self {
            window: DateWindow::new(slice[0].date, slice[length - 1].date),
            start_index,
            length,
            score: WeatherWindowScorer::score_window(slice, profile),
        }
    }
}

/// One fact-statement about an analyzed forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeatherFinding {
    NoData,
    Overview {
        days: usize,
        avg_high_f: i32,
        avg_low_f: i32,
    },
    StormWarning {
        storm_days: usize,
        avoid_from: NaiveDate,
    },
    BestWindow {
        window: DateWindow,
    },
}

impl fmt::Display for WeatherFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherFinding::NoData => write!(f, "No forecast data available."),
            WeatherFinding::Overview {
                days,
                avg_high_f,
                avg_low_f,
            } => write!(
                f,
                "Over the next {days} days, expect average highs of {avg_high_f}°F and lows of {avg_low_f}°F."
            ),
            WeatherFinding::StormWarning {
                storm_days,
                avoid_from,
            } => write!(
                f,
                "WARNING: {storm_days} days have storm risk. Avoid the period around {avoid_from}."
            ),
            WeatherFinding::BestWindow { window } => {
                write!(f, "Best weather window for your preferences: {window}.")
            }
        }
    }
}

/// Weather analysis of a full forecast for one traveler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherWindowResult {
    /// First to last forecast day, `None` without data
    pub period: Option<DateWindow>,
    pub avg_high_f: i32,
    pub avg_low_f: i32,
    pub rainy_days: usize,
    pub storm_risk_days: usize,
    pub best_window: Option<ScoredWindow>,
    pub worst_window: Option<ScoredWindow>,
    pub findings: Vec<WeatherFinding>,
    /// The analyzed forecast, kept for drill-down and alternative search
    pub daily_forecasts: Vec<DayForecast>,
}

impl WeatherWindowResult {
    fn no_data() -> Self {
        Self {
            period: None,
            avg_high_f: 0,
            avg_low_f: 0,
            rainy_days: 0,
            storm_risk_days: 0,
            best_window: None,
            worst_window: None,
            findings: vec![WeatherFinding::NoData],
            daily_forecasts: Vec::new(),
        }
    }

    /// Findings rendered as prose
    #[must_use]
    pub fn summary(&self) -> String {
        render(&self.findings)
    }

    /// Days covered by a window of this forecast
    #[must_use]
    pub fn days_in(&self, scored: &ScoredWindow) -> &[DayForecast] {
        let end = (scored.start_index + scored.length).min(self.daily_forecasts.len());
        &self.daily_forecasts[scored.start_index.min(end)..end]
    }

    /// Number of forecast days whose high exceeds `threshold_f`
    #[must_use]
    pub fn days_above(&self, threshold_f: i32) -> usize {
        self.daily_forecasts
            .iter()
            .filter(|day| day.high_f > threshold_f)
            .count()
    }
}

pub(crate) fn render<T: fmt::Display>(findings: &[T]) -> String {
    findings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Window scorer; all operations are pure functions of their inputs.
pub struct WeatherWindowScorer;

impl WeatherWindowScorer {
    /// Score one day for a traveler
    #[must_use]
    pub fn score_day(day: &DayForecast, profile: &PreferenceProfile) -> f64 {
        let comfort = f64::from(profile.comfort_sensitivity);
        let mut score = if profile.is_comfortable_high(day.high_f) {
            IN_RANGE_POINTS
        } else {
            -PENALTY_PER_DEGREE * f64::from(profile.degrees_outside_range(day.high_f))
        };

        if day.storm_risk {
            score -= STORM_PENALTY_PER_COMFORT * comfort;
        }
        if day.is_rainy() {
            score -= RAIN_PENALTY * (comfort / 5.0);
        }

        if day.wind_mph > HIGH_WIND_MPH {
            score -= HIGH_WIND_PENALTY;
        } else if day.wind_mph < CALM_WIND_MPH {
            score += CALM_WIND_BONUS;
        }

        score
    }

    /// Score a contiguous span of days: the sum of its day scores
    #[must_use]
    pub fn score_window(days: &[DayForecast], profile: &PreferenceProfile) -> f64 {
        days.iter().map(|day| Self::score_day(day, profile)).sum()
    }

    /// Analyze a full forecast: aggregate statistics plus best and worst
    /// trip-length windows. Never fails; an empty forecast yields a
    /// zero-valued result with a no-data finding.
    #[must_use]
    pub fn analyze(forecast: &[DayForecast], profile: &PreferenceProfile) -> WeatherWindowResult {
        if forecast.is_empty() {
            return WeatherWindowResult::no_data();
        }

        let days = forecast.len();
        let window_len = profile.window_length();

        let count = i64::try_from(days).unwrap_or(i64::MAX);
        let total_high: i64 = forecast.iter().map(|d| i64::from(d.high_f)).sum();
        let total_low: i64 = forecast.iter().map(|d| i64::from(d.low_f)).sum();
        let avg_high_f = i32::try_from(total_high.div_euclid(count)).unwrap_or_default();
        let avg_low_f = i32::try_from(total_low.div_euclid(count)).unwrap_or_default();
        let rainy_days = forecast.iter().filter(|d| d.is_rainy()).count();
        let storm_risk_days = forecast.iter().filter(|d| d.storm_risk).count();

        let (best, worst) = if days <= window_len {
            let whole = ScoredWindow::over(forecast, 0, days, profile);
            (whole, whole)
        } else {
            let mut best = ScoredWindow::over(forecast, 0, window_len, profile);
            let mut worst = best;
            for start in 1..=days - window_len {
                let candidate = ScoredWindow::over(forecast, start, window_len, profile);
                // Strict comparisons keep the first-encountered window on ties
                if candidate.score > best.score {
                    best = candidate;
                }
                if candidate.score < worst.score {
                    worst = candidate;
                }
            }
            (best, worst)
        };

        let mut findings = vec![WeatherFinding::Overview {
            days,
            avg_high_f,
            avg_low_f,
        }];
        if storm_risk_days > 0 {
            findings.push(WeatherFinding::StormWarning {
                storm_days: storm_risk_days,
                avoid_from: worst.window.start,
            });
        }
        findings.push(WeatherFinding::BestWindow {
            window: best.window,
        });

        WeatherWindowResult {
            period: DateWindow::spanning(forecast, 0, days),
            avg_high_f,
            avg_low_f,
            rainy_days,
            storm_risk_days,
            best_window: Some(best),
            worst_window: Some(worst),
            findings,
            daily_forecasts: forecast.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::forecast::fixtures::{day, pleasant_day, pleasant_run};
    use crate::models::profile::fixtures::alex;
    use rstest::rstest;

    fn storm_profile() -> PreferenceProfile {
        let mut profile = alex();
        profile.comfort_sensitivity = 9;
        profile.trip_length_nights = 5;
        profile
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(7)]
    fn test_perfect_window_scores_ten_per_day(#[case] len: usize) {
        let days = pleasant_run(len);
        assert_eq!(WeatherWindowScorer::score_window(&days, &alex()), 10.0 * len as f64);
    }

    #[rstest]
    #[case(10, 10.0)]
    #[case(20, 10.0)]
    #[case(9, 12.0)]
    #[case(21, 5.0)]
    fn test_wind_terms(#[case] wind: u32, #[case] expected: f64) {
        let mut forecast = pleasant_day(day(0));
        forecast.wind_mph = wind;
        assert_eq!(WeatherWindowScorer::score_day(&forecast, &alex()), expected);
    }

    #[test]
    fn test_storm_day_costs_five_times_comfort() {
        let profile = storm_profile();
        let calm = pleasant_run(5);
        let mut stormy = calm.clone();
        stormy[2].storm_risk = true;

        let diff = WeatherWindowScorer::score_window(&calm, &profile)
            - WeatherWindowScorer::score_window(&stormy, &profile);
        assert_eq!(diff, 45.0);

        stormy[2].precipitation_pct = 80;
        let diff = WeatherWindowScorer::score_window(&calm, &profile)
            - WeatherWindowScorer::score_window(&stormy, &profile);
        assert!((diff - 50.4).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_penalty_is_monotonic() {
        let profile = alex();
        let mut days = pleasant_run(3);
        let mut previous = WeatherWindowScorer::score_window(&days, &profile);
        for high in 86..100 {
            days[1].high_f = high;
            let score = WeatherWindowScorer::score_window(&days, &profile);
            assert!(score < previous, "high {high} should score below {previous}");
            previous = score;
        }

        let mut previous = f64::INFINITY;
        for high in (50..72).rev() {
            days[1].high_f = high;
            let score = WeatherWindowScorer::score_window(&days, &profile);
            assert!(score < previous);
            previous = score;
        }
    }

    #[rstest]
    #[case(3)]
    #[case(7)]
    fn test_short_forecast_uses_whole_sequence(#[case] len: usize) {
        let days = pleasant_run(len);
        let result = WeatherWindowScorer::analyze(&days, &alex());
        let best = result.best_window.unwrap();
        assert_eq!(result.best_window, result.worst_window);
        assert_eq!(best.start_index, 0);
        assert_eq!(best.length, len);
        assert_eq!(best.window, DateWindow::new(day(0), day(len as i64 - 1)));
    }

    #[test]
    fn test_empty_forecast_reports_no_data() {
        let result = WeatherWindowScorer::analyze(&[], &alex());
        assert!(result.best_window.is_none());
        assert!(result.worst_window.is_none());
        assert_eq!(result.avg_high_f, 0);
        assert_eq!(result.findings, vec![WeatherFinding::NoData]);
        assert_eq!(result.summary(), "No forecast data available.");
    }

    #[test]
    fn test_ties_resolve_to_first_window() {
        let days = pleasant_run(12);
        let result = WeatherWindowScorer::analyze(&days, &alex());
        assert_eq!(result.best_window.unwrap().start_index, 0);
        assert_eq!(result.worst_window.unwrap().start_index, 0);
    }

    #[test]
    fn test_scan_reaches_final_window() {
        let mut days = pleasant_run(10);
        for forecast in &mut days[..3] {
            forecast.high_f = 95;
        }
        let result = WeatherWindowScorer::analyze(&days, &alex());
        assert_eq!(result.best_window.unwrap().start_index, 3);
        assert_eq!(result.worst_window.unwrap().start_index, 0);
    }

    #[test]
    fn test_best_window_round_trip() {
        let mut days = pleasant_run(20);
        days[4].storm_risk = true;
        days[9].high_f = 92;
        days[15].wind_mph = 5;
        let profile = alex();
        let result = WeatherWindowScorer::analyze(&days, &profile);

        let best = result.best_window.unwrap();
        let rescored = WeatherWindowScorer::score_window(result.days_in(&best), &profile);
        assert_eq!(rescored, best.score);
        assert_eq!(result.days_in(&best).len(), profile.trip_length_nights);
    }

    #[test]
    fn test_aggregates_cover_full_sequence() {
        let mut days = pleasant_run(9);
        days[0].storm_risk = true;
        days[0].precipitation_pct = 90;
        days[8].precipitation_pct = 41;
        days[8].high_f = 81;
        let result = WeatherWindowScorer::analyze(&days, &alex());

        assert_eq!(result.storm_risk_days, 1);
        assert_eq!(result.rainy_days, 2);
        assert_eq!(result.avg_high_f, 80);
        assert_eq!(result.avg_low_f, 72);
        assert_eq!(result.daily_forecasts, days);
        assert_eq!(result.period, Some(DateWindow::new(day(0), day(8))));
        assert!(result.summary().contains("1 days have storm risk"));
    }
}
