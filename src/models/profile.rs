//! Traveler preference model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Comfort sensitivity at or above which a traveler is treated as
/// comfort-sensitive (red-eye caveats, anomalous-discount penalties).
pub const COMFORT_SENSITIVE_THRESHOLD: u8 = 7;

/// A traveler's preferences and constraints.
///
/// Every field feeds a downstream decision: the temperature range drives
/// weather scoring, the budgets drive flight and hotel filtering, the brand
/// set drives hotel ranking and the trip length sizes every date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    /// Traveler identifier used for lookups
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Lowest comfortable daily high in Fahrenheit
    pub preferred_temp_min_f: i32,
    /// Highest comfortable daily high in Fahrenheit
    pub preferred_temp_max_f: i32,
    /// Preferred-not-to-exceed round-trip airfare in USD
    pub airfare_budget_soft: u32,
    /// Absolute round-trip airfare ceiling in USD
    pub airfare_budget_hard: u32,
    /// Minimum acceptable nightly rate in USD (cheaper is suspicious)
    pub hotel_budget_min: u32,
    /// Maximum acceptable nightly rate in USD
    pub hotel_budget_max: u32,
    /// Loyalty brands, order irrelevant
    pub preferred_hotel_brands: BTreeSet<String>,
    /// Desired trip duration in nights
    pub trip_length_nights: usize,
    /// How many days the travel dates may shift
    pub flexibility_days: u32,
    /// 1-10, higher means less tolerant of weather and inconvenience
    pub comfort_sensitivity: u8,
}

impl PreferenceProfile {
    /// Whether a daily high lies inside the comfortable range (inclusive)
    #[must_use]
    pub fn is_comfortable_high(&self, high_f: i32) -> bool {
        (self.preferred_temp_min_f..=self.preferred_temp_max_f).contains(&high_f)
    }

    /// Degrees a daily high lies outside the comfortable range, zero inside it
    #[must_use]
    pub fn degrees_outside_range(&self, high_f: i32) -> u32 {
        if high_f < self.preferred_temp_min_f {
            self.preferred_temp_min_f.abs_diff(high_f)
        } else if high_f > self.preferred_temp_max_f {
            high_f.abs_diff(self.preferred_temp_max_f)
        } else {
            0
        }
    }

    #[must_use]
    pub fn hotel_rate_in_budget(&self, nightly_rate: u32) -> bool {
        (self.hotel_budget_min..=self.hotel_budget_max).contains(&nightly_rate)
    }

    #[must_use]
    pub fn prefers_brand(&self, brand: &str) -> bool {
        self.preferred_hotel_brands.contains(brand)
    }

    #[must_use]
    pub fn is_comfort_sensitive(&self) -> bool {
        self.comfort_sensitivity >= COMFORT_SENSITIVE_THRESHOLD
    }

    /// Window length used by every window scan; a zero-night trip still
    /// needs one day to score.
    #[must_use]
    pub fn window_length(&self) -> usize {
        self.trip_length_nights.max(1)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::alex;
    use rstest::rstest;

    #[rstest]
    #[case(72, 0)]
    #[case(85, 0)]
    #[case(70, 2)]
    #[case(90, 5)]
    fn test_degrees_outside_range(#[case] high: i32, #[case] expected: u32) {
        assert_eq!(alex().degrees_outside_range(high), expected);
    }

    #[test]
    fn test_brand_and_budget_checks() {
        let profile = alex();
        assert!(profile.prefers_brand("Hilton"));
        assert!(!profile.prefers_brand("Hyatt"));
        assert!(profile.hotel_rate_in_budget(120));
        assert!(profile.hotel_rate_in_budget(250));
        assert!(!profile.hotel_rate_in_budget(251));
    }

    #[test]
    fn test_comfort_threshold() {
        let mut profile = alex();
        assert!(!profile.is_comfort_sensitive());
        profile.comfort_sensitivity = 7;
        assert!(profile.is_comfort_sensitive());
    }

    #[test]
    fn test_window_length_never_zero() {
        let mut profile = alex();
        profile.trip_length_nights = 0;
        assert_eq!(profile.window_length(), 1);
    }
}
