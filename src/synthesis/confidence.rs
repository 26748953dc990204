//! Confidence rubric
//!
//! Weather, flights and hotels each contribute 0, 1 or 3 points depending
//! on how well they line up with the traveler. The sum maps to one of three
//! ordered labels.

use serde::{Deserialize, Serialize};
use std::fmt;

const HIGH_THRESHOLD: u8 = 7;
const MEDIUM_THRESHOLD: u8 = 4;

/// How well one dimension lines up with the traveler's preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Unmet,
    Acceptable,
    Ideal,
}

impl Alignment {
    #[must_use]
    pub fn points(self) -> u8 {
        match self {
            Alignment::Unmet => 0,
            Alignment::Acceptable => 1,
            Alignment::Ideal => 3,
        }
    }

    /// No storms is ideal; one or two storm days is still acceptable.
    #[must_use]
    pub fn from_storm_days(storm_days: usize) -> Self {
        match storm_days {
            0 => Alignment::Ideal,
            1..=2 => Alignment::Acceptable,
            _ => Alignment::Unmet,
        }
    }

    #[must_use]
    pub fn from_matches(ideal: bool, acceptable: bool) -> Self {
        if ideal {
            Alignment::Ideal
        } else if acceptable {
            Alignment::Acceptable
        } else {
            Alignment::Unmet
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    #[must_use]
    pub fn from_points(points: u8) -> Self {
        if points >= HIGH_THRESHOLD {
            ConfidenceLevel::High
        } else if points >= MEDIUM_THRESHOLD {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceLevel::Low => write!(f, "Low"),
            ConfidenceLevel::Medium => write!(f, "Medium"),
            ConfidenceLevel::High => write!(f, "High"),
        }
    }
}

/// The three terms behind a confidence label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    pub weather: Alignment,
    pub flight: Alignment,
    pub hotel: Alignment,
}

impl ConfidenceScore {
    #[must_use]
    pub fn total(&self) -> u8 {
        self.weather.points() + self.flight.points() + self.hotel.points()
    }

    #[must_use]
    pub fn level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_points(self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ALL: [Alignment; 3] = [Alignment::Unmet, Alignment::Acceptable, Alignment::Ideal];

    #[test]
    fn test_every_combination_maps_to_its_label() {
        for weather in ALL {
            for flight in ALL {
                for hotel in ALL {
                    let score = ConfidenceScore { weather, flight, hotel };
                    let points = weather.points() + flight.points() + hotel.points();
                    let expected = match points {
                        7.. => ConfidenceLevel::High,
                        4..=6 => ConfidenceLevel::Medium,
                        _ => ConfidenceLevel::Low,
                    };
                    assert_eq!(score.level(), expected, "{weather:?}/{flight:?}/{hotel:?}");

                    // Order of terms does not matter
                    let rotated = ConfidenceScore {
                        weather: hotel,
                        flight: weather,
                        hotel: flight,
                    };
                    assert_eq!(rotated.level(), score.level());
                }
            }
        }
    }

    #[rstest]
    #[case(Alignment::Ideal, Alignment::Ideal, Alignment::Acceptable, ConfidenceLevel::High)]
    #[case(Alignment::Ideal, Alignment::Acceptable, Alignment::Acceptable, ConfidenceLevel::Medium)]
    #[case(Alignment::Acceptable, Alignment::Acceptable, Alignment::Acceptable, ConfidenceLevel::Low)]
    #[case(Alignment::Unmet, Alignment::Ideal, Alignment::Ideal, ConfidenceLevel::Medium)]
    fn test_boundary_totals(
        #[case] weather: Alignment,
        #[case] flight: Alignment,
        #[case] hotel: Alignment,
        #[case] expected: ConfidenceLevel,
    ) {
        assert_eq!(ConfidenceScore { weather, flight, hotel }.level(), expected);
    }

    #[rstest]
    #[case(0, Alignment::Ideal)]
    #[case(1, Alignment::Acceptable)]
    #[case(2, Alignment::Acceptable)]
    #[case(3, Alignment::Unmet)]
    fn test_storm_day_alignment(#[case] storm_days: usize, #[case] expected: Alignment) {
        assert_eq!(Alignment::from_storm_days(storm_days), expected);
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(ConfidenceLevel::Low < ConfidenceLevel::Medium);
        assert!(ConfidenceLevel::Medium < ConfidenceLevel::High);
    }
}
