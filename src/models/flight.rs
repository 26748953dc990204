//! Flight itinerary model

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// One bookable round-trip itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOption {
    pub airline: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    /// Round-trip price in USD
    pub price_usd: u32,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    /// 0 = direct
    pub stops: u8,
    pub duration_hours: f64,
    /// Overnight flight: late-night departure, early-morning arrival
    pub red_eye: bool,
}

impl FlightOption {
    /// Late-night departure (21:00 onward) paired with an arrival before 08:00.
    #[must_use]
    pub fn is_red_eye_schedule(departure: NaiveTime, arrival: NaiveTime) -> bool {
        departure.hour() >= 21 && arrival.hour() < 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[rstest]
    #[case(time(23, 30), time(6, 15), true)]
    #[case(time(21, 0), time(7, 59), true)]
    #[case(time(8, 30), time(12, 45), false)]
    #[case(time(23, 30), time(9, 0), false)]
    fn test_red_eye_schedule(
        #[case] departure: NaiveTime,
        #[case] arrival: NaiveTime,
        #[case] expected: bool,
    ) {
        assert_eq!(FlightOption::is_red_eye_schedule(departure, arrival), expected);
    }
}
