//! Seeded flight search for demos and tests

use async_trait::async_trait;
use chrono::{Datelike, Days, NaiveTime, Weekday};
use rand::{RngExt, SeedableRng, rngs::StdRng};
use std::ops::RangeInclusive;
use tracing::debug;

use super::{FlightProvider, FlightQuery};
use crate::models::FlightOption;
use crate::Result;

const DEPARTURE_STRIDE_DAYS: u64 = 3;
const WEEKEND_SURCHARGE: u32 = 80;

struct Route {
    airline: &'static str,
    departs: (u32, u32),
    arrives: (u32, u32),
    stops: u8,
    duration_hours: f64,
    price: RangeInclusive<u32>,
    /// Only departs on even weekdays counted from Monday
    alternate_days: bool,
}

const HAWAIIAN: Route = Route {
    airline: "Hawaiian Airlines",
    departs: (8, 30),
    arrives: (12, 45),
    stops: 0,
    duration_hours: 5.25,
    price: 420..=580,
    alternate_days: false,
};

const ALASKA: Route = Route {
    airline: "Alaska Airlines",
    departs: (23, 30),
    arrives: (6, 15),
    stops: 0,
    duration_hours: 5.75,
    price: 320..=450,
    alternate_days: false,
};

const UNITED: Route = Route {
    airline: "United Airlines",
    departs: (10, 0),
    arrives: (17, 30),
    stops: 1,
    duration_hours: 8.5,
    price: 280..=400,
    alternate_days: true,
};

fn clock((hour, minute): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Flight provider with three carriers departing every third day
#[derive(Debug, Clone, Copy)]
pub struct MockFlightProvider {
    seed: u64,
}

impl Default for MockFlightProvider {
    fn default() -> Self {
        Self::with_seed(crate::weather::mock::DEFAULT_SEED)
    }
}

impl MockFlightProvider {
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// Itineraries for every third departure date in the query range.
    /// United only flies on Mondays, Wednesdays, Fridays and Sundays.
    #[must_use]
    pub fn generate(&self, query: &FlightQuery) -> Vec<FlightOption> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut options = Vec::new();
        let mut departure = query.earliest_departure;

        let stay = Days::new(query.trip_nights as u64);

        while departure <= query.latest_departure {
            let weekday = departure.weekday();
            let surcharge = if matches!(weekday, Weekday::Sat | Weekday::Sun) {
                WEEKEND_SURCHARGE
            } else {
                0
            };
            let even_weekday = weekday.num_days_from_monday() % 2 == 0;
            let Some(return_date) = departure.checked_add_days(stay) else {
                break;
            };

            for route in [&HAWAIIAN, &ALASKA, &UNITED] {
                if route.alternate_days && !even_weekday {
                    continue;
                }
                let departure_time = clock(route.departs);
                let arrival_time = clock(route.arrives);
                options.push(FlightOption {
                    airline: route.airline.to_string(),
                    departure_date: departure,
                    return_date,
                    price_usd: rng.random_range(route.price.clone()) + surcharge,
                    departure_time,
                    arrival_time,
                    stops: route.stops,
                    duration_hours: route.duration_hours,
                    red_eye: FlightOption::is_red_eye_schedule(departure_time, arrival_time),
                });
            }

            match departure.checked_add_days(Days::new(DEPARTURE_STRIDE_DAYS)) {
                Some(next) => departure = next,
                None => break,
            }
        }

        options
    }
}

#[async_trait]
impl FlightProvider for MockFlightProvider {
    async fn search_flights(&self, query: &FlightQuery) -> Result<Vec<FlightOption>> {
        let options = self.generate(query);
        debug!(
            origin = %query.origin,
            destination = %query.destination,
            options = options.len(),
            "Generated synthetic flight options"
        );
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn query(days: i64) -> FlightQuery {
        let start = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();
        FlightQuery {
            origin: "SFO".to_string(),
            destination: "OGG".to_string(),
            earliest_departure: start,
            latest_departure: start + Duration::days(days),
            trip_nights: 7,
        }
    }

    #[test]
    fn test_departures_every_third_day_inclusive() {
        let options = MockFlightProvider::default().generate(&query(9));
        let mut dates: Vec<_> = options.iter().map(|f| f.departure_date).collect();
        dates.dedup();
        let start = query(0).earliest_departure;
        assert_eq!(
            dates,
            (0..4).map(|i| start + Duration::days(i * 3)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_route_shapes() {
        let options = MockFlightProvider::default().generate(&query(30));
        for option in &options {
            assert_eq!(option.return_date - option.departure_date, Duration::days(7));
            match option.airline.as_str() {
                "Hawaiian Airlines" => {
                    assert_eq!(option.stops, 0);
                    assert!(!option.red_eye);
                }
                "Alaska Airlines" => assert!(option.red_eye),
                "United Airlines" => {
                    assert_eq!(option.stops, 1);
                    assert_eq!(option.departure_date.weekday().num_days_from_monday() % 2, 0);
                }
                other => panic!("unexpected airline {other}"),
            }
        }
    }

    #[test]
    fn test_weekend_surcharge_applied() {
        // 2025-07-12 is a Saturday
        let saturday = NaiveDate::from_ymd_opt(2025, 7, 12).unwrap();
        let mut q = query(0);
        q.earliest_departure = saturday;
        q.latest_departure = saturday;
        let options = MockFlightProvider::default().generate(&q);
        let hawaiian = options.iter().find(|f| f.airline == "Hawaiian Airlines").unwrap();
        assert!((500..=660).contains(&hawaiian.price_usd));
    }

    #[test]
    fn test_seeded_search_is_repeatable() {
        let provider = MockFlightProvider::default();
        assert_eq!(provider.generate(&query(30)), provider.generate(&query(30)));
    }

    #[test]
    fn test_search_stops_at_calendar_end() {
        let mut q = query(0);
        q.earliest_departure = NaiveDate::MAX;
        q.latest_departure = NaiveDate::MAX;
        assert!(MockFlightProvider::default().generate(&q).is_empty());

        q.trip_nights = 0;
        let same_day = MockFlightProvider::default().generate(&q);
        assert!(!same_day.is_empty());
        assert!(same_day.iter().all(|f| f.return_date == NaiveDate::MAX));
    }
}
