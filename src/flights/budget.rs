//! Airfare budget analysis
//!
//! Buckets a set of itineraries against the traveler's soft and hard airfare
//! ceilings and explains the result.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{DateWindow, FlightOption, PreferenceProfile};
use crate::weather::window::render;

/// One fact-statement about an analyzed flight set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlightFinding {
    NoFlights,
    Overview {
        offered: usize,
        cheapest: u32,
        highest: u32,
        average: u32,
    },
    WithinSoftBudget {
        count: usize,
        soft: u32,
    },
    WithinHardBudget {
        count: usize,
        soft: u32,
        hard: u32,
    },
    AllExceedHardBudget {
        hard: u32,
    },
    RedEyeCaveat {
        price: u32,
    },
}

impl fmt::Display for FlightFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightFinding::NoFlights => write!(f, "No flights found for the requested dates."),
            FlightFinding::Overview {
                offered,
                cheapest,
                highest,
                average,
            } => write!(
                f,
                "Found {offered} flight options from ${cheapest} to ${highest}, averaging ${average}."
            ),
            FlightFinding::WithinSoftBudget { count, soft } => {
                write!(f, "{count} options fall within your ${soft} target budget.")
            }
            FlightFinding::WithinHardBudget { count, soft, hard } => write!(
                f,
                "None fit your ${soft} target, but {count} options stay under your ${hard} maximum."
            ),
            FlightFinding::AllExceedHardBudget { hard } => write!(
                f,
                "All options exceed your ${hard} maximum budget. Consider adjusting dates or accepting a connection."
            ),
            FlightFinding::RedEyeCaveat { price } => write!(
                f,
                "Red-eye flights start at ${price}, but may not suit your comfort preferences."
            ),
        }
    }
}

/// Airfare analysis of a flight set for one traveler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightAnalysisResult {
    /// Number of itineraries analyzed
    pub offered: usize,
    pub cheapest_price: u32,
    /// Mean price, rounded down
    pub average_price: u32,
    pub highest_price: u32,
    /// Priced at or under the soft ceiling
    pub within_soft_budget: usize,
    /// Priced at or under the hard ceiling, soft-budget options included
    pub within_hard_budget: usize,
    pub over_hard_budget: usize,
    pub cheapest_red_eye: Option<u32>,
    /// Earliest to latest departure date in the set
    pub search_window: Option<DateWindow>,
    pub findings: Vec<FlightFinding>,
    /// The analyzed itineraries, in input order
    pub options: Vec<FlightOption>,
}

impl FlightAnalysisResult {
    #[must_use]
    pub fn summary(&self) -> String {
        render(&self.findings)
    }

    /// The `limit` cheapest itineraries, ties kept in input order
    #[must_use]
    pub fn cheapest_options(&self, limit: usize) -> Vec<&FlightOption> {
        let mut options: Vec<&FlightOption> = self.options.iter().collect();
        options.sort_by_key(|option| option.price_usd);
        options.truncate(limit);
        options
    }
}

pub struct FlightBudgetAnalyzer;

impl FlightBudgetAnalyzer {
    #[must_use]
    pub fn analyze(flights: &[FlightOption], profile: &PreferenceProfile) -> FlightAnalysisResult {
        let soft = profile.airfare_budget_soft;
        let hard = profile.airfare_budget_hard;

        if flights.is_empty() {
            return FlightAnalysisResult {
                offered: 0,
                cheapest_price: 0,
                average_price: 0,
                highest_price: 0,
                within_soft_budget: 0,
                within_hard_budget: 0,
                over_hard_budget: 0,
                cheapest_red_eye: None,
                search_window: None,
                findings: vec![FlightFinding::NoFlights],
                options: Vec::new(),
            };
        }

        let prices = flights.iter().map(|f| f.price_usd);
        let cheapest_price = prices.clone().min().unwrap_or_default();
        let highest_price = prices.clone().max().unwrap_or_default();
        let total: u64 = prices.map(u64::from).sum();
        let average_price = u32::try_from(total / flights.len() as u64).unwrap_or(u32::MAX);

        let within_soft_budget = flights.iter().filter(|f| f.price_usd <= soft).count();
        let within_hard_budget = flights.iter().filter(|f| f.price_usd <= hard).count();
        let over_hard_budget = flights.len() - within_hard_budget;
        let cheapest_red_eye = flights
            .iter()
            .filter(|f| f.red_eye)
            .map(|f| f.price_usd)
            .min();

        let mut findings = vec![FlightFinding::Overview {
            offered: flights.len(),
            cheapest: cheapest_price,
            highest: highest_price,
            average: average_price,
        }];
        if within_soft_budget > 0 {
            findings.push(FlightFinding::WithinSoftBudget {
                count: within_soft_budget,
                soft,
            });
        } else if within_hard_budget > 0 {
            findings.push(FlightFinding::WithinHardBudget {
                count: within_hard_budget,
                soft,
                hard,
            });
        } else {
            findings.push(FlightFinding::AllExceedHardBudget { hard });
        }
        if let Some(price) = cheapest_red_eye
            && profile.is_comfort_sensitive()
        {
            findings.push(FlightFinding::RedEyeCaveat { price });
        }

        let earliest = flights.iter().map(|f| f.departure_date).min();
        let latest = flights.iter().map(|f| f.departure_date).max();

        FlightAnalysisResult {
            offered: flights.len(),
            cheapest_price,
            average_price,
            highest_price,
            within_soft_budget,
            within_hard_budget,
            over_hard_budget,
            cheapest_red_eye,
            search_window: earliest.zip(latest).map(|(start, end)| DateWindow::new(start, end)),
            findings,
            options: flights.to_vec(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::models::forecast::fixtures::day;
    use chrono::NaiveTime;

    pub fn flight(offset: i64, price: u32) -> FlightOption {
        FlightOption {
            airline: "Hawaiian Airlines".to_string(),
            departure_date: day(offset),
            return_date: day(offset + 7),
            price_usd: price,
            departure_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(12, 45, 0).unwrap(),
            stops: 0,
            duration_hours: 5.25,
            red_eye: false,
        }
    }

    pub fn red_eye(offset: i64, price: u32) -> FlightOption {
        FlightOption {
            airline: "Alaska Airlines".to_string(),
            departure_time: NaiveTime::from_hms_opt(23, 30, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(6, 15, 0).unwrap(),
            red_eye: true,
            ..flight(offset, price)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::models::profile::fixtures::alex;
    use rstest::rstest;

    #[test]
    fn test_all_over_budget_narrative() {
        let flights = vec![flight(0, 700), flight(3, 800), flight(6, 900)];
        let result = FlightBudgetAnalyzer::analyze(&flights, &alex());

        assert_eq!(result.within_soft_budget, 0);
        assert_eq!(result.within_hard_budget, 0);
        assert_eq!(result.over_hard_budget, 3);
        assert_eq!(result.cheapest_price, 700);
        assert_eq!(result.average_price, 800);
        assert!(result.findings.contains(&FlightFinding::AllExceedHardBudget { hard: 650 }));
        assert!(result.summary().contains("Consider adjusting dates or accepting a connection"));
    }

    #[rstest]
    #[case(vec![400, 500, 700], FlightFinding::WithinSoftBudget { count: 1, soft: 450 })]
    #[case(vec![500, 650, 700], FlightFinding::WithinHardBudget { count: 2, soft: 450, hard: 650 })]
    fn test_narrative_priority(#[case] prices: Vec<u32>, #[case] expected: FlightFinding) {
        let flights: Vec<_> = prices.iter().map(|&p| flight(0, p)).collect();
        let result = FlightBudgetAnalyzer::analyze(&flights, &alex());
        assert_eq!(result.findings[1], expected);
        assert_eq!(result.findings.len(), 2);
    }

    #[test]
    fn test_tiers_are_independent() {
        let flights = vec![flight(0, 400), flight(0, 450), flight(0, 600), flight(0, 651)];
        let result = FlightBudgetAnalyzer::analyze(&flights, &alex());
        assert_eq!(result.within_soft_budget, 2);
        assert_eq!(result.within_hard_budget, 3);
        assert_eq!(result.over_hard_budget, 1);
        // (400 + 450 + 600 + 651) / 4 = 525.25
        assert_eq!(result.average_price, 525);
    }

    #[rstest]
    #[case(6, false)]
    #[case(7, true)]
    fn test_red_eye_caveat_needs_comfort_sensitivity(#[case] comfort: u8, #[case] caveat: bool) {
        let mut profile = alex();
        profile.comfort_sensitivity = comfort;
        let flights = vec![flight(0, 500), red_eye(0, 380), red_eye(3, 360)];
        let result = FlightBudgetAnalyzer::analyze(&flights, &profile);

        assert_eq!(result.cheapest_red_eye, Some(360));
        assert_eq!(
            result.findings.contains(&FlightFinding::RedEyeCaveat { price: 360 }),
            caveat
        );
    }

    #[test]
    fn test_empty_flight_set() {
        let result = FlightBudgetAnalyzer::analyze(&[], &alex());
        assert_eq!(result.offered, 0);
        assert_eq!(result.average_price, 0);
        assert_eq!(result.summary(), "No flights found for the requested dates.");
    }

    #[test]
    fn test_cheapest_options_sorted_and_limited() {
        let flights = vec![flight(0, 500), flight(3, 300), flight(6, 300), flight(9, 200)];
        let result = FlightBudgetAnalyzer::analyze(&flights, &alex());
        let cheapest: Vec<_> = result
            .cheapest_options(3)
            .iter()
            .map(|f| (f.price_usd, f.departure_date))
            .collect();
        assert_eq!(cheapest, vec![(200, flights[3].departure_date), (300, flights[1].departure_date), (300, flights[2].departure_date)]);
        assert_eq!(result.search_window, Some(DateWindow::new(flights[0].departure_date, flights[3].departure_date)));
    }
}
