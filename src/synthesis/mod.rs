//! Recommendation synthesis
//!
//! Combines the weather, flight and hotel analyses for one traveler into a
//! single recommendation: the window to book, how confident we are in it,
//! the reasons, fallback windows and the options that were ruled out.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::flights::FlightAnalysisResult;
use crate::hotels::{HotelAnalysisResult, ScoredHotel};
use crate::models::{DateWindow, FlightOption, PreferenceProfile};
use crate::weather::WeatherWindowResult;

pub mod confidence;

pub use confidence::{Alignment, ConfidenceLevel, ConfidenceScore};

/// Flights departing in the window that are weighed for confidence
pub const FLIGHTS_CONSIDERED: usize = 5;
/// Fallback windows reported at most
pub const MAX_ALTERNATIVES: usize = 2;
/// Rainy days a fallback window may contain
pub const ALTERNATIVE_MAX_RAINY_DAYS: usize = 2;
/// Degrees above the preferred maximum that count as a hot day
pub const HEAT_MARGIN_F: i32 = 5;
/// Hot days tolerated before the heat is called out
pub const HOT_DAYS_TOLERATED: usize = 3;

/// One clause of the recommendation's reasoning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RationaleClause {
    Weather {
        window: DateWindow,
        temp_min_f: i32,
        temp_max_f: i32,
        avg_high_f: i32,
    },
    NoForecast,
    StormWarning {
        storm_days: usize,
        worst_window: DateWindow,
    },
    IdealFlight {
        cheapest: u32,
    },
    AcceptableFlight {
        cheapest: u32,
        soft: u32,
        hard: u32,
    },
    NoAffordableFlight {
        hard: u32,
    },
    BrandMatchedHotel {
        name: String,
        brand: String,
        nightly_rate: u32,
    },
    BudgetHotel {
        name: String,
        nightly_rate: u32,
    },
    NoBudgetHotel {
        budget_min: u32,
        budget_max: u32,
    },
}

impl fmt::Display for RationaleClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RationaleClause::Weather {
                window,
                temp_min_f,
                temp_max_f,
                avg_high_f,
            } => write!(
                f,
                "Weather: {window} offers the best conditions for your {temp_min_f}-{temp_max_f}°F preference. Average highs: {avg_high_f}°F."
            ),
            RationaleClause::NoForecast => {
                write!(f, "Weather: no forecast data was available to choose a window.")
            }
            RationaleClause::StormWarning {
                storm_days,
                worst_window,
            } => write!(
                f,
                "{storm_days} days in the forecast period have storm risk. The worst period is {worst_window}; avoid these dates."
            ),
            RationaleClause::IdealFlight { cheapest } => write!(
                f,
                "Flights: options within your ideal budget. Best price: ${cheapest}."
            ),
            RationaleClause::AcceptableFlight {
                cheapest,
                soft,
                hard,
            } => write!(
                f,
                "Flights: options within your hard budget limit. Best price: ${cheapest} (above your ideal of ${soft} but within ${hard})."
            ),
            RationaleClause::NoAffordableFlight { hard } => write!(
                f,
                "Flights: no flights found within your ${hard} budget for this window."
            ),
            RationaleClause::BrandMatchedHotel {
                name,
                brand,
                nightly_rate,
            } => write!(
                f,
                "Hotels: {name} ({brand}) at ${nightly_rate}/night matches your brand preference and budget."
            ),
            RationaleClause::BudgetHotel { name, nightly_rate } => write!(
                f,
                "Hotels: {name} at ${nightly_rate}/night fits your budget (no preferred-brand match in budget range)."
            ),
            RationaleClause::NoBudgetHotel {
                budget_min,
                budget_max,
            } => write!(
                f,
                "Hotels: no options within your ${budget_min}-${budget_max}/night budget range."
            ),
        }
    }
}

/// A storm-free fallback window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeWindow {
    pub window: DateWindow,
    pub rainy_days: usize,
}

impl fmt::Display for AlternativeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Decent weather ({} rainy day(s), no storm risk)",
            self.window, self.rainy_days
        )
    }
}

/// An option ruled out, with the reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    StormWindow {
        window: DateWindow,
        storm_days: usize,
        comfort_sensitivity: u8,
    },
    AirfareOverBudget {
        average_price: u32,
        hard: u32,
    },
    ExcessiveHeat {
        hot_days: usize,
        threshold_f: i32,
        preferred_max_f: i32,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::StormWindow {
                window,
                storm_days,
                comfort_sensitivity,
            } => write!(
                f,
                "Period around {window}: {storm_days} storm-risk days. With your comfort priority of {comfort_sensitivity}/10, this window carries too much weather risk."
            ),
            Rejection::AirfareOverBudget {
                average_price,
                hard,
            } => write!(
                f,
                "Average airfare (${average_price}) exceeds your hard budget of ${hard}. Consider traveling on weekdays for lower fares."
            ),
            Rejection::ExcessiveHeat {
                hot_days,
                threshold_f,
                preferred_max_f,
            } => write!(
                f,
                "{hot_days} days forecast above {threshold_f}°F, well over your preferred maximum of {preferred_max_f}°F."
            ),
        }
    }
}

/// The final, explainable recommendation for one traveler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelRecommendation {
    pub traveler_id: String,
    /// Best weather window, `None` when there was no forecast
    pub recommended_window: Option<DateWindow>,
    pub confidence: ConfidenceLevel,
    pub confidence_breakdown: ConfidenceScore,
    pub headline: String,
    pub rationale: Vec<RationaleClause>,
    pub alternatives: Vec<AlternativeWindow>,
    pub rejections: Vec<Rejection>,
    pub weather_summary: String,
    pub flight_summary: String,
    pub hotel_summary: String,
}

impl TravelRecommendation {
    /// Rationale clauses, one per line
    #[must_use]
    pub fn rationale_text(&self) -> String {
        self.rationale
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct RecommendationSynthesizer;

impl RecommendationSynthesizer {
    #[tracing::instrument(skip_all, fields(traveler = %profile.id))]
    #[must_use]
    pub fn synthesize(
        profile: &PreferenceProfile,
        weather: &WeatherWindowResult,
        flights: &FlightAnalysisResult,
        hotels: &HotelAnalysisResult,
    ) -> TravelRecommendation {
        let recommended_window = weather.best_window.map(|best| best.window);

        let window_flights = Self::flights_in_window(&flights.options, recommended_window);
        let cheapest_within = |ceiling: u32| {
            window_flights
                .iter()
                .map(|f| f.price_usd)
                .filter(|&price| price <= ceiling)
                .min()
        };
        let ideal_flight = cheapest_within(profile.airfare_budget_soft);
        let acceptable_flight = cheapest_within(profile.airfare_budget_hard);

        let budget_hotels: Vec<&ScoredHotel> = hotels
            .options
            .iter()
            .filter(|scored| profile.hotel_rate_in_budget(scored.hotel.nightly_rate))
            .collect();
        let brand_hotel = budget_hotels
            .iter()
            .find(|scored| profile.prefers_brand(&scored.hotel.brand));

        let confidence_breakdown = ConfidenceScore {
            weather: Alignment::from_storm_days(weather.storm_risk_days),
            flight: Alignment::from_matches(ideal_flight.is_some(), acceptable_flight.is_some()),
            hotel: Alignment::from_matches(brand_hotel.is_some(), !budget_hotels.is_empty()),
        };
        let confidence = confidence_breakdown.level();
        debug!(
            points = confidence_breakdown.total(),
            %confidence,
            flights_considered = window_flights.len(),
            budget_hotels = budget_hotels.len(),
            "Scored recommendation confidence"
        );

        let mut rationale = Vec::new();
        match recommended_window {
            Some(window) => rationale.push(RationaleClause::Weather {
                window,
                temp_min_f: profile.preferred_temp_min_f,
                temp_max_f: profile.preferred_temp_max_f,
                avg_high_f: weather.avg_high_f,
            }),
            None => rationale.push(RationaleClause::NoForecast),
        }
        if weather.storm_risk_days > 0
            && let Some(worst) = weather.worst_window
        {
            rationale.push(RationaleClause::StormWarning {
                storm_days: weather.storm_risk_days,
                worst_window: worst.window,
            });
        }
        rationale.push(match (ideal_flight, acceptable_flight) {
            (Some(cheapest), _) => RationaleClause::IdealFlight { cheapest },
            (None, Some(cheapest)) => RationaleClause::AcceptableFlight {
                cheapest,
                soft: profile.airfare_budget_soft,
                hard: profile.airfare_budget_hard,
            },
            (None, None) => RationaleClause::NoAffordableFlight {
                hard: profile.airfare_budget_hard,
            },
        });
        rationale.push(match (brand_hotel, budget_hotels.first()) {
            (Some(top), _) => RationaleClause::BrandMatchedHotel {
                name: top.hotel.name.clone(),
                brand: top.hotel.brand.clone(),
                nightly_rate: top.hotel.nightly_rate,
            },
            (None, Some(top)) => RationaleClause::BudgetHotel {
                name: top.hotel.name.clone(),
                nightly_rate: top.hotel.nightly_rate,
            },
            (None, None) => RationaleClause::NoBudgetHotel {
                budget_min: profile.hotel_budget_min,
                budget_max: profile.hotel_budget_max,
            },
        });

        let window_label = recommended_window.map_or_else(|| "N/A".to_string(), |w| w.to_string());
        let headline = format!(
            "Based on your preferences, {window_label} is the {} time to travel. {confidence} confidence.",
            if confidence == ConfidenceLevel::High {
                "best"
            } else {
                "most suitable"
            }
        );

        TravelRecommendation {
            traveler_id: profile.id.clone(),
            recommended_window,
            confidence,
            confidence_breakdown,
            headline,
            rationale,
            alternatives: Self::alternatives(profile, weather),
            rejections: Self::rejections(profile, weather, flights),
            weather_summary: weather.summary(),
            flight_summary: flights.summary(),
            hotel_summary: hotels.summary(),
        }
    }

    /// The first few flights departing on or after the window start, in
    /// input order. Without a window every flight qualifies.
    fn flights_in_window(options: &[FlightOption], window: Option<DateWindow>) -> Vec<&FlightOption> {
        options
            .iter()
            .filter(|f| window.is_none_or(|w| f.departure_date >= w.start))
            .take(FLIGHTS_CONSIDERED)
            .collect()
    }

    /// Storm-free windows with little rain, other than the recommended one.
    ///
    /// Candidates are taken in forecast order and are not ranked by score,
    /// so a later, better window can be left out when two earlier ones
    /// qualify.
    fn alternatives(profile: &PreferenceProfile, weather: &WeatherWindowResult) -> Vec<AlternativeWindow> {
        let Some(best) = weather.best_window else {
            return Vec::new();
        };

        weather
            .daily_forecasts
            .windows(profile.window_length())
            .filter(|days| days[0].date != best.window.start)
            .filter(|days| days.iter().all(|d| !d.storm_risk))
            .filter_map(|days| {
                let rainy_days = days.iter().filter(|d| d.is_rainy()).count();
                (rainy_days <= ALTERNATIVE_MAX_RAINY_DAYS).then(|| AlternativeWindow {
                    window: DateWindow::new(days[0].date, days[days.len() - 1].date),
                    rainy_days,
                })
            })
            .take(MAX_ALTERNATIVES)
            .collect()
    }

    fn rejections(
        profile: &PreferenceProfile,
        weather: &WeatherWindowResult,
        flights: &FlightAnalysisResult,
    ) -> Vec<Rejection> {
        let mut rejections = Vec::new();

        if weather.storm_risk_days > 0
            && let Some(worst) = weather.worst_window
        {
            rejections.push(Rejection::StormWindow {
                window: worst.window,
                storm_days: weather.storm_risk_days,
                comfort_sensitivity: profile.comfort_sensitivity,
            });
        }

        if flights.average_price > profile.airfare_budget_hard {
            rejections.push(Rejection::AirfareOverBudget {
                average_price: flights.average_price,
                hard: profile.airfare_budget_hard,
            });
        }

        let threshold_f = profile.preferred_temp_max_f + HEAT_MARGIN_F;
        let hot_days = weather.days_above(threshold_f);
        if hot_days > HOT_DAYS_TOLERATED {
            rejections.push(Rejection::ExcessiveHeat {
                hot_days,
                threshold_f,
                preferred_max_f: profile.preferred_temp_max_f,
            });
        }

        rejections
    }
}
