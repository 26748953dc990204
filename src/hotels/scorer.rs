//! Hotel preference scoring
//!
//! Each option earns points for budget fit, loyalty brand and guest rating,
//! and loses points when a comfort-sensitive traveler is offered a price cut
//! that only exists because of bad weather.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{HotelOption, PreferenceProfile};
use crate::weather::window::render;

const IN_BUDGET_POINTS: f64 = 30.0;
const BELOW_BUDGET_POINTS: f64 = 10.0;
const OVER_BUDGET_BASE: f64 = 25.0;
const OVER_BUDGET_PENALTY_PER_DOLLAR: f64 = 0.3;
const BRAND_POINTS: f64 = 20.0;
const RATING_BASELINE: f64 = 3.0;
const POINTS_PER_RATING_STAR: f64 = 12.5;
const ANOMALY_PENALTY: f64 = 15.0;

/// Where a nightly rate sits relative to the traveler's budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "fit", rename_all = "snake_case")]
pub enum BudgetFit {
    WithinRange,
    /// Cheaper than the traveler's minimum
    TooCheap,
    OverBudget { overage: u32 },
}

impl fmt::Display for BudgetFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetFit::WithinRange => write!(f, "within budget"),
            BudgetFit::TooCheap => write!(f, "too cheap"),
            BudgetFit::OverBudget { overage } => write!(f, "${overage} over budget"),
        }
    }
}

/// Per-factor points behind a hotel score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HotelScoreBreakdown {
    pub budget_fit: BudgetFit,
    pub budget_points: f64,
    pub brand_points: f64,
    pub quality_points: f64,
    /// Subtracted from the total
    pub anomaly_penalty: f64,
}

impl HotelScoreBreakdown {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.budget_points + self.brand_points + self.quality_points - self.anomaly_penalty
    }
}

/// A hotel option with the score it earned for one traveler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredHotel {
    pub hotel: HotelOption,
    pub score: f64,
    pub breakdown: HotelScoreBreakdown,
}

/// One fact-statement about an analyzed hotel set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HotelFinding {
    NoHotels,
    Overview {
        offered: usize,
    },
    WithinBudget {
        count: usize,
        budget_min: u32,
        budget_max: u32,
        lowest_rate: u32,
        highest_rate: u32,
    },
    NoneWithinBudget {
        budget_min: u32,
        budget_max: u32,
    },
    PreferredBrands {
        count: usize,
        brands: Vec<String>,
    },
    AnomalousDiscounts {
        count: usize,
    },
    TopPick {
        name: String,
        brand: String,
        nightly_rate: u32,
        rating: f64,
    },
}

impl fmt::Display for HotelFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HotelFinding::NoHotels => write!(f, "No hotels found for the requested stay."),
            HotelFinding::Overview { offered } => write!(f, "Found {offered} hotel options."),
            HotelFinding::WithinBudget {
                count,
                budget_min,
                budget_max,
                lowest_rate,
                highest_rate,
            } => write!(
                f,
                "{count} fit your ${budget_min}-${budget_max}/night budget (${lowest_rate}-${highest_rate}/night)."
            ),
            HotelFinding::NoneWithinBudget {
                budget_min,
                budget_max,
            } => write!(
                f,
                "No hotels fall within your ${budget_min}-${budget_max}/night budget."
            ),
            HotelFinding::PreferredBrands { count, brands } => write!(
                f,
                "{count} options from your preferred brands ({}).",
                brands.join(", ")
            ),
            HotelFinding::AnomalousDiscounts { count } => write!(
                f,
                "WARNING: {count} hotels show storm-season discounts. Lower prices may reflect weather risk."
            ),
            HotelFinding::TopPick {
                name,
                brand,
                nightly_rate,
                rating,
            } => write!(
                f,
                "Top pick: {name} ({brand}) at ${nightly_rate}/night, rated {rating:.1}/5."
            ),
        }
    }
}

/// Hotel analysis for one traveler and stay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelAnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    /// Options ranked by descending score
    pub options: Vec<ScoredHotel>,
    pub within_budget: usize,
    pub brand_matches: usize,
    pub anomalous_discounts: usize,
    pub findings: Vec<HotelFinding>,
}

impl HotelAnalysisResult {
    /// Attach the stay this analysis was priced for
    #[must_use]
    pub fn for_stay(mut self, destination: impl Into<String>, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        self.destination = Some(destination.into());
        self.check_in = Some(check_in);
        self.check_out = Some(check_out);
        self
    }

    #[must_use]
    pub fn summary(&self) -> String {
        render(&self.findings)
    }

    /// The `limit` best-ranked options
    #[must_use]
    pub fn top(&self, limit: usize) -> &[ScoredHotel] {
        &self.options[..limit.min(self.options.len())]
    }
}

pub struct HotelScorer;

impl HotelScorer {
    /// Points for each factor
    #[must_use]
    pub fn breakdown(hotel: &HotelOption, profile: &PreferenceProfile) -> HotelScoreBreakdown {
        let rate = hotel.nightly_rate;
        let (budget_fit, budget_points) = if profile.hotel_rate_in_budget(rate) {
            (BudgetFit::WithinRange, IN_BUDGET_POINTS)
        } else if rate < profile.hotel_budget_min {
            (BudgetFit::TooCheap, BELOW_BUDGET_POINTS)
        } else {
            let overage = rate - profile.hotel_budget_max;
            let points = (OVER_BUDGET_BASE - OVER_BUDGET_PENALTY_PER_DOLLAR * f64::from(overage)).max(0.0);
            (BudgetFit::OverBudget { overage }, points)
        };

        let brand_points = if profile.prefers_brand(&hotel.brand) {
            BRAND_POINTS
        } else {
            0.0
        };
        let quality_points = ((hotel.rating - RATING_BASELINE) * POINTS_PER_RATING_STAR).max(0.0);
        let anomaly_penalty = if hotel.anomalous_discount && profile.is_comfort_sensitive() {
            ANOMALY_PENALTY
        } else {
            0.0
        };

        HotelScoreBreakdown {
            budget_fit,
            budget_points,
            brand_points,
            quality_points,
            anomaly_penalty,
        }
    }

    #[must_use]
    pub fn score(hotel: &HotelOption, profile: &PreferenceProfile) -> f64 {
        Self::breakdown(hotel, profile).total()
    }

    /// Rank hotels by descending score and summarize the set. Equal scores
    /// keep their input order.
    #[must_use]
    pub fn evaluate(hotels: &[HotelOption], profile: &PreferenceProfile) -> HotelAnalysisResult {
        let mut options: Vec<ScoredHotel> = hotels
            .iter()
            .map(|hotel| {
                let breakdown = Self::breakdown(hotel, profile);
                ScoredHotel {
                    hotel: hotel.clone(),
                    score: breakdown.total(),
                    breakdown,
                }
            })
            .collect();
        options.sort_by(|a, b| b.score.total_cmp(&a.score));

        let in_budget: Vec<u32> = hotels
            .iter()
            .filter(|h| profile.hotel_rate_in_budget(h.nightly_rate))
            .map(|h| h.nightly_rate)
            .collect();
        let brand_matched: Vec<&HotelOption> = hotels
            .iter()
            .filter(|h| profile.prefers_brand(&h.brand))
            .collect();
        let anomalous_discounts = hotels.iter().filter(|h| h.anomalous_discount).count();

        let findings = match options.first() {
            None => vec![HotelFinding::NoHotels],
            Some(top) => {
                let mut findings = vec![HotelFinding::Overview {
                    offered: hotels.len(),
                }];
                match (in_budget.iter().min(), in_budget.iter().max()) {
                    (Some(&lowest_rate), Some(&highest_rate)) => findings.push(HotelFinding::WithinBudget {
                        count: in_budget.len(),
                        budget_min: profile.hotel_budget_min,
                        budget_max: profile.hotel_budget_max,
                        lowest_rate,
                        highest_rate,
                    }),
                    _ => findings.push(HotelFinding::NoneWithinBudget {
                        budget_min: profile.hotel_budget_min,
                        budget_max: profile.hotel_budget_max,
                    }),
                }
                if !brand_matched.is_empty() {
                    let mut brands: Vec<String> = brand_matched.iter().map(|h| h.brand.clone()).collect();
                    brands.sort();
                    brands.dedup();
                    findings.push(HotelFinding::PreferredBrands {
                        count: brand_matched.len(),
                        brands,
                    });
                }
                if anomalous_discounts > 0 {
                    findings.push(HotelFinding::AnomalousDiscounts {
                        count: anomalous_discounts,
                    });
                }
                findings.push(HotelFinding::TopPick {
                    name: top.hotel.name.clone(),
                    brand: top.hotel.brand.clone(),
                    nightly_rate: top.hotel.nightly_rate,
                    rating: top.hotel.rating,
                });
                findings
            }
        };

        HotelAnalysisResult {
            destination: None,
            check_in: None,
            check_out: None,
            options,
            within_budget: in_budget.len(),
            brand_matches: brand_matched.len(),
            anomalous_discounts,
            findings,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::hotel;
    use super::*;
    use crate::models::profile::fixtures::alex;
    use rstest::rstest;

    #[test]
    fn test_brand_matched_budget_hotel_scores() {
        let courtyard = hotel("Courtyard by Marriott Maui", "Marriott", 160, 4.3);
        let score = HotelScorer::score(&courtyard, &alex());
        assert!((score - 66.25).abs() < 1e-9, "got {score}");
    }

    #[rstest]
    #[case(120, BudgetFit::WithinRange, 30.0)]
    #[case(250, BudgetFit::WithinRange, 30.0)]
    #[case(119, BudgetFit::TooCheap, 10.0)]
    #[case(300, BudgetFit::OverBudget { overage: 50 }, 10.0)]
    #[case(400, BudgetFit::OverBudget { overage: 150 }, 0.0)]
    fn test_budget_fit(#[case] rate: u32, #[case] fit: BudgetFit, #[case] points: f64) {
        let breakdown = HotelScorer::breakdown(&hotel("Test", "Indie", rate, 3.0), &alex());
        assert_eq!(breakdown.budget_fit, fit);
        assert!((breakdown.budget_points - points).abs() < 1e-9);
        assert_eq!(breakdown.quality_points, 0.0);
    }

    #[test]
    fn test_low_rating_never_negative() {
        let breakdown = HotelScorer::breakdown(&hotel("Motel", "Indie", 150, 2.1), &alex());
        assert_eq!(breakdown.quality_points, 0.0);
    }

    #[rstest]
    #[case(6, 0.0)]
    #[case(7, 15.0)]
    fn test_anomaly_penalty_needs_comfort_sensitivity(#[case] comfort: u8, #[case] penalty: f64) {
        let mut profile = alex();
        profile.comfort_sensitivity = comfort;
        let mut discounted = hotel("Grand Hyatt Maui", "Hyatt", 245, 4.6);
        discounted.anomalous_discount = true;
        assert_eq!(HotelScorer::breakdown(&discounted, &profile).anomaly_penalty, penalty);
    }

    #[test]
    fn test_ranking_is_stable_on_ties() {
        let hotels = vec![
            hotel("First", "Indie", 200, 4.0),
            hotel("Best", "Hilton", 200, 4.0),
            hotel("Second", "Indie", 200, 4.0),
            hotel("Third", "Indie", 200, 4.0),
        ];
        let result = HotelScorer::evaluate(&hotels, &alex());
        let order: Vec<&str> = result.options.iter().map(|s| s.hotel.name.as_str()).collect();
        assert_eq!(order, vec!["Best", "First", "Second", "Third"]);
        assert!(result.options.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_narrative_counts() {
        let mut storm_deal = hotel("Andaz Maui at Wailea", "Hyatt", 294, 4.5);
        storm_deal.anomalous_discount = true;
        let hotels = vec![
            hotel("Hilton Garden Inn Maui", "Hilton", 180, 4.0),
            hotel("Courtyard by Marriott Maui", "Marriott", 160, 3.9),
            hotel("Four Seasons Resort Maui", "Four Seasons", 550, 4.8),
            storm_deal,
        ];
        let result = HotelScorer::evaluate(&hotels, &alex());

        assert_eq!(result.within_budget, 2);
        assert_eq!(result.brand_matches, 2);
        assert_eq!(result.anomalous_discounts, 1);
        assert!(result.findings.contains(&HotelFinding::WithinBudget {
            count: 2,
            budget_min: 120,
            budget_max: 250,
            lowest_rate: 160,
            highest_rate: 180,
        }));
        assert!(result.findings.contains(&HotelFinding::PreferredBrands {
            count: 2,
            brands: vec!["Hilton".to_string(), "Marriott".to_string()],
        }));
        assert_eq!(result.options[0].hotel.name, "Hilton Garden Inn Maui");
        assert!(result.summary().ends_with("Top pick: Hilton Garden Inn Maui (Hilton) at $180/night, rated 4.0/5."));
        assert_eq!(result.top(2).len(), 2);
        assert_eq!(result.top(10).len(), 4);
    }

    #[test]
    fn test_no_hotels() {
        let result = HotelScorer::evaluate(&[], &alex());
        assert!(result.options.is_empty());
        assert_eq!(result.summary(), "No hotels found for the requested stay.");
        assert!(result.top(5).is_empty());
    }

    #[test]
    fn test_stay_dates_are_dates() {
        let check_in = NaiveDate::from_ymd_opt(2025, 7, 30).unwrap();
        let check_out = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
        let result = HotelScorer::evaluate(&[hotel("A", "Hilton", 150, 4.0)], &alex())
            .for_stay("Maui, HI", check_in, check_out);
        assert_eq!(result.check_in, Some(check_in));
        assert_eq!(result.check_out, Some(check_out));
    }
}
