//! Traveler profile lookup
//!
//! Profiles are resolved through the [`ProfileRepository`] trait so the
//! advisor and tests can inject their own fixtures instead of sharing a
//! process-wide table.

use std::collections::BTreeMap;

use crate::models::PreferenceProfile;

/// Storage abstraction for traveler preference records.
pub trait ProfileRepository: Send + Sync {
    /// Look up a profile. `None` means the identifier is unknown; callers
    /// must not substitute default preferences.
    fn find(&self, traveler_id: &str) -> Option<PreferenceProfile>;

    /// Identifiers this repository can resolve, sorted
    fn traveler_ids(&self) -> Vec<String>;
}

/// Repository backed by an in-memory map. Lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: BTreeMap<String, PreferenceProfile>,
}

impl InMemoryProfileRepository {
    #[must_use]
    pub fn new(profiles: impl IntoIterator<Item = PreferenceProfile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|profile| (profile.id.to_lowercase(), profile))
            .collect();
        Self { profiles }
    }

    /// Repository seeded with the three demo travelers
    #[must_use]
    pub fn with_sample_travelers() -> Self {
        Self::new(sample_travelers())
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn find(&self, traveler_id: &str) -> Option<PreferenceProfile> {
        self.profiles
            .get(&traveler_id.trim().to_lowercase())
            .cloned()
    }

    fn traveler_ids(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }
}

fn brands(names: &[&str]) -> std::collections::BTreeSet<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

/// Demo travelers: a mid-range flexible traveler, a heat-averse
/// comfort-sensitive one and a luxury traveler who likes it hot.
#[must_use]
pub fn sample_travelers() -> Vec<PreferenceProfile> {
    vec![
        PreferenceProfile {
            id: "alex".to_string(),
            name: "Alex Chen".to_string(),
            preferred_temp_min_f: 72,
            preferred_temp_max_f: 85,
            airfare_budget_soft: 450,
            airfare_budget_hard: 650,
            hotel_budget_min: 120,
            hotel_budget_max: 250,
            preferred_hotel_brands: brands(&["Marriott", "Hilton"]),
            trip_length_nights: 7,
            flexibility_days: 5,
            comfort_sensitivity: 6,
        },
        PreferenceProfile {
            id: "jordan".to_string(),
            name: "Jordan Rivera".to_string(),
            preferred_temp_min_f: 68,
            preferred_temp_max_f: 80,
            airfare_budget_soft: 600,
            airfare_budget_hard: 900,
            hotel_budget_min: 200,
            hotel_budget_max: 400,
            preferred_hotel_brands: brands(&["Hyatt", "Four Seasons"]),
            trip_length_nights: 5,
            flexibility_days: 2,
            comfort_sensitivity: 9,
        },
        PreferenceProfile {
            id: "sam".to_string(),
            name: "Sam Patel".to_string(),
            preferred_temp_min_f: 75,
            preferred_temp_max_f: 90,
            airfare_budget_soft: 800,
            airfare_budget_hard: 1200,
            hotel_budget_min: 300,
            hotel_budget_max: 600,
            preferred_hotel_brands: brands(&["Four Seasons", "Ritz-Carlton"]),
            trip_length_nights: 10,
            flexibility_days: 7,
            comfort_sensitivity: 8,
        },
    ]
}
