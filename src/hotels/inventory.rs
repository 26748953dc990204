//! Hotel provider over a fixed inventory of listings
//!
//! Nightly rates start from each listing's base rate. During storm periods
//! upscale properties discount heavily; those prices are flagged as
//! anomalous so the scorer can treat them as a risk signal.

use async_trait::async_trait;
use rand::{RngExt, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{HotelProvider, HotelQuery};
use crate::models::HotelOption;
use crate::Result;

const DEEP_DISCOUNT_ABOVE: u32 = 300;
const DISCOUNT_ABOVE: u32 = 200;

/// A property in the inventory before it is priced for a stay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelListing {
    pub name: String,
    pub brand: String,
    /// Regular nightly rate in USD
    pub base_rate: u32,
    pub rating: f64,
    pub location: String,
}

impl HotelListing {
    fn new(name: &str, brand: &str, base_rate: u32, rating: f64, location: &str) -> Self {
        Self {
            name: name.to_string(),
            brand: brand.to_string(),
            base_rate,
            rating,
            location: location.to_string(),
        }
    }
}

/// Seven Maui properties spanning budget to luxury
#[must_use]
pub fn maui_inventory() -> Vec<HotelListing> {
    vec![
        HotelListing::new("Marriott Wailea Beach Resort", "Marriott", 280, 4.3, "Wailea Beach"),
        HotelListing::new("Grand Hyatt Maui", "Hyatt", 350, 4.6, "Ka'anapali"),
        HotelListing::new("Four Seasons Resort Maui", "Four Seasons", 550, 4.8, "Wailea"),
        HotelListing::new("Hilton Garden Inn Maui", "Hilton", 180, 4.0, "Kahului"),
        HotelListing::new("Ritz-Carlton Kapalua", "Ritz-Carlton", 480, 4.7, "Kapalua Bay"),
        HotelListing::new("Courtyard by Marriott Maui", "Marriott", 160, 3.9, "Kahului"),
        HotelListing::new("Andaz Maui at Wailea", "Hyatt", 420, 4.5, "Wailea"),
    ]
}

/// Storm-period rate and the reason it was cut, if it was
fn storm_pricing(base_rate: u32) -> (u32, Option<&'static str>) {
    if base_rate > DEEP_DISCOUNT_ABOVE {
        (
            base_rate * 70 / 100,
            Some("Storm season discount: 30% off due to weather risk"),
        )
    } else if base_rate > DISCOUNT_ABOVE {
        (
            base_rate * 85 / 100,
            Some("Storm season discount: 15% off"),
        )
    } else {
        (base_rate, None)
    }
}

#[derive(Debug, Clone)]
pub struct InventoryHotelProvider {
    listings: Vec<HotelListing>,
    seed: u64,
}

impl Default for InventoryHotelProvider {
    fn default() -> Self {
        Self::new(maui_inventory())
    }
}

impl InventoryHotelProvider {
    #[must_use]
    pub fn new(listings: Vec<HotelListing>) -> Self {
        Self {
            listings,
            seed: crate::weather::mock::DEFAULT_SEED,
        }
    }

    /// Price every listing for the queried stay, in inventory order
    #[must_use]
    pub fn quote(&self, query: &HotelQuery) -> Vec<HotelOption> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let nights = query.nights();

        self.listings
            .iter()
            .map(|listing| {
                let (rate, reason) = if query.storm_period {
                    storm_pricing(listing.base_rate)
                } else {
                    (listing.base_rate, None)
                };
                let nightly_rate = (f64::from(rate) * rng.random_range(0.95..=1.05)) as u32;

                HotelOption {
                    name: listing.name.clone(),
                    brand: listing.brand.clone(),
                    nightly_rate,
                    total_cost: nightly_rate.saturating_mul(nights),
                    rating: listing.rating,
                    location: listing.location.clone(),
                    anomalous_discount: reason.is_some(),
                    discount_reason: reason.map(str::to_string),
                }
            })
            .collect()
    }
}

#[async_trait]
impl HotelProvider for InventoryHotelProvider {
    async fn search_hotels(&self, query: &HotelQuery) -> Result<Vec<HotelOption>> {
        let options = self.quote(query);
        debug!(
            destination = %query.destination,
            nights = query.nights(),
            storm_period = query.storm_period,
            options = options.len(),
            "Quoted hotel inventory"
        );
        Ok(options)
    }
}
