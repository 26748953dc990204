//! Hotel search and preference scoring

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::HotelOption;
use crate::Result;

pub mod inventory;
pub mod scorer;

pub use inventory::{HotelListing, InventoryHotelProvider};
pub use scorer::{BudgetFit, HotelAnalysisResult, HotelFinding, HotelScoreBreakdown, HotelScorer, ScoredHotel};

/// Stay search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelQuery {
    pub destination: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// The stay overlaps days with storm risk
    pub storm_period: bool,
}

impl HotelQuery {
    /// Nights between check-in and check-out, never negative
    #[must_use]
    pub fn nights(&self) -> u32 {
        u32::try_from((self.check_out - self.check_in).num_days()).unwrap_or(0)
    }
}

/// Source of bookable hotel options for a stay
#[async_trait]
pub trait HotelProvider: Send + Sync {
    async fn search_hotels(&self, query: &HotelQuery) -> Result<Vec<HotelOption>>;
}
