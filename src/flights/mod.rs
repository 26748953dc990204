//! Flight search and airfare budget analysis

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::FlightOption;
use crate::Result;

pub mod budget;
pub mod search;

pub use budget::{FlightAnalysisResult, FlightBudgetAnalyzer, FlightFinding};
pub use search::MockFlightProvider;

/// Round-trip search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightQuery {
    /// Origin airport code, e.g. "SFO"
    pub origin: String,
    /// Destination airport code, e.g. "OGG"
    pub destination: String,
    /// Earliest departure date
    pub earliest_departure: NaiveDate,
    /// Latest departure date, inclusive
    pub latest_departure: NaiveDate,
    /// Nights between departure and return
    pub trip_nights: usize,
}

/// Source of bookable round-trip itineraries
#[async_trait]
pub trait FlightProvider: Send + Sync {
    async fn search_flights(&self, query: &FlightQuery) -> Result<Vec<FlightOption>>;
}
