//! Lodging option model

use serde::{Deserialize, Serialize};

/// One bookable hotel option for a given stay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOption {
    pub name: String,
    /// Loyalty brand, matched against the traveler's preferred brands
    pub brand: String,
    /// USD per night
    pub nightly_rate: u32,
    /// Nightly rate times nights for the requested stay
    pub total_cost: u32,
    /// Guest rating out of 5.0
    pub rating: f64,
    pub location: String,
    /// Unusually low price whose cause is itself a risk signal
    pub anomalous_discount: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_reason: Option<String>,
}
