//! Data models for the travel advisor
//!
//! This module contains the core domain models organized by concern:
//! - Profile: a traveler's preferences and constraints
//! - Forecast: daily weather and contiguous date windows
//! - Flight: bookable round-trip itineraries
//! - Hotel: bookable lodging options

pub mod flight;
pub mod forecast;
pub mod hotel;
pub mod profile;

// Re-export all public types for convenient access
pub use flight::FlightOption;
pub use forecast::{DateWindow, DayForecast};
pub use hotel::HotelOption;
pub use profile::PreferenceProfile;
