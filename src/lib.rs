//! Travel advisor - personalized travel window recommendations
//!
//! Scores daily weather forecasts, flight fares and hotel options against a
//! traveler's preferences and combines them into one explainable
//! recommendation with a confidence level, alternatives and rejections.

pub mod advisor;
pub mod config;
pub mod error;
pub mod flights;
pub mod hotels;
pub mod models;
pub mod profiles;
pub mod synthesis;
pub mod telemetry;
pub mod weather;

// Re-export core types for public API
pub use advisor::{TravelAdvisor, TripRequest};
pub use config::AdvisorConfig;
pub use error::AdvisorError;
pub use flights::{FlightAnalysisResult, FlightBudgetAnalyzer, FlightProvider, FlightQuery};
pub use hotels::{HotelAnalysisResult, HotelProvider, HotelQuery, HotelScorer};
pub use models::{DateWindow, DayForecast, FlightOption, HotelOption, PreferenceProfile};
pub use profiles::{InMemoryProfileRepository, ProfileRepository};
pub use synthesis::{ConfidenceLevel, RecommendationSynthesizer, TravelRecommendation};
pub use weather::{ForecastProvider, WeatherWindowResult, WeatherWindowScorer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AdvisorError>;
