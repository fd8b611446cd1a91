//! `TripPlanner` - travel planning assistant backend
//!
//! This library turns a free-text trip request into a day-by-day itinerary:
//! a language model extracts the intent, weather and points-of-interest
//! lookups ground it in real data, and a second model call writes the plan.

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod location_resolver;
pub mod models;
pub mod outcome;
pub mod planner;
pub mod poi;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::TripPlannerConfig;
pub use error::TripError;
pub use location_resolver::LocationResolver;
pub use models::{Itinerary, ResponseEnvelope, TravelIntent, WeatherDay};
pub use outcome::{Outcome, Parsed};
pub use planner::TripPlanner;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripError>;
