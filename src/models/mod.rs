//! Data models for the trip planner
//!
//! This module contains the core domain models organized by concern:
//! - Location: Coordinates and resolved places
//! - Weather: Daily forecast entries
//! - Poi: Points of interest near a destination
//! - Intent: Structured travel request extracted from free text
//! - Itinerary: The day-by-day plan and the response envelope around it

pub mod intent;
pub mod itinerary;
pub mod location;
pub mod poi;
pub mod weather;

mod lenient;

// Re-export all public types for convenient access
pub use intent::TravelIntent;
pub use itinerary::{
    Activity, ChatTurn, DayWeather, Itinerary, ItineraryDay, PlanRequest, ResponseEnvelope,
};
pub use location::{Coordinates, Location};
pub use poi::{PoiId, PointOfInterest};
pub use weather::WeatherDay;
