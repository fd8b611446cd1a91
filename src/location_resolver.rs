//! Location Resolution Module
//!
//! Turns free-text place names into coordinates. Well-known destinations come
//! from a built-in table; anything else goes to the geocoding API, or to the
//! configured default region when live lookups are switched off.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::GeocodingConfig;
use crate::models::{Coordinates, Location};
use crate::{Result, TripError};

/// Approximate coordinates for common destinations, keyed by normalized name
static KNOWN_PLACES: &[(&str, Coordinates)] = &[
    ("denver", Coordinates::new(39.7392, -104.9903)),
    ("colorado", Coordinates::new(39.5501, -105.7821)),
    ("new york", Coordinates::new(40.7128, -74.006)),
    ("san francisco", Coordinates::new(37.7749, -122.4194)),
    ("london", Coordinates::new(51.5074, -0.1278)),
    ("paris", Coordinates::new(48.8566, 2.3522)),
    ("tokyo", Coordinates::new(35.6762, 139.6503)),
];

/// Lowercase and trim a place name for table lookups
#[must_use]
pub fn normalize_place(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Look a place up in the built-in table
#[must_use]
pub fn known_place(name: &str) -> Option<Coordinates> {
    let key = normalize_place(name);
    KNOWN_PLACES
        .iter()
        .find(|(place, _)| *place == key)
        .map(|(_, coordinates)| *coordinates)
}

/// Geocoding response from `OpenMeteo`
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        let coordinates = Coordinates::new(result.latitude, result.longitude);
        match result.country {
            Some(country) => Location::with_country(coordinates, result.name, country),
            None => Location::new(coordinates, result.name),
        }
    }
}

/// Service for resolving place names
#[derive(Clone)]
pub struct LocationResolver {
    client: Client,
    base_url: String,
    live_lookup: bool,
    default_region: String,
}

impl LocationResolver {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("TripPlanner/0.1.0")
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            live_lookup: config.live_lookup,
            default_region: config.default_region.clone(),
        })
    }

    /// Resolve a place name into a structured Location
    #[instrument(skip(self))]
    pub async fn resolve(&self, place_name: &str) -> Result<Location> {
        if let Some(coordinates) = known_place(place_name) {
            debug!("Resolved {} from built-in table", place_name);
            return Ok(Location::new(coordinates, place_name.trim().to_string()));
        }

        if !self.live_lookup {
            let coordinates = known_place(&self.default_region)
                .ok_or_else(|| TripError::location_not_found(self.default_region.clone()))?;
            debug!(
                "Unknown place {}, using default region {}",
                place_name, self.default_region
            );
            return Ok(Location::new(coordinates, place_name.trim().to_string()));
        }

        self.geocode(place_name).await
    }

    /// Ask the geocoding API and keep the first (best) result
    async fn geocode(&self, place_name: &str) -> Result<Location> {
        debug!("Geocoding location name: {}", place_name);

        let url = format!(
            "{}/search?name={}&count=1&language=en&format=json",
            self.base_url,
            urlencoding::encode(place_name.trim())
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(TripError::upstream(
                "geocoding",
                format!("HTTP {}", response.status()),
            ));
        }

        let geocoding: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| TripError::invalid_payload("geocoding", e.to_string()))?;

        let location: Location = geocoding
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| TripError::location_not_found(place_name.trim()))?
            .into();

        debug!(
            "Found location: {} ({})",
            location.name,
            location.format_coordinates()
        );
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Denver", 39.7392, -104.9903)]
    #[case("  denver ", 39.7392, -104.9903)]
    #[case("NEW YORK", 40.7128, -74.006)]
    #[case("Tokyo", 35.6762, 139.6503)]
    fn test_known_places(#[case] name: &str, #[case] lat: f64, #[case] lon: f64) {
        assert_eq!(known_place(name), Some(Coordinates::new(lat, lon)));
    }

    #[test]
    fn test_unknown_place() {
        assert_eq!(known_place("Atlantis"), None);
    }

    #[tokio::test]
    async fn test_table_hit_skips_network() {
        let config = GeocodingConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..GeocodingConfig::default()
        };
        let resolver = LocationResolver::new(&config).unwrap();
        let location = resolver.resolve("Paris").await.unwrap();
        assert_eq!(location.coordinates(), Coordinates::new(48.8566, 2.3522));
        assert_eq!(location.name, "Paris");
    }

    #[tokio::test]
    async fn test_default_region_when_live_lookup_disabled() {
        let config = GeocodingConfig {
            base_url: "http://127.0.0.1:9".into(),
            live_lookup: false,
            ..GeocodingConfig::default()
        };
        let resolver = LocationResolver::new(&config).unwrap();
        let location = resolver.resolve("Moab").await.unwrap();
        assert_eq!(location.coordinates(), Coordinates::new(39.5501, -105.7821));
        assert_eq!(location.name, "Moab");
    }
}
