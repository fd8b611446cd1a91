//! Overpass API response structures and conversion utilities

use std::collections::HashMap;

use serde::Deserialize;

use crate::models::PointOfInterest;

#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

/// A node or way returned by the interpreter
#[derive(Debug, Deserialize)]
pub struct Element {
    pub id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Present for ways when the query asks for `center` output
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Tags checked in order to derive a display category
const CATEGORY_TAGS: [&str; 4] = ["route", "natural", "amenity", "tourism"];

impl Element {
    fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    #[must_use]
    pub fn category(&self) -> &str {
        CATEGORY_TAGS
            .iter()
            .find_map(|key| self.tag(key))
            .unwrap_or("point of interest")
    }
}

impl From<Element> for PointOfInterest {
    fn from(element: Element) -> Self {
        let latitude = element.lat.or(element.center.as_ref().map(|c| c.lat));
        let longitude = element.lon.or(element.center.as_ref().map(|c| c.lon));

        PointOfInterest {
            id: element.id.into(),
            name: element.tag("name").unwrap_or("Unnamed location").to_string(),
            category: element.category().to_string(),
            latitude,
            longitude,
            description: element.tag("description").map(str::to_string),
        }
    }
}
