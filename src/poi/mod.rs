//! Points-of-interest lookup
//!
//! Translates interest tags into an Overpass query around the destination.
//! Like the weather lookup, failures degrade to an empty set.

use std::fmt::Write as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, instrument, warn};

use crate::config::PoiConfig;
use crate::location_resolver::LocationResolver;
use crate::models::{Coordinates, PointOfInterest};
use crate::outcome::Outcome;
use crate::{Result, TripError};

pub mod overpass;

/// Anything that can list points of interest near a destination
#[async_trait]
pub trait PoiSource: Send + Sync {
    /// Bounded set of places matching the interests; degraded to empty on failure
    async fn fetch_pois(&self, destination: &str, interests: &[String])
    -> Outcome<Vec<PointOfInterest>>;
}

/// One OSM element filter, e.g. `node["natural"="peak"]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selector {
    pub element: &'static str,
    pub key: &'static str,
    pub value: &'static str,
}

const fn selector(element: &'static str, key: &'static str, value: &'static str) -> Selector {
    Selector {
        element,
        key,
        value,
    }
}

/// Interest tags that share a set of selectors
pub struct InterestGroup {
    pub tags: &'static [&'static str],
    pub selectors: &'static [Selector],
}

pub static INTEREST_GROUPS: &[InterestGroup] = &[
    InterestGroup {
        tags: &["hiking", "nature"],
        selectors: &[
            selector("way", "route", "hiking"),
            selector("way", "natural", "wood"),
            selector("node", "natural", "peak"),
        ],
    },
    InterestGroup {
        tags: &["food", "dining"],
        selectors: &[
            selector("node", "amenity", "restaurant"),
            selector("node", "amenity", "cafe"),
        ],
    },
    InterestGroup {
        tags: &["sightseeing", "tourism"],
        selectors: &[
            selector("node", "tourism", "attraction"),
            selector("node", "tourism", "viewpoint"),
        ],
    },
];

/// Selectors for every group touched by `interests`, in group order
#[must_use]
pub fn selectors_for(interests: &[String]) -> Vec<Selector> {
    INTEREST_GROUPS
        .iter()
        .filter(|group| {
            interests
                .iter()
                .any(|interest| group.tags.contains(&interest.trim().to_lowercase().as_str()))
        })
        .flat_map(|group| group.selectors.iter().copied())
        .collect()
}

/// Build the Overpass QL query, or `None` when no interest maps to a selector
#[must_use]
pub fn build_query(
    interests: &[String],
    center: Coordinates,
    radius_m: u32,
    max_results: u32,
) -> Option<String> {
    let selectors = selectors_for(interests);
    if selectors.is_empty() {
        return None;
    }

    let mut query = String::from("[out:json][timeout:25];(");
    for s in selectors {
        let _ = write!(
            query,
            "{}[\"{}\"=\"{}\"](around:{},{},{});",
            s.element, s.key, s.value, radius_m, center.latitude, center.longitude
        );
    }
    let _ = write!(query, ");out body center {max_results};");
    Some(query)
}

/// Points-of-interest lookup backed by the Overpass API
pub struct PoiLookup {
    client: Client,
    base_url: String,
    radius_m: u32,
    max_results: u32,
    resolver: LocationResolver,
}

impl PoiLookup {
    pub fn new(config: &PoiConfig, resolver: LocationResolver) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("TripPlanner/0.1.0")
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            radius_m: config.radius_m,
            max_results: config.max_results,
            resolver,
        })
    }

    async fn query(&self, destination: &str, interests: &[String]) -> Result<Vec<PointOfInterest>> {
        let location = self.resolver.resolve(destination).await?;

        let Some(query) = build_query(
            interests,
            location.coordinates(),
            self.radius_m,
            self.max_results,
        ) else {
            debug!("No interest group matches {:?}, skipping query", interests);
            return Ok(Vec::new());
        };
        debug!("Overpass query: {}", query);

        let response = self
            .client
            .post(&self.base_url)
            .form(&[("data", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TripError::upstream(
                "points of interest",
                format!("Overpass API error: {}", response.status().as_u16()),
            ));
        }

        let body: overpass::OverpassResponse = response
            .json()
            .await
            .map_err(|e| TripError::invalid_payload("points of interest", e.to_string()))?;

        Ok(body
            .elements
            .into_iter()
            .take(self.max_results as usize)
            .map(PointOfInterest::from)
            .collect())
    }
}

#[async_trait]
impl PoiSource for PoiLookup {
    #[instrument(skip(self))]
    async fn fetch_pois(
        &self,
        destination: &str,
        interests: &[String],
    ) -> Outcome<Vec<PointOfInterest>> {
        info!("Fetching POIs for: {} interests: {:?}", destination, interests);

        match self.query(destination, interests).await {
            Ok(pois) => {
                info!("Found {} POIs", pois.len());
                Outcome::Ok(pois)
            }
            Err(e) => {
                if e.is_soft() {
                    warn!("POI lookup for {} degraded: {}", destination, e);
                } else {
                    error!("POI lookup for {} failed, continuing without it: {}", destination, e);
                }
                Outcome::degrade_to_empty(&e)
            }
        }
    }
}
