use serde::{Deserialize, Serialize};

/// Identifier of a point of interest; geodata ids are numeric, others may not be
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum PoiId {
    Numeric(u64),
    Text(String),
}

impl From<u64> for PoiId {
    fn from(id: u64) -> Self {
        PoiId::Numeric(id)
    }
}

/// A named place near the destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PointOfInterest {
    pub id: PoiId,
    pub name: String,
    /// Display category such as "hiking", "peak" or "restaurant"
    #[serde(rename = "type")]
    pub category: String,
    #[serde(rename = "lat", default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(rename = "lon", default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
