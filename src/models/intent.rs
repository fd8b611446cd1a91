//! Structured travel intent extracted from a free-text request

use serde::{Deserialize, Serialize};

use super::lenient;

/// Longest trip the planner will lay out day by day
pub const MAX_TRIP_DAYS: u32 = 30;

const DEFAULT_DURATION_DAYS: u32 = 3;

fn default_duration() -> u32 {
    DEFAULT_DURATION_DAYS
}

/// Missing or `null` durations fall back to the default trip length
fn duration_or_default<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<u32, D::Error> {
    Ok(lenient::optional_day_count(deserializer)?.unwrap_or(DEFAULT_DURATION_DAYS))
}

/// What the traveller asked for
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TravelIntent {
    pub destination: String,
    #[serde(
        rename = "duration",
        default = "default_duration",
        deserialize_with = "duration_or_default"
    )]
    pub duration_days: u32,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub interests: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub budget: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub dates: Option<String>,
}

impl Default for TravelIntent {
    /// Intent used when the model's answer cannot be understood
    fn default() -> Self {
        Self {
            destination: "Colorado".to_string(),
            duration_days: DEFAULT_DURATION_DAYS,
            interests: vec!["hiking".to_string(), "nature".to_string()],
            budget: Some("moderate".to_string()),
            dates: None,
        }
    }
}

impl TravelIntent {
    /// Tidy a freshly parsed intent.
    ///
    /// Interests become lowercase, trimmed and unique (first occurrence wins),
    /// the duration is clamped to `1..=MAX_TRIP_DAYS`. A blank destination is
    /// rejected.
    pub fn normalized(mut self) -> Result<Self, String> {
        self.destination = self.destination.trim().to_string();
        if self.destination.is_empty() {
            return Err("intent has no destination".to_string());
        }

        self.duration_days = self.duration_days.clamp(1, MAX_TRIP_DAYS);

        let mut interests: Vec<String> = Vec::with_capacity(self.interests.len());
        for tag in self.interests.drain(..) {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !interests.contains(&tag) {
                interests.push(tag);
            }
        }
        self.interests = interests;

        Ok(self)
    }

    /// Interests joined for display, e.g. "hiking, nature"
    #[must_use]
    pub fn interests_label(&self) -> String {
        self.interests.join(", ")
    }
}
