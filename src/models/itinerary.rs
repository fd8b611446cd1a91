//! Itinerary models and the response envelope handed back to the chat UI

use serde::{Deserialize, Serialize};

use super::{TravelIntent, lenient};

/// Weather summary the planner attaches to a day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayWeather {
    #[serde(default)]
    pub condition: String,
    /// Unset when the model's value is not a readable number, e.g. "20-25°C"
    #[serde(
        rename = "temp",
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub temp_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A scheduled activity within a day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Activity {
    /// Clock time label such as "9:00 AM"
    pub time: String,
    pub activity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ItineraryDay {
    /// 1-based day counter within the trip
    #[serde(rename = "day")]
    pub day_number: u32,
    /// Heading such as "Day 1 - Saturday"
    #[serde(rename = "date", default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<DayWeather>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// The day-by-day plan for one request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Itinerary {
    #[serde(default)]
    pub destination: String,
    /// Human-readable length such as "3 days"
    #[serde(rename = "duration", default, deserialize_with = "lenient::duration_text")]
    pub duration_label: String,
    pub days: Vec<ItineraryDay>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

/// "3 days", "1 day"
#[must_use]
pub fn duration_label(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

impl Itinerary {
    /// Deterministic plan used when the synthesized one cannot be parsed.
    ///
    /// Always has exactly `intent.duration_days` days numbered from 1.
    #[must_use]
    pub fn fallback(intent: &TravelIntent) -> Self {
        let days = (1..=intent.duration_days)
            .map(|day_number| ItineraryDay {
                day_number,
                label: format!("Day {day_number}"),
                weather: None,
                activities: vec![Activity {
                    time: "9:00 AM".to_string(),
                    activity: "Explore local attractions".to_string(),
                    location: Some(intent.destination.clone()),
                    details: None,
                }],
            })
            .collect();

        Self {
            destination: intent.destination.clone(),
            duration_label: duration_label(intent.duration_days),
            days,
            budget: None,
            recommendations: Some(vec![
                "Pack layers".to_string(),
                "Book activities in advance".to_string(),
            ]),
        }
    }

    /// Fill header fields the model left blank from the intent
    #[must_use]
    pub fn with_intent_defaults(mut self, intent: &TravelIntent) -> Self {
        if self.destination.trim().is_empty() {
            self.destination = intent.destination.clone();
        }
        if self.duration_label.trim().is_empty() {
            self.duration_label = duration_label(intent.duration_days);
        }
        self
    }
}

/// A previous turn of the conversation, reconstructed by the caller
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatTurn {
    /// "user" or "assistant"
    pub role: String,
    pub content: String,
}

/// Body of a planning request
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlanRequest {
    pub prompt: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Everything the chat UI shows for one planning request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResponseEnvelope {
    #[serde(rename = "response")]
    pub narrative: String,
    #[serde(rename = "thinking")]
    pub reasoning_trace: Vec<String>,
    pub itinerary: Itinerary,
}
