use std::sync::Arc;

use tracing::{debug, instrument};

use crate::llm::{ChatModel, ChatRequest};
use crate::models::{Itinerary, PointOfInterest, TravelIntent, WeatherDay};
use crate::outcome::{Outcome, Parsed, parse_or_default};

const SYSTEM_PROMPT: &str = "You are an expert travel planner. Create detailed, realistic itineraries. Return only valid JSON.";

/// Prompt embedding the intent and both enrichment results.
///
/// Only the forecast days that fall inside the trip are included.
pub fn synthesis_prompt(
    intent: &TravelIntent,
    forecast: &[WeatherDay],
    pois: &[PointOfInterest],
) -> String {
    let trip_forecast = &forecast[..forecast.len().min(intent.duration_days as usize)];
    let forecast_json = serde_json::to_string(trip_forecast).unwrap_or_else(|_| "[]".into());
    let pois_json = serde_json::to_string(pois).unwrap_or_else(|_| "[]".into());
    let destination = &intent.destination;
    let days = intent.duration_days;

    format!(
        r#"Create a detailed {days}-day travel itinerary for {destination}.

User interests: {interests}
Weather forecast: {forecast_json}
Available points of interest: {pois_json}

Create a JSON itinerary with this structure:
{{
  "destination": "{destination}",
  "duration": "{days} days",
  "days": [
    {{
      "day": 1,
      "date": "Day 1 - [Date]",
      "weather": {{ "condition": "Sunny", "temp": 20, "description": "Perfect for outdoor activities" }},
      "activities": [
        {{ "time": "9:00 AM", "activity": "Activity name", "location": "Location", "details": "Details" }}
      ]
    }}
  ],
  "budget": "Estimated budget",
  "recommendations": ["Tip 1", "Tip 2"]
}}

Make it realistic, considering weather and available POIs. Be specific and actionable."#,
        interests = intent.interests_label(),
    )
}

/// Parse (possibly fenced) model output into an itinerary, or build the fallback
pub fn parse_itinerary(raw: &str, intent: &TravelIntent) -> Parsed<Itinerary> {
    parse_or_default(
        raw,
        |itinerary: Itinerary| Ok(itinerary.with_intent_defaults(intent)),
        || Itinerary::fallback(intent),
    )
}

/// Turns intent plus enrichment into an [`Itinerary`]
pub struct ItinerarySynthesizer {
    model: Arc<dyn ChatModel>,
}

impl ItinerarySynthesizer {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Fatal only when the model call itself fails; unreadable answers degrade
    #[instrument(skip_all, fields(destination = %intent.destination, days = intent.duration_days))]
    pub async fn synthesize(
        &self,
        intent: &TravelIntent,
        forecast: &[WeatherDay],
        pois: &[PointOfInterest],
    ) -> Outcome<Itinerary> {
        let request = ChatRequest::new(SYSTEM_PROMPT, synthesis_prompt(intent, forecast, pois));

        let raw = match self.model.complete(request).await {
            Ok(raw) => raw,
            Err(e) => return Outcome::Fatal(e),
        };
        debug!(len = raw.len(), "Itinerary model output received");

        parse_itinerary(&raw, intent).into()
    }
}
