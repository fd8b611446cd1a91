//! Trip planning pipeline
//!
//! extract intent -> enrich (weather, points of interest) -> synthesize
//! itinerary -> assemble the response envelope.
//!
//! Intent extraction and synthesis are load-bearing: if the model cannot be
//! reached the request fails. Everything else degrades.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::config::TripPlannerConfig;
use crate::llm::{ChatModel, OpenAiChatClient};
use crate::location_resolver::LocationResolver;
use crate::models::{PlanRequest, ResponseEnvelope, TravelIntent};
use crate::outcome::Outcome;
use crate::poi::{PoiLookup, PoiSource};
use crate::weather::{ForecastSource, WeatherLookup};
use crate::Result;

pub mod intent;
pub mod synthesis;

pub use intent::IntentExtractor;
pub use synthesis::ItinerarySynthesizer;

pub const TRACE_ANALYZING: &str =
    "Analyzing your travel request to understand destination, dates, budget, and preferences";
pub const TRACE_WEATHER: &str = "Fetching real-time weather forecast for your destination";
pub const TRACE_POIS: &str = "Searching for hiking trails, restaurants, and attractions in the area";
pub const TRACE_SYNTHESIZING: &str =
    "Synthesizing all data into a personalized day-by-day itinerary";
pub const TRACE_DONE: &str = "Successfully created your personalized travel plan!";

fn trace_intent(intent: &TravelIntent) -> String {
    format!(
        "Identified destination: {}, Duration: {} days, Interests: {}",
        intent.destination,
        intent.duration_days,
        intent.interests_label()
    )
}

fn narrative(intent: &TravelIntent) -> String {
    format!(
        "I've created a personalized {}-day itinerary for {}! The plan includes real weather forecasts and carefully selected activities based on your interests. Check out the detailed day-by-day plan below.",
        intent.duration_days, intent.destination
    )
}

/// Resolve an outcome for a pipeline step: keep degraded values, stop on fatal
fn settle<T>(step: &str, outcome: Outcome<T>) -> Result<T> {
    match outcome {
        Outcome::Ok(value) => Ok(value),
        Outcome::Degraded { value, reason } => {
            warn!("{} degraded: {}", step, reason);
            Ok(value)
        }
        Outcome::Fatal(e) => {
            error!("{} failed: {}", step, e);
            Err(e)
        }
    }
}

/// Runs the planning pipeline for one request at a time; holds no per-request state
pub struct TripPlanner {
    extractor: IntentExtractor,
    synthesizer: ItinerarySynthesizer,
    weather: Arc<dyn ForecastSource>,
    pois: Arc<dyn PoiSource>,
}

impl TripPlanner {
    pub fn new(
        model: Arc<dyn ChatModel>,
        weather: Arc<dyn ForecastSource>,
        pois: Arc<dyn PoiSource>,
    ) -> Self {
        Self {
            extractor: IntentExtractor::new(model.clone()),
            synthesizer: ItinerarySynthesizer::new(model),
            weather,
            pois,
        }
    }

    /// Wire the planner to the real language model, forecast and geodata services
    pub fn from_config(config: &TripPlannerConfig) -> Result<Self> {
        let api_key = config.require_llm_api_key()?;
        let model = Arc::new(OpenAiChatClient::new(&config.llm, api_key)?);
        let resolver = LocationResolver::new(&config.geocoding)?;
        let weather = Arc::new(WeatherLookup::new(&config.weather, resolver.clone())?);
        let pois = Arc::new(PoiLookup::new(&config.poi, resolver)?);
        Ok(Self::new(model, weather, pois))
    }

    /// Plan a trip from a free-text request
    #[instrument(skip_all)]
    pub async fn plan(&self, request: &PlanRequest) -> Result<ResponseEnvelope> {
        info!("Received travel request: {}", request.prompt);
        let mut trace = Vec::with_capacity(6);

        // Extract
        trace.push(TRACE_ANALYZING.to_string());
        let intent = settle(
            "Intent extraction",
            self.extractor
                .extract(&request.prompt, &request.history)
                .await,
        )?;
        info!("Extracted intent: {:?}", intent);
        trace.push(trace_intent(&intent));

        // Enrich
        trace.push(TRACE_WEATHER.to_string());
        trace.push(TRACE_POIS.to_string());
        let (forecast, pois) = futures::join!(
            self.weather.fetch_forecast(&intent.destination),
            self.pois.fetch_pois(&intent.destination, &intent.interests),
        );
        let forecast = settle("Weather lookup", forecast)?;
        let pois = settle("POI lookup", pois)?;

        // Synthesize
        trace.push(TRACE_SYNTHESIZING.to_string());
        let itinerary = settle(
            "Itinerary synthesis",
            self.synthesizer.synthesize(&intent, &forecast, &pois).await,
        )?;

        // Assemble
        trace.push(TRACE_DONE.to_string());
        info!(
            "Planned {} days for {}",
            itinerary.days.len(),
            intent.destination
        );

        Ok(ResponseEnvelope {
            narrative: narrative(&intent),
            reasoning_trace: trace,
            itinerary,
        })
    }
}
