//! In-process stand-ins for the language model, forecast and Overpass services

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use trip_planner::TripPlannerConfig;
use trip_planner::api::AppState;

pub const INTENT_REPLY: &str =
    r#"{"destination":"Denver","duration":3,"interests":["hiking"],"budget":"moderate"}"#;

pub const ITINERARY_REPLY: &str = r#"```json
{
  "destination": "Denver",
  "duration": "3 days",
  "days": [
    {"day": 1, "date": "Day 1 - Friday", "weather": {"condition": "Clear sky", "temp": 24},
     "activities": [{"time": "8:00 AM", "activity": "Hike Mount Falcon", "location": "Mount Falcon Park"}]},
    {"day": 2, "date": "Day 2 - Saturday", "activities": [{"time": "9:00 AM", "activity": "Red Rocks trail"}]},
    {"day": 3, "date": "Day 3 - Sunday", "activities": [{"time": "10:00 AM", "activity": "Cherry Creek trail"}]}
  ],
  "budget": "moderate",
  "recommendations": ["Start hikes early"]
}
```"#;

/// Knobs and recordings for one fake upstream server
#[derive(Clone)]
pub struct Fake {
    pub llm_status: StatusCode,
    pub weather_status: StatusCode,
    pub intent_reply: String,
    pub itinerary_reply: String,
    pub overpass_queries: Arc<Mutex<Vec<String>>>,
    pub llm_calls: Arc<Mutex<Vec<Value>>>,
}

impl Default for Fake {
    fn default() -> Self {
        Self {
            llm_status: StatusCode::OK,
            weather_status: StatusCode::OK,
            intent_reply: INTENT_REPLY.to_string(),
            itinerary_reply: ITINERARY_REPLY.to_string(),
            overpass_queries: Arc::new(Mutex::new(Vec::new())),
            llm_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

async fn chat_completions(State(fake): State<Fake>, Json(body): Json<Value>) -> Response {
    fake.llm_calls.lock().unwrap().push(body.clone());
    if fake.llm_status != StatusCode::OK {
        return (fake.llm_status, "gateway down").into_response();
    }

    let system = body["messages"][0]["content"].as_str().unwrap_or_default();
    let reply = if system.contains("intent analyzer") {
        &fake.intent_reply
    } else {
        &fake.itinerary_reply
    };
    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": reply } }]
    }))
    .into_response()
}

async fn forecast(State(fake): State<Fake>) -> Response {
    if fake.weather_status != StatusCode::OK {
        return (fake.weather_status, "forecast down").into_response();
    }
    Json(json!({
        "latitude": 39.74,
        "longitude": -104.99,
        "daily": {
            "time": ["2026-10-16", "2026-10-17", "2026-10-18", "2026-10-19",
                     "2026-10-20", "2026-10-21", "2026-10-22"],
            "temperature_2m_max": [24.4, 22.1, 19.6, 18.0, 20.5, 21.0, 23.2],
            "temperature_2m_min": [8.2, 7.5, 5.1, 4.4, 6.0, 6.5, 7.9],
            "weathercode": [0, 1, 3, 61, 2, 0, 95]
        }
    }))
    .into_response()
}

async fn overpass(State(fake): State<Fake>, body: String) -> Json<Value> {
    fake.overpass_queries.lock().unwrap().push(body);
    Json(json!({
        "elements": [
            {"type": "way", "id": 1001, "center": {"lat": 39.64, "lon": -105.19},
             "tags": {"name": "Mount Falcon Trail", "route": "hiking"}},
            {"type": "node", "id": 1002, "lat": 39.66, "lon": -105.21,
             "tags": {"name": "Mount Morrison", "natural": "peak"}}
        ]
    }))
}

async fn geocode() -> Json<Value> {
    Json(json!({ "results": [] }))
}

/// Start the fake upstream on an ephemeral port and return its base URL
pub async fn spawn_upstream(fake: Fake) -> String {
    let app = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .route("/weather/forecast", get(forecast))
        .route("/overpass", post(overpass))
        .route("/geo/search", get(geocode))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Configuration pointing every client at the fake upstream
pub fn config_for(base: &str) -> TripPlannerConfig {
    let mut config = TripPlannerConfig::default();
    config.llm.base_url = format!("{base}/v1");
    config.llm.api_key = Some("test-key".to_string());
    config.weather.base_url = format!("{base}/weather");
    config.poi.base_url = format!("{base}/overpass");
    config.geocoding.base_url = format!("{base}/geo");
    config
}

pub async fn app_with(fake: Fake) -> Router {
    let base = spawn_upstream(fake).await;
    let state: AppState = trip_planner::web::state_from_config(&config_for(&base)).unwrap();
    trip_planner::web::app(state, None)
}
