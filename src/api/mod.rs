use std::sync::Arc;

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::{
    TripError,
    models::{PlanRequest, PointOfInterest, WeatherDay},
    outcome::Outcome,
    planner::TripPlanner,
    poi::PoiSource,
    weather::ForecastSource,
};

/// Shared handles for the API handlers
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
    pub weather: Arc<dyn ForecastSource>,
    pub pois: Arc<dyn PoiSource>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeatherRequest {
    pub destination: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub forecast: Vec<WeatherDay>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PoiRequest {
    pub destination: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PoiResponse {
    pub pois: Vec<PointOfInterest>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/plan-trip", post(plan_trip))
        .route("/get-weather", post(get_weather))
        .route("/get-poi", post(get_poi))
        .with_state(state)
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn bad_request(rejection: JsonRejection) -> Response {
    error_response(StatusCode::BAD_REQUEST, rejection.body_text())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": crate::VERSION }))
}

async fn plan_trip(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection),
    };
    if request.prompt.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            TripError::validation("prompt cannot be empty").to_string(),
        );
    }

    match state.planner.plan(&request).await {
        Ok(envelope) => Json(envelope).into_response(),
        Err(e) => {
            error!("Error in plan-trip: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn get_weather(
    State(state): State<AppState>,
    payload: Result<Json<WeatherRequest>, JsonRejection>,
) -> Response {
    let Json(WeatherRequest { destination }) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection),
    };

    let (status, forecast, error) = split(state.weather.fetch_forecast(&destination).await);
    let body = WeatherResponse {
        forecast,
        location: destination,
        error,
    };
    (status, Json(body)).into_response()
}

async fn get_poi(
    State(state): State<AppState>,
    payload: Result<Json<PoiRequest>, JsonRejection>,
) -> Response {
    let Json(PoiRequest {
        destination,
        interests,
    }) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection),
    };

    let (status, pois, error) = split(state.pois.fetch_pois(&destination, &interests).await);
    let body = PoiResponse {
        pois,
        location: destination,
        error,
    };
    (status, Json(body)).into_response()
}

/// Lookup outcomes keep their (possibly empty) value; failures still report 500
fn split<T: Default>(outcome: Outcome<T>) -> (StatusCode, T, Option<String>) {
    match outcome {
        Outcome::Ok(value) => (StatusCode::OK, value, None),
        Outcome::Degraded { value, reason } => {
            (StatusCode::INTERNAL_SERVER_ERROR, value, Some(reason))
        }
        Outcome::Fatal(e) => (StatusCode::INTERNAL_SERVER_ERROR, T::default(), Some(e.to_string())),
    }
}
