use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderName, Method, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;

use crate::api::{self, AppState};
use crate::config::TripPlannerConfig;
use crate::llm::OpenAiChatClient;
use crate::location_resolver::LocationResolver;
use crate::planner::TripPlanner;
use crate::poi::PoiLookup;
use crate::weather::WeatherLookup;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Cross-origin policy matching what the chat front end sends
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

/// Build the full application router
pub fn app(state: AppState, static_dir: Option<&str>) -> Router {
    let mut app = Router::new().nest(
        "/api",
        api::router(state).layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
    );

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors())
}

/// Build the application state from configuration
pub fn state_from_config(config: &TripPlannerConfig) -> Result<AppState> {
    let resolver =
        LocationResolver::new(&config.geocoding).context("Failed to create geocoding client")?;
    let weather = Arc::new(
        WeatherLookup::new(&config.weather, resolver.clone())
            .context("Failed to create weather client")?,
    );
    let pois =
        Arc::new(PoiLookup::new(&config.poi, resolver).context("Failed to create POI client")?);
    let api_key = config.require_llm_api_key()?;
    let model = Arc::new(
        OpenAiChatClient::new(&config.llm, api_key).context("Failed to create LLM client")?,
    );
    let planner = Arc::new(TripPlanner::new(model, weather.clone(), pois.clone()));

    Ok(AppState {
        planner,
        weather,
        pois,
    })
}

pub async fn run(config: &TripPlannerConfig) -> Result<()> {
    let state = state_from_config(config)?;
    let app = app(state, config.server.static_dir.as_deref());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);
    axum::serve(listener, app).await.context("Web server failed")?;
    Ok(())
}
