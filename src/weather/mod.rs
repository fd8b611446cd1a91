//! Destination weather lookup
//!
//! Fetches a short daily forecast from the `OpenMeteo` API. Every failure,
//! whether geocoding, transport, status or payload, degrades to an empty
//! forecast: planning goes on without weather.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::location_resolver::LocationResolver;
use crate::models::{Location, WeatherDay};
use crate::outcome::Outcome;
use crate::{Result, TripError};

pub mod open_meteo;

/// Anything that can produce a daily forecast for a destination
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Chronological daily forecast; degraded to empty on failure
    async fn fetch_forecast(&self, destination: &str) -> Outcome<Vec<WeatherDay>>;
}

/// Forecast lookup backed by `OpenMeteo`
pub struct WeatherLookup {
    client: Client,
    base_url: String,
    forecast_days: u32,
    resolver: LocationResolver,
}

impl WeatherLookup {
    pub fn new(config: &WeatherConfig, resolver: LocationResolver) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("TripPlanner/0.1.0")
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            forecast_days: config.forecast_days,
            resolver,
        })
    }

    async fn forecast_for(&self, location: &Location) -> Result<Vec<WeatherDay>> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&daily=temperature_2m_max,temperature_2m_min,weathercode&timezone=auto&forecast_days={}",
            self.base_url, location.latitude, location.longitude, self.forecast_days
        );
        debug!("OpenMeteo API request URL: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(TripError::upstream(
                "forecast",
                format!("Weather API error: {}", response.status().as_u16()),
            ));
        }

        let forecast: open_meteo::ForecastResponse = response
            .json()
            .await
            .map_err(|e| TripError::invalid_payload("forecast", e.to_string()))?;

        forecast.into_weather_days(self.forecast_days as usize)
    }
}

#[async_trait]
impl ForecastSource for WeatherLookup {
    #[instrument(skip(self))]
    async fn fetch_forecast(&self, destination: &str) -> Outcome<Vec<WeatherDay>> {
        info!("Fetching weather for: {}", destination);

        let result = match self.resolver.resolve(destination).await {
            Ok(location) => self.forecast_for(&location).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(forecast) => {
                info!("Weather forecast has {} days", forecast.len());
                Outcome::Ok(forecast)
            }
            Err(e) => {
                if e.is_soft() {
                    warn!("Weather lookup for {} degraded: {}", destination, e);
                } else {
                    error!("Weather lookup for {} failed, continuing without it: {}", destination, e);
                }
                Outcome::degrade_to_empty(&e)
            }
        }
    }
}
