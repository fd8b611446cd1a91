//! Configuration management for the trip planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the trip planner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripPlannerConfig {
    /// Language model gateway configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Forecast API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Points-of-interest API configuration
    #[serde(default)]
    pub poi: PoiConfig,
    /// Geocoding configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// OpenAI-compatible chat completions gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL, the client appends `/chat/completions`
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    /// Model identifier sent with every completion
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Bearer token for the gateway
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u32,
}

/// Forecast API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the forecast API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Number of forecast days requested
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
    /// Request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u32,
}

/// Points-of-interest API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiConfig {
    /// Overpass interpreter endpoint
    #[serde(default = "default_poi_base_url")]
    pub base_url: String,
    /// Search radius around the destination in meters
    #[serde(default = "default_poi_radius")]
    pub radius_m: u32,
    /// Maximum number of points of interest returned
    #[serde(default = "default_poi_max_results")]
    pub max_results: u32,
    /// Request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u32,
}

/// Geocoding configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Ask the geocoding API about places missing from the built-in table
    #[serde(default = "default_live_lookup")]
    pub live_lookup: bool,
    /// Built-in place used for unknown names when live lookup is off
    #[serde(default = "default_region")]
    pub default_region: String,
    /// Request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u32,
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory with a built chat front end, served for non-API paths
    pub static_dir: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_llm_base_url() -> String {
    "https://ai.gateway.lovable.dev/v1".to_string()
}

fn default_llm_model() -> String {
    "google/gemini-2.5-flash".to_string()
}

fn default_llm_timeout() -> u32 {
    60
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_forecast_days() -> u32 {
    7
}

fn default_http_timeout() -> u32 {
    30
}

fn default_poi_base_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_poi_radius() -> u32 {
    20_000
}

fn default_poi_max_results() -> u32 {
    20
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_live_lookup() -> bool {
    true
}

fn default_region() -> String {
    "colorado".to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            api_key: None,
            timeout_seconds: default_llm_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            forecast_days: default_forecast_days(),
            timeout_seconds: default_http_timeout(),
        }
    }
}

impl Default for PoiConfig {
    fn default() -> Self {
        Self {
            base_url: default_poi_base_url(),
            radius_m: default_poi_radius(),
            max_results: default_poi_max_results(),
            timeout_seconds: default_http_timeout(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            live_lookup: default_live_lookup(),
            default_region: default_region(),
            timeout_seconds: default_http_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            static_dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TripPlannerConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRIP_PLANNER_LLM__API_KEY -> llm.api_key
        builder = builder.add_source(
            Environment::with_prefix("TRIP_PLANNER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripPlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trip-planner").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.llm.base_url.is_empty() {
            self.llm.base_url = default_llm_base_url();
        }
        if self.llm.model.is_empty() {
            self.llm.model = default_llm_model();
        }
        if self.llm.timeout_seconds == 0 {
            self.llm.timeout_seconds = default_llm_timeout();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.forecast_days == 0 {
            self.weather.forecast_days = default_forecast_days();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_http_timeout();
        }
        if self.poi.base_url.is_empty() {
            self.poi.base_url = default_poi_base_url();
        }
        if self.poi.radius_m == 0 {
            self.poi.radius_m = default_poi_radius();
        }
        if self.poi.max_results == 0 {
            self.poi.max_results = default_poi_max_results();
        }
        if self.poi.timeout_seconds == 0 {
            self.poi.timeout_seconds = default_http_timeout();
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.default_region.is_empty() {
            self.geocoding.default_region = default_region();
        }
        if self.geocoding.timeout_seconds == 0 {
            self.geocoding.timeout_seconds = default_http_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The configured LLM API key, required before the planner can run
    pub fn require_llm_api_key(&self) -> std::result::Result<&str, TripError> {
        match self.llm.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(TripError::config(
                "LLM API key is not configured (set TRIP_PLANNER_LLM__API_KEY)",
            )),
        }
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        let timeouts = [
            ("LLM", self.llm.timeout_seconds),
            ("Weather API", self.weather.timeout_seconds),
            ("POI API", self.poi.timeout_seconds),
            ("Geocoding API", self.geocoding.timeout_seconds),
        ];
        for (name, timeout) in timeouts {
            if timeout > 300 {
                return Err(TripError::config(format!(
                    "{name} timeout cannot exceed 300 seconds"
                ))
                .into());
            }
        }

        if self.weather.forecast_days > 16 {
            return Err(TripError::config("Forecast days cannot exceed 16").into());
        }

        if self.poi.radius_m > 100_000 {
            return Err(TripError::config("POI search radius cannot exceed 100000 m").into());
        }

        if self.poi.max_results > 100 {
            return Err(TripError::config("Maximum POI results cannot exceed 100").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("LLM", &self.llm.base_url),
            ("Weather API", &self.weather.base_url),
            ("POI API", &self.poi.base_url),
            ("Geocoding API", &self.geocoding.base_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
