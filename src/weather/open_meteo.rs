//! `OpenMeteo` API response structures and conversion utilities

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::WeatherDay;
use crate::{Result, TripError};

/// Daily forecast response from `OpenMeteo` API
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub daily: Option<DailyData>,
}

/// Daily weather data from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<Option<f32>>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Vec<Option<f32>>,
    #[serde(rename = "weathercode")]
    pub weather_code: Vec<Option<u8>>,
}

/// Convert `OpenMeteo` weather code to human-readable condition
#[must_use]
pub fn weather_code_to_condition(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Foggy",
        51 => "Light rain",
        53 => "Moderate rain",
        55 => "Heavy rain",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        80 => "Rain showers",
        95 => "Thunderstorm",
        _ => "Unknown",
    }
}

fn malformed(message: String) -> TripError {
    TripError::invalid_payload("forecast", message)
}

impl ForecastResponse {
    /// Convert the daily block into forecast days, at most `max_days` of them
    pub fn into_weather_days(self, max_days: usize) -> Result<Vec<WeatherDay>> {
        let daily = self
            .daily
            .ok_or_else(|| malformed("response has no daily block".into()))?;

        daily
            .time
            .iter()
            .take(max_days)
            .enumerate()
            .map(|(i, date)| {
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .map_err(|e| malformed(format!("bad date '{date}': {e}")))?;

                let temp_max = daily
                    .temperature_max
                    .get(i)
                    .copied()
                    .flatten()
                    .ok_or_else(|| malformed(format!("missing max temperature for day {i}")))?;
                let temp_min = daily
                    .temperature_min
                    .get(i)
                    .copied()
                    .flatten()
                    .ok_or_else(|| malformed(format!("missing min temperature for day {i}")))?;
                let raw_code = daily
                    .weather_code
                    .get(i)
                    .copied()
                    .flatten()
                    .ok_or_else(|| malformed(format!("missing weather code for day {i}")))?;

                Ok(WeatherDay {
                    date,
                    temp_max_c: temp_max.round() as i32,
                    temp_min_c: temp_min.round() as i32,
                    condition: weather_code_to_condition(raw_code).to_string(),
                    raw_code,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Clear sky")]
    #[case(3, "Overcast")]
    #[case(45, "Foggy")]
    #[case(48, "Foggy")]
    #[case(63, "Moderate rain")]
    #[case(95, "Thunderstorm")]
    fn test_known_codes(#[case] code: u8, #[case] expected: &str) {
        assert_eq!(weather_code_to_condition(code), expected);
    }

    #[test]
    fn test_unknown_codes() {
        let known = [
            0u8, 1, 2, 3, 45, 48, 51, 53, 55, 61, 63, 65, 71, 73, 75, 80, 95,
        ];
        for code in (0..=u8::MAX).filter(|c| !known.contains(c)) {
            assert_eq!(weather_code_to_condition(code), "Unknown", "code {code}");
        }
    }

    fn response(json: &str) -> ForecastResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_into_weather_days_rounds_temperatures() {
        let days = response(
            r#"{"latitude":39.7,"longitude":-105.0,"daily":{
                "time":["2025-06-01","2025-06-02"],
                "temperature_2m_max":[24.5,19.4],
                "temperature_2m_min":[10.2,-0.6],
                "weathercode":[0,99]}}"#,
        )
        .into_weather_days(7)
        .unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(days[0].temp_max_c, 25);
        assert_eq!(days[0].temp_min_c, 10);
        assert_eq!(days[0].condition, "Clear sky");
        assert_eq!(days[1].temp_max_c, 19);
        assert_eq!(days[1].temp_min_c, -1);
        assert_eq!(days[1].condition, "Unknown");
        assert_eq!(days[1].raw_code, 99);
    }

    #[test]
    fn test_into_weather_days_respects_horizon() {
        let days = response(
            r#"{"latitude":0,"longitude":0,"daily":{
                "time":["2025-06-01","2025-06-02","2025-06-03"],
                "temperature_2m_max":[1,2,3],
                "temperature_2m_min":[0,0,0],
                "weathercode":[1,2,3]}}"#,
        )
        .into_weather_days(2)
        .unwrap();
        assert_eq!(days.len(), 2);
    }

    #[test]
    fn test_missing_values_are_malformed() {
        let result = response(
            r#"{"latitude":0,"longitude":0,"daily":{
                "time":["2025-06-01"],
                "temperature_2m_max":[null],
                "temperature_2m_min":[0],
                "weathercode":[1]}}"#,
        )
        .into_weather_days(7);
        assert!(matches!(result, Err(TripError::InvalidPayload { .. })));

        let result = response(r#"{"latitude":0,"longitude":0}"#).into_weather_days(7);
        assert!(result.is_err());
    }
}
