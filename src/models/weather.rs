use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the destination forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherDay {
    /// Local calendar date of the forecast day
    pub date: NaiveDate,
    /// Daily maximum temperature in Celsius, rounded to whole degrees
    #[serde(rename = "tempMax")]
    pub temp_max_c: i32,
    /// Daily minimum temperature in Celsius, rounded to whole degrees
    #[serde(rename = "tempMin")]
    pub temp_min_c: i32,
    /// Human-readable condition label
    pub condition: String,
    /// WMO weather code as reported by the forecast service
    #[serde(rename = "weatherCode")]
    pub raw_code: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let day = WeatherDay {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            temp_max_c: 27,
            temp_min_c: 12,
            condition: "Clear sky".into(),
            raw_code: 0,
        };
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["date"], "2025-06-01");
        assert_eq!(json["tempMax"], 27);
        assert_eq!(json["tempMin"], 12);
        assert_eq!(json["weatherCode"], 0);
    }
}
