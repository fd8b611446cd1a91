//! Tolerant field deserializers for language-model output
//!
//! Models are asked for numbers and strings but hand back either one
//! interchangeably ("3" vs 3, 150 vs "$150").

use serde::{
    Deserialize, Deserializer,
    de::{Error, IgnoredAny},
};

use super::itinerary::duration_label;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn into_text(self) -> String {
        match self {
            NumberOrText::Number(n) if n.fract() == 0.0 => format!("{n:.0}"),
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s,
        }
    }
}

/// Leading integer of a string such as "3", "3 days" or " 5-day"
fn leading_integer(text: &str) -> Option<u32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// A whole number of days given as a number or a string starting with one;
/// `null` reads as `None`
pub fn optional_day_count<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) if n.is_finite() && n >= 0.0 => Ok(Some(n.round() as u32)),
        Some(NumberOrText::Number(n)) => Err(D::Error::custom(format!("invalid day count {n}"))),
        Some(NumberOrText::Text(s)) => leading_integer(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid day count '{s}'"))),
    }
}

/// A list of strings where `null` reads as empty
pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// An optional free-text field the model may also send as a number
pub fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<NumberOrText>::deserialize(deserializer)?
        .map(NumberOrText::into_text)
        .filter(|s| !s.trim().is_empty()))
}

/// A trip length label; bare whole numbers ("3", 3) become "3 days", `null` is empty
pub fn duration_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let label = match Option::<NumberOrText>::deserialize(deserializer)? {
        None => String::new(),
        Some(NumberOrText::Number(n))
            if n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n) =>
        {
            duration_label(n as u32)
        }
        Some(NumberOrText::Text(s)) => match s.trim().parse::<u32>() {
            Ok(days) => duration_label(days),
            Err(_) => s,
        },
        Some(other) => other.into_text(),
    };
    Ok(label)
}

/// Anything the model might put where a number belongs
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Leading number of a string such as "20", "20°C" or "-3 C"
fn leading_number(text: &str) -> Option<f64> {
    let numeric: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
        .collect();
    numeric.parse().ok()
}

/// A number the model may also send as a numeric string; anything unreadable
/// (ranges, words, `null`, objects) reads as `None`
pub fn optional_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    Ok(
        match Option::<LooseNumber>::deserialize(deserializer)? {
            Some(LooseNumber::Number(n)) => Some(n),
            Some(LooseNumber::Text(s)) => leading_number(&s),
            Some(LooseNumber::Other(_)) | None => None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Deserialize)]
    struct Days {
        #[serde(default, deserialize_with = "optional_day_count")]
        value: Option<u32>,
    }

    #[derive(Deserialize)]
    struct Budget {
        #[serde(default, deserialize_with = "optional_text")]
        value: Option<String>,
    }

    #[derive(Deserialize)]
    struct Temp {
        #[serde(default, deserialize_with = "optional_number")]
        value: Option<f64>,
    }

    #[derive(Deserialize)]
    struct Duration {
        #[serde(default, deserialize_with = "duration_text")]
        value: String,
    }

    #[derive(Deserialize)]
    struct Tags {
        #[serde(default, deserialize_with = "string_list")]
        value: Vec<String>,
    }

    #[rstest]
    #[case(r#"{"value": 3}"#, Some(3))]
    #[case(r#"{"value": "4"}"#, Some(4))]
    #[case(r#"{"value": "5 days"}"#, Some(5))]
    #[case(r#"{"value": 2.0}"#, Some(2))]
    #[case(r#"{"value": null}"#, None)]
    #[case(r#"{}"#, None)]
    fn test_day_count(#[case] json: &str, #[case] expected: Option<u32>) {
        let days: Days = serde_json::from_str(json).unwrap();
        assert_eq!(days.value, expected);
    }

    #[rstest]
    #[case(r#"{"value": "a week"}"#)]
    #[case(r#"{"value": -1}"#)]
    fn test_day_count_rejects(#[case] json: &str) {
        assert!(serde_json::from_str::<Days>(json).is_err());
    }

    #[rstest]
    #[case(r#"{"value": "moderate"}"#, Some("moderate"))]
    #[case(r#"{"value": 1500}"#, Some("1500"))]
    #[case(r#"{"value": null}"#, None)]
    #[case(r#"{"value": ""}"#, None)]
    #[case(r#"{}"#, None)]
    fn test_optional_text(#[case] json: &str, #[case] expected: Option<&str>) {
        let budget: Budget = serde_json::from_str(json).unwrap();
        assert_eq!(budget.value.as_deref(), expected);
    }

    #[rstest]
    #[case(r#"{"value": 21.5}"#, Some(21.5))]
    #[case(r#"{"value": "18"}"#, Some(18.0))]
    #[case(r#"{"value": "-3°C"}"#, Some(-3.0))]
    #[case(r#"{"value": "20-25°C"}"#, None)]
    #[case(r#"{"value": "warm"}"#, None)]
    #[case(r#"{"value": null}"#, None)]
    #[case(r#"{"value": {"min": 10, "max": 20}}"#, None)]
    fn test_optional_number(#[case] json: &str, #[case] expected: Option<f64>) {
        let temp: Temp = serde_json::from_str(json).unwrap();
        assert_eq!(temp.value, expected);
    }

    #[rstest]
    #[case(r#"{"value": 3}"#, "3 days")]
    #[case(r#"{"value": 1}"#, "1 day")]
    #[case(r#"{"value": "4"}"#, "4 days")]
    #[case(r#"{"value": "a long weekend"}"#, "a long weekend")]
    #[case(r#"{"value": 2.5}"#, "2.5")]
    #[case(r#"{"value": null}"#, "")]
    fn test_duration_text(#[case] json: &str, #[case] expected: &str) {
        let duration: Duration = serde_json::from_str(json).unwrap();
        assert_eq!(duration.value, expected);
    }

    #[rstest]
    #[case(r#"{"value": ["hiking", "food"]}"#, 2)]
    #[case(r#"{"value": null}"#, 0)]
    #[case(r#"{}"#, 0)]
    fn test_string_list(#[case] json: &str, #[case] expected: usize) {
        let tags: Tags = serde_json::from_str(json).unwrap();
        assert_eq!(tags.value.len(), expected);
    }
}
