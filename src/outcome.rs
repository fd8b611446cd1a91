//! Tagged results for external calls and model output parsing
//!
//! Every external call in the pipeline ends in one of three states: it
//! succeeded, it failed softly and a substitute value stands in for the real
//! one, or it failed hard and the request has to be aborted.

use serde::de::DeserializeOwned;

use crate::error::TripError;

/// Result of one external call
#[derive(Debug)]
pub enum Outcome<T> {
    /// The call produced a usable value
    Ok(T),
    /// The call failed softly; `value` is the empty/default substitute
    Degraded { value: T, reason: String },
    /// The call failed in a way the request cannot recover from
    Fatal(TripError),
}

impl<T> Outcome<T> {
    pub fn degraded<R: Into<String>>(value: T, reason: R) -> Self {
        Self::Degraded {
            value,
            reason: reason.into(),
        }
    }
}

impl<T: Default> Outcome<T> {
    /// Soft-fail the given error into an empty value
    pub fn degrade_to_empty(err: &TripError) -> Self {
        Self::degraded(T::default(), err.to_string())
    }
}

/// Result of parsing structured model output
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    /// The text parsed into the expected structure
    Structured(T),
    /// The text could not be parsed; a static default took its place
    Fallback { value: T, reason: String },
}

impl<T> Parsed<T> {
    pub fn value(&self) -> &T {
        match self {
            Parsed::Structured(value) | Parsed::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Parsed::Structured(value) | Parsed::Fallback { value, .. } => value,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Parsed::Fallback { .. })
    }
}

impl<T> From<Parsed<T>> for Outcome<T> {
    fn from(parsed: Parsed<T>) -> Self {
        match parsed {
            Parsed::Structured(value) => Outcome::Ok(value),
            Parsed::Fallback { value, reason } => Outcome::Degraded { value, reason },
        }
    }
}

/// Remove markdown code-fence markup (```` ```json ```` and ```` ``` ````) around model output
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse model text as JSON into `T`; on failure build the default from `fallback`.
///
/// `accept` runs on a successful parse and may reject the value, which then
/// also falls back.
pub fn parse_or_default<T, A, F>(raw: &str, accept: A, fallback: F) -> Parsed<T>
where
    T: DeserializeOwned,
    A: FnOnce(T) -> Result<T, String>,
    F: FnOnce() -> T,
{
    let cleaned = strip_code_fences(raw);
    let parsed = serde_json::from_str::<T>(&cleaned)
        .map_err(|e| e.to_string())
        .and_then(accept);

    match parsed {
        Ok(value) => Parsed::Structured(value),
        Err(reason) => Parsed::Fallback {
            value: fallback(),
            reason,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
    }

    fn fallback() -> Sample {
        Sample {
            name: "default".to_string(),
        }
    }

    #[rstest]
    #[case("{\"name\":\"a\"}", "{\"name\":\"a\"}")]
    #[case("```json\n{\"name\":\"a\"}\n```", "{\"name\":\"a\"}")]
    #[case("```\n{\"name\":\"a\"}\n```", "{\"name\":\"a\"}")]
    #[case("  \n{\"name\":\"a\"}  ", "{\"name\":\"a\"}")]
    fn test_strip_code_fences(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(strip_code_fences(raw), expected);
    }

    #[test]
    fn test_parse_or_default_structured() {
        let parsed = parse_or_default("```json\n{\"name\":\"x\"}\n```", Ok, fallback);
        assert_eq!(
            parsed,
            Parsed::Structured(Sample {
                name: "x".to_string()
            })
        );
    }

    #[rstest]
    #[case("not json at all")]
    #[case("{\"other\": 1}")]
    #[case("")]
    fn test_parse_or_default_falls_back(#[case] raw: &str) {
        let parsed = parse_or_default(raw, Ok, fallback);
        assert!(parsed.is_fallback());
        assert_eq!(parsed.value().name, "default");
    }

    #[test]
    fn test_parse_or_default_rejected_by_accept() {
        let parsed = parse_or_default(
            "{\"name\":\"\"}",
            |s: Sample| {
                if s.name.is_empty() {
                    Err("empty name".to_string())
                } else {
                    Ok(s)
                }
            },
            fallback,
        );
        match parsed {
            Parsed::Fallback { value, reason } => {
                assert_eq!(value.name, "default");
                assert_eq!(reason, "empty name");
            }
            Parsed::Structured(_) => panic!("expected fallback"),
        }
    }

    #[test]
    fn test_parsed_into_outcome() {
        let outcome: Outcome<u8> = Parsed::Fallback {
            value: 3,
            reason: "bad json".to_string(),
        }
        .into();
        match outcome {
            Outcome::Degraded { value, reason } => {
                assert_eq!(value, 3);
                assert_eq!(reason, "bad json");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
