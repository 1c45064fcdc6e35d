//! Forgiving decoders for values that went through browser local storage,
//! where numbers sometimes come back as strings and labels as `null`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::scoring::EmotionType;

pub fn nan() -> f64 {
    f64::NAN
}

pub fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numbers and numeric strings decode as-is; anything else becomes NaN so
/// validation can report it instead of the whole record failing to load.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}

/// RFC 3339 timestamps as written by `Date.prototype.toJSON`; anything
/// unparseable is dropped.
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    })
}

/// A manual bucket tag. Tags this build does not know (such as `neutral`
/// from the three-bucket UI) are dropped so the entry falls back to
/// automatic classification.
pub fn emotion_type<'de, D>(deserializer: D) -> Result<Option<EmotionType>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => match s.parse() {
            Ok(emotion_type) => Some(emotion_type),
            Err(()) => {
                tracing::debug!(tag = %s, "ignoring unknown manual emotion type");
                None
            }
        },
        other => {
            tracing::debug!(tag = %other, "ignoring non-string manual emotion type");
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "string_or_null")]
        label: String,
        #[serde(default = "nan", deserialize_with = "number")]
        value: f64,
    }

    #[test]
    fn test_numeric_string() {
        let s: Sample = serde_json::from_str(r#"{"label":"a","value":" 7 "}"#).unwrap();
        assert_eq!(s.value, 7.0);
    }

    #[test]
    fn test_garbage_becomes_nan() {
        let s: Sample = serde_json::from_str(r#"{"label":"a","value":[1]}"#).unwrap();
        assert!(s.value.is_nan());
        let s: Sample = serde_json::from_str(r#"{"label":"a","value":"lots"}"#).unwrap();
        assert!(s.value.is_nan());
        let s: Sample = serde_json::from_str(r#"{"label":"a"}"#).unwrap();
        assert!(s.value.is_nan());
    }

    #[derive(Deserialize)]
    struct Stamped {
        #[serde(default, deserialize_with = "timestamp")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_timestamp() {
        let s: Stamped = serde_json::from_str(r#"{"at":"2024-05-01T10:00:00.000Z"}"#).unwrap();
        assert_eq!(s.at.map(|t| t.to_rfc3339()), Some("2024-05-01T10:00:00+00:00".into()));
        let s: Stamped = serde_json::from_str(r#"{"at":"yesterday"}"#).unwrap();
        assert!(s.at.is_none());
        let s: Stamped = serde_json::from_str(r#"{}"#).unwrap();
        assert!(s.at.is_none());
    }

    #[test]
    fn test_null_label() {
        let s: Sample = serde_json::from_str(r#"{"label":null,"value":3}"#).unwrap();
        assert_eq!(s.label, "");
        assert_eq!(s.value, 3.0);
    }

    #[derive(Deserialize)]
    struct Tagged {
        #[serde(default, deserialize_with = "emotion_type")]
        manual_type: Option<EmotionType>,
    }

    #[test]
    fn test_manual_type_tag() {
        let t: Tagged = serde_json::from_str(r#"{"manual_type":"positive"}"#).unwrap();
        assert_eq!(t.manual_type, Some(EmotionType::Positive));
        let t: Tagged = serde_json::from_str(r#"{"manual_type":"neutral"}"#).unwrap();
        assert_eq!(t.manual_type, None);
        let t: Tagged = serde_json::from_str(r#"{"manual_type":1}"#).unwrap();
        assert_eq!(t.manual_type, None);
        let t: Tagged = serde_json::from_str(r#"{"manual_type":null}"#).unwrap();
        assert_eq!(t.manual_type, None);
        let t: Tagged = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(t.manual_type, None);
    }
}
