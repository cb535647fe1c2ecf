//! Common serde helpers for payload deserialization
//!
//! HTTP form-ish clients send booleans as strings or numbers; the `vip`
//! flag accepts those shapes here, at the boundary, so the sync services
//! only ever see a real `bool`.

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// Deserialize an optional bool from bool, "true"/"false"/"1"/"0"/"" or 0/1
pub fn opt_bool_coerce<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::String(s)) => match s.as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" | "" => Ok(Some(false)),
            other => Err(de::Error::custom(format!(
                "invalid boolean string: {other:?}"
            ))),
        },
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Ok(Some(false)),
            Some(1) => Ok(Some(true)),
            _ => Err(de::Error::custom(format!("invalid boolean number: {n}"))),
        },
        Some(other) => Err(de::Error::custom(format!(
            "invalid boolean value: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_bool_coerce")]
        vip: Option<bool>,
    }

    fn parse(json: &str) -> Result<Option<bool>, serde_json::Error> {
        serde_json::from_str::<Probe>(json).map(|p| p.vip)
    }

    #[test]
    fn test_coerce_native_bool() {
        assert_eq!(parse(r#"{"vip": true}"#).unwrap(), Some(true));
        assert_eq!(parse(r#"{"vip": false}"#).unwrap(), Some(false));
    }

    #[test]
    fn test_coerce_strings() {
        assert_eq!(parse(r#"{"vip": "true"}"#).unwrap(), Some(true));
        assert_eq!(parse(r#"{"vip": "1"}"#).unwrap(), Some(true));
        assert_eq!(parse(r#"{"vip": "false"}"#).unwrap(), Some(false));
        assert_eq!(parse(r#"{"vip": "0"}"#).unwrap(), Some(false));
        assert_eq!(parse(r#"{"vip": ""}"#).unwrap(), Some(false));
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(parse(r#"{"vip": 1}"#).unwrap(), Some(true));
        assert_eq!(parse(r#"{"vip": 0}"#).unwrap(), Some(false));
    }

    #[test]
    fn test_coerce_missing_and_null() {
        assert_eq!(parse(r#"{}"#).unwrap(), None);
        assert_eq!(parse(r#"{"vip": null}"#).unwrap(), None);
    }

    #[test]
    fn test_coerce_rejects_garbage() {
        assert!(parse(r#"{"vip": "maybe"}"#).is_err());
        assert!(parse(r#"{"vip": 2}"#).is_err());
        assert!(parse(r#"{"vip": []}"#).is_err());
    }
}
