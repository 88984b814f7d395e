//! Lenient field decoders for the service's loosely typed payloads.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Boolean sent as `"1"`/`"0"`, `1`/`0` or a JSON boolean. Null is false.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Null => Ok(false),
        Value::Number(n) => Ok(n.as_u64().is_some_and(|n| n != 0)),
        Value::String(s) => match s.trim() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid flag '{other}'"))),
        },
        other => Err(serde::de::Error::custom(format!("invalid flag {other}"))),
    }
}

/// Identifier sent either as a number or a numeric string.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| serde::de::Error::custom(format!("invalid id {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid id '{s}'"))),
        other => Err(serde::de::Error::custom(format!("invalid id {other}"))),
    }
}

/// Count sent either as a number or a numeric string. Null is zero.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        other => id(other).map_err(serde::de::Error::custom),
    }
}

/// Optional count; null or an empty string is `None`.
pub(crate) fn optional_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        other => id(other).map(Some).map_err(serde::de::Error::custom),
    }
}

/// Decimal sent either as a number or a numeric string. Null is zero.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0.0),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom(format!("invalid number {n}"))),
        Value::String(s) if s.trim().is_empty() => Ok(0.0),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid number '{s}'"))),
        other => Err(serde::de::Error::custom(format!("invalid number {other}"))),
    }
}

/// A nested `{"href": "..."}` link reduced to its target.
pub(crate) fn link<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Link {
        href: Option<String>,
    }

    Ok(Option::<Link>::deserialize(deserializer)?.and_then(|l| l.href))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Flags {
        #[serde(deserialize_with = "flag")]
        a: bool,
        #[serde(default, deserialize_with = "flag")]
        b: bool,
    }

    #[test]
    fn flags_accept_all_encodings() {
        for (raw, expected) in [
            (json!("1"), true),
            (json!("0"), false),
            (json!(1), true),
            (json!(0), false),
            (json!(true), true),
            (json!(null), false),
        ] {
            let parsed: Flags = serde_json::from_value(json!({ "a": raw })).unwrap();
            assert_eq!(parsed.a, expected, "decoding {raw}");
            assert!(!parsed.b);
        }
    }

    #[test]
    fn flag_rejects_nonsense() {
        assert!(serde_json::from_value::<Flags>(json!({"a": "maybe"})).is_err());
    }

    #[test]
    fn ids_from_numbers_and_strings() {
        #[derive(Deserialize)]
        struct Id {
            #[serde(deserialize_with = "id")]
            id: u64,
        }
        assert_eq!(serde_json::from_value::<Id>(json!({"id": 42})).unwrap().id, 42);
        assert_eq!(serde_json::from_value::<Id>(json!({"id": "42"})).unwrap().id, 42);
        assert!(serde_json::from_value::<Id>(json!({"id": "x"})).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Totals {
        #[serde(default, deserialize_with = "optional_count")]
        unique: Option<u64>,
        #[serde(default, deserialize_with = "number")]
        percent: f64,
    }

    #[test]
    fn totals_from_numbers_and_strings() {
        let parsed: Totals =
            serde_json::from_value(json!({"unique": "25", "percent": "25.0"})).unwrap();
        assert_eq!(parsed.unique, Some(25));
        assert_eq!(parsed.percent, 25.0);

        let parsed: Totals = serde_json::from_value(json!({"unique": 7, "percent": 12.5})).unwrap();
        assert_eq!(parsed.unique, Some(7));
        assert_eq!(parsed.percent, 12.5);

        let parsed: Totals = serde_json::from_value(json!({"unique": null})).unwrap();
        assert_eq!(parsed.unique, None);
        assert_eq!(parsed.percent, 0.0);

        assert!(serde_json::from_value::<Totals>(json!({"percent": "lots"})).is_err());
    }
}
