//! Serde helpers for PubSub field encodings.
//!
//! The platform sends numeric ids as strings, marks optional nested values
//! with any falsy JSON value, and formats timestamps as `%Y-%m-%dT%H:%M:%SZ`.

use std::fmt;

use chrono::NaiveDateTime;
use serde::de::{self, DeserializeOwned, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{PubSubError, Result};

/// Fixed wire format for every PubSub timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Numeric id carried as a decimal string (integers are accepted too).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireId(pub u64);

impl<'de> Deserialize<'de> for WireId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct WireIdVisitor;

        impl<'de> Visitor<'de> for WireIdVisitor {
            type Value = WireId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer id")
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<WireId, E>
            where
                E: de::Error,
            {
                Ok(WireId(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<WireId, E>
            where
                E: de::Error,
            {
                u64::try_from(value)
                    .map(WireId)
                    .map_err(|_| E::custom(format!("negative id: {value}")))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<WireId, E>
            where
                E: de::Error,
            {
                value
                    .parse::<u64>()
                    .map(WireId)
                    .map_err(|_| E::custom(format!("invalid id string: {value:?}")))
            }
        }

        deserializer.deserialize_any(WireIdVisitor)
    }
}

/// JSON truthiness: null, false, 0, "", [] and {} are falsy.
pub fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// `None` when the wire value is falsy, otherwise the parsed value.
///
/// The key itself must be present; add `#[serde(default)]` only where an
/// absent key is allowed.
pub fn deserialize_falsy<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Value::deserialize(deserializer)?;
    if is_falsy(&v) {
        return Ok(None);
    }
    serde_json::from_value(v).map(Some).map_err(de::Error::custom)
}

/// Required key whose value may be null.
///
/// A plain `Option` field treats a missing key as `None`; routing it
/// through `deserialize_with` makes the missing key an error instead.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Required list whose value may be null; null reads as empty.
pub fn deserialize_null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s).map_err(de::Error::custom)
}

/// Parse a timestamp in [`TIMESTAMP_FORMAT`]. No offsets, no fractions.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| PubSubError::MalformedPayload(format!("invalid timestamp {s:?}: {e}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn wire_id_accepts_strings_and_integers() {
        let a: WireId = serde_json::from_value(json!("123456")).unwrap();
        let b: WireId = serde_json::from_value(json!(123456)).unwrap();
        assert_eq!(a, WireId(123456));
        assert_eq!(a, b);
    }

    #[test]
    fn wire_id_rejects_garbage() {
        assert!(serde_json::from_value::<WireId>(json!("12a")).is_err());
        assert!(serde_json::from_value::<WireId>(json!("")).is_err());
        assert!(serde_json::from_value::<WireId>(json!(-4)).is_err());
        assert!(serde_json::from_value::<WireId>(json!(1.5)).is_err());
    }

    #[test]
    fn falsy_values() {
        for v in [json!(null), json!(false), json!(0), json!(""), json!([]), json!({})] {
            assert!(is_falsy(&v), "{v}");
        }
        for v in [json!(true), json!(1), json!("x"), json!([0]), json!({"a": 1})] {
            assert!(!is_falsy(&v), "{v}");
        }
    }

    #[derive(Debug, Deserialize)]
    struct Stamped {
        #[serde(deserialize_with = "deserialize_timestamp")]
        at: NaiveDateTime,
    }

    #[derive(Debug, Deserialize)]
    struct Nullables {
        #[serde(deserialize_with = "deserialize_nullable")]
        name: Option<String>,
        #[serde(deserialize_with = "deserialize_null_as_empty")]
        args: Vec<String>,
    }

    #[test]
    fn timestamp_fixed_format() {
        let ts = serde_json::from_value::<Stamped>(json!({ "at": "2023-01-02T03:04:05Z" }))
            .unwrap()
            .at;
        assert_eq!((ts.year(), ts.month(), ts.day()), (2023, 1, 2));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (3, 4, 5));
    }

    #[test]
    fn timestamp_rejects_other_formats() {
        for s in [
            "2023-01-02T03:04:05+00:00",
            "2023-01-02T03:04:05.123Z",
            "2023-01-02 03:04:05",
            "2023-01-02",
        ] {
            assert!(parse_timestamp(s).is_err(), "{s}");
            assert!(serde_json::from_value::<Stamped>(json!({ "at": s })).is_err(), "{s}");
        }
    }

    #[test]
    fn nullable_key_must_be_present() {
        let n: Nullables = serde_json::from_value(json!({ "name": null, "args": null })).unwrap();
        assert!(n.name.is_none());
        assert!(n.args.is_empty());

        assert!(serde_json::from_value::<Nullables>(json!({ "args": [] })).is_err());
        assert!(serde_json::from_value::<Nullables>(json!({ "name": "x" })).is_err());
    }
}
