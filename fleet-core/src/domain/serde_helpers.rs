//! Deserialization helpers for the loosely typed columns the api returns.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const ACCEPTED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses the timestamp formats produced by the api and by `datetime-local` form inputs.
/// Offsets are dropped, timestamps are kept in the server's local time.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|v| v.naive_local())
        })
}

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub mod timestamp {
    use serde::de::Error as _;

    use super::*;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse_timestamp(&value)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{value}'")))
    }

    pub mod option {
        use serde::de::Error as _;

        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => serializer.serialize_str(&format_timestamp(v)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(v) if v.trim().is_empty() => Ok(None),
                Some(v) => parse_timestamp(&v)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{v}'"))),
            }
        }
    }
}

/// `null` and a missing field both become `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Empty and whitespace-only strings are read as `None`.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|v| !v.trim().is_empty())
        .map(T::from))
}

/// History values are stored as text but older rows hold raw json numbers.
pub fn any_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(v) => Some(v),
        other => Some(other.to_string()),
    })
}
