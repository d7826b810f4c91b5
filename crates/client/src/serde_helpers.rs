//! Serde helpers for loosely-typed backend JSON.
//!
//! Responsibilities:
//! - Accept identifiers sent either as strings or as integers.
//! - Accept monetary amounts sent either as decimal strings or numbers.
//! - Treat `null` collections as empty.
//!
//! Invariants / assumptions:
//! - Identifiers are always exposed as `String`, whatever the wire type.
//! - These helpers never log values; errors are generic parse errors.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    U64(u64),
    I64(i64),
    F64(f64),
}

impl StringOrNumber {
    fn into_id(self) -> String {
        match self {
            StringOrNumber::String(s) => s,
            StringOrNumber::U64(v) => v.to_string(),
            StringOrNumber::I64(v) => v.to_string(),
            StringOrNumber::F64(v) => v.to_string(),
        }
    }
}

pub fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringOrNumber::deserialize(deserializer)?.into_id())
}

pub fn opt_id_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(StringOrNumber::into_id))
}

/// Id list where entries may be strings or integers; `null` is empty.
pub fn ids_from_strings_or_numbers<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<StringOrNumber>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(StringOrNumber::into_id)
        .collect())
}

pub fn f64_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(StringOrNumber::F64(v)) => Ok(v),
        Some(StringOrNumber::U64(v)) => Ok(v as f64),
        Some(StringOrNumber::I64(v)) => Ok(v as f64),
        Some(StringOrNumber::String(s)) => s.trim().parse::<f64>().map_err(D::Error::custom),
    }
}

pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
