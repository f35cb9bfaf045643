//! Forgiving deserialisers for hand-maintained dataset fields.
//!
//! The dataset is edited by volunteers, so numbers sometimes arrive as
//! strings and enumerations sometimes carry values we do not rank. These
//! helpers keep a record loadable and degrade odd values to `None`.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
    Other(serde_json::Value),
}

/// Accept a string or a number and keep it as display text.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        TextOrNumber::Text(text) => Some(text),
        TextOrNumber::Integer(number) => Some(number.to_string()),
        TextOrNumber::Float(number) => Some(number.to_string()),
        TextOrNumber::Other(_) => None,
    }))
}

/// Accept an integer or a numeric string.
pub(crate) fn integer<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + FromStr,
{
    let raw = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        TextOrNumber::Integer(number) => T::try_from(number).ok(),
        TextOrNumber::Text(text) => text.trim().parse().ok(),
        TextOrNumber::Float(_) | TextOrNumber::Other(_) => None,
    }))
}

/// Accept a number or a numeric string as a float rating.
pub(crate) fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<TextOrNumber>::deserialize(deserializer)?;
    let rating = raw.and_then(|value| match value {
        TextOrNumber::Integer(number) => i32::try_from(number).ok().map(f64::from),
        TextOrNumber::Float(number) => Some(number),
        TextOrNumber::Text(text) => text.trim().parse::<f64>().ok(),
        TextOrNumber::Other(_) => None,
    });
    Ok(rating.filter(|number| number.is_finite()))
}

/// Parse an enumerated value, mapping unknown spellings to `None`.
pub(crate) fn parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        TextOrNumber::Text(text) => {
            let parsed = text.parse().ok();
            if parsed.is_none() {
                log::debug!("ignoring unrecognised dataset value '{text}'");
            }
            parsed
        }
        TextOrNumber::Integer(_) | TextOrNumber::Float(_) | TextOrNumber::Other(_) => None,
    }))
}
