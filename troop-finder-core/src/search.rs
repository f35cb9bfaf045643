//! Naive free-text search across troop records.
//!
//! Queries are split into lowercase terms and matched as plain substrings;
//! a troop matches when every term appears somewhere in its record.

use serde_json::Value;

use crate::troop::Troop;

const FILLER_WORDS: &[&str] = &[
    "and", "or", "the", "a", "an", "with", "for", "to", "in", "on", "at",
];

/// Split a query into lowercase search terms.
///
/// Commas, semicolons, colons and ampersands separate terms like spaces do,
/// and common filler words are dropped.
///
/// # Examples
/// ```
/// use troop_finder_core::parse_search_query;
///
/// assert_eq!(
///     parse_search_query("Backpacking & the Sea Scouts, Friday"),
///     vec!["backpacking", "sea", "scouts", "friday"],
/// );
/// ```
#[must_use]
pub fn parse_search_query(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .replace([',', ';', ':', '&'], " ")
        .split_whitespace()
        .filter(|term| !FILLER_WORDS.contains(term))
        .map(str::to_owned)
        .collect()
}

/// Flatten every text and number in a troop record into one lowercase
/// string.
///
/// Field names are not included, only values.
#[must_use]
pub fn searchable_text(troop: &Troop) -> String {
    let value = match serde_json::to_value(troop) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("troop {} could not be indexed for search: {err}", troop.troop);
            return String::new();
        }
    };
    let mut parts = Vec::new();
    collect_values(&value, &mut parts);
    parts.join(" ")
}

fn collect_values(value: &Value, parts: &mut Vec<String>) {
    match value {
        Value::String(text) => parts.push(text.to_lowercase()),
        Value::Number(number) => parts.push(number.to_string()),
        Value::Array(items) => items.iter().for_each(|item| collect_values(item, parts)),
        Value::Object(map) => map.values().for_each(|item| collect_values(item, parts)),
        Value::Null | Value::Bool(_) => {}
    }
}

/// Keep the troops whose record contains every term.
///
/// An empty term list keeps every troop. Order is preserved.
///
/// # Examples
/// ```
/// use troop_finder_core::{Troop, filter_troops};
///
/// let mut sailing = Troop::new("1");
/// sailing.notes = Some("Sea Scout affiliation".into());
/// let troops = vec![sailing, Troop::new("2")];
///
/// let found = filter_troops(&troops, &["sea".to_owned()]);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].troop.as_str(), "1");
/// ```
#[must_use]
pub fn filter_troops<'a>(troops: &'a [Troop], terms: &[String]) -> Vec<&'a Troop> {
    if terms.is_empty() {
        return troops.iter().collect();
    }
    troops
        .iter()
        .filter(|troop| {
            let text = searchable_text(troop);
            terms.iter().all(|term| text.contains(term.as_str()))
        })
        .collect()
}
