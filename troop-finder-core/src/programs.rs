//! Specialised programmes a troop advertises.
//!
//! The dataset stores these as a loose map: some entries are plain flags,
//! some are prose, and a few are nested objects. [`ProgramValue`] keeps the
//! three shapes apart so callers match on them instead of inspecting JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One entry in a troop's specialised-programme map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProgramValue {
    /// `true` when offered, `false` when explicitly not offered.
    Flag(bool),
    /// Description of the programme.
    Text(String),
    /// Structured or otherwise unexpected content.
    Details(serde_json::Value),
}

impl ProgramValue {
    /// Report whether the entry counts as an offered programme.
    ///
    /// Flags must be `true`, text must be non-empty, and details must not be
    /// `null`, `false`, zero or an empty string.
    ///
    /// # Examples
    /// ```
    /// use troop_finder_core::ProgramValue;
    ///
    /// assert!(ProgramValue::Flag(true).is_offered());
    /// assert!(!ProgramValue::Text(String::new()).is_offered());
    /// assert!(ProgramValue::Details(serde_json::json!({"trips": 3})).is_offered());
    /// ```
    #[must_use]
    pub fn is_offered(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Text(text) => !text.is_empty(),
            Self::Details(value) => is_truthy(value),
        }
    }

    /// Borrow the description when the entry is prose.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Flag(_) | Self::Details(_) => None,
        }
    }

    /// Human-readable rendering used in listings.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Flag(true) => "Available".to_owned(),
            Self::Flag(false) => "Not offered".to_owned(),
            Self::Text(text) => text.clone(),
            Self::Details(value) => value.to_string(),
        }
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(flag) => *flag,
        serde_json::Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(text) => !text.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

/// Map of programme keys (camelCase, e.g. `snowCamping`) to their values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecializedPrograms(BTreeMap<String, ProgramValue>);

impl SpecializedPrograms {
    /// Build a programme map from key/value pairs.
    ///
    /// # Examples
    /// ```
    /// use troop_finder_core::{ProgramValue, SpecializedPrograms};
    ///
    /// let programs = SpecializedPrograms::from_entries([
    ///     ("cycling", ProgramValue::Flag(true)),
    ///     ("backpacking", ProgramValue::Text("Multiple trips a year".into())),
    /// ]);
    /// assert!(programs.offers("cycling"));
    /// assert_eq!(programs.text("backpacking"), Some("Multiple trips a year"));
    /// ```
    #[must_use]
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ProgramValue)>,
    {
        Self(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Look up a programme entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ProgramValue> {
        self.0.get(key)
    }

    /// Report whether `key` names an offered programme.
    #[must_use]
    pub fn offers(&self, key: &str) -> bool {
        self.get(key).is_some_and(ProgramValue::is_offered)
    }

    /// Borrow the prose description of `key`, if it has one.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ProgramValue::as_text)
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProgramValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Report whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Title Case names for every entry, e.g. `snowCamping` becomes
    /// `Snow Camping`.
    ///
    /// # Examples
    /// ```
    /// use troop_finder_core::{ProgramValue, SpecializedPrograms};
    ///
    /// let programs = SpecializedPrograms::from_entries([
    ///     ("seaScouting", ProgramValue::Flag(true)),
    /// ]);
    /// assert_eq!(programs.display_names(), vec!["Sea Scouting".to_owned()]);
    /// ```
    #[must_use]
    pub fn display_names(&self) -> Vec<String> {
        self.0.keys().map(|key| title_case(key)).collect()
    }
}

fn title_case(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (index, ch) in key.chars().enumerate() {
        if index == 0 {
            label.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            label.push(' ');
            label.push(ch);
        } else {
            label.push(ch);
        }
    }
    label
}
