//! Test-only `Geocoder` and `Scorer` implementations used by unit and
//! behaviour tests across the workspace.

use std::collections::BTreeMap;

use geo::Coord;

use crate::{Assessment, GeocodeError, Geocoder, Preferences, Reason, Scorer, Troop};

/// In-memory `Geocoder` answering from a fixed address book.
///
/// Addresses are matched exactly after trimming. Unknown addresses resolve to
/// `Ok(None)` unless a failure was registered for them.
#[derive(Debug, Clone, Default)]
pub struct FixedGeocoder {
    known: BTreeMap<String, Coord<f64>>,
    failures: BTreeMap<String, GeocodeError>,
}

impl FixedGeocoder {
    /// Register `address` as resolving to `position`.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>, position: Coord<f64>) -> Self {
        self.known.insert(address.into(), position);
        self
    }

    /// Register `address` as failing with `error`.
    #[must_use]
    pub fn with_failure(mut self, address: impl Into<String>, error: GeocodeError) -> Self {
        self.failures.insert(address.into(), error);
        self
    }
}

impl Geocoder for FixedGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }
        if let Some(error) = self.failures.get(address) {
            return Err(error.clone());
        }
        Ok(self.known.get(address).copied())
    }
}

/// Test `Scorer` returning a preset score per troop id.
///
/// Troops without a preset score `0`. Each assessment carries a single
/// reason naming the score so callers can check reasons travel with troops.
#[derive(Debug, Clone, Default)]
pub struct TableScorer {
    scores: BTreeMap<String, i32>,
}

impl TableScorer {
    /// Build a scorer from `(troop id, score)` pairs.
    pub fn with_scores<'a, I>(scores: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        Self {
            scores: scores
                .into_iter()
                .map(|(id, score)| (id.to_owned(), score))
                .collect(),
        }
    }
}

impl Scorer for TableScorer {
    fn assess(&self, troop: &Troop, _preferences: &Preferences) -> Assessment {
        let score = self.scores.get(troop.troop.as_str()).copied().unwrap_or(0);
        Assessment::new(score, vec![Reason::matched(format!("preset score {score}"))])
    }
}
