//! Persisted home address and per-troop distances.
//!
//! The cache is a small JSON document:
//!
//! ```json
//! { "homeAddress": "12 Main St, San Ramon", "distances": { "6": 2.4 } }
//! ```
//!
//! A missing file is an empty cache. Saving creates parent directories.

use std::collections::BTreeMap;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use troop_finder_core::{Troop, TroopId};

use crate::distances::DistanceReport;
use crate::fs::{read_utf8, write_utf8};

/// Errors raised while reading or writing the distance cache.
#[derive(Debug, Error)]
pub enum DistanceCacheError {
    /// The cache file exists but could not be read.
    #[error("failed to read distance cache {path}")]
    Read {
        /// Cache location.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The cache file is not valid JSON.
    #[error("distance cache {path} is malformed")]
    Parse {
        /// Cache location.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The cache could not be encoded.
    #[error("failed to encode distance cache")]
    Encode {
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The cache file could not be written.
    #[error("failed to write distance cache {path}")]
    Write {
        /// Cache location.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Home address and the distances computed from it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceCache {
    /// Address the distances were measured from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_address: Option<String>,
    /// Miles from home keyed by troop id.
    #[serde(default)]
    pub distances: BTreeMap<TroopId, f64>,
}

impl DistanceCache {
    /// Build a cache from a completed distance run.
    #[must_use]
    pub fn from_report(home_address: impl Into<String>, report: &DistanceReport) -> Self {
        Self {
            home_address: Some(home_address.into()),
            distances: report.distances.clone(),
        }
    }

    /// Read the cache at `path`; a missing file yields an empty cache.
    ///
    /// # Errors
    /// Returns [`DistanceCacheError::Read`] for unreadable files and
    /// [`DistanceCacheError::Parse`] for malformed content.
    pub fn load(path: &Utf8Path) -> Result<Self, DistanceCacheError> {
        let json = match read_utf8(path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no distance cache at {path}");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(DistanceCacheError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&json).map_err(|source| DistanceCacheError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the cache to `path` as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`DistanceCacheError::Encode`] or [`DistanceCacheError::Write`].
    pub fn save(&self, path: &Utf8Path) -> Result<(), DistanceCacheError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|source| DistanceCacheError::Encode { source })?;
        write_utf8(path, &json).map_err(|source| DistanceCacheError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("saved {} distances to {path}", self.distances.len());
        Ok(())
    }

    /// Copy cached distances onto matching troops and return how many matched.
    ///
    /// Troops without a cached entry keep their current distance.
    pub fn apply(&self, troops: &mut [Troop]) -> usize {
        let mut applied = 0;
        for troop in troops.iter_mut() {
            if let Some(miles) = self.distances.get(&troop.troop) {
                troop.distance = Some(*miles);
                applied += 1;
            }
        }
        applied
    }

    /// Whether no distance has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn cache() -> DistanceCache {
        DistanceCache {
            home_address: Some("12 Main St".into()),
            distances: BTreeMap::from([(TroopId::from("6"), 2.4), (TroopId::from("12"), 7.9)]),
        }
    }

    fn cache_path(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().join("state/troop-distances.json"))
            .expect("utf8 path")
    }

    #[rstest]
    fn missing_file_is_an_empty_cache() {
        let temp = TempDir::new().expect("temp dir");
        let loaded = DistanceCache::load(&cache_path(&temp)).expect("load");
        assert_eq!(loaded, DistanceCache::default());
        assert!(loaded.is_empty());
    }

    #[rstest]
    fn saved_cache_reloads(cache: DistanceCache) {
        let temp = TempDir::new().expect("temp dir");
        let path = cache_path(&temp);
        cache.save(&path).expect("save");
        assert_eq!(DistanceCache::load(&path).expect("load"), cache);
    }

    #[rstest]
    fn uses_camel_case_keys(cache: DistanceCache) {
        let json = serde_json::to_value(&cache).expect("encode");
        assert_eq!(json["homeAddress"], "12 Main St");
        assert_eq!(json["distances"]["6"], 2.4);
    }

    #[rstest]
    fn malformed_cache_is_reported() {
        let temp = TempDir::new().expect("temp dir");
        let path = cache_path(&temp);
        write_utf8(&path, "[1, 2").expect("write");
        assert!(matches!(
            DistanceCache::load(&path),
            Err(DistanceCacheError::Parse { .. })
        ));
    }

    #[rstest]
    fn apply_fills_matching_troops(cache: DistanceCache) {
        let mut troops = vec![Troop::new("6"), Troop::new("36")];
        assert_eq!(cache.apply(&mut troops), 1);
        assert_eq!(troops[0].distance, Some(2.4));
        assert_eq!(troops[1].distance, None);
    }
}
