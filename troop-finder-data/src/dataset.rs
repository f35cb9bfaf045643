//! Load the troop dataset from JSON.

use std::collections::BTreeSet;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use troop_finder_core::{Troop, TroopId};

use crate::fs::read_utf8;

/// Errors raised while loading the troop dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("failed to read dataset {path}")]
    Read {
        /// Dataset location.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file is not a JSON array of troops.
    #[error("dataset is not a valid troop list")]
    Parse {
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Two records share an identifier.
    #[error("troop {id} appears more than once")]
    DuplicateId {
        /// Repeated identifier.
        id: TroopId,
    },
}

/// Read and decode the dataset at `path`.
///
/// # Errors
/// Returns [`DatasetError::Read`] when the file is missing or unreadable and
/// any error from [`parse_troops`].
pub fn load_troops(path: &Utf8Path) -> Result<Vec<Troop>, DatasetError> {
    let json = read_utf8(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let troops = parse_troops(&json)?;
    log::info!("loaded {} troops from {path}", troops.len());
    Ok(troops)
}

/// Decode a dataset held in memory.
///
/// Records keep their file order.
///
/// # Errors
/// Returns [`DatasetError::Parse`] for malformed JSON and
/// [`DatasetError::DuplicateId`] when an id repeats.
///
/// # Examples
/// ```
/// use troop_finder_data::parse_troops;
///
/// let troops = parse_troops(r#"[{"troop": 6, "meetingDay": "Monday"}]"#)?;
/// assert_eq!(troops[0].troop.as_str(), "6");
/// # Ok::<(), troop_finder_data::DatasetError>(())
/// ```
pub fn parse_troops(json: &str) -> Result<Vec<Troop>, DatasetError> {
    let troops: Vec<Troop> =
        serde_json::from_str(json).map_err(|source| DatasetError::Parse { source })?;
    let mut seen = BTreeSet::new();
    if let Some(repeat) = troops.iter().find(|troop| !seen.insert(&troop.troop)) {
        return Err(DatasetError::DuplicateId {
            id: repeat.troop.clone(),
        });
    }
    Ok(troops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;
    use troop_finder_core::MeetingDay;

    const SAMPLE: &str = r#"[
        {"troop": "6", "meetingDay": "Monday", "address": "1 Oak Ave"},
        {"troop": 12, "meetingDay": "Tuesday", "founded": "1958"}
    ]"#;

    #[rstest]
    fn parses_records_in_file_order() {
        let troops = parse_troops(SAMPLE).expect("valid dataset");
        let ids: Vec<&str> = troops.iter().map(|troop| troop.troop.as_str()).collect();
        assert_eq!(ids, ["6", "12"]);
        assert_eq!(troops[1].meeting_day, Some(MeetingDay::Tuesday));
    }

    #[rstest]
    fn duplicate_ids_are_rejected() {
        let err = parse_troops(r#"[{"troop": "6"}, {"troop": 6}]"#).expect_err("duplicate");
        assert!(matches!(err, DatasetError::DuplicateId { id } if id.as_str() == "6"));
    }

    #[rstest]
    #[case("{}")]
    #[case("not json")]
    fn malformed_documents_fail_to_parse(#[case] json: &str) {
        assert!(matches!(
            parse_troops(json),
            Err(DatasetError::Parse { .. })
        ));
    }

    #[rstest]
    fn loads_from_disk() {
        let temp = TempDir::new().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(temp.path().join("troopData.json"))
            .expect("utf8 path");
        std::fs::write(&path, SAMPLE).expect("write dataset");
        assert_eq!(load_troops(&path).expect("load").len(), 2);
    }

    #[rstest]
    fn missing_dataset_reports_the_path() {
        let err = load_troops(Utf8Path::new("no/such/troopData.json")).expect_err("missing");
        assert_eq!(
            err.to_string(),
            "failed to read dataset no/such/troopData.json"
        );
    }
}
