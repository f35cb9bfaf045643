//! Test helpers: a temporary dataset and stub geocoding services.

use camino::Utf8PathBuf;
use geo::Coord;
use tempfile::TempDir;
use troop_finder_core::test_support::FixedGeocoder;
use troop_finder_core::{GeocodeError, Geocoder};

use crate::distances::{DistancesConfig, GeocoderBuilder};
use crate::suggest::{AddressSuggester, SuggestConfig, SuggesterBuilder};
use crate::CliError;

/// Three troops: 6 meets Monday near home, 12 Tuesday further away, and 36
/// Friday with no address on file.
pub(super) const SAMPLE_DATASET: &str = r#"[
    {
        "troop": 6,
        "meetingDay": "Monday",
        "meetingTime": "7:00 PM",
        "location": "Community Hall",
        "city": "San Ramon",
        "address": "1 Oak Ave",
        "founded": 1958
    },
    {
        "troop": "12",
        "meetingDay": "Tuesday",
        "city": "Danville",
        "address": "2 Elm St",
        "size": 25
    },
    {
        "troop": "36",
        "meetingDay": "Friday",
        "city": "Dublin"
    }
]"#;

pub(super) const HOME_ADDRESS: &str = "12 Main St";

/// Temporary directory holding the dataset and cache.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn with_sample_dataset() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        std::fs::write(root.join("troopData.json"), SAMPLE_DATASET).expect("write dataset");
        Self { _dir: dir, root }
    }

    pub(super) fn data(&self) -> Utf8PathBuf {
        self.root.join("troopData.json")
    }

    pub(super) fn cache(&self) -> Utf8PathBuf {
        self.root.join("state").join("troop-distances.json")
    }
}

/// Geocoder knowing the home address and the first two troops.
pub(super) fn sample_geocoder() -> FixedGeocoder {
    FixedGeocoder::default()
        .with_address(HOME_ADDRESS, Coord { x: -121.978, y: 37.780 })
        .with_address("1 Oak Ave", Coord { x: -121.978, y: 37.880 })
        .with_address("2 Elm St", Coord { x: -121.978, y: 38.280 })
}

pub(super) struct StubGeocoderBuilder(pub(super) FixedGeocoder);

impl GeocoderBuilder for StubGeocoderBuilder {
    fn build(&self, _config: &DistancesConfig) -> Result<Box<dyn Geocoder>, CliError> {
        Ok(Box::new(self.0.clone()))
    }
}

pub(super) struct StubSuggester(pub(super) Result<Vec<String>, GeocodeError>);

impl AddressSuggester for StubSuggester {
    fn suggest(&self, _query: &str) -> Result<Vec<String>, GeocodeError> {
        self.0.clone()
    }
}

pub(super) struct StubSuggesterBuilder(pub(super) Result<Vec<String>, GeocodeError>);

impl SuggesterBuilder for StubSuggesterBuilder {
    fn build(&self, _config: &SuggestConfig) -> Result<Box<dyn AddressSuggester>, CliError> {
        Ok(Box::new(StubSuggester(self.0.clone())))
    }
}

pub(super) fn utf8(output: Vec<u8>) -> String {
    String::from_utf8(output).expect("utf-8 output")
}
