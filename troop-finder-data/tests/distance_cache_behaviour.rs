//! Behaviour tests for measuring distances and caching them on disk.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;
use troop_finder_core::Troop;
use troop_finder_core::test_support::FixedGeocoder;
use troop_finder_data::{DistanceCache, DistanceError, load_troops, populate_distances};

const DATASET: &str = r#"[
    {"troop": 6, "address": "1 Oak Ave"},
    {"troop": "12", "address": "2 Elm St"},
    {"troop": "36"}
]"#;

struct CacheWorld {
    dir: TempDir,
    troops: RefCell<Vec<Troop>>,
    failure: RefCell<Option<DistanceError>>,
}

impl CacheWorld {
    fn path(&self, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().join(name)).expect("utf-8 temp dir")
    }

    fn dataset(&self) -> Utf8PathBuf {
        self.path("troopData.json")
    }

    fn cache(&self) -> Utf8PathBuf {
        self.path("cache/troop-distances.json")
    }

    fn troop(&self, id: &str) -> Troop {
        self.troops
            .borrow()
            .iter()
            .find(|troop| troop.troop.as_str() == id.trim_matches('"'))
            .cloned()
            .expect("troop exists")
    }
}

#[fixture]
fn world() -> CacheWorld {
    CacheWorld {
        dir: TempDir::new().expect("temp dir"),
        troops: RefCell::new(Vec::new()),
        failure: RefCell::new(None),
    }
}

fn geocoder() -> FixedGeocoder {
    FixedGeocoder::default()
        .with_address("12 Main St", Coord { x: -121.978, y: 37.780 })
        .with_address("1 Oak Ave", Coord { x: -121.978, y: 37.880 })
        .with_address("2 Elm St", Coord { x: -121.978, y: 38.280 })
}

#[given("a dataset of three troops on disk")]
fn dataset_on_disk(world: &CacheWorld) {
    std::fs::write(world.dataset(), DATASET).expect("write dataset");
    let troops = load_troops(&world.dataset()).expect("dataset loads");
    world.troops.replace(troops);
}

#[when("distances are measured from {address} and cached")]
fn measure_and_cache(world: &CacheWorld, address: String) {
    let address = address.trim_matches('"');
    let mut troops = world.troops.borrow_mut();
    match populate_distances(&geocoder(), address, &mut troops) {
        Ok(report) => DistanceCache::from_report(address, &report)
            .save(&world.cache())
            .expect("cache saves"),
        Err(err) => {
            world.failure.replace(Some(err));
        }
    }
}

#[when("the dataset is reloaded with the cache")]
fn reload_with_cache(world: &CacheWorld) {
    let mut troops = load_troops(&world.dataset()).expect("dataset loads");
    DistanceCache::load(&world.cache())
        .expect("cache loads")
        .apply(&mut troops);
    world.troops.replace(troops);
}

#[then("troop {id:word} is about {miles} miles away")]
fn troop_is_about(world: &CacheWorld, id: String, miles: f64) {
    let distance = world.troop(&id).distance.expect("distance known");
    assert!((distance - miles).abs() < 0.05, "{distance} vs {miles}");
}

#[then("troop {id:word} has no distance")]
fn troop_has_no_distance(world: &CacheWorld, id: String) {
    assert_eq!(world.troop(&id).distance, None);
}

#[then("the home address could not be found")]
fn home_not_found(world: &CacheWorld) {
    assert!(matches!(
        *world.failure.borrow(),
        Some(DistanceError::HomeNotFound { .. })
    ));
}

#[then("no cache file exists")]
fn no_cache_file(world: &CacheWorld) {
    assert!(!world.cache().exists());
}

#[scenario(path = "tests/features/distance_cache.feature", index = 0)]
fn cached_distances_restored(world: CacheWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/distance_cache.feature", index = 1)]
fn missing_cache(world: CacheWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/distance_cache.feature", index = 2)]
fn unknown_home(world: CacheWorld) {
    let _ = world;
}
