//! Dataset and cache locations shared by the subcommands.

use camino::Utf8Path;
use troop_finder_core::Troop;
use troop_finder_data::{DistanceCache, load_troops};

use crate::CliError;

/// Dataset read when `--data` is not supplied.
pub(crate) const DEFAULT_DATA_PATH: &str = "troopData.json";

/// Distance cache used when `--cache` is not supplied.
pub(crate) const DEFAULT_CACHE_PATH: &str = "troop-distances.json";

/// Load the troop dataset.
pub(crate) fn load_dataset_troops(data: &Utf8Path) -> Result<Vec<Troop>, CliError> {
    load_troops(data).map_err(|source| CliError::LoadDataset {
        path: data.to_path_buf(),
        source,
    })
}

/// Load the dataset and the distance cache beside it.
pub(crate) fn load_dataset(
    data: &Utf8Path,
    cache: &Utf8Path,
) -> Result<(Vec<Troop>, DistanceCache), CliError> {
    let troops = load_dataset_troops(data)?;
    let cache = DistanceCache::load(cache)?;
    Ok((troops, cache))
}
