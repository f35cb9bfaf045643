//! Command-line interface for browsing and ranking troops.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod data;
mod distances;
mod error;
mod list;
mod recommend;
mod render;
mod suggest;

pub use error::CliError;

use distances::DistancesArgs;
use list::ListArgs;
use recommend::RecommendArgs;
use suggest::SuggestArgs;

pub(crate) const ARG_DATA: &str = "data";
pub(crate) const ARG_CACHE: &str = "cache";
pub(crate) const ARG_SEARCH: &str = "search";
pub(crate) const ARG_SORT: &str = "sort";
pub(crate) const ARG_DISTANCES_ADDRESS: &str = "address";
pub(crate) const ARG_NOMINATIM_URL: &str = "nominatim-url";
pub(crate) const ARG_SUGGEST_QUERY: &str = "query";
pub(crate) const ARG_PHOTON_URL: &str = "photon-url";
pub(crate) const ARG_DAY: &str = "day";
pub(crate) const ARG_MAX_DISTANCE: &str = "max-distance";
pub(crate) const ARG_ACTIVITY: &str = "activity";
pub(crate) const ARG_SIZE: &str = "size";
pub(crate) const ARG_EXPERIENCE: &str = "experience";
pub(crate) const ARG_PERSONALITY: &str = "personality";
pub(crate) const ARG_TOP: &str = "top";
pub(crate) const ENV_DISTANCES_ADDRESS: &str = "TROOPFINDER_CMDS_DISTANCES_ADDRESS";
pub(crate) const ENV_SUGGEST_QUERY: &str = "TROOPFINDER_CMDS_SUGGEST_QUERY";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, data files, or
/// geocoding services fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::List(args) => list::run_list_with(args, &mut stdout),
        Command::Distances(args) => {
            distances::run_distances_with(args, &distances::NominatimBuilder, &mut stdout)
        }
        Command::Suggest(args) => {
            suggest::run_suggest_with(args, &suggest::PhotonBuilder, &mut stdout)
        }
        Command::Recommend(args) => recommend::run_recommend_with(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "troop-finder",
    about = "Browse, measure and rank scout troops",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the troop table, optionally searched and sorted.
    List(ListArgs),
    /// Measure every troop's distance from a home address.
    Distances(DistancesArgs),
    /// Suggest complete addresses for a partial one.
    Suggest(SuggestArgs),
    /// Rank troops against a family's preferences.
    Recommend(RecommendArgs),
}

#[cfg(test)]
mod tests;
