//! Error types emitted by the troop finder CLI.
//!
//! Messages describe the failing step only; the binary prints the full
//! source chain.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use troop_finder_core::GeocodeError;
use troop_finder_data::{DatasetError, DistanceCacheError, DistanceError, ProviderBuildError};

/// Errors emitted by the troop finder CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// An option value could not be interpreted.
    #[error("invalid --{field}: {message}")]
    InvalidOption {
        field: &'static str,
        message: String,
    },
    /// The troop dataset could not be loaded.
    #[error("failed to load troop data from {path}")]
    LoadDataset {
        path: Utf8PathBuf,
        #[source]
        source: DatasetError,
    },
    /// Reading or writing the distance cache failed.
    #[error(transparent)]
    DistanceCache(#[from] DistanceCacheError),
    /// Constructing a geocoding client failed.
    #[error("failed to build geocoding client for {base_url}")]
    BuildGeocoder {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The home address could not be placed.
    #[error("failed to calculate distances")]
    Distances(#[from] DistanceError),
    /// The suggestion service failed.
    #[error("failed to fetch address suggestions")]
    Suggest(#[source] GeocodeError),
    /// Writing command output failed.
    #[error("failed to write output")]
    WriteOutput(#[from] std::io::Error),
}
