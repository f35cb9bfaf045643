//! `distances` command: geocode a home address and cache troop distances.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use troop_finder_core::Geocoder;
use troop_finder_data::{
    DEFAULT_NOMINATIM_URL, DistanceCache, DistanceReport, NominatimGeocoder, ServiceConfig,
    populate_distances,
};

use crate::data::{DEFAULT_CACHE_PATH, DEFAULT_DATA_PATH, load_dataset_troops};
use crate::{
    ARG_CACHE, ARG_DATA, ARG_DISTANCES_ADDRESS, ARG_NOMINATIM_URL, CliError,
    ENV_DISTANCES_ADDRESS,
};

/// CLI arguments for the `distances` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Geocode the home address and every troop address with \
                 Nominatim, then store the great-circle distances in the \
                 distance cache for `list` and `recommend`.",
    about = "Calculate troop distances from a home address"
)]
#[ortho_config(prefix = "TROOPFINDER")]
pub(crate) struct DistancesArgs {
    /// Home address, e.g. "2501 Crow Canyon Rd, San Ramon, CA".
    #[arg(long = ARG_DISTANCES_ADDRESS, value_name = "text")]
    #[serde(default)]
    pub(crate) address: Option<String>,
    /// Path to the troop dataset.
    #[arg(long = ARG_DATA, value_name = "path")]
    #[serde(default)]
    pub(crate) data: Option<Utf8PathBuf>,
    /// Path to the distance cache.
    #[arg(long = ARG_CACHE, value_name = "path")]
    #[serde(default)]
    pub(crate) cache: Option<Utf8PathBuf>,
    /// Base URL of the Nominatim service.
    #[arg(long = ARG_NOMINATIM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_url: Option<String>,
}

impl DistancesArgs {
    fn into_config(self) -> Result<DistancesConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DistancesConfig::try_from(merged)
    }
}

/// Resolved `distances` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DistancesConfig {
    pub(crate) address: String,
    pub(crate) data: Utf8PathBuf,
    pub(crate) cache: Utf8PathBuf,
    pub(crate) nominatim_url: String,
}

impl TryFrom<DistancesArgs> for DistancesConfig {
    type Error = CliError;

    fn try_from(args: DistancesArgs) -> Result<Self, Self::Error> {
        let address = args
            .address
            .map(|address| address.trim().to_owned())
            .filter(|address| !address.is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_DISTANCES_ADDRESS,
                env: ENV_DISTANCES_ADDRESS,
            })?;
        Ok(Self {
            address,
            data: args.data.unwrap_or_else(|| DEFAULT_DATA_PATH.into()),
            cache: args.cache.unwrap_or_else(|| DEFAULT_CACHE_PATH.into()),
            nominatim_url: args
                .nominatim_url
                .unwrap_or_else(|| DEFAULT_NOMINATIM_URL.to_owned()),
        })
    }
}

/// Builds the geocoder used for one `distances` invocation.
pub(crate) trait GeocoderBuilder {
    fn build(&self, config: &DistancesConfig) -> Result<Box<dyn Geocoder>, CliError>;
}

pub(crate) struct NominatimBuilder;

impl GeocoderBuilder for NominatimBuilder {
    fn build(&self, config: &DistancesConfig) -> Result<Box<dyn Geocoder>, CliError> {
        let geocoder = NominatimGeocoder::with_config(&ServiceConfig::new(
            config.nominatim_url.clone(),
        ))
        .map_err(|source| CliError::BuildGeocoder {
            base_url: config.nominatim_url.clone(),
            source,
        })?;
        Ok(Box::new(geocoder))
    }
}

pub(crate) fn run_distances_with(
    args: DistancesArgs,
    builder: &dyn GeocoderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    calculate_distances(&config, builder, writer)
}

pub(crate) fn calculate_distances(
    config: &DistancesConfig,
    builder: &dyn GeocoderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    // The cache is rewritten from scratch, so an unreadable one is not an error.
    let mut troops = load_dataset_troops(&config.data)?;
    let geocoder = builder.build(config)?;
    let report = populate_distances(geocoder.as_ref(), &config.address, &mut troops)?;
    DistanceCache::from_report(config.address.clone(), &report).save(&config.cache)?;
    write_report(writer, &config.address, &report)
}

fn write_report(
    writer: &mut dyn Write,
    address: &str,
    report: &DistanceReport,
) -> Result<(), CliError> {
    writeln!(
        writer,
        "Calculated distances for {} troops from {address}",
        report.distances.len()
    )?;
    if !report.skipped.is_empty() {
        let skipped: Vec<&str> = report.skipped.iter().map(|id| id.as_str()).collect();
        writeln!(writer, "Could not locate troops: {}", skipped.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<DistancesConfig, CliError> {
    let merged = DistancesArgs::merge_from_layers(layers).map_err(CliError::from)?;
    DistancesConfig::try_from(merged)
}
