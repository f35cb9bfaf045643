//! `suggest` command: complete a partially typed address.

use std::io::Write;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use troop_finder_core::GeocodeError;
use troop_finder_data::geocoding::MIN_SUGGESTION_QUERY_CHARS;
use troop_finder_data::{DEFAULT_PHOTON_URL, PhotonSuggester, ServiceConfig};

use crate::{ARG_PHOTON_URL, ARG_SUGGEST_QUERY, CliError, ENV_SUGGEST_QUERY};

/// CLI arguments for the `suggest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Ask the Photon service for up to five addresses matching \
                 a partial query. Queries shorter than three characters \
                 return nothing.",
    about = "Suggest addresses for a partial query"
)]
#[ortho_config(prefix = "TROOPFINDER")]
pub(crate) struct SuggestArgs {
    /// Partial address.
    #[arg(value_name = "query")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Base URL of the Photon service.
    #[arg(long = ARG_PHOTON_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) photon_url: Option<String>,
}

impl SuggestArgs {
    fn into_config(self) -> Result<SuggestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SuggestConfig::try_from(merged)
    }
}

/// Resolved `suggest` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SuggestConfig {
    pub(crate) query: String,
    pub(crate) photon_url: String,
}

impl TryFrom<SuggestArgs> for SuggestConfig {
    type Error = CliError;

    fn try_from(args: SuggestArgs) -> Result<Self, Self::Error> {
        let query = args.query.ok_or(CliError::MissingArgument {
            field: ARG_SUGGEST_QUERY,
            env: ENV_SUGGEST_QUERY,
        })?;
        Ok(Self {
            query,
            photon_url: args
                .photon_url
                .unwrap_or_else(|| DEFAULT_PHOTON_URL.to_owned()),
        })
    }
}

/// Source of address completions.
pub(crate) trait AddressSuggester {
    fn suggest(&self, query: &str) -> Result<Vec<String>, GeocodeError>;
}

impl AddressSuggester for PhotonSuggester {
    fn suggest(&self, query: &str) -> Result<Vec<String>, GeocodeError> {
        Self::suggest(self, query)
    }
}

/// Builds the suggester used for one `suggest` invocation.
pub(crate) trait SuggesterBuilder {
    fn build(&self, config: &SuggestConfig) -> Result<Box<dyn AddressSuggester>, CliError>;
}

pub(crate) struct PhotonBuilder;

impl SuggesterBuilder for PhotonBuilder {
    fn build(&self, config: &SuggestConfig) -> Result<Box<dyn AddressSuggester>, CliError> {
        let suggester =
            PhotonSuggester::with_config(&ServiceConfig::new(config.photon_url.clone()))
                .map_err(|source| CliError::BuildGeocoder {
                    base_url: config.photon_url.clone(),
                    source,
                })?;
        Ok(Box::new(suggester))
    }
}

pub(crate) fn run_suggest_with(
    args: SuggestArgs,
    builder: &dyn SuggesterBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let suggester = builder.build(&config)?;
    let suggestions = suggester
        .suggest(&config.query)
        .map_err(CliError::Suggest)?;
    if suggestions.is_empty() {
        if config.query.trim().chars().count() < MIN_SUGGESTION_QUERY_CHARS {
            writeln!(
                writer,
                "Type at least {MIN_SUGGESTION_QUERY_CHARS} characters to see suggestions."
            )?;
        } else {
            writeln!(writer, "No matching addresses.")?;
        }
        return Ok(());
    }
    for suggestion in suggestions {
        writeln!(writer, "{suggestion}")?;
    }
    Ok(())
}
