//! `list` command: print the searched and sorted troop table.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use troop_finder_core::{SessionContext, SortColumn, SortDirection, SortState};

use crate::data::{DEFAULT_CACHE_PATH, DEFAULT_DATA_PATH, load_dataset};
use crate::render::write_table;
use crate::{ARG_CACHE, ARG_DATA, ARG_SEARCH, ARG_SORT, CliError};

/// CLI arguments for the `list` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Print every troop as a table. Search terms narrow the \
                 rows to troops mentioning all of them; distances come \
                 from the cache written by `distances`.",
    about = "Print the troop table"
)]
#[ortho_config(prefix = "TROOPFINDER")]
pub(crate) struct ListArgs {
    /// Path to the troop dataset.
    #[arg(long = ARG_DATA, value_name = "path")]
    #[serde(default)]
    pub(crate) data: Option<Utf8PathBuf>,
    /// Path to the distance cache.
    #[arg(long = ARG_CACHE, value_name = "path")]
    #[serde(default)]
    pub(crate) cache: Option<Utf8PathBuf>,
    /// Free-text search, e.g. "monday eagle".
    #[arg(long = ARG_SEARCH, value_name = "terms")]
    #[serde(default)]
    pub(crate) search: Option<String>,
    /// Column to sort by (troop, distance, meeting-day, founded, size,
    /// eagles, volunteer-hours).
    #[arg(long = ARG_SORT, value_name = "column")]
    #[serde(default)]
    pub(crate) sort: Option<String>,
    /// Sort in descending order.
    #[arg(long)]
    #[serde(default)]
    pub(crate) descending: bool,
}

impl ListArgs {
    fn into_config(self) -> Result<ListConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ListConfig::try_from(merged)
    }
}

/// Resolved `list` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListConfig {
    pub(crate) data: Utf8PathBuf,
    pub(crate) cache: Utf8PathBuf,
    pub(crate) search: String,
    pub(crate) sort: Option<SortState>,
}

impl TryFrom<ListArgs> for ListConfig {
    type Error = CliError;

    fn try_from(args: ListArgs) -> Result<Self, Self::Error> {
        let direction = if args.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        let sort = args
            .sort
            .as_deref()
            .map(|raw| {
                raw.parse::<SortColumn>()
                    .map(|column| SortState::new(column, direction))
                    .map_err(|message| CliError::InvalidOption {
                        field: ARG_SORT,
                        message,
                    })
            })
            .transpose()?;
        Ok(Self {
            data: args.data.unwrap_or_else(|| DEFAULT_DATA_PATH.into()),
            cache: args.cache.unwrap_or_else(|| DEFAULT_CACHE_PATH.into()),
            search: args.search.unwrap_or_default(),
            sort,
        })
    }
}

pub(crate) fn run_list_with(args: ListArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    list_troops(&config, writer)
}

pub(crate) fn list_troops(config: &ListConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let (troops, cache) = load_dataset(&config.data, &config.cache)?;
    let mut session = SessionContext::new(troops);
    session.apply_distances(&cache.distances);
    session.set_search_query(&config.search);
    if let Some(sort) = config.sort {
        session.set_sort(sort);
    }
    let visible = session.visible_troops();
    log::debug!(
        "showing {} of {} troops",
        visible.len(),
        session.troops().len()
    );
    write_table(writer, &visible)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ListConfig, CliError> {
    let merged = ListArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ListConfig::try_from(merged)
}
