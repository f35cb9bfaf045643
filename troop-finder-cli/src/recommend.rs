//! `recommend` command: rank troops against a family's preferences.

use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use troop_finder_core::{
    ActivityFocus, DistanceLimit, ExperienceLevel, MeetingDay, Personality, Preferences,
    SizeCategory,
};
use troop_finder_scorer::{
    DISTANCE_PROMPT, RuleScorer, TOP_RECOMMENDATIONS, needs_distances, recommend,
};

use crate::data::{DEFAULT_CACHE_PATH, DEFAULT_DATA_PATH, load_dataset};
use crate::render::write_recommendation;
use crate::{
    ARG_ACTIVITY, ARG_CACHE, ARG_DATA, ARG_DAY, ARG_EXPERIENCE, ARG_MAX_DISTANCE,
    ARG_PERSONALITY, ARG_SIZE, ARG_TOP, CliError,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score every troop against the given preferences and print \
                 the strongest matches with the reasons behind each score. \
                 Distance preferences need distances from `distances` first.",
    about = "Recommend troops for a family"
)]
#[ortho_config(prefix = "TROOPFINDER")]
pub(crate) struct RecommendArgs {
    /// Path to the troop dataset.
    #[arg(long = ARG_DATA, value_name = "path")]
    #[serde(default)]
    pub(crate) data: Option<Utf8PathBuf>,
    /// Path to the distance cache.
    #[arg(long = ARG_CACHE, value_name = "path")]
    #[serde(default)]
    pub(crate) cache: Option<Utf8PathBuf>,
    /// Preferred meeting day (monday..sunday).
    #[arg(long = ARG_DAY, value_name = "day")]
    #[serde(default)]
    pub(crate) day: Option<String>,
    /// Maximum distance in miles, or "any".
    #[arg(long = ARG_MAX_DISTANCE, value_name = "miles")]
    #[serde(default)]
    pub(crate) max_distance: Option<String>,
    /// Programme focus (outdoor, eagle, balanced).
    #[arg(long = ARG_ACTIVITY, value_name = "focus")]
    #[serde(default)]
    pub(crate) activity: Option<String>,
    /// Preferred troop size (small, medium, large).
    #[arg(long = ARG_SIZE, value_name = "size")]
    #[serde(default)]
    pub(crate) size: Option<String>,
    /// Scouting experience (new, experienced).
    #[arg(long = ARG_EXPERIENCE, value_name = "level")]
    #[serde(default)]
    pub(crate) experience: Option<String>,
    /// Temperament (cautious, confident).
    #[arg(long = ARG_PERSONALITY, value_name = "trait")]
    #[serde(default)]
    pub(crate) personality: Option<String>,
    /// Number of recommendations to show.
    #[arg(long = ARG_TOP, value_name = "n")]
    #[serde(default)]
    pub(crate) top: Option<usize>,
}

impl RecommendArgs {
    fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    pub(crate) data: Utf8PathBuf,
    pub(crate) cache: Utf8PathBuf,
    pub(crate) preferences: Preferences,
    pub(crate) top: usize,
}

fn parse_option<T>(field: &'static str, raw: Option<&str>) -> Result<Option<T>, CliError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| {
            value.parse::<T>().map_err(|err| CliError::InvalidOption {
                field,
                message: err.to_string(),
            })
        })
        .transpose()
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let preferences = Preferences {
            meeting_day: parse_option::<MeetingDay>(ARG_DAY, args.day.as_deref())?,
            max_distance: parse_option::<DistanceLimit>(
                ARG_MAX_DISTANCE,
                args.max_distance.as_deref(),
            )?
            .unwrap_or_default(),
            activity: parse_option::<ActivityFocus>(ARG_ACTIVITY, args.activity.as_deref())?,
            size: parse_option::<SizeCategory>(ARG_SIZE, args.size.as_deref())?,
            experience: parse_option::<ExperienceLevel>(
                ARG_EXPERIENCE,
                args.experience.as_deref(),
            )?,
            personality: parse_option::<Personality>(
                ARG_PERSONALITY,
                args.personality.as_deref(),
            )?,
        };
        let top = match args.top {
            Some(0) => {
                return Err(CliError::InvalidOption {
                    field: ARG_TOP,
                    message: "must be at least 1".to_owned(),
                });
            }
            Some(top) => top,
            None => TOP_RECOMMENDATIONS,
        };
        Ok(Self {
            data: args.data.unwrap_or_else(|| DEFAULT_DATA_PATH.into()),
            cache: args.cache.unwrap_or_else(|| DEFAULT_CACHE_PATH.into()),
            preferences,
            top,
        })
    }
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    recommend_troops(&config, writer)
}

pub(crate) fn recommend_troops(
    config: &RecommendConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let (mut troops, cache) = load_dataset(&config.data, &config.cache)?;
    cache.apply(&mut troops);
    if needs_distances(&troops, &config.preferences) {
        writeln!(writer, "{DISTANCE_PROMPT}")?;
        return Ok(());
    }
    let recommendation = recommend(&troops, &config.preferences, &RuleScorer::new(), config.top);
    write_recommendation(writer, &recommendation)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
