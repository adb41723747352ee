//! Recommend command implementation for the LocalBites CLI.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Parser;
use localbites_core::{RankRequest, RankedRestaurant, Ranker};
use localbites_data::{EventLog, RankEvent, load_catalog};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_CATALOG, ARG_CUISINE, ARG_EVENT_LOG, ARG_LAT, ARG_LON, ARG_QUERY, CliError,
    DEFAULT_CATALOG, ENV_RECOMMEND_LAT, ENV_RECOMMEND_LON, require_existing,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the restaurant catalog against a position. A cuisine \
                 filter keeps restaurants whose cuisine contains the given \
                 text; a query orders matches by name and cuisine keywords \
                 before distance. Prints up to fifteen results as JSON.",
    about = "Recommend nearby restaurants"
)]
#[ortho_config(prefix = "LOCALBITES")]
pub(crate) struct RecommendArgs {
    /// Path to the restaurant catalog CSV.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Latitude of the diner in degrees.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the diner in degrees.
    #[arg(long = ARG_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Keep only cuisines containing this text.
    #[arg(long = ARG_CUISINE, value_name = "text")]
    #[serde(default)]
    pub(crate) cuisine: Option<String>,
    /// Free-text search matched against names and cuisines.
    #[arg(long = ARG_QUERY, value_name = "text")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Append a JSON line describing this ranking to the given file.
    #[arg(long = ARG_EVENT_LOG, value_name = "path")]
    #[serde(default)]
    pub(crate) event_log: Option<Utf8PathBuf>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    /// Catalog to rank.
    pub(crate) catalog: Utf8PathBuf,
    /// Position, filter and query.
    pub(crate) request: RankRequest,
    /// Optional audit log destination.
    pub(crate) event_log: Option<Utf8PathBuf>,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_RECOMMEND_LAT,
        })?;
        let lon = args.lon.ok_or(CliError::MissingArgument {
            field: ARG_LON,
            env: ENV_RECOMMEND_LON,
        })?;
        let mut request = RankRequest::new(lat, lon);
        request.cuisine = args.cuisine;
        request.query = args.query;
        Ok(Self {
            catalog: args
                .catalog
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CATALOG)),
            request,
            event_log: args.event_log,
        })
    }
}

/// One recommended restaurant as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Recommendation {
    pub(crate) name: String,
    pub(crate) cuisine: String,
    /// Distance in miles, rounded to two decimal places.
    pub(crate) distance_miles: f64,
}

impl From<&RankedRestaurant<'_>> for Recommendation {
    fn from(entry: &RankedRestaurant<'_>) -> Self {
        Self {
            name: entry.restaurant.name.clone(),
            cuisine: entry.restaurant.cuisine.clone(),
            distance_miles: round_to_hundredths(entry.distance_miles),
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "display rounding of a distance requires float maths"
)]
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(super) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &mut stdout)
}

pub(super) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let recommendations = execute_recommend(args)?;
    write_recommendations(writer, &recommendations)
}

fn execute_recommend(args: RecommendArgs) -> Result<Vec<Recommendation>, CliError> {
    let config = args.into_config()?;
    require_existing(&config.catalog, ARG_CATALOG)?;
    let catalog = load_catalog(&config.catalog)?;
    let ranked = Ranker::new().rank(&catalog, &config.request)?;
    if let Some(path) = &config.event_log {
        record_event(path, &RankEvent::new(Utc::now(), &config.request, &ranked));
    }
    Ok(ranked.iter().map(Recommendation::from).collect())
}

/// Append `event` to the log at `path`, reporting failures without
/// propagating them.
fn record_event(path: &Utf8Path, event: &RankEvent) {
    let outcome = EventLog::open(path).and_then(|mut log| log.append(event));
    if let Err(err) = outcome {
        log::warn!("failed to record ranking event: {err}");
    }
}

fn write_recommendations(
    writer: &mut dyn Write,
    recommendations: &[Recommendation],
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(recommendations)
        .map_err(CliError::SerialiseRecommendations)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
