//! Command-line interface for ranking nearby restaurants and preparing the
//! catalog they are ranked from.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use clap::{Parser, Subcommand};

mod convert;
mod error;
mod recommend;

pub use error::CliError;

use convert::{ConvertArgs, run_convert};
use recommend::{RecommendArgs, run_recommend};

pub(crate) const ARG_CATALOG: &str = "catalog";
pub(crate) const ARG_LAT: &str = "lat";
pub(crate) const ARG_LON: &str = "lon";
pub(crate) const ARG_CUISINE: &str = "cuisine";
pub(crate) const ARG_QUERY: &str = "query";
pub(crate) const ARG_EVENT_LOG: &str = "event-log";
pub(crate) const ARG_CONVERT_INPUT: &str = "input";
pub(crate) const ARG_CONVERT_OUTPUT: &str = "output";
pub(crate) const ENV_RECOMMEND_LAT: &str = "LOCALBITES_CMDS_RECOMMEND_LAT";
pub(crate) const ENV_RECOMMEND_LON: &str = "LOCALBITES_CMDS_RECOMMEND_LON";

/// Catalog location used when none is configured.
pub const DEFAULT_CATALOG: &str = "data/restaurants_filtered.csv";
/// Overpass export location used when none is configured.
pub const DEFAULT_GEOJSON: &str = "data/export.geojson";

/// Run the LocalBites CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration layering or the
/// selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
        Command::Convert(args) => run_convert(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "localbites",
    about = "Rank nearby restaurants from a local catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank restaurants near a position.
    Recommend(RecommendArgs),
    /// Build the catalog CSV from an Overpass Turbo GeoJSON export.
    Convert(ConvertArgs),
}

/// Check that `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match localbites_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests;
