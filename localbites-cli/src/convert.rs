//! Convert command implementation for the LocalBites CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use localbites_data::{ConversionReport, convert_geojson_file};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_CONVERT_INPUT, ARG_CONVERT_OUTPUT, CliError, DEFAULT_CATALOG, DEFAULT_GEOJSON,
    require_existing,
};

/// CLI arguments for the `convert` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Read an Overpass Turbo GeoJSON export and write the \
                 restaurant catalog CSV. Features without a name, a cuisine \
                 or a point location are skipped.",
    about = "Build the restaurant catalog from GeoJSON"
)]
#[ortho_config(prefix = "LOCALBITES")]
pub(crate) struct ConvertArgs {
    /// Path to the GeoJSON export.
    #[arg(long = ARG_CONVERT_INPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Path of the catalog CSV to write.
    #[arg(long = ARG_CONVERT_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ConvertArgs {
    pub(crate) fn into_config(self) -> Result<ConvertConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(ConvertConfig::from(merged))
    }
}

/// Resolved `convert` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConvertConfig {
    pub(crate) input: Utf8PathBuf,
    pub(crate) output: Utf8PathBuf,
}

impl From<ConvertArgs> for ConvertConfig {
    fn from(args: ConvertArgs) -> Self {
        Self {
            input: args
                .input
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_GEOJSON)),
            output: args
                .output
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CATALOG)),
        }
    }
}

pub(super) fn run_convert(args: ConvertArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_convert_with(args, &mut stdout)
}

pub(super) fn run_convert_with(args: ConvertArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.input, ARG_CONVERT_INPUT)?;
    let report = convert_geojson_file(&config.input, &config.output)?;
    write_report(writer, &config, report)
}

fn write_report(
    writer: &mut dyn Write,
    config: &ConvertConfig,
    report: ConversionReport,
) -> Result<(), CliError> {
    writeln!(
        writer,
        "Saved {} valid restaurants to {} ({} features skipped)",
        report.written, config.output, report.skipped
    )
    .map_err(CliError::WriteOutput)
}
