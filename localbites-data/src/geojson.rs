//! Convert Overpass Turbo GeoJSON exports into the catalog CSV format.
//!
//! Only features that can be ranked survive: the properties must carry both
//! `name` and `cuisine` keys and the geometry must be a `Point` with exactly
//! two numeric coordinates in `[lon, lat]` order. Everything else is skipped
//! and counted.

use std::io::{BufReader, Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use localbites_core::{lat_lon, validate_coord};
use localbites_fs::{create_utf8_file, open_utf8_file};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::{CATALOG_HEADERS, CatalogRow};

const REQUIRED_PROPERTIES: [&str; 2] = ["name", "cuisine"];

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

/// Outcome of a conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Rows written to the catalog.
    pub written: usize,
    /// Features dropped because they could not be ranked.
    pub skipped: usize,
}

/// Errors raised while converting GeoJSON.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The GeoJSON file could not be opened.
    #[error("failed to open GeoJSON input at {path}")]
    Open {
        /// Input path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The catalog file could not be created.
    #[error("failed to create catalog at {path}")]
    Create {
        /// Output path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The input was not a GeoJSON feature collection.
    #[error("failed to parse GeoJSON feature collection")]
    Parse {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A catalog row could not be encoded.
    #[error("failed to write catalog row")]
    Csv {
        /// Source error from `csv`.
        #[source]
        source: csv::Error,
    },
    /// The catalog could not be flushed.
    #[error("failed to flush catalog output")]
    Write {
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
}

/// Convert a GeoJSON feature collection read from `input` into catalog CSV
/// written to `output`.
///
/// # Errors
/// Returns [`ConvertError::Parse`] when the input is not a feature
/// collection, and [`ConvertError::Csv`] or [`ConvertError::Write`] when the
/// output cannot be written.
pub fn convert_geojson<R: Read, W: Write>(
    input: R,
    output: W,
) -> Result<ConversionReport, ConvertError> {
    let collection: FeatureCollection = serde_json::from_reader(BufReader::new(input))
        .map_err(|source| ConvertError::Parse { source })?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);
    writer
        .write_record(CATALOG_HEADERS)
        .map_err(|source| ConvertError::Csv { source })?;

    let mut report = ConversionReport::default();
    for (index, feature) in collection.features.into_iter().enumerate() {
        match feature_to_row(feature) {
            Ok(row) => {
                writer
                    .serialize(row)
                    .map_err(|source| ConvertError::Csv { source })?;
                report.written += 1;
            }
            Err(reason) => {
                log::debug!("skipping feature {index}: {reason}");
                report.skipped += 1;
            }
        }
    }
    writer
        .flush()
        .map_err(|source| ConvertError::Write { source })?;
    Ok(report)
}

/// Convert the GeoJSON file at `input` into a catalog at `output`.
///
/// Missing parent directories of `output` are created and an existing file
/// is replaced.
///
/// # Errors
/// Returns [`ConvertError::Open`] or [`ConvertError::Create`] for file
/// access failures and any error from [`convert_geojson`].
pub fn convert_geojson_file(
    input: &Utf8Path,
    output: &Utf8Path,
) -> Result<ConversionReport, ConvertError> {
    let source_file = open_utf8_file(input).map_err(|source| ConvertError::Open {
        path: input.to_path_buf(),
        source,
    })?;
    let target_file = create_utf8_file(output).map_err(|source| ConvertError::Create {
        path: output.to_path_buf(),
        source,
    })?;
    let report = convert_geojson(source_file, target_file)?;
    log::info!(
        "wrote {} restaurants to {output} ({} features skipped)",
        report.written,
        report.skipped
    );
    Ok(report)
}

fn feature_to_row(feature: Feature) -> Result<CatalogRow, &'static str> {
    let properties = feature.properties.unwrap_or_default();
    if !REQUIRED_PROPERTIES
        .iter()
        .all(|key| properties.contains_key(*key))
    {
        return Err("missing name or cuisine");
    }
    let geometry = feature.geometry.ok_or("missing geometry")?;
    if geometry.kind != "Point" {
        return Err("geometry is not a point");
    }
    let (longitude, latitude) = match geometry.coordinates.as_array().map(Vec::as_slice) {
        Some([lon, lat]) => (
            lon.as_f64().ok_or("longitude is not a number")?,
            lat.as_f64().ok_or("latitude is not a number")?,
        ),
        _ => return Err("point does not have two coordinates"),
    };
    validate_coord(lat_lon(latitude, longitude)).map_err(|_| "coordinates out of range")?;

    let text = |key: &str| property_text(&properties, key);
    Ok(CatalogRow {
        name: text("name").unwrap_or_default(),
        cuisine: text("cuisine").unwrap_or_default(),
        lat: latitude.to_string(),
        lon: longitude.to_string(),
        city: text("addr:city"),
        street: text("addr:street"),
        postcode: text("addr:postcode"),
        state: text("addr:state"),
        opening_hours: text("opening_hours"),
        phone: text("phone"),
        website: text("website"),
        price: None,
    })
}

fn property_text(properties: &Map<String, Value>, key: &str) -> Option<String> {
    match properties.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
