//! Data access for the LocalBites engine.
//!
//! Responsibilities:
//! - Load the restaurant catalog from CSV into validated
//!   [`Restaurant`](localbites_core::Restaurant) records.
//! - Convert Overpass Turbo GeoJSON exports into that CSV format.
//! - Append ranking events to a JSON-lines audit log.
//!
//! Boundaries:
//! - Do not encode ranking rules (they live in `localbites-core`).
//! - Coerce and validate raw text here so the core only sees typed records.
#![forbid(unsafe_code)]

pub mod catalog;
pub mod events;
pub mod geojson;

pub use catalog::{CATALOG_HEADERS, CatalogError, CatalogRow, load_catalog, read_catalog};
pub use events::{EventLog, EventLogError, RankEvent, RequestSummary, ResultPreview};
pub use geojson::{ConversionReport, ConvertError, convert_geojson, convert_geojson_file};
