//! Facade crate for the LocalBites restaurant ranking engine.
//!
//! This crate re-exports the ranking core and, behind the `data` feature,
//! the catalog loader, GeoJSON converter and event log.

#![forbid(unsafe_code)]

pub use localbites_core::{
    CATEGORY_MATCH_WEIGHT, CategoryFilter, CoordinateError, KeywordScorer, MAX_RESULTS,
    NAME_MATCH_WEIGHT, RankError, RankRequest, RankedRestaurant, Ranker, Restaurant,
    RestaurantDetails, Scorer, SortPolicy, distance_miles, lat_lon, rank, tokenize,
};

#[cfg(feature = "data")]
pub use localbites_data::{
    CatalogError, ConversionReport, ConvertError, EventLog, EventLogError, RankEvent,
    convert_geojson_file, load_catalog, read_catalog,
};
