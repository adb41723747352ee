//! Restaurant catalog CSV loading.
//!
//! The catalog is a headed CSV with the columns listed in
//! [`CATALOG_HEADERS`]. Coordinates are required and must parse as numbers
//! within the WGS84 domain; every other column is optional. Unknown columns
//! are ignored and a missing `price` column is treated as empty.

use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use localbites_core::{CoordinateError, Restaurant, RestaurantDetails, lat_lon};
use localbites_fs::open_utf8_file;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column order used when writing catalog files.
pub const CATALOG_HEADERS: [&str; 12] = [
    "name",
    "cuisine",
    "lat",
    "lon",
    "city",
    "street",
    "postcode",
    "state",
    "opening_hours",
    "phone",
    "website",
    "price",
];

/// One raw catalog row, exactly as stored on disk.
///
/// Numeric columns stay textual here; [`CatalogRow::into_restaurant`]
/// performs the coercion so that failures can name the row and column.
/// Field order matches [`CATALOG_HEADERS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Cuisine label.
    #[serde(default)]
    pub cuisine: String,
    /// Latitude in degrees.
    #[serde(default)]
    pub lat: String,
    /// Longitude in degrees.
    #[serde(default)]
    pub lon: String,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// Street.
    #[serde(default)]
    pub street: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub postcode: Option<String>,
    /// State or region.
    #[serde(default)]
    pub state: Option<String>,
    /// Raw opening hours.
    #[serde(default)]
    pub opening_hours: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Website URL.
    #[serde(default)]
    pub website: Option<String>,
    /// Integer price tier.
    #[serde(default)]
    pub price: Option<String>,
}

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be opened.
    #[error("failed to open catalog at {path}")]
    Open {
        /// Requested catalog path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A row could not be read as CSV.
    #[error("failed to read catalog row {row}")]
    Csv {
        /// 1-based data row, not counting the header.
        row: usize,
        /// Source error from `csv`.
        #[source]
        source: csv::Error,
    },
    /// A required column was empty.
    #[error("catalog row {row} is missing {field}")]
    MissingField {
        /// 1-based data row.
        row: usize,
        /// Column name.
        field: &'static str,
    },
    /// A numeric column did not parse.
    #[error("catalog row {row} has non-numeric {field}: {value:?}")]
    InvalidNumber {
        /// 1-based data row.
        row: usize,
        /// Column name.
        field: &'static str,
        /// Raw cell contents.
        value: String,
    },
    /// The coordinates parsed but fall outside the WGS84 domain.
    #[error("catalog row {row} has an invalid location")]
    InvalidCoordinate {
        /// 1-based data row.
        row: usize,
        /// Source coordinate failure.
        #[source]
        source: CoordinateError,
    },
}

impl CatalogRow {
    /// Coerce the raw row into a validated [`Restaurant`].
    ///
    /// `row` is only used to label errors.
    ///
    /// # Errors
    /// Returns [`CatalogError::MissingField`] for empty coordinates,
    /// [`CatalogError::InvalidNumber`] for unparsable coordinates or price
    /// and [`CatalogError::InvalidCoordinate`] for out-of-range locations.
    pub fn into_restaurant(self, row: usize) -> Result<Restaurant, CatalogError> {
        let latitude = parse_required(&self.lat, "lat", row)?;
        let longitude = parse_required(&self.lon, "lon", row)?;
        let price = match non_blank(self.price) {
            Some(raw) => Some(raw.trim().parse::<u8>().map_err(|_| {
                CatalogError::InvalidNumber {
                    row,
                    field: "price",
                    value: raw.clone(),
                }
            })?),
            None => None,
        };
        let details = RestaurantDetails {
            city: non_blank(self.city),
            street: non_blank(self.street),
            postcode: non_blank(self.postcode),
            state: non_blank(self.state),
            opening_hours: non_blank(self.opening_hours),
            phone: non_blank(self.phone),
            website: non_blank(self.website),
            price,
        };
        let restaurant = Restaurant::new(self.name, self.cuisine, lat_lon(latitude, longitude))
            .map_err(|source| CatalogError::InvalidCoordinate { row, source })?;
        Ok(restaurant.with_details(details))
    }
}

fn parse_required(raw: &str, field: &'static str, row: usize) -> Result<f64, CatalogError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::MissingField { row, field });
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| CatalogError::InvalidNumber {
            row,
            field,
            value: raw.to_owned(),
        })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Read a catalog from any CSV source.
///
/// Loading stops at the first bad row; no partial catalog is returned.
///
/// # Errors
/// Returns [`CatalogError`] describing the first row that failed.
pub fn read_catalog<R: Read>(reader: R) -> Result<Vec<Restaurant>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut restaurants = Vec::new();
    for (index, result) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = index + 1;
        let record = result.map_err(|source| CatalogError::Csv { row, source })?;
        restaurants.push(record.into_restaurant(row)?);
    }
    Ok(restaurants)
}

/// Load the catalog stored at `path`.
///
/// # Errors
/// Returns [`CatalogError::Open`] when the file cannot be opened and any
/// row error from [`read_catalog`].
pub fn load_catalog(path: &Utf8Path) -> Result<Vec<Restaurant>, CatalogError> {
    let file = open_utf8_file(path).map_err(|source| CatalogError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let restaurants = read_catalog(file)?;
    log::info!("loaded {} restaurants from {path}", restaurants.len());
    Ok(restaurants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const HEADER: &str = "name,cuisine,lat,lon,city,street,postcode,state,opening_hours,phone,website\n";

    fn load(body: &str) -> Result<Vec<Restaurant>, CatalogError> {
        read_catalog(format!("{HEADER}{body}").as_bytes())
    }

    #[rstest]
    fn reads_rows_and_optional_fields() {
        let restaurants = load(
            "Taco House,mexican,33.65,-117.84,Irvine,Campus Dr,92612,CA,Mo-Fr 11:00-21:00,+1 949,https://taco.example\n\
             Sushi Place,japanese, 33.70 ,-117.90,,,,,,,\n",
        )
        .expect("valid catalog");

        assert_eq!(restaurants.len(), 2);
        let taco = &restaurants[0];
        assert_eq!(taco.name, "Taco House");
        assert_eq!(taco.latitude(), 33.65);
        assert_eq!(taco.details.city.as_deref(), Some("Irvine"));
        assert_eq!(taco.details.website.as_deref(), Some("https://taco.example"));
        assert_eq!(taco.details.price, None);

        let sushi = &restaurants[1];
        assert_eq!(sushi.latitude(), 33.70);
        assert_eq!(sushi.details, RestaurantDetails::default());
    }

    #[rstest]
    fn reads_price_column_when_present() {
        let csv = "name,cuisine,lat,lon,price\nDiner,american,1.0,2.0,3\nCafe,coffee,1.0,2.0,\n";
        let restaurants = read_catalog(csv.as_bytes()).expect("valid catalog");
        assert_eq!(restaurants[0].details.price, Some(3));
        assert_eq!(restaurants[1].details.price, None);
    }

    #[rstest]
    fn empty_catalog_is_valid() {
        assert!(load("").expect("header only").is_empty());
    }

    #[rstest]
    #[case("Diner,american,,2.0\n", "lat")]
    #[case("Diner,american,1.0, \n", "lon")]
    fn rejects_missing_coordinates(#[case] body: &str, #[case] expected: &str) {
        let err = load(body).expect_err("missing coordinate");
        assert!(
            matches!(err, CatalogError::MissingField { row: 1, field } if field == expected),
            "unexpected error {err:?}"
        );
    }

    #[rstest]
    fn rejects_non_numeric_coordinates_with_row() {
        let err = load("Fine,thai,1.0,2.0\nBroken,thai,north,2.0\n").expect_err("bad lat");
        match err {
            CatalogError::InvalidNumber { row, field, value } => {
                assert_eq!(row, 2);
                assert_eq!(field, "lat");
                assert_eq!(value, "north");
            }
            other => panic!("expected InvalidNumber, found {other:?}"),
        }
    }

    #[rstest]
    fn rejects_non_integer_price() {
        let csv = "name,cuisine,lat,lon,price\nDiner,american,1.0,2.0,cheap\n";
        let err = read_catalog(csv.as_bytes()).expect_err("bad price");
        assert!(matches!(
            err,
            CatalogError::InvalidNumber { field: "price", .. }
        ));
    }

    #[rstest]
    #[case("Pole,ice,91.0,0.0\n")]
    #[case("Dateline,fish,0.0,-181.0\n")]
    #[case("Void,none,NaN,0.0\n")]
    fn rejects_out_of_range_coordinates(#[case] body: &str) {
        let err = load(body).expect_err("invalid location");
        assert!(matches!(err, CatalogError::InvalidCoordinate { row: 1, .. }));
    }
}
