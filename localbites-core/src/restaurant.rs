//! Catalog records: a restaurant's ranked fields and pass-through details.

use geo::Coord;

use crate::{CoordinateError, validate_coord};

/// A restaurant in the catalog.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Ranking
/// reads `name`, `cuisine` and `location`; everything in
/// [`RestaurantDetails`] is carried through untouched.
///
/// # Examples
/// ```
/// use localbites_core::{Restaurant, lat_lon};
///
/// # fn main() -> Result<(), localbites_core::CoordinateError> {
/// let taco = Restaurant::new("Taco House", "Mexican", lat_lon(33.65, -117.84))?;
/// assert_eq!(taco.latitude(), 33.65);
/// assert!(taco.details.city.is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Restaurant {
    /// Display name.
    pub name: String,
    /// Free-form cuisine label, possibly empty or `;`-separated.
    pub cuisine: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Descriptive fields passed through to callers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub details: RestaurantDetails,
}

/// Optional descriptive fields of a [`Restaurant`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestaurantDetails {
    /// City from the postal address.
    pub city: Option<String>,
    /// Street from the postal address.
    pub street: Option<String>,
    /// Postal code.
    pub postcode: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Raw OpenStreetMap `opening_hours` value.
    pub opening_hours: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Website URL.
    pub website: Option<String>,
    /// Price tier, higher is pricier.
    pub price: Option<u8>,
}

impl Restaurant {
    /// Validate `location` and construct a [`Restaurant`] without details.
    ///
    /// # Errors
    /// Returns [`CoordinateError`] when the latitude or longitude is out of
    /// range or not finite.
    pub fn new(
        name: impl Into<String>,
        cuisine: impl Into<String>,
        location: Coord<f64>,
    ) -> Result<Self, CoordinateError> {
        let location = validate_coord(location)?;
        Ok(Self {
            name: name.into(),
            cuisine: cuisine.into(),
            location,
            details: RestaurantDetails::default(),
        })
    }

    /// Attach descriptive fields.
    #[must_use]
    pub fn with_details(mut self, details: RestaurantDetails) -> Self {
        self.details = details;
        self
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}
