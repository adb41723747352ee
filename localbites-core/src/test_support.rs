//! Test-only restaurant fixtures used by unit and behaviour tests.

use geo::Coord;

use crate::{Restaurant, RestaurantDetails, lat_lon};

/// Build a restaurant without validating its location.
///
/// Skipping validation lets tests construct records that the ranker must
/// reject.
#[must_use]
pub fn restaurant(name: &str, cuisine: &str, latitude: f64, longitude: f64) -> Restaurant {
    Restaurant {
        name: name.to_owned(),
        cuisine: cuisine.to_owned(),
        location: lat_lon(latitude, longitude),
        details: RestaurantDetails::default(),
    }
}

/// A catalog of `count` restaurants due north of `origin`.
///
/// Records are spaced 0.01 degrees apart and listed farthest first, so any
/// distance ordering has to come from sorting. Cuisines cycle through
/// Mexican, Japanese and American.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "fixture positions are offsets from the origin"
)]
pub fn catalog_around(origin: Coord<f64>, count: u16) -> Vec<Restaurant> {
    const CUISINES: [&str; 3] = ["Mexican", "Japanese", "American"];
    (0..count)
        .rev()
        .map(|step| {
            let cuisine = CUISINES
                .get(usize::from(step) % CUISINES.len())
                .copied()
                .unwrap_or_default();
            let latitude = origin.y + 0.01 * f64::from(step + 1);
            restaurant(&format!("Restaurant {step}"), cuisine, latitude, origin.x)
        })
        .collect()
}
