//! Geodesic distance between WGS84 coordinates.
//!
//! Distances are measured along the shortest path on the WGS84 ellipsoid
//! using Karney's algorithm ([`geo::Geodesic`]) and reported in statute
//! miles.

use std::cmp::Ordering;

use geo::{Coord, Distance, Geodesic, Point};

use crate::CoordinateError;

/// Metres in one international statute mile.
pub const METRES_PER_MILE: f64 = 1_609.344;

/// Build a coordinate from latitude and longitude in that order.
///
/// `geo` stores coordinates as `x = longitude`, `y = latitude`; this helper
/// keeps call sites reading in the conventional order.
///
/// # Examples
/// ```
/// use localbites_core::lat_lon;
///
/// let uci = lat_lon(33.649, -117.846);
/// assert_eq!(uci.x, -117.846);
/// assert_eq!(uci.y, 33.649);
/// ```
#[must_use]
pub const fn lat_lon(latitude: f64, longitude: f64) -> Coord<f64> {
    Coord {
        x: longitude,
        y: latitude,
    }
}

/// Check that `coord` lies within the WGS84 domain.
///
/// # Errors
/// Returns [`CoordinateError::InvalidLatitude`] or
/// [`CoordinateError::InvalidLongitude`] for out-of-range or non-finite
/// components. Values are never clamped.
pub fn validate_coord(coord: Coord<f64>) -> Result<Coord<f64>, CoordinateError> {
    if !(-90.0..=90.0).contains(&coord.y) {
        return Err(CoordinateError::InvalidLatitude { latitude: coord.y });
    }
    if !(-180.0..=180.0).contains(&coord.x) {
        return Err(CoordinateError::InvalidLongitude { longitude: coord.x });
    }
    Ok(coord)
}

/// Geodesic distance in miles between `from` and `to`.
///
/// The two points are evaluated in a canonical order, so swapping the
/// arguments yields the identical value. Identical points are exactly zero
/// apart.
///
/// # Errors
/// Returns [`CoordinateError`] when either point is outside the WGS84 domain.
///
/// # Examples
/// ```
/// use localbites_core::{distance_miles, lat_lon};
///
/// # fn main() -> Result<(), localbites_core::CoordinateError> {
/// let newport = lat_lon(41.49008, -71.312796);
/// let cleveland = lat_lon(41.499498, -81.695391);
/// let miles = distance_miles(newport, cleveland)?;
/// assert!((miles - 538.39).abs() < 0.01);
/// assert_eq!(miles, distance_miles(cleveland, newport)?);
/// # Ok(())
/// # }
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "converting metres to miles divides by a constant"
)]
pub fn distance_miles(from: Coord<f64>, to: Coord<f64>) -> Result<f64, CoordinateError> {
    let from = validate_coord(from)?;
    let to = validate_coord(to)?;
    if from == to {
        return Ok(0.0);
    }
    let (first, second) = canonical_order(from, to);
    let metres = Geodesic.distance(Point::from(first), Point::from(second));
    Ok(metres.abs() / METRES_PER_MILE)
}

fn canonical_order(a: Coord<f64>, b: Coord<f64>) -> (Coord<f64>, Coord<f64>) {
    match a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x)) {
        Ordering::Greater => (b, a),
        Ordering::Less | Ordering::Equal => (a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const UCI: Coord<f64> = lat_lon(33.649_31, -117.846_38);

    #[rstest]
    fn identical_points_are_zero_apart() {
        assert_eq!(distance_miles(UCI, UCI), Ok(0.0));
    }

    #[rstest]
    fn matches_reference_geodesic() {
        let newport = lat_lon(41.490_08, -71.312_796);
        let cleveland = lat_lon(41.499_498, -81.695_391);
        let miles = distance_miles(newport, cleveland).expect("valid points");
        assert!((miles - 538.390_445_368).abs() < 1e-4, "got {miles}");
    }

    #[rstest]
    fn short_hops_are_sub_mile() {
        let taco_house = lat_lon(33.65, -117.84);
        let miles = distance_miles(lat_lon(33.649, -117.846), taco_house).expect("valid points");
        assert!(miles > 0.3 && miles < 0.4, "got {miles}");
    }

    #[rstest]
    fn swapping_arguments_is_exact() {
        let a = lat_lon(33.70, -117.90);
        let b = lat_lon(-33.86, 151.21);
        assert_eq!(distance_miles(a, b), distance_miles(b, a));
    }

    #[rstest]
    #[case(lat_lon(90.000_1, 0.0), CoordinateError::InvalidLatitude { latitude: 90.000_1 })]
    #[case(lat_lon(-91.0, 0.0), CoordinateError::InvalidLatitude { latitude: -91.0 })]
    #[case(lat_lon(0.0, 180.5), CoordinateError::InvalidLongitude { longitude: 180.5 })]
    #[case(lat_lon(0.0, -200.0), CoordinateError::InvalidLongitude { longitude: -200.0 })]
    fn rejects_out_of_range(#[case] bad: Coord<f64>, #[case] expected: CoordinateError) {
        assert_eq!(distance_miles(UCI, bad), Err(expected));
        assert_eq!(distance_miles(bad, UCI), Err(expected));
    }

    #[rstest]
    fn rejects_non_finite() {
        let result = distance_miles(UCI, lat_lon(f64::NAN, 0.0));
        assert!(matches!(
            result,
            Err(CoordinateError::InvalidLatitude { latitude }) if latitude.is_nan()
        ));
        assert!(distance_miles(UCI, lat_lon(0.0, f64::INFINITY)).is_err());
    }

    #[rstest]
    #[case(lat_lon(90.0, 180.0))]
    #[case(lat_lon(-90.0, -180.0))]
    fn accepts_domain_boundaries(#[case] edge: Coord<f64>) {
        assert_eq!(validate_coord(edge), Ok(edge));
    }
}
