use thiserror::Error;

/// A latitude or longitude outside the WGS84 domain.
///
/// Non-finite values (`NaN`, infinities) fall outside every range and are
/// reported through the same variants.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude was not a finite value within `-90.0..=90.0`.
    #[error("latitude {latitude} must be within -90..=90 degrees")]
    InvalidLatitude {
        /// Rejected latitude in degrees.
        latitude: f64,
    },
    /// Longitude was not a finite value within `-180.0..=180.0`.
    #[error("longitude {longitude} must be within -180..=180 degrees")]
    InvalidLongitude {
        /// Rejected longitude in degrees.
        longitude: f64,
    },
}
