//! Points on the globe and the spherical angle kernel.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A geographic position in degrees.
///
/// Path points that have been unwrapped across the antimeridian may carry
/// longitudes above 180; [`wrap_longitude`] recovers the canonical form at
/// render time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Checked constructor for caller-supplied coordinates. Latitude must
    /// lie in [-90, 90]; longitude must be finite and is wrapped into
    /// (-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeometryError> {
        if !latitude.is_finite() || !longitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeometryError::OutOfRangeCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude: wrap_longitude(longitude),
        })
    }
}

/// Wrap a longitude into (-180, 180].
pub fn wrap_longitude(longitude: f64) -> f64 {
    let mut lon = longitude % 360.0;
    if lon <= -180.0 {
        lon += 360.0;
    } else if lon > 180.0 {
        lon -= 360.0;
    }
    lon
}

/// Great-circle angle in degrees between a reference point (lat0, lon0) and
/// another point (lat1, lon1), all four in radians.
///
/// Haversine form: continuous at the poles and across the antimeridian, so
/// the per-pixel grid loop needs no branches. The sqrt is clamped to 1 so
/// antipodal rounding noise cannot escape asin's domain.
pub fn haversine_radians(lat0: f64, lon0: f64, lat1: f64, lon1: f64) -> f64 {
    let ha = ((lat0 - lat1) / 2.0).sin().powi(2);
    let hb = lat1.cos() * lat0.cos() * ((lon0 - lon1) / 2.0).sin().powi(2);
    (2.0 * (ha + hb).sqrt().min(1.0).asin()).to_degrees()
}

/// Great-circle angle in degrees between two points given in degrees.
pub fn angular_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    haversine_radians(
        a.latitude.to_radians(),
        a.longitude.to_radians(),
        b.latitude.to_radians(),
        b.longitude.to_radians(),
    )
}
