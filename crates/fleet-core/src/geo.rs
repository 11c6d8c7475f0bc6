//! Geographic coordinate type and spherical helpers.
//!
//! `Coordinate` stores longitude first, matching the GeoJSON order used by the
//! map layer that consumes vehicle positions.  All arithmetic is `f64`: route
//! segments are often only tens of metres long and progress fractions are
//! accumulated over thousands of ticks, so single precision drifts visibly.

/// Mean Earth radius used by every distance in the workspace, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Haversine great-circle distance to `other` in metres.
    #[inline]
    pub fn distance_m(self, other: Coordinate) -> f64 {
        haversine_distance(self, other)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

/// Haversine great-circle distance in metres.
///
/// NaN inputs propagate to a NaN result.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Initial bearing from `a` to `b` in degrees, normalised into `[0, 360)`.
pub fn bearing(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Linear interpolation of longitude and latitude at fraction `t`.
///
/// `t` is not clamped: values outside `[0, 1]` extrapolate along the same
/// line.  The `a * (1 - t) + b * t` form returns the endpoints exactly at
/// `t = 0` and `t = 1`.
#[inline]
pub fn interpolate(a: Coordinate, b: Coordinate, t: f64) -> Coordinate {
    Coordinate {
        lon: a.lon * (1.0 - t) + b.lon * t,
        lat: a.lat * (1.0 - t) + b.lat * t,
    }
}
