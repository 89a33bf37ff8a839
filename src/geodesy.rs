//! # Geodesy primitives
//!
//! Great-circle distance and initial bearing between geographic coordinates on a
//! spherical Earth model ([`EARTH_RADIUS_KM`]).
//!
//! ## Numerical contract
//!
//! - `distance(a, b) == distance(b, a)` and `distance(a, a) == 0`.
//! - Both functions stay finite and well-defined for **antipodal** and
//!   **near-identical** point pairs. The distance is computed from the angle
//!   between unit position vectors using `atan2(‖u × v‖, u · v)`, which avoids
//!   the domain cliff of `acos`-based haversine evaluation near 0 and π.
//!
//! ## See also
//!
//! * [`crate::track::normalize`] – consumes [`distance`] for leg speeds.
//! * [`crate::scoring`] – consumes [`distance`] for route optimization.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Kilometer, EARTH_RADIUS_KM};

/// A geographic coordinate in degrees.
///
/// Latitude is positive north, longitude positive east. Turnpoints reported by
/// the scorer use this type, so it serializes to the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: Degree,
    pub lon: Degree,
}

impl GeoPoint {
    pub fn new(lat: Degree, lon: Degree) -> Self {
        GeoPoint { lat, lon }
    }

    /// Whether the coordinate lies in the valid geographic range.
    pub fn in_bounds(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// Unit position vector of this coordinate on the sphere.
    pub(crate) fn unit_vector(&self) -> Vector3<f64> {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
    }
}

impl From<(Degree, Degree)> for GeoPoint {
    fn from((lat, lon): (Degree, Degree)) -> Self {
        GeoPoint { lat, lon }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lon)
    }
}

/// Great-circle distance between two coordinates in kilometers.
///
/// Arguments
/// ---------
/// * `a`: first coordinate
/// * `b`: second coordinate
///
/// Return
/// ------
/// * the distance along the sphere surface, in kilometers
///
/// Notes
/// -----
/// * The central angle is `atan2(‖u × v‖, u · v)` over the unit position
///   vectors `u`, `v`. Unlike the plain haversine arcsine, this form loses no
///   precision for near-identical points and never leaves the inverse-trig
///   domain for antipodal ones.
pub fn distance(a: GeoPoint, b: GeoPoint) -> Kilometer {
    let u = a.unit_vector();
    let v = b.unit_vector();
    let angle = u.cross(&v).norm().atan2(u.dot(&v));
    angle * EARTH_RADIUS_KM
}

/// Initial bearing from `a` towards `b`, in degrees `[0, 360)`.
///
/// Arguments
/// ---------
/// * `a`: origin coordinate
/// * `b`: destination coordinate
///
/// Return
/// ------
/// * the forward azimuth at `a`, measured clockwise from true north
pub fn bearing(a: GeoPoint, b: GeoPoint) -> Degree {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let y = dlon.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlon.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}
