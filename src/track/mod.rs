//! # Track ingestion and normalization
//!
//! This module owns the two point representations of the engine boundary:
//!
//! 1. [`RawTrackPoint`] – one positional fix as decoded from the upload
//!    (position required, timestamp and altitude optional per source format).
//! 2. [`NormalizedTrackPoint`] – the immutable, fully derived telemetry sample
//!    exposed to charts and scoring: monotonic timestamp, wall-clock label,
//!    altitude, terrain altitude, AGL, instantaneous speed and climb rate.
//!
//! The [`normalize`] pipeline turns the former into the latter:
//!
//! ```text
//! raw fixes → validate → sort by time → drop Δt ≤ 0 → derive speed/climb → AGL
//! ```
//!
//! Normalization happens **once per uploaded flight**; the resulting sequence
//! is owned by its flight and never mutated afterwards. The scorer and the
//! summary statistics both read it through `&[NormalizedTrackPoint]`.
//!
//! ## See also
//!
//! * [`crate::elevation::ElevationModel`] – terrain collaborator consulted for AGL.
//! * [`crate::scoring`] – distance scoring over the normalized sequence.
//! * [`crate::flight`] – the aggregate that owns one normalized track.

pub mod display;
mod normalize;
pub mod track_ext;

pub use normalize::normalize;

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, KilometersPerHour, Meter, MetersPerSecond, UnixSeconds};
use crate::geodesy::GeoPoint;

/// One raw positional fix handed over by the upload collaborator.
///
/// # Fields
///
/// * `lat` - Latitude in degrees, positive north
/// * `lon` - Longitude in degrees, positive east
/// * `timestamp` - Unix seconds (UTC), absent for formats without timing
/// * `altitude` - Barometric or GPS altitude in meters, absent for 2D fixes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawTrackPoint {
    pub lat: Degree,
    pub lon: Degree,
    pub timestamp: Option<UnixSeconds>,
    pub altitude: Option<Meter>,
}

impl RawTrackPoint {
    /// Create a fully populated fix.
    pub fn new(lat: Degree, lon: Degree, timestamp: UnixSeconds, altitude: Meter) -> Self {
        RawTrackPoint {
            lat,
            lon,
            timestamp: Some(timestamp),
            altitude: Some(altitude),
        }
    }

    /// Create a bare positional fix (no timing, no altitude).
    pub fn from_position(lat: Degree, lon: Degree) -> Self {
        RawTrackPoint {
            lat,
            lon,
            timestamp: None,
            altitude: None,
        }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// One immutable telemetry sample of a normalized track.
///
/// Produced by [`normalize`] at ingestion time. Timestamps are strictly
/// increasing along the owning sequence; all derived quantities refer to the
/// leg ending at this point (the first point of a track carries zeros).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTrackPoint {
    /// Unix seconds, UTC; strictly increasing along the track
    pub timestamp: UnixSeconds,
    /// Wall-clock `HH:MM:SS` label for chart axes
    pub time_label: String,
    pub lat: Degree,
    pub lon: Degree,
    /// Altitude above sea level in meters
    pub altitude: Meter,
    /// Terrain altitude under the point, from the elevation collaborator
    pub terrain_altitude: Meter,
    /// Altitude above ground, floored at zero
    pub agl: Meter,
    /// Instantaneous ground speed in km/h
    pub speed: KilometersPerHour,
    /// Instantaneous vertical speed in m/s (negative while sinking)
    pub climb_rate: MetersPerSecond,
}

impl NormalizedTrackPoint {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}
