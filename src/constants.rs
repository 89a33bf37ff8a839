//! # Constants and type definitions for AeroLog
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `aerolog` engine. It also defines key data structures for
//! identifying flights and storing track sequences.
//!
//! ## Overview
//!
//! - Geodetic constants (mean Earth radius, WGS84 axes)
//! - Unit conversions (m/s ↔ km/h, meters ↔ kilometers, minutes ↔ seconds)
//! - Core type aliases used across the crate
//! - Flight identifiers as used by the persistence collaborator
//! - Container types for raw and normalized track sequences
//!
//! These definitions are used by all main modules, including the normalizer, the distance
//! scorer, and the flight aggregator.

use smallvec::SmallVec;

use crate::geodesy::GeoPoint;
use crate::track::{NormalizedTrackPoint, RawTrackPoint};

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Mean Earth radius in kilometers (IUGG), used by the spherical great-circle model
pub const EARTH_RADIUS_KM: f64 = 6_371.0088;

/// Earth equatorial radius in meters (GRS1980/WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (GRS1980/WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Number of seconds in a minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Number of seconds in an hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// m/s → km/h
pub const MS_TO_KMH: f64 = 3.6;

/// Meters per kilometer
pub const METERS_PER_KM: f64 = 1_000.0;

/// Numerical epsilon used for floating-point comparisons on distances (km)
pub const EPS_KM: f64 = 1e-9;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Speed in kilometers per hour
pub type KilometersPerHour = f64;
/// Vertical speed in meters per second
pub type MetersPerSecond = f64;
/// Timestamp in seconds since the Unix epoch (UTC)
pub type UnixSeconds = f64;
/// Duration in minutes
pub type Minutes = f64;

// -------------------------------------------------------------------------------------------------
// Identifiers and data containers
// -------------------------------------------------------------------------------------------------

/// Identifier of a flight in the AeroLog platform.
///
/// This can be:
/// - A numeric id assigned by the persistence collaborator (e.g. `Int(101)`)
/// - An external string designation (e.g. an upload token or an IGC file stem)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FlightId {
    /// Integer-based flight id
    Int(u32),
    /// String-based flight designation
    String(String),
}

impl std::fmt::Display for FlightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlightId::Int(n) => write!(f, "{n}"),
            FlightId::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<u32> for FlightId {
    fn from(n: u32) -> Self {
        FlightId::Int(n)
    }
}

impl From<String> for FlightId {
    fn from(s: String) -> Self {
        FlightId::String(s)
    }
}

impl From<&str> for FlightId {
    fn from(s: &str) -> Self {
        FlightId::String(s.to_string())
    }
}

impl std::str::FromStr for FlightId {
    type Err = std::num::ParseIntError;

    /// Try to parse a `FlightId` from a string.
    /// - Pure digits → `Int(u32)`
    /// - Otherwise  → `String(String)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<u32>() {
            Ok(n) => Ok(FlightId::Int(n)),
            Err(e) => {
                if s.chars().any(|c| !c.is_ascii_digit()) {
                    Ok(FlightId::String(s.to_string()))
                } else {
                    Err(e)
                }
            }
        }
    }
}

/// A raw, possibly unordered track as handed over by the upload collaborator.
pub type RawTrack = Vec<RawTrackPoint>;

/// A normalized, time-ordered track owned by a single flight.
pub type Track = Vec<NormalizedTrackPoint>;

/// A small, inline-optimized container for the turnpoints of an optimal route.
///
/// Free-distance routes carry at most `max_turnpoints + 2` vertices, so the
/// inline capacity covers every configuration the builder accepts.
pub type Turnpoints = SmallVec<[GeoPoint; 8]>;
