//! # Track summary extension trait
//!
//! Aggregate queries over a normalized track slice, used by
//! [`FlightStats`](crate::flight::FlightStats) and by ranking collaborators
//! that only need one number. All methods are pure reads over
//! `&[NormalizedTrackPoint]`; empty slices return neutral values (`0.0`)
//! rather than panicking.

use crate::constants::{
    Kilometer, KilometersPerHour, Meter, MetersPerSecond, Minutes, SECONDS_PER_MINUTE,
};
use crate::geodesy::distance;
use crate::track::NormalizedTrackPoint;

/// Aggregate metrics over a normalized track.
pub trait TrackExt {
    /// Highest altitude reached, in meters.
    fn max_altitude(&self) -> Meter;

    /// Lowest altitude reached, in meters.
    fn min_altitude(&self) -> Meter;

    /// Altitude of the first sample (the takeoff), in meters.
    fn takeoff_altitude(&self) -> Meter;

    /// Sum of all positive altitude deltas, in meters.
    fn altitude_gain(&self) -> Meter;

    /// Strongest climb, in m/s (never negative).
    fn max_climb_rate(&self) -> MetersPerSecond;

    /// Strongest sink, in m/s (never positive).
    fn max_sink_rate(&self) -> MetersPerSecond;

    /// Peak ground speed, in km/h.
    fn max_speed(&self) -> KilometersPerHour;

    /// Ground distance actually flown: the sum of all leg distances, in km.
    fn total_distance(&self) -> Kilometer;

    /// Wall-clock span between first and last sample, in minutes.
    fn duration_minutes(&self) -> Minutes;

    /// Mean ground speed over the whole flight, in km/h.
    fn average_speed(&self) -> KilometersPerHour;
}

impl TrackExt for [NormalizedTrackPoint] {
    fn max_altitude(&self) -> Meter {
        if self.is_empty() {
            return 0.0;
        }
        self.iter().map(|p| p.altitude).fold(f64::MIN, f64::max)
    }

    fn min_altitude(&self) -> Meter {
        if self.is_empty() {
            return 0.0;
        }
        self.iter().map(|p| p.altitude).fold(f64::MAX, f64::min)
    }

    fn takeoff_altitude(&self) -> Meter {
        self.first().map(|p| p.altitude).unwrap_or(0.0)
    }

    fn altitude_gain(&self) -> Meter {
        self.windows(2)
            .map(|w| (w[1].altitude - w[0].altitude).max(0.0))
            .sum()
    }

    fn max_climb_rate(&self) -> MetersPerSecond {
        self.iter()
            .map(|p| p.climb_rate)
            .fold(0.0, f64::max)
    }

    fn max_sink_rate(&self) -> MetersPerSecond {
        self.iter()
            .map(|p| p.climb_rate)
            .fold(0.0, f64::min)
    }

    fn max_speed(&self) -> KilometersPerHour {
        self.iter().map(|p| p.speed).fold(0.0, f64::max)
    }

    fn total_distance(&self) -> Kilometer {
        self.windows(2)
            .map(|w| distance(w[0].position(), w[1].position()))
            .sum()
    }

    fn duration_minutes(&self) -> Minutes {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => (last.timestamp - first.timestamp) / SECONDS_PER_MINUTE,
            _ => 0.0,
        }
    }

    fn average_speed(&self) -> KilometersPerHour {
        let hours = self.duration_minutes() / 60.0;
        if hours <= 0.0 {
            return 0.0;
        }
        self.total_distance() / hours
    }
}
