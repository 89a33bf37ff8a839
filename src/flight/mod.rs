//! # Flight aggregation
//!
//! The aggregator is the last stage of the ingestion pipeline: it combines
//! the Normalizer output and the Scorer output into the immutable analytic
//! fields of one Flight record,
//!
//! ```text
//! raw track → normalize → score → FlightAnalysis {track, score, stats}
//! ```
//!
//! run **once per uploaded track**. Re-running on an unchanged raw track
//! reproduces the identical [`FlightAnalysis`] (scores are compared for
//! ranking and must not drift between recomputations).
//!
//! The aggregate never carries social metadata – pilot profile, likes,
//! comments and followers belong to the persistence collaborator that embeds
//! this analysis into its own Flight entity.
//!
//! ## Batch mode
//!
//! [`analyze_all`] runs the pipeline over many uploads with **per-flight
//! failure isolation**: one malformed track yields an `Err` entry for that
//! flight and the batch continues. [`analyze_all_with_cancel`] adds a
//! cooperative cancellation callback polled on wall-clock intervals, so
//! cancellation latency stays stable even when single flights are slow.

mod aggregator;

pub use aggregator::{analyze_all, analyze_all_with_cancel, FullAnalysisResult};

use serde::{Deserialize, Serialize};

use crate::aerolog_errors::AnalysisWarning;
use crate::constants::{
    Kilometer, KilometersPerHour, Meter, MetersPerSecond, Minutes, Track, UnixSeconds,
};
use crate::scoring::score_result::ScoreResult;
use crate::time::{format_duration, time_label};
use crate::track::track_ext::TrackExt;
use crate::track::NormalizedTrackPoint;

/// Summary statistics of one flight, shown on flight cards and detail pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightStats {
    /// Airtime in minutes.
    pub duration_minutes: Minutes,
    /// Human-readable airtime, e.g. `"4h 5min"`.
    pub duration_label: String,
    pub takeoff_time: UnixSeconds,
    pub takeoff_time_label: String,
    pub landing_time: UnixSeconds,
    pub landing_time_label: String,
    pub max_altitude: Meter,
    pub min_altitude: Meter,
    pub takeoff_altitude: Meter,
    /// Sum of all positive altitude deltas, in meters.
    pub altitude_gain: Meter,
    pub max_climb_rate: MetersPerSecond,
    /// Strongest sink in m/s, never positive.
    pub max_sink_rate: MetersPerSecond,
    pub max_speed: KilometersPerHour,
    pub avg_speed: KilometersPerHour,
    /// Ground distance actually flown (sum of leg distances), in km.
    pub total_distance: Kilometer,
}

impl FlightStats {
    /// Summarize a normalized track.
    ///
    /// The track is expected non-empty (the normalizer guarantees it); an
    /// empty slice yields all-zero statistics rather than a panic.
    pub fn from_track(track: &[NormalizedTrackPoint]) -> Self {
        let takeoff_time = track.first().map(|p| p.timestamp).unwrap_or(0.0);
        let landing_time = track.last().map(|p| p.timestamp).unwrap_or(0.0);
        let duration_minutes = track.duration_minutes();

        FlightStats {
            duration_minutes,
            duration_label: format_duration(duration_minutes),
            takeoff_time,
            takeoff_time_label: time_label(takeoff_time),
            landing_time,
            landing_time_label: time_label(landing_time),
            max_altitude: track.max_altitude(),
            min_altitude: track.min_altitude(),
            takeoff_altitude: track.takeoff_altitude(),
            altitude_gain: track.altitude_gain(),
            max_climb_rate: track.max_climb_rate(),
            max_sink_rate: track.max_sink_rate(),
            max_speed: track.max_speed(),
            avg_speed: track.average_speed(),
            total_distance: track.total_distance(),
        }
    }
}

/// The immutable analytic record of one flight.
///
/// Owned exclusively by the Flight it belongs to; computed once at ingestion
/// time by [`FlightAnalysis::from_raw_track`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightAnalysis {
    /// The normalized telemetry sequence.
    pub track: Track,
    /// Competition-style scores.
    pub score: ScoreResult,
    /// Summary statistics.
    pub stats: FlightStats,
    /// Non-fatal conditions encountered while producing this analysis.
    pub warnings: Vec<AnalysisWarning>,
}

impl FlightAnalysis {
    /// Whether any degraded-mode warning was recorded.
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}
