use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{Degree, FlightId};

/// Crate-wide error type for the AeroLog analysis engine.
///
/// Fatal conditions only: anything that aborts the ingestion of one flight.
/// Degraded-but-recoverable conditions are reported as [`AnalysisWarning`]
/// values on the produced analysis instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AerologError {
    #[error("Track is empty: at least one point is required")]
    EmptyTrack,

    #[error("Malformed track: {0}")]
    MalformedTrack(String),

    #[error("Invalid coordinates at point {index}: lat={lat}, lon={lon}")]
    InvalidCoordinates {
        index: usize,
        lat: Degree,
        lon: Degree,
    },

    #[error("Invalid scoring parameter: {0}")]
    InvalidScoringParameter(String),

    #[error("Flight not found in store: {0}")]
    FlightNotFound(FlightId),
}

/// Non-fatal conditions encountered while analyzing one flight.
///
/// A degraded analysis still yields a persistable
/// [`FlightAnalysis`](crate::flight::FlightAnalysis); the warnings ride on the
/// record so ranking collaborators can tell exact scores from best-effort ones.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnalysisWarning {
    #[error("{0} out-of-order or duplicate fixes were dropped during normalization")]
    PointsDropped(usize),

    #[error("Too few points for turnpoint optimization; partial scores only")]
    InsufficientPoints,

    #[error("Elevation lookup unavailable ({0}); AGL degraded to altitude above sea level")]
    ElevationUnavailable(String),

    #[error("Turnpoint search exceeded its time budget; free distance is a lower bound")]
    SearchBudgetExceeded,
}
