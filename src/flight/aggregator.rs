//! # Batch flight analysis
//!
//! Run the full ingestion pipeline over one upload or a whole set of
//! uploads, collect **per-flight outcomes**, and keep failures isolated: a
//! malformed track produces an `Err` entry for that flight while the rest of
//! the batch continues.
//!
//! ## Result model
//!
//! Batch outcomes are returned as a [`FullAnalysisResult`]:
//!
//! ```text
//! FlightId → Result<FlightAnalysis, AerologError>
//! ```
//!
//! The map uses `ahash::RandomState`, matching the hasher used elsewhere in
//! the crate.
//!
//! ## Cooperative cancellation
//!
//! [`analyze_all_with_cancel`] periodically calls a user-provided closure
//! `should_cancel()` based on **wall-clock intervals** (not iteration
//! counts), keeping cancellation latency stable even if some flights are
//! slow. On cancellation the map holds the flights processed so far.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::debug;

use crate::aerolog_errors::AerologError;
use crate::constants::{FlightId, RawTrack};
use crate::elevation::ElevationModel;
use crate::flight::{FlightAnalysis, FlightStats};
use crate::scoring::{score, ScoringParams};
use crate::scoring_rules::ScoringRule;
use crate::track::{normalize, RawTrackPoint};

/// Per-flight outcomes of a batch analysis.
pub type FullAnalysisResult =
    HashMap<FlightId, Result<FlightAnalysis, AerologError>, ahash::RandomState>;

impl FlightAnalysis {
    /// Analyze one uploaded raw track end-to-end.
    ///
    /// This is the single entry point the upload collaborator calls per
    /// flight: normalization, scoring, and summary statistics in one pass.
    /// The computation is pure and synchronous; analyses of different
    /// flights are safe to run in parallel since nothing is shared.
    ///
    /// Arguments
    /// ---------
    /// * `raw`: the decoded fix sequence of one upload
    /// * `elevation`: terrain collaborator for the AGL channel
    /// * `params`: scoring configuration
    /// * `rule`: competition scoring formula
    ///
    /// Return
    /// ------
    /// * the immutable [`FlightAnalysis`], or an [`AerologError`] when the
    ///   upload is unusable (surfaced to the uploader)
    ///
    /// Re-running on an identical raw track yields an identical analysis.
    pub fn from_raw_track(
        raw: &[RawTrackPoint],
        elevation: &dyn ElevationModel,
        params: &ScoringParams,
        rule: &ScoringRule,
    ) -> Result<FlightAnalysis, AerologError> {
        let (track, mut warnings) = normalize(raw, elevation)?;
        let (score, score_warnings) = score(&track, params, rule);
        warnings.extend(score_warnings);

        let stats = FlightStats::from_track(&track);

        Ok(FlightAnalysis {
            track,
            score,
            stats,
            warnings,
        })
    }
}

/// Analyze every flight of a batch.
///
/// Arguments
/// ---------
/// * `flights`: `(id, raw track)` pairs, e.g. a re-scoring backlog
/// * `elevation`: terrain collaborator shared by all flights
/// * `params`, `rule`: one configuration for the whole batch
///
/// Return
/// ------
/// * a [`FullAnalysisResult`] with one entry per flight, each either
///   `Ok(FlightAnalysis)` or the isolated `Err` for that flight
pub fn analyze_all(
    flights: &[(FlightId, RawTrack)],
    elevation: &dyn ElevationModel,
    params: &ScoringParams,
    rule: &ScoringRule,
) -> FullAnalysisResult {
    analyze_all_with_cancel(flights, elevation, params, rule, || false)
}

/// Cooperative cancellation version: the loop periodically calls
/// `should_cancel()` based on a wall-clock timer (not on iteration count).
///
/// On cancellation the returned map contains the flights processed so far;
/// callers can resubmit the remainder later.
pub fn analyze_all_with_cancel<F>(
    flights: &[(FlightId, RawTrack)],
    elevation: &dyn ElevationModel,
    params: &ScoringParams,
    rule: &ScoringRule,
    mut should_cancel: F,
) -> FullAnalysisResult
where
    F: FnMut() -> bool,
{
    let mut results: FullAnalysisResult = HashMap::default();

    let poll_interval = Duration::from_millis(20);
    let mut last_poll = Instant::now();

    for (id, raw) in flights {
        if last_poll.elapsed() >= poll_interval {
            last_poll = Instant::now();
            if should_cancel() {
                debug!(
                    "analyze_all: cancelled after {} of {} flights",
                    results.len(),
                    flights.len()
                );
                break;
            }
        }

        let analysis = FlightAnalysis::from_raw_track(raw, elevation, params, rule);
        results.insert(id.clone(), analysis);
    }

    results
}
