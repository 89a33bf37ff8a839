//! # Cross-country distance scoring
//!
//! This module defines the [`ScoringParams`] configuration struct and its
//! builder, which control how the scorer selects candidate turnpoints,
//! optimizes the free-distance route, detects FAI triangles, and bounds the
//! search runtime.
//!
//! ## Purpose
//!
//! [`ScoringParams`] centralizes all tunable parameters used by
//! [`score`], the competition-style scoring entry point. It allows you to:
//!
//! - Bound the turnpoint count of the free-distance route (`max_turnpoints`),
//! - Bound the candidate set the optimizers run on (`max_candidate_points`),
//! - Tune the FAI triangle acceptance rules (closing tolerance, minimum leg
//!   fraction),
//! - Cap the wall-clock budget of the combinatorial search
//!   (`search_time_budget_ms`).
//!
//! ## Pipeline overview
//!
//! 1. **Candidate reduction**
//!    The normalized track (often thousands of fixes) is deterministically
//!    downsampled to at most `max_candidate_points` candidates; the first and
//!    last fixes are always retained. All pairwise great-circle distances are
//!    precomputed once.
//!
//! 2. **Free distance**
//!    A dynamic program over the candidate indices finds the ordered route of
//!    up to `max_turnpoints` turnpoints (plus the two endpoints) with the
//!    largest summed leg distance. Exact on the reduced candidate set.
//!
//! 3. **FAI triangle detection**
//!    All ordered candidate triples are scanned for the triangle of maximum
//!    perimeter whose loop closes within the configured tolerance and whose
//!    shortest leg is at least `triangle_min_leg_fraction` of the perimeter.
//!
//! 4. **Score formula**
//!    The resulting distances feed the pluggable
//!    [`ScoringRule`](crate::scoring_rules::ScoringRule).
//!
//! ## Example
//!
//! ```rust,no_run
//! use aerolog::scoring::ScoringParams;
//!
//! let params = ScoringParams::builder()
//!     .max_turnpoints(4)
//!     .max_candidate_points(120)
//!     .triangle_min_leg_fraction(0.28)
//!     .search_time_budget_ms(2_000)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## See also
//!
//! * [`score`] – main scoring entry point
//! * [`crate::scoring::free_distance`] – turnpoint route optimization
//! * [`crate::scoring::triangle`] – FAI triangle search
//! * [`crate::scoring::score_result::ScoreResult`] – result model

pub(crate) mod candidates;
pub mod free_distance;
pub mod score_result;
pub mod triangle;

use std::time::{Duration, Instant};

use log::debug;

use crate::aerolog_errors::{AerologError, AnalysisWarning};
use crate::constants::Kilometer;
use crate::geodesy::{distance, GeoPoint};
use crate::scoring::candidates::{select_candidates, DistanceMatrix};
use crate::scoring::score_result::{FreeDistance, ScoreResult};
use crate::scoring_rules::ScoringRule;
use crate::track::track_ext::TrackExt;
use crate::track::NormalizedTrackPoint;

/// Loop-closing tolerance for triangle detection.
///
/// A triangle only counts when the track returns close to the first
/// turnpoint after rounding the last one. "Close" is either an absolute
/// distance or a fraction of the triangle perimeter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriangleClosing {
    /// Absolute closing distance in kilometers.
    MaxGapKm(Kilometer),
    /// Closing distance as a fraction of the triangle perimeter.
    FractionOfPerimeter(f64),
}

impl TriangleClosing {
    /// Maximum admissible gap in kilometers for a given perimeter.
    pub(crate) fn max_gap(&self, perimeter: Kilometer) -> Kilometer {
        match self {
            TriangleClosing::MaxGapKm(km) => *km,
            TriangleClosing::FractionOfPerimeter(f) => f * perimeter,
        }
    }
}

/// Configuration parameters controlling the behavior of [`score`].
///
/// Overview
/// -----------------
/// The scorer runs in stages: candidate reduction, free-distance dynamic
/// programming, triangle scanning. This struct controls those stages as well
/// as the wall-clock budget of the combinatorial parts.
///
/// Fields
/// -----------------
/// * `max_turnpoints` – upper bound on intermediate turnpoints of the
///   free-distance route (route vertices = turnpoints + 2 endpoints).
/// * `max_candidate_points` – downsampling bound on the candidate set; the
///   optimizers are exact on this reduced set, and their results are lower
///   bounds for the full track (error shrinks with a denser set).
/// * `triangle_closing` – loop-closing tolerance for triangle detection.
/// * `triangle_min_leg_fraction` – FAI proportionality rule: the shortest
///   triangle leg must be at least this fraction of the perimeter.
/// * `search_time_budget_ms` – wall-clock budget for the optimizers; `0`
///   means unbounded. On expiry the best result found so far is returned and
///   flagged approximate.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringParams {
    pub max_turnpoints: usize,
    pub max_candidate_points: usize,
    pub triangle_closing: TriangleClosing,
    pub triangle_min_leg_fraction: f64,
    pub search_time_budget_ms: u64,
}

impl ScoringParams {
    /// Create a new builder initialized with default values.
    ///
    /// See also
    /// ------------
    /// * [`ScoringParams`] – Holds all configuration parameters for scoring.
    /// * [`score`] – Consumes these parameters to score a normalized track.
    pub fn builder() -> ScoringParamsBuilder {
        ScoringParamsBuilder::new()
    }
}

impl Default for ScoringParams {
    fn default() -> Self {
        ScoringParams {
            max_turnpoints: 4,
            max_candidate_points: 160,
            triangle_closing: TriangleClosing::FractionOfPerimeter(0.05),
            triangle_min_leg_fraction: 0.28,
            search_time_budget_ms: 0,
        }
    }
}

/// Builder for [`ScoringParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct ScoringParamsBuilder {
    params: ScoringParams,
}

impl ScoringParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: ScoringParams::default(),
        }
    }

    pub fn max_turnpoints(mut self, v: usize) -> Self {
        self.params.max_turnpoints = v;
        self
    }

    pub fn max_candidate_points(mut self, v: usize) -> Self {
        self.params.max_candidate_points = v;
        self
    }

    pub fn triangle_closing(mut self, v: TriangleClosing) -> Self {
        self.params.triangle_closing = v;
        self
    }

    pub fn triangle_min_leg_fraction(mut self, v: f64) -> Self {
        self.params.triangle_min_leg_fraction = v;
        self
    }

    pub fn search_time_budget_ms(mut self, v: u64) -> Self {
        self.params.search_time_budget_ms = v;
        self
    }

    /// Validate and produce the final [`ScoringParams`].
    ///
    /// Return
    /// ------
    /// * the validated parameters, or
    ///   [`AerologError::InvalidScoringParameter`] naming the offending field
    pub fn build(self) -> Result<ScoringParams, AerologError> {
        let p = &self.params;

        if p.max_turnpoints == 0 || p.max_turnpoints > 6 {
            return Err(AerologError::InvalidScoringParameter(
                "max_turnpoints must be in 1..=6".into(),
            ));
        }
        if p.max_candidate_points < 4 {
            return Err(AerologError::InvalidScoringParameter(
                "max_candidate_points must be >= 4".into(),
            ));
        }
        match p.triangle_closing {
            TriangleClosing::MaxGapKm(km) if km <= 0.0 => {
                return Err(AerologError::InvalidScoringParameter(
                    "triangle closing gap must be > 0 km".into(),
                ));
            }
            TriangleClosing::FractionOfPerimeter(f) if !(0.0..1.0).contains(&f) || f == 0.0 => {
                return Err(AerologError::InvalidScoringParameter(
                    "triangle closing fraction must be in (0, 1)".into(),
                ));
            }
            _ => {}
        }
        if !(p.triangle_min_leg_fraction > 0.0 && p.triangle_min_leg_fraction <= 1.0 / 3.0) {
            return Err(AerologError::InvalidScoringParameter(
                "triangle_min_leg_fraction must be in (0, 1/3]".into(),
            ));
        }

        Ok(self.params)
    }
}

/// Wall-clock budget for the combinatorial searches.
///
/// `None` deadline means unbounded; results are then fully deterministic for
/// a given track and configuration.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchBudget {
    deadline: Option<Instant>,
}

impl SearchBudget {
    pub(crate) fn start(budget_ms: u64) -> Self {
        let deadline = if budget_ms == 0 {
            None
        } else {
            Some(Instant::now() + Duration::from_millis(budget_ms))
        };
        SearchBudget { deadline }
    }

    #[inline]
    pub(crate) fn exceeded(&self) -> bool {
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}

/// Score a normalized track.
///
/// Computes the straight distance, the optimal free-distance route, the best
/// FAI triangle (if any closes), and the rule score. The input track is never
/// mutated; scoring is pure apart from the optional wall-clock budget.
///
/// Arguments
/// ---------
/// * `track`: the normalized track of one flight
/// * `params`: scoring configuration, see [`ScoringParams`]
/// * `rule`: the competition formula, see [`ScoringRule`]
///
/// Return
/// ------
/// * the [`ScoreResult`] together with any non-fatal warnings
///
/// Failure modes
/// -------------
/// * Fewer than 3 points: triangle absent, free distance degenerates to the
///   straight distance, [`AnalysisWarning::InsufficientPoints`] is reported.
/// * Budget expiry: best-so-far results flagged approximate,
///   [`AnalysisWarning::SearchBudgetExceeded`] is reported.
pub fn score(
    track: &[NormalizedTrackPoint],
    params: &ScoringParams,
    rule: &ScoringRule,
) -> (ScoreResult, Vec<AnalysisWarning>) {
    let mut warnings = Vec::new();

    let straight_distance = match (track.first(), track.last()) {
        (Some(first), Some(last)) => distance(first.position(), last.position()),
        _ => 0.0,
    };

    if track.len() < 3 {
        warnings.push(AnalysisWarning::InsufficientPoints);
        let free = FreeDistance::Exact(straight_distance);
        let olc_score = rule.score(free.km(), None, track.average_speed());
        let result = ScoreResult {
            straight_distance,
            free_distance: free,
            free_route: track.iter().map(|p| p.position()).collect(),
            olc_score,
            fai_triangle: None,
        };
        return (result, warnings);
    }

    let candidates: Vec<GeoPoint> = select_candidates(track, params.max_candidate_points);
    let matrix = DistanceMatrix::from_points(&candidates);
    let budget = SearchBudget::start(params.search_time_budget_ms);

    let free = free_distance::optimize(&candidates, &matrix, params, &budget);
    let triangle = triangle::search(&candidates, &matrix, params, &budget);

    let truncated = free.truncated || triangle.truncated;
    if truncated {
        debug!(
            "score: search budget of {} ms exceeded, returning best-so-far",
            params.search_time_budget_ms
        );
        warnings.push(AnalysisWarning::SearchBudgetExceeded);
    }

    // The single-leg route first→last is always in the search space, so the
    // optimizer result can never undercut the straight distance.
    let free_km = free.distance.max(straight_distance);
    let free_distance = if truncated {
        FreeDistance::Approximate(free_km)
    } else {
        FreeDistance::Exact(free_km)
    };

    let olc_score = rule.score(
        free_distance.km(),
        triangle.triangle.as_ref(),
        track.average_speed(),
    );

    let result = ScoreResult {
        straight_distance,
        free_distance,
        free_route: free.route,
        olc_score,
        fai_triangle: triangle.triangle,
    };
    (result, warnings)
}
