//! # Aerolog: engine façade
//!
//! This module defines the [`Aerolog`] struct, the central façade that wires together:
//!
//! 1. **Terrain collaborator** – the [`ElevationModel`](crate::elevation::ElevationModel)
//!    consulted for the AGL channel during normalization.
//! 2. **Scoring configuration** – one validated [`ScoringParams`](crate::scoring::ScoringParams)
//!    shared by every analysis.
//! 3. **Competition rule** – the [`ScoringRule`](crate::scoring_rules::ScoringRule)
//!    applied to the optimized distances.
//!
//! The façade exists so the upload collaborator configures the engine once
//! and then feeds it raw tracks; per-flight analyses share no mutable state
//! and are safe to run from parallel workers.
//!
//! ## Typical usage
//!
//! ```rust
//! use aerolog::aerolog::Aerolog;
//! use aerolog::elevation::ConstantElevation;
//! use aerolog::track::RawTrackPoint;
//!
//! let engine = Aerolog::new(ConstantElevation(450.0));
//!
//! let raw = vec![
//!     RawTrackPoint::new(45.89, 6.12, 1_721_469_900.0, 1200.0),
//!     RawTrackPoint::new(45.92, 6.15, 1_721_470_500.0, 1650.0),
//!     RawTrackPoint::new(45.90, 6.20, 1_721_471_100.0, 1420.0),
//! ];
//!
//! let analysis = engine.analyze(&raw).unwrap();
//! println!("{}", analysis.score);
//! ```
//!
//! ## See also
//!
//! * [`FlightAnalysis::from_raw_track`](crate::flight::FlightAnalysis) – the underlying pipeline.
//! * [`analyze_all`](crate::flight::analyze_all) – batch driver with failure isolation.
//! * [`FlightRepository`](crate::flight_store::FlightRepository) – the persistence seam.

use std::sync::Arc;

use crate::aerolog_errors::AerologError;
use crate::constants::{FlightId, RawTrack};
use crate::elevation::ElevationModel;
use crate::flight::{analyze_all, FlightAnalysis, FullAnalysisResult};
use crate::scoring::ScoringParams;
use crate::scoring_rules::ScoringRule;
use crate::track::RawTrackPoint;

/// The configured analysis engine.
///
/// Cheap to clone: the elevation model is shared behind an `Arc`, the
/// parameters are plain values.
#[derive(Clone)]
pub struct Aerolog {
    elevation: Arc<dyn ElevationModel>,
    params: ScoringParams,
    rule: ScoringRule,
}

impl Aerolog {
    /// Construct an engine with default scoring configuration.
    ///
    /// Arguments
    /// -----------------
    /// * `elevation`: the terrain collaborator used for AGL derivation.
    ///
    /// Return
    /// ----------
    /// * A new [`Aerolog`] using [`ScoringParams::default`] and the OLC rule.
    pub fn new(elevation: impl ElevationModel + 'static) -> Self {
        Aerolog {
            elevation: Arc::new(elevation),
            params: ScoringParams::default(),
            rule: ScoringRule::default(),
        }
    }

    /// Replace the scoring parameters.
    pub fn with_params(mut self, params: ScoringParams) -> Self {
        self.params = params;
        self
    }

    /// Replace the competition rule.
    pub fn with_rule(mut self, rule: ScoringRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    pub fn rule(&self) -> &ScoringRule {
        &self.rule
    }

    /// Analyze one uploaded raw track.
    ///
    /// Return
    /// ----------
    /// * The immutable [`FlightAnalysis`], or the fatal [`AerologError`]
    ///   surfaced to the uploader.
    pub fn analyze(&self, raw: &[RawTrackPoint]) -> Result<FlightAnalysis, AerologError> {
        FlightAnalysis::from_raw_track(raw, self.elevation.as_ref(), &self.params, &self.rule)
    }

    /// Analyze a whole batch with per-flight failure isolation.
    pub fn analyze_batch(&self, flights: &[(FlightId, RawTrack)]) -> FullAnalysisResult {
        analyze_all(flights, self.elevation.as_ref(), &self.params, &self.rule)
    }
}

impl std::fmt::Debug for Aerolog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aerolog")
            .field("params", &self.params)
            .field("rule", &self.rule)
            .finish_non_exhaustive()
    }
}
