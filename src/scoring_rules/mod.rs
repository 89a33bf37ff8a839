//! # Competition scoring rules
//!
//! Free-flight federations score the same flown route differently, and the
//! coefficients move season to season. This module keeps the formula a
//! **pluggable strategy** so the engine never hardcodes one federation's
//! weights.
//!
//! ## Public API
//!
//! ### [`ScoringRule`]
//! Enumeration of the supported rule sets:
//!
//! - `ScoringRule::Olc` – Online Contest style: the score is the free
//!   distance itself.
//! - `ScoringRule::XContest` – route-type coefficients: a closed FAI
//!   triangle multiplies its perimeter by 1.4 and wins when that beats the
//!   free distance.
//! - `ScoringRule::Custom` – explicit linear weights over free distance and
//!   average speed for local leagues and experiments.
//!
//! You can create a [`ScoringRule`] from a string with:
//!
//! ```rust
//! use aerolog::scoring_rules::ScoringRule;
//! let rule: ScoringRule = "xcontest".parse().unwrap();
//! ```
//!
//! ## Determinism
//!
//! [`ScoringRule::score`] is a pure function of its inputs: the same
//! (free distance, triangle, average speed, rule) always produces the same
//! score, which ranking collaborators rely on.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::aerolog_errors::AerologError;
use crate::constants::{Kilometer, KilometersPerHour};
use crate::scoring::score_result::FaiTriangle;

/// FAI-triangle coefficient applied by the XContest rule.
const XCONTEST_FAI_FACTOR: f64 = 1.4;

/// Pluggable competition scoring formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScoringRule {
    /// Online Contest style: score equals the free distance.
    Olc,
    /// XContest style: best of free distance and 1.4 × FAI triangle perimeter.
    XContest,
    /// Linear combination for custom leagues:
    /// `distance_factor × free_km + speed_factor × avg_speed_kmh`.
    Custom {
        distance_factor: f64,
        speed_factor: f64,
    },
}

impl Default for ScoringRule {
    fn default() -> Self {
        ScoringRule::Olc
    }
}

impl ScoringRule {
    /// Compute the rule score of one flight.
    ///
    /// Arguments
    /// ---------
    /// * `free_km`: free distance of the optimal turnpoint route
    /// * `triangle`: best closed FAI triangle, if any
    /// * `avg_speed`: mean ground speed over the flight, km/h
    ///
    /// Return
    /// ------
    /// * the score in points (km-equivalent for the built-in rules)
    pub fn score(
        &self,
        free_km: Kilometer,
        triangle: Option<&FaiTriangle>,
        avg_speed: KilometersPerHour,
    ) -> f64 {
        match self {
            ScoringRule::Olc => free_km,
            ScoringRule::XContest => {
                let triangle_points = triangle
                    .map(|t| t.score * XCONTEST_FAI_FACTOR)
                    .unwrap_or(0.0);
                free_km.max(triangle_points)
            }
            ScoringRule::Custom {
                distance_factor,
                speed_factor,
            } => distance_factor * free_km + speed_factor * avg_speed,
        }
    }
}

impl FromStr for ScoringRule {
    type Err = AerologError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "olc" => Ok(ScoringRule::Olc),
            "xcontest" => Ok(ScoringRule::XContest),
            other => Err(AerologError::InvalidScoringParameter(format!(
                "unknown scoring rule: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for ScoringRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringRule::Olc => write!(f, "OLC"),
            ScoringRule::XContest => write!(f, "XContest"),
            ScoringRule::Custom {
                distance_factor,
                speed_factor,
            } => write!(f, "custom({distance_factor} × km + {speed_factor} × km/h)"),
        }
    }
}
