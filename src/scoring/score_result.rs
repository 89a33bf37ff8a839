//! # Scoring result model
//!
//! This module defines [`ScoreResult`], the value handed to the persistence
//! collaborator for one flight, and [`FreeDistance`], an enum distinguishing
//! the two ways the turnpoint optimizer can finish.
//!
//! ## Variants
//!
//! - **`FreeDistance::Exact`**
//!   The dynamic program ran to completion: the value is optimal on the
//!   reduced candidate set.
//!
//! - **`FreeDistance::Approximate`**
//!   The wall-clock budget expired mid-search: the value is the best route
//!   found so far, a valid lower bound that must not be compared against
//!   exact scores without care.
//!
//! Both variants wrap the route distance in kilometers. Query methods
//! ([`FreeDistance::is_exact`], [`FreeDistance::is_approximate`]) and
//! accessors ([`FreeDistance::km`], [`FreeDistance::into_inner`]) avoid
//! matching on the enum at call sites.
//!
//! ## Invariants
//!
//! * `free_distance ≥ straight_distance ≥ 0` (enforced by the scorer).
//! * A present [`FaiTriangle`] has exactly 3 turnpoints and `score > 0`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{Kilometer, Turnpoints};
use crate::geodesy::GeoPoint;

/// Free distance of one flight, tagged with how the search finished.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FreeDistance {
    /// Optimal on the reduced candidate set.
    Exact(Kilometer),
    /// Best-so-far after budget expiry; a lower bound.
    Approximate(Kilometer),
}

impl FreeDistance {
    /// The route distance in kilometers, regardless of the search outcome.
    pub fn km(&self) -> Kilometer {
        match self {
            FreeDistance::Exact(km) | FreeDistance::Approximate(km) => *km,
        }
    }

    /// Consume the enum and return the inner distance.
    pub fn into_inner(self) -> Kilometer {
        self.km()
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, FreeDistance::Exact(_))
    }

    pub fn is_approximate(&self) -> bool {
        matches!(self, FreeDistance::Approximate(_))
    }
}

impl fmt::Display for FreeDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreeDistance::Exact(km) => write!(f, "{km:.2} km"),
            FreeDistance::Approximate(km) => write!(f, "≥ {km:.2} km (budget hit)"),
        }
    }
}

/// A closed triangle satisfying the FAI proportionality rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaiTriangle {
    /// Triangle perimeter in kilometers.
    pub score: Kilometer,
    /// The three triangle vertices, in flight order.
    pub turnpoints: [GeoPoint; 3],
}

impl fmt::Display for FaiTriangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FAI triangle {:.2} km via {} → {} → {}",
            self.score, self.turnpoints[0], self.turnpoints[1], self.turnpoints[2]
        )
    }
}

/// Competition-style scores of one flight, as persisted on the Flight record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Great-circle distance from first to last fix, in km.
    pub straight_distance: Kilometer,
    /// Optimal turnpoint route distance.
    pub free_distance: FreeDistance,
    /// Vertices of the optimal free-distance route, in flight order.
    pub free_route: Turnpoints,
    /// Rule score under the configured [`ScoringRule`](crate::scoring_rules::ScoringRule).
    pub olc_score: f64,
    /// Best closed FAI triangle, absent when no triple closes.
    pub fai_triangle: Option<FaiTriangle>,
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "straight: {:.2} km", self.straight_distance)?;
        writeln!(f, "free:     {}", self.free_distance)?;
        writeln!(f, "score:    {:.2}", self.olc_score)?;
        match &self.fai_triangle {
            Some(triangle) => writeln!(f, "triangle: {triangle}"),
            None => writeln!(f, "triangle: none"),
        }
    }
}
