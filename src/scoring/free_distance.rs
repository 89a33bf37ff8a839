//! # Free-distance route optimization
//!
//! Finds the ordered subsequence of candidate turnpoints that maximizes the
//! summed leg distance – the "free distance" of competition scoring. The
//! problem is a longest-path search over track indices weighted by pairwise
//! great-circle distance.
//!
//! ## Algorithm
//!
//! A dynamic program over the candidate set: with `L = max_turnpoints + 1`
//! legs,
//!
//! ```text
//! dp[k][i] = best distance of a k-leg route ending at candidate i
//!          = max over j < i of dp[k-1][j] + dist(j, i)
//! ```
//!
//! The answer is the maximum over all leg counts `k ≤ L` and endpoints `i`,
//! so shorter routes are never beaten by a forced vertex count. Complexity is
//! `O(L·N²)` on the reduced candidate set – exhaustive search over the raw
//! track would be combinatorial, which is why candidates are downsampled
//! first (see [`crate::scoring::candidates`]).
//!
//! Ties resolve towards the earliest candidate indices, so the result is
//! deterministic for a given track and configuration.

use crate::constants::{Kilometer, Turnpoints};
use crate::geodesy::GeoPoint;
use crate::scoring::candidates::DistanceMatrix;
use crate::scoring::{ScoringParams, SearchBudget};

/// Outcome of the free-distance search.
pub(crate) struct FreeDistanceSearch {
    /// Total route distance in kilometers.
    pub distance: Kilometer,
    /// Route vertices in flight order (endpoints included).
    pub route: Turnpoints,
    /// Whether the search hit the wall-clock budget before completing.
    pub truncated: bool,
}

/// Run the free-distance dynamic program over the candidate set.
///
/// Arguments
/// ---------
/// * `candidates`: reduced candidate positions, in track order
/// * `matrix`: precomputed pairwise distances over `candidates`
/// * `params`: scoring configuration (`max_turnpoints` is read here)
/// * `budget`: wall-clock budget; on expiry the best-so-far route is returned
///
/// Return
/// ------
/// * the optimal (or best-so-far) route and its distance
pub(crate) fn optimize(
    candidates: &[GeoPoint],
    matrix: &DistanceMatrix,
    params: &ScoringParams,
    budget: &SearchBudget,
) -> FreeDistanceSearch {
    let n = matrix.len();
    if n < 2 {
        return FreeDistanceSearch {
            distance: 0.0,
            route: candidates.iter().copied().collect(),
            truncated: false,
        };
    }

    let legs = params.max_turnpoints + 1;

    // dp[k][i]: best k-leg distance ending at i; parent[k][i]: predecessor.
    let mut dp = vec![vec![0.0_f64; n]; legs + 1];
    let mut parent = vec![vec![usize::MAX; n]; legs + 1];

    let mut best = (0.0_f64, 0usize, 0usize); // (distance, legs, endpoint)
    let mut truncated = false;

    'outer: for k in 1..=legs {
        for i in 1..n {
            if budget.exceeded() {
                truncated = true;
                break 'outer;
            }
            let mut row_best = f64::NEG_INFINITY;
            let mut row_parent = usize::MAX;
            for j in 0..i {
                let reach = dp[k - 1][j] + matrix.dist(j, i);
                if reach > row_best {
                    row_best = reach;
                    row_parent = j;
                }
            }
            dp[k][i] = row_best;
            parent[k][i] = row_parent;

            if row_best > best.0 {
                best = (row_best, k, i);
            }
        }
    }

    let (distance, best_legs, endpoint) = best;

    // Walk the parent chain back to the route start.
    let mut indices = Vec::with_capacity(best_legs + 1);
    let mut k = best_legs;
    let mut i = endpoint;
    indices.push(i);
    while k > 0 && parent[k][i] != usize::MAX {
        i = parent[k][i];
        indices.push(i);
        k -= 1;
    }
    indices.reverse();

    FreeDistanceSearch {
        distance,
        route: indices.into_iter().map(|i| candidates[i]).collect(),
        truncated,
    }
}
