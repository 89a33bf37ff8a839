//! # FAI triangle detection
//!
//! Scans the candidate set for the best closed triangle under the FAI
//! proportionality rule: three turnpoints whose shortest leg is at least
//! `triangle_min_leg_fraction` (28 % by default) of the triangle perimeter,
//! flown as a loop that returns within the closing tolerance of the first
//! turnpoint.
//!
//! ## Algorithm
//!
//! Every ordered candidate triple `(i, j, k)` is examined via
//! `tuple_combinations`. The loop-closing test asks whether the track
//! comes back near turnpoint `i` *after* rounding turnpoint `k`; per-row
//! suffix minima over the distance matrix answer that in O(1), so the scan is
//! `O(N³)` with tiny constants on the reduced candidate set.
//!
//! Among all admissible triangles the largest perimeter wins; ties resolve to
//! the lexicographically last triple, which keeps the result deterministic.
//! No admissible triangle is not an error – most flights simply do not close
//! a triangle – so the result is an `Option`.

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::geodesy::GeoPoint;
use crate::scoring::candidates::DistanceMatrix;
use crate::scoring::score_result::FaiTriangle;
use crate::scoring::{ScoringParams, SearchBudget};

/// How many triples to examine between two wall-clock budget checks.
const BUDGET_CHECK_STRIDE: u64 = 1_024;

/// Outcome of the triangle scan.
pub(crate) struct TriangleSearch {
    pub triangle: Option<FaiTriangle>,
    pub truncated: bool,
}

/// Scan the candidate set for the best admissible FAI triangle.
///
/// Arguments
/// ---------
/// * `candidates`: reduced candidate positions, in track order
/// * `matrix`: precomputed pairwise distances over `candidates`
/// * `params`: closing tolerance and minimum leg fraction
/// * `budget`: wall-clock budget; on expiry the best-so-far triangle is kept
///
/// Return
/// ------
/// * the maximal-perimeter admissible triangle, or `None` if no triple
///   closes under the configured rules
pub(crate) fn search(
    candidates: &[GeoPoint],
    matrix: &DistanceMatrix,
    params: &ScoringParams,
    budget: &SearchBudget,
) -> TriangleSearch {
    let n = matrix.len();
    if n < 3 {
        return TriangleSearch {
            triangle: None,
            truncated: false,
        };
    }

    // closing[i][k]: closest return to candidate i at or after candidate k.
    let closing: Vec<Vec<f64>> = (0..n).map(|i| matrix.suffix_min_row(i)).collect();

    let mut best: Option<(OrderedFloat<f64>, [usize; 3])> = None;
    let mut truncated = false;
    let mut examined: u64 = 0;

    for (i, j, k) in (0..n).tuple_combinations() {
        examined += 1;
        if examined % BUDGET_CHECK_STRIDE == 0 && budget.exceeded() {
            truncated = true;
            break;
        }

        let legs = [matrix.dist(i, j), matrix.dist(j, k), matrix.dist(k, i)];
        let perimeter: f64 = legs.iter().sum();
        if perimeter <= 0.0 {
            continue;
        }

        if closing[i][k] > params.triangle_closing.max_gap(perimeter) {
            continue;
        }

        let min_leg = legs.iter().copied().fold(f64::INFINITY, f64::min);
        if min_leg < params.triangle_min_leg_fraction * perimeter {
            continue;
        }

        let key = OrderedFloat(perimeter);
        if best.as_ref().map_or(true, |(top, _)| key >= *top) {
            best = Some((key, [i, j, k]));
        }
    }

    let triangle = best.map(|(perimeter, [i, j, k])| FaiTriangle {
        score: perimeter.into_inner(),
        turnpoints: [candidates[i], candidates[j], candidates[k]],
    });

    TriangleSearch {
        triangle,
        truncated,
    }
}
