//! Candidate turnpoint reduction and pairwise distance precomputation.
//!
//! Both optimizers run on a reduced, deterministic candidate set: a track of
//! thousands of fixes is downsampled with a fixed stride to at most
//! `max_candidate_points` positions, always retaining the first and last fix.
//! Exhaustive search over the reduced set is exact *on that set*; the result
//! is a lower bound for the full track whose error shrinks with candidate
//! density.

use crate::constants::Kilometer;
use crate::geodesy::{distance, GeoPoint};
use crate::track::NormalizedTrackPoint;

/// Deterministically downsample a track to at most `max_candidates` positions.
///
/// A fixed stride keeps every n-th fix; the last fix is always appended so
/// routes can end where the flight ended.
pub(crate) fn select_candidates(
    track: &[NormalizedTrackPoint],
    max_candidates: usize,
) -> Vec<GeoPoint> {
    let n = track.len();
    if n <= max_candidates {
        return track.iter().map(|p| p.position()).collect();
    }

    // Stride chosen so that the strided walk plus the forced last fix stays
    // within the bound.
    let stride = n.div_ceil(max_candidates - 1);
    let mut candidates: Vec<GeoPoint> = track
        .iter()
        .step_by(stride)
        .map(|p| p.position())
        .collect();

    if (n - 1) % stride != 0 {
        candidates.push(track[n - 1].position());
    }
    candidates
}

/// Dense symmetric matrix of pairwise great-circle distances.
pub(crate) struct DistanceMatrix {
    n: usize,
    d: Vec<Kilometer>,
}

impl DistanceMatrix {
    /// Precompute all pairwise distances for the candidate set.
    pub(crate) fn from_points(points: &[GeoPoint]) -> Self {
        let n = points.len();
        let mut d = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let dist = distance(points[i], points[j]);
                d[i * n + j] = dist;
                d[j * n + i] = dist;
            }
        }
        DistanceMatrix { n, d }
    }

    #[inline]
    pub(crate) fn dist(&self, i: usize, j: usize) -> Kilometer {
        self.d[i * self.n + j]
    }

    pub(crate) fn len(&self) -> usize {
        self.n
    }

    /// For a fixed `i`, the suffix minima of `dist(i, m)` over `m ∈ [k, n)`.
    ///
    /// `suffix[k]` answers "how close does the track come back to candidate
    /// `i` at or after candidate `k`" in O(1) during the triangle scan.
    pub(crate) fn suffix_min_row(&self, i: usize) -> Vec<Kilometer> {
        let mut suffix = vec![f64::INFINITY; self.n];
        let mut best = f64::INFINITY;
        for m in (0..self.n).rev() {
            best = best.min(self.dist(i, m));
            suffix[m] = best;
        }
        suffix
    }
}
