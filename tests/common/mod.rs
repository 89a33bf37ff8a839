//! Shared synthetic track factories for the integration tests.
//!
//! Tracks are built in a local planar frame (kilometers east/north of an
//! origin on the equator) and converted to degrees with the small-angle
//! approximation, which is exact enough below a few hundred kilometers.

use aerolog::track::RawTrackPoint;

/// Kilometers per degree of latitude (and of longitude on the equator).
pub const KM_PER_DEGREE: f64 = 6_371.0088 * std::f64::consts::PI / 180.0;

/// Seconds between two consecutive synthetic fixes.
pub const FIX_INTERVAL: f64 = 30.0;

/// Convert planar (east_km, north_km) offsets to a raw fix.
pub fn fix_at(east_km: f64, north_km: f64, timestamp: f64, altitude: f64) -> RawTrackPoint {
    RawTrackPoint::new(
        north_km / KM_PER_DEGREE,
        east_km / KM_PER_DEGREE,
        timestamp,
        altitude,
    )
}

/// Sample a straight leg between two planar points, `samples` fixes,
/// excluding the destination.
pub fn leg(
    from: (f64, f64),
    to: (f64, f64),
    samples: usize,
    start_time: f64,
    altitude: f64,
) -> Vec<RawTrackPoint> {
    (0..samples)
        .map(|s| {
            let f = s as f64 / samples as f64;
            fix_at(
                from.0 + (to.0 - from.0) * f,
                from.1 + (to.1 - from.1) * f,
                start_time + s as f64 * FIX_INTERVAL,
                altitude,
            )
        })
        .collect()
}

/// A straight 50 km line, 100 fixes.
pub fn line_track() -> Vec<RawTrackPoint> {
    leg((0.0, 0.0), (50.0, 0.0), 100, 0.0, 1_500.0)
}

/// A perfect out-and-back line: origin → 40 km east → origin.
pub fn out_and_back_track() -> Vec<RawTrackPoint> {
    let mut track = leg((0.0, 0.0), (40.0, 0.0), 40, 0.0, 1_500.0);
    let turn_time = track.len() as f64 * FIX_INTERVAL;
    track.extend(leg((40.0, 0.0), (0.0, 0.0), 40, turn_time, 1_500.0));
    track.push(fix_at(0.0, 0.0, turn_time * 2.0, 1_500.0));
    track
}

/// A closed triangle loop with legs of 34, 33 and 33 km (100 km perimeter),
/// flown back to the exact start. Every leg is ≥ 28 % of the perimeter and
/// the closing gap is zero.
pub fn fai_triangle_track() -> Vec<RawTrackPoint> {
    // Planar vertices: |AB| = 34, |BC| = |CA| = 33.
    let a = (0.0, 0.0);
    let b = (34.0, 0.0);
    let c = (17.0, 800.0_f64.sqrt());

    let mut track = leg(a, b, 30, 0.0, 1_800.0);
    let t1 = track.len() as f64 * FIX_INTERVAL;
    track.extend(leg(b, c, 30, t1, 2_200.0));
    let t2 = 2.0 * t1;
    track.extend(leg(c, a, 30, t2, 2_000.0));
    track.push(fix_at(a.0, a.1, 3.0 * t1, 1_800.0));
    track
}
