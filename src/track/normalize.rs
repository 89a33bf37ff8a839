//! # Track Normalizer
//!
//! Turns the raw fix sequence of one upload into the clean, monotonic
//! [`Track`](crate::constants::Track) every downstream consumer reads.
//!
//! ## Pipeline
//!
//! 1. **Validation** – empty input and out-of-range coordinates are fatal.
//! 2. **Timestamp triage** – fixes without a usable timestamp are dropped; a
//!    track with no timestamp at all is [`MalformedTrack`](crate::aerolog_errors::AerologError::MalformedTrack).
//! 3. **Stable sort** by timestamp (uploads are usually ordered already; GPS
//!    loggers occasionally interleave fixes after a signal loss).
//! 4. **Deduplication** – for each consecutive pair, Δt ≤ 0 drops the later
//!    fix. Out-of-order noise never fails a whole track.
//! 5. **Derivation** – leg speed from great-circle distance over Δt, climb
//!    rate from the altitude delta, AGL from the elevation collaborator.
//!
//! Missing altitudes carry the last known value forward (zero before the first
//! known one), so a barometric dropout reads as level flight rather than a
//! spike.
//!
//! ## Degraded mode
//!
//! When the elevation collaborator fails, the whole track falls back to
//! `terrain_altitude = 0` / `agl = altitude` and the normalizer reports
//! [`AnalysisWarning::ElevationUnavailable`]. This is never fatal.

use log::{debug, warn};

use crate::aerolog_errors::{AerologError, AnalysisWarning};
use crate::constants::{Meter, Track, SECONDS_PER_HOUR};
use crate::elevation::ElevationModel;
use crate::geodesy::{distance, GeoPoint};
use crate::time::time_label;
use crate::track::{NormalizedTrackPoint, RawTrackPoint};

/// Normalize a raw fix sequence into derived telemetry samples.
///
/// Arguments
/// ---------
/// * `raw`: the ordered (or nearly ordered) raw fixes of one upload, ≥ 1
/// * `elevation`: terrain collaborator used for the AGL channel
///
/// Return
/// ------
/// * the normalized track together with any non-fatal warnings, or an
///   [`AerologError`] when the upload is unusable
///
/// Edge cases
/// ----------
/// * A single-fix track yields one sample with `speed = 0` and
///   `climb_rate = 0`, not an error.
/// * Fixes sharing a timestamp collapse to the first one.
/// * Large time gaps are kept as-is (one slow leg); the normalizer does not
///   split tracks at signal losses.
pub fn normalize(
    raw: &[RawTrackPoint],
    elevation: &dyn ElevationModel,
) -> Result<(Track, Vec<AnalysisWarning>), AerologError> {
    if raw.is_empty() {
        return Err(AerologError::EmptyTrack);
    }

    for (index, point) in raw.iter().enumerate() {
        if !point.position().in_bounds() {
            return Err(AerologError::InvalidCoordinates {
                index,
                lat: point.lat,
                lon: point.lon,
            });
        }
    }

    let mut warnings = Vec::new();
    let mut dropped = 0usize;

    // Timestamp triage: a fix without a finite timestamp cannot be ordered.
    let mut timed: Vec<(f64, &RawTrackPoint)> = Vec::with_capacity(raw.len());
    for point in raw {
        match point.timestamp {
            Some(t) if t.is_finite() => timed.push((t, point)),
            _ => dropped += 1,
        }
    }
    if timed.is_empty() {
        return Err(AerologError::MalformedTrack(
            "no usable timestamps in track".to_string(),
        ));
    }

    timed.sort_by(|a, b| a.0.total_cmp(&b.0));

    // Collapse non-increasing timestamps, keeping the earlier fix.
    let mut kept: Vec<(f64, &RawTrackPoint)> = Vec::with_capacity(timed.len());
    for (t, point) in timed {
        match kept.last() {
            Some(&(prev_t, _)) if t <= prev_t => dropped += 1,
            _ => kept.push((t, point)),
        }
    }

    if dropped > 0 {
        debug!("normalize: dropped {dropped} unusable fixes out of {}", raw.len());
        warnings.push(AnalysisWarning::PointsDropped(dropped));
    }

    // Altitude carry-forward, then one batched terrain profile lookup.
    let mut altitudes: Vec<Meter> = Vec::with_capacity(kept.len());
    let mut last_altitude = 0.0;
    for (_, point) in &kept {
        if let Some(alt) = point.altitude {
            last_altitude = alt;
        }
        altitudes.push(last_altitude);
    }

    let positions: Vec<GeoPoint> = kept.iter().map(|(_, p)| p.position()).collect();
    let terrain: Vec<Meter> = match elevation.lookup_profile(&positions) {
        Ok(profile) => profile,
        Err(e) => {
            warn!("normalize: elevation collaborator failed, AGL degraded: {e}");
            warnings.push(AnalysisWarning::ElevationUnavailable(e.to_string()));
            vec![0.0; kept.len()]
        }
    };

    let mut track = Track::with_capacity(kept.len());
    for (i, &(timestamp, point)) in kept.iter().enumerate() {
        let altitude = altitudes[i];

        let (speed, climb_rate) = if i == 0 {
            (0.0, 0.0)
        } else {
            let dt = timestamp - kept[i - 1].0;
            let leg_km = distance(positions[i - 1], positions[i]);
            let speed = leg_km / (dt / SECONDS_PER_HOUR);
            let climb = (altitude - altitudes[i - 1]) / dt;
            (speed, climb)
        };

        track.push(NormalizedTrackPoint {
            timestamp,
            time_label: time_label(timestamp),
            lat: point.lat,
            lon: point.lon,
            altitude,
            terrain_altitude: terrain[i],
            agl: (altitude - terrain[i]).max(0.0),
            speed,
            climb_rate,
        });
    }

    Ok((track, warnings))
}

#[cfg(test)]
mod normalize_test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::elevation::ConstantElevation;

    fn flat() -> ConstantElevation {
        ConstantElevation(0.0)
    }

    #[test]
    fn test_empty_track_is_fatal() {
        assert_eq!(normalize(&[], &flat()), Err(AerologError::EmptyTrack));
    }

    #[test]
    fn test_no_timestamps_is_malformed() {
        let raw = vec![
            RawTrackPoint::from_position(45.0, 6.0),
            RawTrackPoint::from_position(45.1, 6.1),
        ];
        assert!(matches!(
            normalize(&raw, &flat()),
            Err(AerologError::MalformedTrack(_))
        ));
    }

    #[test]
    fn test_out_of_range_coordinates_are_fatal() {
        let raw = vec![RawTrackPoint::new(95.0, 6.0, 0.0, 1000.0)];
        assert_eq!(
            normalize(&raw, &flat()),
            Err(AerologError::InvalidCoordinates {
                index: 0,
                lat: 95.0,
                lon: 6.0
            })
        );
    }

    #[test]
    fn test_single_point_yields_zero_rates() {
        let raw = vec![RawTrackPoint::new(45.89, 6.12, 1_721_469_930.0, 1200.0)];
        let (track, warnings) = normalize(&raw, &flat()).unwrap();

        assert_eq!(track.len(), 1);
        assert!(warnings.is_empty());
        assert_eq!(track[0].speed, 0.0);
        assert_eq!(track[0].climb_rate, 0.0);
        assert_eq!(track[0].time_label, "10:05:30");
    }

    #[test]
    fn test_duplicate_timestamp_keeps_first() {
        let raw = vec![
            RawTrackPoint::new(45.0, 6.00, 100.0, 1000.0),
            RawTrackPoint::new(45.0, 6.01, 100.0, 1500.0),
            RawTrackPoint::new(45.0, 6.02, 110.0, 1020.0),
        ];
        let (track, warnings) = normalize(&raw, &flat()).unwrap();

        assert_eq!(track.len(), 2);
        assert_eq!(track[0].lon, 6.00);
        assert_eq!(track[0].altitude, 1000.0);
        assert_eq!(warnings, vec![AnalysisWarning::PointsDropped(1)]);
    }

    #[test]
    fn test_out_of_order_fix_is_dropped_not_fatal() {
        let raw = vec![
            RawTrackPoint::new(45.0, 6.00, 100.0, 1000.0),
            RawTrackPoint::new(45.0, 6.01, 110.0, 1010.0),
            // stale fix replayed by the logger
            RawTrackPoint::new(45.0, 6.02, 105.0, 1005.0),
            RawTrackPoint::new(45.0, 6.03, 120.0, 1020.0),
        ];
        let (track, warnings) = normalize(&raw, &flat()).unwrap();

        // The stale fix sorts between its neighbours and collapses into the
        // 110 s sample; the rest of the track survives.
        assert_eq!(track.len(), 3);
        assert!(warnings.contains(&AnalysisWarning::PointsDropped(1)));
        assert!(track.windows(2).all(|w| w[1].timestamp > w[0].timestamp));
    }

    #[test]
    fn test_speed_and_climb_derivation() {
        // Two fixes one minute apart, one degree of longitude on the equator.
        let raw = vec![
            RawTrackPoint::new(0.0, 0.0, 0.0, 1000.0),
            RawTrackPoint::new(0.0, 1.0, 3600.0, 1180.0),
        ];
        let (track, _) = normalize(&raw, &flat()).unwrap();

        let leg_km = distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert_relative_eq!(track[1].speed, leg_km, epsilon = 1e-9);
        assert_relative_eq!(track[1].climb_rate, 180.0 / 3600.0, epsilon = 1e-12);
    }

    #[test]
    fn test_agl_floor_and_terrain() {
        let raw = vec![
            RawTrackPoint::new(45.0, 6.0, 0.0, 800.0),
            RawTrackPoint::new(45.0, 6.1, 60.0, 1200.0),
        ];
        let (track, warnings) = normalize(&raw, &ConstantElevation(1000.0)).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(track[0].terrain_altitude, 1000.0);
        // below terrain reading floors at zero
        assert_eq!(track[0].agl, 0.0);
        assert_eq!(track[1].agl, 200.0);
    }

    #[test]
    fn test_missing_altitude_carries_forward() {
        let mut second = RawTrackPoint::new(45.0, 6.1, 60.0, 0.0);
        second.altitude = None;
        let raw = vec![RawTrackPoint::new(45.0, 6.0, 0.0, 1200.0), second];

        let (track, _) = normalize(&raw, &flat()).unwrap();
        assert_eq!(track[1].altitude, 1200.0);
        assert_eq!(track[1].climb_rate, 0.0);
    }

    #[test]
    fn test_elevation_failure_degrades() {
        use crate::elevation::{ElevationError, ElevationModel};
        struct Broken;
        impl ElevationModel for Broken {
            fn lookup_elevation(
                &self,
                _lat: f64,
                _lon: f64,
            ) -> Result<f64, ElevationError> {
                Err(ElevationError::ProviderUnavailable("tile server down".into()))
            }
        }

        let raw = vec![RawTrackPoint::new(45.0, 6.0, 0.0, 1200.0)];
        let (track, warnings) = normalize(&raw, &Broken).unwrap();

        assert_eq!(track[0].terrain_altitude, 0.0);
        assert_eq!(track[0].agl, 1200.0);
        assert!(matches!(
            warnings.as_slice(),
            [AnalysisWarning::ElevationUnavailable(_)]
        ));
    }
}
