mod common;

use aerolog::aerolog::Aerolog;
use aerolog::aerolog_errors::{AerologError, AnalysisWarning};
use aerolog::constants::FlightId;
use aerolog::elevation::{ConstantElevation, ElevationError, ElevationModel, GridElevation};
use aerolog::flight_store::{FlightRepository, InMemoryFlightStore};
use aerolog::scoring::ScoringParams;
use aerolog::scoring_rules::ScoringRule;
use aerolog::track::RawTrackPoint;

use common::{fai_triangle_track, fix_at, line_track, FIX_INTERVAL};

fn engine() -> Aerolog {
    Aerolog::new(ConstantElevation(450.0))
}

#[test]
fn aggregator_is_idempotent() {
    let raw = fai_triangle_track();
    let engine = engine();

    let first = engine.analyze(&raw).unwrap();
    let second = engine.analyze(&raw).unwrap();

    // Identical raw input must reproduce the identical analysis, field by
    // field: scores feed rankings and must not drift between recomputations.
    assert_eq!(first, second);
}

#[test]
fn duplicate_timestamps_collapse_to_the_first_fix() {
    let mut raw = line_track();
    // Re-emit the 10th fix with the same timestamp but a different altitude.
    let mut replayed = raw[10];
    replayed.altitude = Some(9_999.0);
    raw.insert(11, replayed);

    let analysis = engine().analyze(&raw).unwrap();

    assert_eq!(analysis.track.len(), line_track().len());
    assert!(analysis.track.iter().all(|p| p.altitude < 9_000.0));
    assert!(analysis
        .warnings
        .contains(&AnalysisWarning::PointsDropped(1)));
}

#[test]
fn out_of_order_fix_is_dropped_not_fatal() {
    let mut raw = line_track();
    // A stale fix replayed two intervals in the past.
    raw.push(fix_at(50.0, 0.0, 5.0 * FIX_INTERVAL, 1_500.0));

    let analysis = engine().analyze(&raw).unwrap();
    assert!(analysis
        .warnings
        .contains(&AnalysisWarning::PointsDropped(1)));
    assert!(analysis
        .track
        .windows(2)
        .all(|w| w[1].timestamp > w[0].timestamp));
}

#[test]
fn single_fix_upload_is_not_an_error() {
    let raw = vec![RawTrackPoint::new(45.89, 6.12, 1_721_469_900.0, 1_200.0)];
    let analysis = engine().analyze(&raw).unwrap();

    assert_eq!(analysis.track.len(), 1);
    assert_eq!(analysis.track[0].speed, 0.0);
    assert_eq!(analysis.track[0].climb_rate, 0.0);
    assert_eq!(analysis.score.straight_distance, 0.0);
    assert!(analysis.score.fai_triangle.is_none());
    assert!(analysis
        .warnings
        .contains(&AnalysisWarning::InsufficientPoints));
}

#[test]
fn timestampless_upload_is_surfaced_to_the_uploader() {
    let raw = vec![
        RawTrackPoint::from_position(45.89, 6.12),
        RawTrackPoint::from_position(45.90, 6.13),
    ];

    assert!(matches!(
        engine().analyze(&raw),
        Err(AerologError::MalformedTrack(_))
    ));
}

#[test]
fn broken_elevation_collaborator_degrades_agl() {
    struct Down;
    impl ElevationModel for Down {
        fn lookup_elevation(&self, _lat: f64, _lon: f64) -> Result<f64, ElevationError> {
            Err(ElevationError::ProviderUnavailable("dem tiles offline".into()))
        }
    }

    let analysis = Aerolog::new(Down).analyze(&line_track()).unwrap();

    assert!(analysis.is_degraded());
    assert!(analysis
        .warnings
        .iter()
        .any(|w| matches!(w, AnalysisWarning::ElevationUnavailable(_))));
    // AGL falls back to altitude above sea level.
    assert!(analysis.track.iter().all(|p| p.agl == p.altitude));
}

#[test]
fn grid_elevation_feeds_the_agl_channel() {
    // Gentle slope rising eastwards under the flight line.
    let grid = GridElevation::new(-0.5, -0.5, 0.5, 3, 3, vec![
        0.0, 250.0, 500.0, //
        0.0, 250.0, 500.0, //
        0.0, 250.0, 500.0,
    ])
    .unwrap();

    let raw = vec![
        fix_at(0.0, 0.0, 0.0, 1_000.0),
        fix_at(20.0, 0.0, 600.0, 1_000.0),
    ];
    let analysis = Aerolog::new(grid).analyze(&raw).unwrap();

    assert!(analysis.warnings.is_empty());
    assert!(analysis.track[1].terrain_altitude > analysis.track[0].terrain_altitude);
    assert!(analysis.track[1].agl < analysis.track[0].agl);
}

#[test]
fn batch_isolates_malformed_flights() {
    let flights = vec![
        (FlightId::Int(101), fai_triangle_track()),
        (
            FlightId::Int(102),
            vec![RawTrackPoint::from_position(0.0, 0.0)],
        ),
        (FlightId::Int(103), line_track()),
    ];

    let results = engine().analyze_batch(&flights);

    assert_eq!(results.len(), 3);
    assert!(results[&FlightId::Int(101)].is_ok());
    assert!(results[&FlightId::Int(102)].is_err());
    assert!(results[&FlightId::Int(103)].is_ok());
}

#[test]
fn analyses_round_trip_through_the_store() {
    let engine = engine();
    let mut store = InMemoryFlightStore::new();

    let analysis = engine.analyze(&fai_triangle_track()).unwrap();
    let id = FlightId::from("2024-07-20-annecy");
    store.insert(id.clone(), analysis.clone());

    let stored = store.get(&id).unwrap();
    assert_eq!(*stored, analysis);
    assert_eq!(store.ids(), vec![id.clone()]);

    store.remove(&id).unwrap();
    assert_eq!(
        store.get(&id).unwrap_err(),
        AerologError::FlightNotFound(id)
    );
}

#[test]
fn stats_match_the_scored_track() {
    let analysis = engine().analyze(&fai_triangle_track()).unwrap();
    let stats = &analysis.stats;

    assert_eq!(stats.takeoff_altitude, 1_800.0);
    assert_eq!(stats.max_altitude, 2_200.0);
    assert!(stats.altitude_gain >= 400.0);
    assert!(stats.max_sink_rate <= 0.0);
    assert!(stats.avg_speed > 0.0);
    // The flown ground distance can only exceed the optimized route.
    assert!(stats.total_distance >= analysis.score.free_distance.km() - 1e-9);
    assert_eq!(
        stats.duration_label,
        aerolog::time::format_duration(stats.duration_minutes)
    );
}

#[test]
fn custom_rule_changes_only_the_score() {
    let raw = line_track();
    let base = engine().analyze(&raw).unwrap();
    let custom = engine()
        .with_rule(ScoringRule::Custom {
            distance_factor: 2.0,
            speed_factor: 0.0,
        })
        .analyze(&raw)
        .unwrap();

    assert_eq!(base.track, custom.track);
    assert_eq!(
        base.score.free_distance.km(),
        custom.score.free_distance.km()
    );
    assert!((custom.score.olc_score - 2.0 * base.score.olc_score).abs() < 1e-9);
}

#[test]
fn denser_candidate_sets_refine_the_free_distance() {
    let raw = fai_triangle_track();
    let coarse_params = ScoringParams::builder()
        .max_candidate_points(16)
        .build()
        .unwrap();

    let coarse = engine()
        .with_params(coarse_params)
        .analyze(&raw)
        .unwrap();
    let dense = engine().analyze(&raw).unwrap();

    // The coarse result is a lower bound of the dense one.
    assert!(coarse.score.free_distance.km() <= dense.score.free_distance.km() + 1e-9);
}
