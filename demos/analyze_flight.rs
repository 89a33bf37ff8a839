use aerolog::aerolog::Aerolog;
use aerolog::aerolog_errors::AerologError;
use aerolog::elevation::GridElevation;
use aerolog::scoring::ScoringParams;
use aerolog::scoring_rules::ScoringRule;
use aerolog::track::display::TrackDisplayExt;
use aerolog::track::RawTrackPoint;

/// Synthesize a closed triangle flight over a gently sloping valley.
///
/// Arguments
/// -----------------
/// * `fixes_per_leg`: sampling density of each triangle leg.
///
/// Return
/// ----------
/// * The decoded raw fix sequence an IGC parser would hand over.
fn demo_flight(fixes_per_leg: usize) -> Vec<RawTrackPoint> {
    let vertices = [(45.89, 6.12), (46.25, 6.35), (45.89, 6.58), (45.89, 6.12)];
    let mut fixes = Vec::new();
    let mut t = 1_721_469_900.0; // 2024-07-20, 10:05 UTC

    for pair in vertices.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        for s in 0..fixes_per_leg {
            let f = s as f64 / fixes_per_leg as f64;
            // Climb in the first half of each leg, glide in the second.
            let altitude = 1_400.0 + 700.0 * (1.0 - (2.0 * f - 1.0).abs());
            fixes.push(RawTrackPoint::new(
                from.0 + (to.0 - from.0) * f,
                from.1 + (to.1 - from.1) * f,
                t,
                altitude,
            ));
            t += 15.0;
        }
    }
    fixes
}

fn main() -> Result<(), AerologError> {
    env_logger::init();

    // A coarse DEM tile of the demo valley, rising towards the east.
    let dem = GridElevation::new(
        45.5,
        5.9,
        0.45,
        3,
        3,
        vec![
            420.0, 650.0, 980.0, //
            450.0, 700.0, 1_050.0, //
            480.0, 760.0, 1_120.0,
        ],
    )
    .expect("static grid dimensions are consistent");

    let engine = Aerolog::new(dem)
        .with_params(
            ScoringParams::builder()
                .max_turnpoints(4)
                .search_time_budget_ms(2_000)
                .build()?,
        )
        .with_rule(ScoringRule::XContest);

    let raw = demo_flight(120);
    let analysis = engine.analyze(&raw)?;

    println!("=== flight summary ===");
    println!(
        "airtime {}  takeoff {}  landing {}",
        analysis.stats.duration_label,
        analysis.stats.takeoff_time_label,
        analysis.stats.landing_time_label
    );
    println!(
        "alt max {:.0} m  gain {:.0} m  climb max {:+.1} m/s  sink max {:+.1} m/s",
        analysis.stats.max_altitude,
        analysis.stats.altitude_gain,
        analysis.stats.max_climb_rate,
        analysis.stats.max_sink_rate
    );

    println!("\n=== scores ({} rule) ===", engine.rule());
    print!("{}", analysis.score);

    for warning in &analysis.warnings {
        println!("warning: {warning}");
    }

    println!("\n=== telemetry (every 30th fix) ===");
    print!("{}", analysis.track.show().with_stride(30));

    Ok(())
}
