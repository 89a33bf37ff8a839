mod common;

use approx::assert_relative_eq;

use aerolog::elevation::ConstantElevation;
use aerolog::flight::FlightAnalysis;
use aerolog::scoring::{score, ScoringParams};
use aerolog::scoring_rules::ScoringRule;
use aerolog::track::normalize;

use common::{fai_triangle_track, line_track, out_and_back_track};

fn analyze(raw: &[aerolog::track::RawTrackPoint]) -> FlightAnalysis {
    FlightAnalysis::from_raw_track(
        raw,
        &ConstantElevation(0.0),
        &ScoringParams::default(),
        &ScoringRule::default(),
    )
    .unwrap()
}

#[test]
fn free_distance_dominates_straight_distance() {
    for raw in [line_track(), out_and_back_track(), fai_triangle_track()] {
        let analysis = analyze(&raw);
        let result = &analysis.score;

        assert!(result.straight_distance >= 0.0);
        assert!(
            result.free_distance.km() >= result.straight_distance,
            "free {} < straight {}",
            result.free_distance.km(),
            result.straight_distance
        );
        assert!(result.free_distance.is_exact());
    }
}

#[test]
fn out_and_back_has_zero_straight_distance_and_no_triangle() {
    let analysis = analyze(&out_and_back_track());
    let result = &analysis.score;

    assert_relative_eq!(result.straight_distance, 0.0, epsilon = 1e-9);
    assert!(result.fai_triangle.is_none());

    // The optimal route still turns at the far end.
    assert_relative_eq!(result.free_distance.km(), 80.0, max_relative = 0.01);
}

#[test]
fn closed_equilateral_loop_scores_a_fai_triangle() {
    let analysis = analyze(&fai_triangle_track());
    let triangle = analysis
        .score
        .fai_triangle
        .as_ref()
        .expect("a closed 34/33/33 loop must yield an FAI triangle");

    assert_eq!(triangle.turnpoints.len(), 3);
    assert!(triangle.score > 0.0);
    assert_relative_eq!(triangle.score, 100.0, max_relative = 0.01);
}

#[test]
fn straight_line_yields_no_triangle() {
    let analysis = analyze(&line_track());
    assert!(analysis.score.fai_triangle.is_none());
}

#[test]
fn rule_score_is_deterministic() {
    let (track, _) = normalize(&fai_triangle_track(), &ConstantElevation(0.0)).unwrap();
    let params = ScoringParams::default();

    for rule in [
        ScoringRule::Olc,
        ScoringRule::XContest,
        ScoringRule::Custom {
            distance_factor: 1.2,
            speed_factor: 0.1,
        },
    ] {
        let (first, _) = score(&track, &params, &rule);
        let (second, _) = score(&track, &params, &rule);
        assert_eq!(first.olc_score, second.olc_score);
        assert_eq!(first, second);
    }
}

#[test]
fn xcontest_rewards_the_closed_triangle() {
    let (track, _) = normalize(&fai_triangle_track(), &ConstantElevation(0.0)).unwrap();
    let params = ScoringParams::default();

    let (olc, _) = score(&track, &params, &ScoringRule::Olc);
    let (xcontest, _) = score(&track, &params, &ScoringRule::XContest);

    // 1.4 × ~100 km perimeter beats the free route over the same loop.
    assert!(xcontest.olc_score > olc.olc_score);
    assert_relative_eq!(
        xcontest.olc_score,
        1.4 * xcontest.fai_triangle.as_ref().unwrap().score,
        epsilon = 1e-9
    );
}

#[test]
fn tight_budget_flags_result_approximate() {
    use aerolog::aerolog_errors::AnalysisWarning;

    let (track, _) = normalize(&fai_triangle_track(), &ConstantElevation(0.0)).unwrap();
    // A zero-width budget that is already expired when the search starts.
    let params = ScoringParams::builder()
        .search_time_budget_ms(1)
        .build()
        .unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    let (result, warnings) = score(&track, &params, &ScoringRule::Olc);

    if warnings.contains(&AnalysisWarning::SearchBudgetExceeded) {
        assert!(result.free_distance.is_approximate());
        // Even truncated, the lower bound never undercuts the straight leg.
        assert!(result.free_distance.km() >= result.straight_distance);
    }
}
