use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use aerolog::elevation::ConstantElevation;
use aerolog::scoring::{score, ScoringParams, TriangleClosing};
use aerolog::scoring_rules::ScoringRule;
use aerolog::track::{normalize, RawTrackPoint};

/// Noisy triangle loop: three legs with GPS-grade jitter, closed at the start.
fn noisy_triangle(rng: &mut StdRng, fixes_per_leg: usize) -> Vec<RawTrackPoint> {
    let vertices = [(0.0, 0.0), (0.45, 0.26), (0.0, 0.52), (0.0, 0.0)];
    let mut fixes = Vec::with_capacity(3 * fixes_per_leg);
    let mut t = 0.0;

    for pair in vertices.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        for s in 0..fixes_per_leg {
            let f = s as f64 / fixes_per_leg as f64;
            let jitter = rng.random_range(-0.0004..0.0004);
            fixes.push(RawTrackPoint::new(
                45.0 + from.0 + (to.0 - from.0) * f + jitter,
                6.0 + from.1 + (to.1 - from.1) * f + jitter,
                t,
                1_800.0 + rng.random_range(-40.0..40.0),
            ));
            t += 10.0;
        }
    }
    fixes
}

fn bench_triangle_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("score/triangle");

    for candidates in [80usize, 160, 240] {
        let mut rng = StdRng::seed_from_u64(0xFA1_u64);
        let raw = noisy_triangle(&mut rng, 1_000);
        let (track, _) = normalize(&raw, &ConstantElevation(400.0)).unwrap();
        let params = ScoringParams::builder()
            .max_candidate_points(candidates)
            .build()
            .unwrap();
        let rule = ScoringRule::XContest;

        group.bench_function(format!("{candidates}_candidates"), |b| {
            b.iter(|| black_box(score(&track, &params, &rule)))
        });
    }

    group.finish();
}

fn bench_closing_tolerances(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xFA2_u64);
    let raw = noisy_triangle(&mut rng, 1_000);
    let (track, _) = normalize(&raw, &ConstantElevation(400.0)).unwrap();
    let rule = ScoringRule::XContest;

    let mut group = c.benchmark_group("score/closing");
    for (label, closing) in [
        ("fraction_5pct", TriangleClosing::FractionOfPerimeter(0.05)),
        ("absolute_3km", TriangleClosing::MaxGapKm(3.0)),
    ] {
        let params = ScoringParams::builder()
            .triangle_closing(closing)
            .build()
            .unwrap();

        group.bench_function(label, |b| {
            b.iter(|| black_box(score(&track, &params, &rule)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_triangle_search, bench_closing_tolerances);
criterion_main!(benches);
