//! Benchmarks for FAMR operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use famr::{Famr, FamrConfig, FuzzyVector};

fn bench_config() -> FamrConfig {
    FamrConfig {
        baseline_vigilance: 0.8,
        num_classes: 4,
        ..FamrConfig::default()
    }
}

/// Deterministic pseudo-random inputs in [0, 1].
fn sample(state: &mut u64, dim: usize) -> Vec<f64> {
    (0..dim)
        .map(|_| {
            *state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((*state >> 33) as f64) / (u32::MAX as f64)
        })
        .collect()
}

fn benchmark_fuzzy_and(c: &mut Criterion) {
    let mut rng = 42u64;
    let a = FuzzyVector::new(&sample(&mut rng, 64)).unwrap();
    let b = FuzzyVector::new(&sample(&mut rng, 64)).unwrap();

    c.bench_function("fuzzy_and_64", |bench| {
        bench.iter(|| black_box(&a).and(black_box(&b)))
    });
}

fn benchmark_complement_code(c: &mut Criterion) {
    let mut rng = 42u64;
    let a = FuzzyVector::new(&sample(&mut rng, 64)).unwrap();

    c.bench_function("complement_code_64", |bench| {
        bench.iter(|| black_box(&a).complement_code())
    });
}

fn benchmark_train_pair(c: &mut Criterion) {
    let mut rng = 42u64;
    let inputs: Vec<Vec<f64>> = (0..100).map(|_| sample(&mut rng, 16)).collect();

    c.bench_function("train_pair_100x16", |bench| {
        bench.iter(|| {
            let mut model = Famr::new(bench_config()).unwrap();
            for (i, input) in inputs.iter().enumerate() {
                let _ = model.train_pair(black_box(input), i % 4, 1.0).unwrap();
            }
            model.num_categories()
        })
    });
}

fn benchmark_classify(c: &mut Criterion) {
    let mut rng = 42u64;
    let inputs: Vec<Vec<f64>> = (0..100).map(|_| sample(&mut rng, 16)).collect();
    let mut model = Famr::new(bench_config()).unwrap();
    for (i, input) in inputs.iter().enumerate() {
        let _ = model.train_pair(input, i % 4, 1.0).unwrap();
    }

    c.bench_function("classify_16", |bench| {
        bench.iter(|| model.classify_scaled(black_box(&inputs[0])).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_fuzzy_and,
    benchmark_complement_code,
    benchmark_train_pair,
    benchmark_classify
);
criterion_main!(benches);
