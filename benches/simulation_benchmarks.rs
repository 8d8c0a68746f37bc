//! Simulation Benchmarks with 95% Confidence Intervals
//!
//! Measures the cost of the two hot paths: lattice sweeps and the resampling
//! estimators.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sirsim::engine::{SimRng, SirsLattice, TransitionProbabilities};
use sirsim::statistics::{bootstrap, jackknife, SampleSeries, Susceptibility};

fn probabilities() -> TransitionProbabilities {
    TransitionProbabilities {
        prob_si: 0.8,
        prob_ir: 0.1,
        prob_rs: 0.01,
    }
}

/// One sweep (`rows * cols` single-cell updates) at several lattice sizes.
fn bench_lattice_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("SIRS_sweep");
    group.sample_size(50);
    group.confidence_level(0.95);

    for n in [25, 50, 100].iter() {
        group.bench_with_input(BenchmarkId::new("sweep", n), n, |b, &n| {
            let mut rng = SimRng::new(42);
            let Ok(mut lattice) = SirsLattice::random(n, n, probabilities(), &mut rng) else {
                return;
            };
            b.iter(|| {
                for _ in 0..lattice.size() {
                    lattice.update(&mut rng);
                }
                black_box(lattice.count_in_state(sirsim::engine::CellState::Infected))
            });
        });
    }

    group.finish();
}

fn series(len: usize) -> SampleSeries {
    let mut rng = SimRng::new(7);
    (0..len).map(|_| 0.3 + 0.05 * rng.gen_f64()).collect()
}

/// Bootstrap with the default 100 resamples.
fn bench_bootstrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("bootstrap");
    group.sample_size(50);

    for n in [100, 1000].iter() {
        let data = series(*n);
        group.bench_with_input(BenchmarkId::new("susceptibility", n), &data, |b, data| {
            let mut rng = SimRng::new(42);
            b.iter(|| black_box(bootstrap(&Susceptibility, data, &mut rng, 100)));
        });
    }

    group.finish();
}

/// Jackknife is quadratic in the series length.
fn bench_jackknife(c: &mut Criterion) {
    let mut group = c.benchmark_group("jackknife");
    group.sample_size(30);

    for n in [100, 1000].iter() {
        let data = series(*n);
        group.bench_with_input(BenchmarkId::new("susceptibility", n), &data, |b, data| {
            b.iter(|| black_box(jackknife(&Susceptibility, data)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lattice_sweep, bench_bootstrap, bench_jackknife);
criterion_main!(benches);
