//! Grid search and evolution benchmarks
//!
//! The dense mixing exponential dominates the whole pipeline; these
//! benches compare the cached-eigenbasis layer against the naive per-call
//! exponential and measure a full small-grid sweep.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use qpo_core::{
    apply_via_expm, instances, CostHamiltonian, MixingHamiltonian, ParameterGrid,
    ParameterSearch, QaoaLayer, QaoaState, SearchConfig,
};

fn bench_layer_application(c: &mut Criterion) {
    let problem = instances::three_asset();
    let cost = CostHamiltonian::build(&problem);
    let mixing = MixingHamiltonian::build(problem.n_assets()).unwrap();
    let layer = QaoaLayer::new(&cost, &mixing).unwrap();
    let psi0 = QaoaState::uniform(problem.n_assets());

    c.bench_function("layer_eigenbasis_n3", |b| {
        b.iter(|| layer.apply(black_box(0.7), black_box(0.3), &psi0).unwrap())
    });

    c.bench_function("layer_expm_n3", |b| {
        b.iter(|| {
            apply_via_expm(&cost, &mixing, black_box(0.7), black_box(0.3), &psi0).unwrap()
        })
    });
}

fn bench_grid_search(c: &mut Criterion) {
    let config = SearchConfig::default().with_grid(ParameterGrid::uniform(10, 10).unwrap());

    c.bench_function("grid_search_10x10_n3", |b| {
        b.iter(|| {
            ParameterSearch::with_config(instances::three_asset(), config.clone())
                .run()
                .unwrap()
        })
    });

    c.bench_function("grid_search_10x10_n3_parallel", |b| {
        b.iter(|| {
            ParameterSearch::with_config(
                instances::three_asset(),
                config.clone().with_parallel(),
            )
            .run()
            .unwrap()
        })
    });
}

fn bench_hamiltonian_construction(c: &mut Criterion) {
    c.bench_function("mixing_hamiltonian_n8", |b| {
        b.iter(|| MixingHamiltonian::build(black_box(8)).unwrap())
    });

    let problem = instances::uncorrelated(8, 10.0);
    c.bench_function("cost_hamiltonian_n8", |b| {
        b.iter(|| CostHamiltonian::build(black_box(&problem)))
    });
}

criterion_group!(
    benches,
    bench_layer_application,
    bench_grid_search,
    bench_hamiltonian_construction
);
criterion_main!(benches);
