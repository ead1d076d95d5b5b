//! Benchmarks for linear combination construction and refactoring
//!
//! Construction renders and caches every basis image; refactoring collapses
//! a delta-function basis into one fixed kernel per spatial term.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use stencil::prelude::*;

fn delta_basis(size: usize) -> Vec<AnyKernel> {
    let mut basis = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            basis.push(DeltaFunctionKernel::new(size, size, (x, y)).unwrap().into());
        }
    }
    basis
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_combination_new");

    for size in [5usize, 11, 21] {
        let basis = delta_basis(size);
        let weights = vec![1.0; basis.len()];
        group.bench_with_input(BenchmarkId::new("delta_basis", size), &size, |b, _| {
            b.iter(|| {
                let kernel = LinearCombinationKernel::new(basis.clone(), weights.clone()).unwrap();
                black_box(kernel);
            });
        });
    }

    group.finish();
}

fn bench_refactor(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_combination_refactor");
    let mut rng = StdRng::seed_from_u64(7);

    for order in [1usize, 2, 3] {
        let size = 11;
        let spatial = PolynomialFunction2::new(order);
        let n_spatial = spatial.n_parameters();
        let coefficients: Vec<Vec<f64>> = (0..size * size)
            .map(|_| (0..n_spatial).map(|_| rng.gen_range(-1.0..1.0)).collect())
            .collect();
        let kernel =
            LinearCombinationKernel::with_spatial_parameters(delta_basis(size), Box::new(spatial), coefficients)
                .unwrap();

        group.bench_with_input(BenchmarkId::new("order", order), &order, |b, _| {
            b.iter(|| black_box(kernel.refactor().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_construction, bench_refactor);
criterion_main!(benches);
