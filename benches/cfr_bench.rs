//! Benchmarks for the Kuhn solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kuhn_solver::cfr::{evaluation, KuhnSolver, SolverConfig};

fn kuhn_iteration_benchmark(c: &mut Criterion) {
    let mut solver = KuhnSolver::new(SolverConfig::default()).unwrap();

    c.bench_function("kuhn_single_iteration", |b| {
        b.iter(|| black_box(solver.run_iteration()))
    });
}

fn kuhn_1000_iterations_benchmark(c: &mut Criterion) {
    c.bench_function("kuhn_1000_iterations", |b| {
        b.iter(|| {
            let mut solver = KuhnSolver::new(SolverConfig::default()).unwrap();
            solver.train(black_box(1000)).last_total_regret
        })
    });
}

fn kuhn_exploitability_benchmark(c: &mut Criterion) {
    let mut solver = KuhnSolver::new(SolverConfig::default()).unwrap();
    solver.train(1000);

    c.bench_function("kuhn_exploitability", |b| {
        b.iter(|| black_box(evaluation::exploitability(solver.graph(), solver.registry())))
    });
}

criterion_group!(
    benches,
    kuhn_iteration_benchmark,
    kuhn_1000_iterations_benchmark,
    kuhn_exploitability_benchmark
);
criterion_main!(benches);
