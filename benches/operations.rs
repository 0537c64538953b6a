//! Benchmarks for sparse addition and multiplication

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sparsecalc::{add_with, multiply_with, ExecConfig, SparseMatrix};

/// Banded matrix with `band` entries per row around the diagonal
fn create_banded_matrix(n: usize, band: usize) -> SparseMatrix {
    let entries = (0..n).flat_map(|i| {
        (0..band).map(move |d| (i, (i + d) % n, (d as i64 % 5) + 1))
    });
    SparseMatrix::from_entries_unchecked(n, n, entries)
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    for &n in &[1_000usize, 10_000] {
        let a = create_banded_matrix(n, 3);
        let b = create_banded_matrix(n, 5);

        group.bench_with_input(BenchmarkId::new("sequential", n), &n, |bench, _| {
            bench.iter(|| add_with(black_box(&a), black_box(&b), &ExecConfig::sequential()))
        });
        group.bench_with_input(BenchmarkId::new("parallel", n), &n, |bench, _| {
            let config = ExecConfig::default().with_parallel_threshold(1);
            bench.iter(|| add_with(black_box(&a), black_box(&b), &config))
        });
    }
    group.finish();
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    for &n in &[500usize, 5_000] {
        let a = create_banded_matrix(n, 4);
        let b = create_banded_matrix(n, 4);

        group.bench_with_input(BenchmarkId::new("sequential", n), &n, |bench, _| {
            bench.iter(|| multiply_with(black_box(&a), black_box(&b), &ExecConfig::sequential()))
        });
        group.bench_with_input(BenchmarkId::new("parallel", n), &n, |bench, _| {
            let config = ExecConfig::default().with_parallel_threshold(1);
            bench.iter(|| multiply_with(black_box(&a), black_box(&b), &config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_add, bench_multiply);
criterion_main!(benches);
