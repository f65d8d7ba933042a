//! Criterion benchmarks for u-grasp.
//!
//! Uses synthetic MAX-QBF-PT instances to measure construction and local
//! search cost at a few domain sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_grasp::grasp::{
    construct, ConstructionStop, Evaluator, GraspConfig, GraspRunner, LocalSearch,
    LocalSearchStrategy,
};
use u_grasp::qbf::{prohibited_triple_table, QbfInstance, QbfInverse};
use u_grasp::random::create_rng;

fn bench_grasp_qbf(c: &mut Criterion) {
    let mut group = c.benchmark_group("grasp_qbf");
    group.sample_size(10);

    for n in [20usize, 40, 60] {
        let eval = QbfInverse::new(QbfInstance::random(n, 10, &mut create_rng(42)));
        let table = prohibited_triple_table(n).expect("valid triples");

        let reactive = GraspConfig::default().with_iterations(50).with_seed(42);
        group.bench_with_input(
            BenchmarkId::new("reactive", n),
            &(&eval, &table, reactive),
            |b, (e, t, c)| {
                b.iter(|| {
                    let result = GraspRunner::run(black_box(*e), black_box(*t), black_box(c));
                    black_box(result)
                })
            },
        );

        let fixed = GraspConfig::fixed(0.05).with_iterations(50).with_seed(42);
        group.bench_with_input(
            BenchmarkId::new("fixed", n),
            &(&eval, &table, fixed),
            |b, (e, t, c)| {
                b.iter(|| {
                    let result = GraspRunner::run(black_box(*e), black_box(*t), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_local_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_search");
    group.sample_size(10);

    let n = 60;
    let eval = QbfInverse::new(QbfInstance::random(n, 10, &mut create_rng(7)));
    let table = prohibited_triple_table(n).expect("valid triples");
    let start = construct(&eval, &table, 1.0, ConstructionStop::Exhausted, &mut create_rng(7));

    for strategy in [
        LocalSearchStrategy::BestImprovement,
        LocalSearchStrategy::BestThenFirst,
        LocalSearchStrategy::FirstImprovement,
    ] {
        let ls = LocalSearch::new(strategy, 1e-9);
        group.bench_function(format!("{strategy:?}"), |b| {
            b.iter(|| {
                let mut s = start.clone();
                let stats = ls.improve(&eval, &table, &mut s);
                black_box((stats, s.cost(), eval.domain_size()))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grasp_qbf, bench_local_search);
criterion_main!(benches);
