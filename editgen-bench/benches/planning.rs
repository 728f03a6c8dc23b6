//! Classification and planning benchmarks.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use editgen_bench::{add_hosts, record_chain};
use editgen_codegen::{GenerationPlanner, Generator, GeneratorConfig};
use editgen_schema::{TypeClassifier, TypeRef};
use std::hint::black_box;

fn benchmark_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for depth in [4, 16, 64] {
        let graph = record_chain(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &graph, |b, graph| {
            b.iter(|| {
                let mut classifier = TypeClassifier::new(graph);
                black_box(classifier.classify(&TypeRef::new("crate::bench::Record0")))
            })
        });
    }
    group.finish();
}

fn benchmark_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    for depth in [4, 16] {
        let mut graph = record_chain(depth);
        add_hosts(&mut graph, 4);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &graph, |b, graph| {
            b.iter(|| {
                let mut planner = GenerationPlanner::new(graph, GeneratorConfig::default());
                black_box(planner.plan(&graph.requests))
            })
        });
    }
    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let graph = record_chain(8);
    c.bench_function("generate_and_render", |b| {
        b.iter(|| black_box(Generator::new(&graph).generate()))
    });
}

criterion_group!(benches, benchmark_classify, benchmark_plan, benchmark_render);
criterion_main!(benches);
