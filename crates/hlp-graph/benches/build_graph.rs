use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hlp_graph::{generate_planted_partition, generate_uniform};

fn build_graph_bench(c: &mut Criterion) {
    c.bench_function("generate_uniform_5k", |b| {
        b.iter(|| {
            let graph = generate_uniform(5_000, 20_000, 2, 6, 42).unwrap();
            black_box(graph);
        });
    });

    c.bench_function("freeze_uniform_5k", |b| {
        let graph = generate_uniform(5_000, 20_000, 2, 6, 42).unwrap();
        b.iter(|| {
            let mut graph = graph.clone();
            black_box(graph.freeze());
        });
    });

    c.bench_function("generate_planted_2k", |b| {
        b.iter(|| {
            let graph = generate_planted_partition(2_000, 8_000, 8, 0.8, 2, 5, 42).unwrap();
            black_box(graph);
        });
    });
}

criterion_group!(benches, build_graph_bench);
criterion_main!(benches);
