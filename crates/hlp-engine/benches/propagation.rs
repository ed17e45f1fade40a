use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hlp_engine::{Backend, DeviceOptions, LabelPropagation};
use hlp_graph::{generate_planted_partition, generate_random_labels, Hypergraph};

fn planted(seed: u64) -> Hypergraph {
    let mut graph = generate_planted_partition(20_000, 60_000, 8, 0.85, 2, 6, seed).unwrap();
    let labels = generate_random_labels(20_000, 8, seed + 1).unwrap();
    graph.set_labels(&labels).unwrap();
    graph.freeze();
    graph
}

fn propagation_bench(c: &mut Criterion) {
    let options = DeviceOptions {
        max_labels: 8,
        ..DeviceOptions::default()
    };

    c.bench_function("one_iteration_multicore", |b| {
        let driver = LabelPropagation::new(Backend::MultiCore, options.clone()).unwrap();
        let graph = planted(42);
        b.iter(|| {
            let mut graph = graph.clone();
            black_box(driver.run(&mut graph, 1, 0.0).unwrap());
        });
    });

    c.bench_function("converge_multicore", |b| {
        let driver = LabelPropagation::new(Backend::MultiCore, options.clone()).unwrap();
        let graph = planted(42);
        b.iter(|| {
            let mut graph = graph.clone();
            black_box(driver.run(&mut graph, 50, 1e-6).unwrap());
        });
    });

    c.bench_function("converge_serial", |b| {
        let driver = LabelPropagation::new(Backend::Serial, options.clone()).unwrap();
        let graph = planted(42);
        b.iter(|| {
            let mut graph = graph.clone();
            black_box(driver.run(&mut graph, 50, 1e-6).unwrap());
        });
    });
}

criterion_group!(benches, propagation_bench);
criterion_main!(benches);
