use hlp_core::ErrorKind;
use hlp_graph::{
    canonical_hash, generate_fixed, generate_hsbm, generate_planted_partition,
    generate_random_labels, generate_uniform,
};

#[test]
fn same_seed_same_graph() {
    let a = generate_uniform(300, 600, 2, 6, 99).unwrap();
    let b = generate_uniform(300, 600, 2, 6, 99).unwrap();
    assert_eq!(canonical_hash(&a), canonical_hash(&b));

    let c = generate_uniform(300, 600, 2, 6, 100).unwrap();
    assert_ne!(canonical_hash(&a), canonical_hash(&c));
}

#[test]
fn uniform_edge_sizes_stay_in_bounds() {
    let graph = generate_uniform(100, 250, 3, 7, 5).unwrap();
    assert_eq!(graph.num_edges(), 250);
    assert!(graph.edge_sizes().iter().all(|&s| (3..=7).contains(&s)));
}

#[test]
fn fixed_generator_produces_constant_cardinality() {
    let graph = generate_fixed(80, 200, 4, 11).unwrap();
    assert!(graph.edge_sizes().iter().all(|&s| s == 4));
}

#[test]
fn planted_partition_is_deterministic_and_valid() {
    let a = generate_planted_partition(120, 240, 4, 0.8, 2, 5, 21).unwrap();
    let b = generate_planted_partition(120, 240, 4, 0.8, 2, 5, 21).unwrap();
    assert_eq!(canonical_hash(&a), canonical_hash(&b));
    assert_eq!(a.num_edges(), 240);
}

#[test]
fn hsbm_respects_edge_count_and_seed() {
    let a = generate_hsbm(90, 150, 3, 0.9, 0.4, 2, 4, 7).unwrap();
    let b = generate_hsbm(90, 150, 3, 0.9, 0.4, 2, 4, 7).unwrap();
    assert_eq!(a.num_edges(), 150);
    assert_eq!(canonical_hash(&a), canonical_hash(&b));
}

#[test]
fn random_labels_are_in_class_range() {
    let labels = generate_random_labels(500, 6, 13).unwrap();
    assert_eq!(labels.len(), 500);
    assert!(labels.iter().all(|&l| (0..6).contains(&l)));
    assert_eq!(labels, generate_random_labels(500, 6, 13).unwrap());
}

#[test]
fn invalid_parameters_are_config_errors() {
    let cases = [
        (generate_uniform(0, 10, 2, 4, 1).unwrap_err(), "num-vertices"),
        (generate_uniform(10, 0, 2, 4, 1).unwrap_err(), "num-edges"),
        (generate_uniform(10, 5, 1, 4, 1).unwrap_err(), "min-edge-size"),
        (generate_uniform(10, 5, 4, 3, 1).unwrap_err(), "max-edge-size"),
        (generate_fixed(10, 5, 1, 1).unwrap_err(), "edge-size"),
        (
            generate_planted_partition(10, 5, 0, 0.5, 2, 3, 1).unwrap_err(),
            "num-communities",
        ),
        (
            generate_hsbm(10, 5, 2, 1.5, 0.2, 2, 3, 1).unwrap_err(),
            "probability-range",
        ),
        // Requested edge size larger than the vertex pool.
        (generate_fixed(3, 5, 4, 1).unwrap_err(), "edge-size-exceeds-vertices"),
    ];
    for (err, code) in cases {
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.code(), code);
    }

    let err = generate_random_labels(10, 0, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert_eq!(err.code(), "label-classes");
}
