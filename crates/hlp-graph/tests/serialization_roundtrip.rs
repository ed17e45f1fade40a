use hlp_core::{ErrorKind, VertexId};
use hlp_graph::{
    canonical_hash, generate_uniform, graph_from_bytes, graph_from_json_str, graph_to_bytes,
    load_graph, save_graph, Hypergraph,
};

fn v(raw: u32) -> VertexId {
    VertexId::from_raw(raw)
}

fn sample_graph() -> Hypergraph {
    let mut graph = Hypergraph::new(6);
    graph.add_hyperedge(&[v(0), v(1), v(2)]).unwrap();
    graph.add_hyperedge(&[v(2), v(3), v(4)]).unwrap();
    graph.add_hyperedge(&[v(4), v(5)]).unwrap();
    graph.set_labels(&[0, 0, 1, 1, 2, 2]).unwrap();
    graph
}

#[test]
fn binary_round_trip_preserves_graph() {
    let graph = sample_graph();
    let restored = graph_from_bytes(&graph_to_bytes(&graph)).unwrap();

    assert_eq!(restored.num_vertices(), graph.num_vertices());
    assert_eq!(restored.num_edges(), graph.num_edges());
    assert_eq!(restored.labels(), graph.labels());
    assert_eq!(canonical_hash(&restored), canonical_hash(&graph));
}

#[test]
fn header_bytes_are_exact() {
    let bytes = graph_to_bytes(&sample_graph());
    assert_eq!(&bytes[0..4], b"HGR1");
    assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
    assert_eq!(&bytes[8..16], &6u64.to_le_bytes());
    assert_eq!(&bytes[16..24], &3u64.to_le_bytes());
    // First edge record: size then vertex ids, all u64 little-endian.
    assert_eq!(&bytes[24..32], &3u64.to_le_bytes());
    assert_eq!(&bytes[32..40], &0u64.to_le_bytes());
}

#[test]
fn save_then_load_round_trips_generated_graph() {
    let graph = generate_uniform(50, 120, 2, 5, 1).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("uniform.hgr");

    save_graph(&graph, &path).unwrap();
    let restored = load_graph(&path).unwrap();
    assert_eq!(canonical_hash(&restored), canonical_hash(&graph));
}

#[test]
fn bad_magic_and_version_are_format_errors() {
    let mut bytes = graph_to_bytes(&sample_graph());
    bytes[0] = b'X';
    let err = graph_from_bytes(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(err.code(), "bad-magic-or-version");

    let mut bytes = graph_to_bytes(&sample_graph());
    bytes[4] = 2;
    let err = graph_from_bytes(&bytes).unwrap_err();
    assert_eq!(err.code(), "bad-magic-or-version");
}

#[test]
fn truncation_is_a_format_error() {
    let bytes = graph_to_bytes(&sample_graph());
    for cut in [3, 12, 30, bytes.len() - 2] {
        let err = graph_from_bytes(&bytes[..cut]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.code(), "truncated");
    }
}

#[test]
fn missing_labels_block_defaults_to_zero() {
    let graph = sample_graph();
    let bytes = graph_to_bytes(&graph);
    // Drop the labels flag and payload entirely.
    let truncated = &bytes[..bytes.len() - 1 - 4 * graph.num_vertices()];
    let restored = graph_from_bytes(truncated).unwrap();
    assert_eq!(restored.labels(), &[0; 6]);
}

#[test]
fn dense_json_schema_loads() {
    let json = r#"{
        "num_vertices": 4,
        "edges": [[0, 1], [1, 2, 3]],
        "labels": [0, 1, 1, 0]
    }"#;
    let graph = graph_from_json_str(json).unwrap();
    assert_eq!(graph.num_vertices(), 4);
    assert_eq!(graph.num_edges(), 2);
    assert_eq!(graph.labels(), &[0, 1, 1, 0]);
}

#[test]
fn dense_json_accepts_field_aliases() {
    let graph = graph_from_json_str(r#"{"numVertices": 3, "hyperedges": [[0, 2]]}"#).unwrap();
    assert_eq!(graph.num_vertices(), 3);
    assert_eq!(graph.num_edges(), 1);

    let graph = graph_from_json_str(r#"{"vertices": 2, "edges": []}"#).unwrap();
    assert_eq!(graph.num_edges(), 0);
}

#[test]
fn dense_json_label_length_mismatch_is_rejected() {
    let json = r#"{"num_vertices": 3, "edges": [[0, 1]], "labels": [0, 1]}"#;
    let err = graph_from_json_str(json).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(err.code(), "json-labels");
}

#[test]
fn empty_json_hyperedge_is_a_format_error() {
    let json = r#"{"num_vertices": 3, "edges": [[0, 1], []]}"#;
    let err = graph_from_json_str(json).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(err.code(), "json-empty-hyperedge");

    let json = r#"{"type": "hypergraph", "node-data": {"a": {}}, "edge-dict": {"e0": []}}"#;
    let err = graph_from_json_str(json).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(err.code(), "json-empty-hyperedge");
}

#[test]
fn hypernetx_json_assigns_ids_in_first_seen_order() {
    let json = r#"{
        "type": "hypergraph",
        "hypergraph-data": {"name": "toy"},
        "node-data": {"a": {}, "b": {}, "c": {}},
        "edge-dict": {"e0": ["c", "d"], "e1": ["a", "d"]}
    }"#;
    let graph = graph_from_json_str(json).unwrap();
    // a=0, b=1, c=2 from node-data, then d=3 first seen in edge-dict.
    assert_eq!(graph.num_vertices(), 4);
    assert_eq!(graph.num_edges(), 2);
    assert_eq!(
        graph.hyperedge(hlp_core::EdgeId::from_raw(0)).unwrap(),
        &[v(2), v(3)]
    );
    assert_eq!(
        graph.hyperedge(hlp_core::EdgeId::from_raw(1)).unwrap(),
        &[v(0), v(3)]
    );
}

#[test]
fn json_detection_skips_leading_whitespace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ws.json");
    std::fs::write(&path, "  \n\t{\"num_vertices\": 2, \"edges\": [[0, 1]]}").unwrap();
    let graph = load_graph(&path).unwrap();
    assert_eq!(graph.num_vertices(), 2);
}

#[test]
fn missing_file_is_an_io_error_with_path() {
    let err = load_graph(std::path::Path::new("/nonexistent/graph.hgr")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.context("path").unwrap().contains("graph.hgr"));
}
