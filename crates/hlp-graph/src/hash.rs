use sha2::{Digest, Sha256};

use crate::hypergraph::Hypergraph;

/// Computes the canonical structural hash for the provided graph.
///
/// Two graphs hash equal iff they have the same vertex count, the same
/// hyperedge sequence (edge order and in-edge vertex order both count), and
/// the same labels.
pub fn canonical_hash(graph: &Hypergraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update((graph.num_vertices() as u64).to_le_bytes());
    hasher.update((graph.num_edges() as u64).to_le_bytes());
    for vertices in graph.hyperedges() {
        hasher.update((vertices.len() as u64).to_le_bytes());
        for vertex in vertices {
            hasher.update(u64::from(vertex.as_raw()).to_le_bytes());
        }
    }
    for label in graph.labels() {
        hasher.update(label.to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}
