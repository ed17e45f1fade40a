//! Single-threaded reference backend. Processes every entity with the
//! work-item tally; the parallel backends must match it bit for bit.

use hlp_core::Label;
use hlp_graph::FlatHypergraph;

use crate::kernels::{select_label, tally};

/// Phase 1: relabel every hyperedge from its member vertices.
pub(crate) fn edge_phase(
    flat: &FlatHypergraph,
    vertex_labels: &[Label],
    edge_labels: &mut [Label],
    max_labels: usize,
) {
    for e in 0..flat.num_edges {
        let counts = tally(flat.edge_slice(e), vertex_labels, max_labels);
        edge_labels[e] = select_label(&counts, edge_labels[e], max_labels);
    }
}

/// Phase 2: relabel every vertex from its incident hyperedges, returning the
/// number of vertices whose label changed.
pub(crate) fn vertex_phase(
    flat: &FlatHypergraph,
    vertex_labels: &mut [Label],
    edge_labels: &[Label],
    max_labels: usize,
) -> usize {
    let mut changes = 0;
    for v in 0..flat.num_vertices {
        let counts = tally(flat.vertex_slice(v), edge_labels, max_labels);
        let best = select_label(&counts, vertex_labels[v], max_labels);
        if best != vertex_labels[v] {
            vertex_labels[v] = best;
            changes += 1;
        }
    }
    changes
}
