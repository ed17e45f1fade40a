//! Multi-core backend: three kernels per phase, selected per entity by the
//! execution plan.
//!
//! The work-group kernel walks its (few, very large) entities one at a time
//! and tallies each one cooperatively across `workgroup_size` lanes with
//! per-lane histograms merged by reduction. The sub-group kernel does the
//! same over 32 lanes. The work-item kernel runs one task per (small) entity
//! with a private histogram and no merging. The pools partition the id
//! space, so the scattered writes of the three kernels never collide.

use hlp_core::{Label, MAX_LABELS_CAP};
use hlp_graph::FlatHypergraph;
use rayon::prelude::*;

use crate::kernels::{merge, select_label, tally, Histogram};
use crate::plan::ExecutionPlan;

/// Lane count of the sub-group kernel.
pub(crate) const SUB_GROUP_LANES: usize = 32;

fn cooperative_tally(
    slice: &[u32],
    labels: &[Label],
    lanes: usize,
    max_labels: usize,
) -> Histogram {
    let chunk = slice.len().div_ceil(lanes).max(1);
    slice
        .par_chunks(chunk)
        .map(|part| tally(part, labels, max_labels))
        .reduce(|| [0u32; MAX_LABELS_CAP], |left, right| merge(left, &right))
}

/// Phase 1: relabel the hyperedges of every tier pool.
pub(crate) fn edge_phase(
    flat: &FlatHypergraph,
    plan: &ExecutionPlan,
    vertex_labels: &[Label],
    edge_labels: &mut [Label],
    workgroup_size: usize,
    max_labels: usize,
) {
    for &e in &plan.wg_edges {
        let e = e as usize;
        let counts = cooperative_tally(flat.edge_slice(e), vertex_labels, workgroup_size, max_labels);
        edge_labels[e] = select_label(&counts, edge_labels[e], max_labels);
    }
    for &e in &plan.sg_edges {
        let e = e as usize;
        let counts = cooperative_tally(flat.edge_slice(e), vertex_labels, SUB_GROUP_LANES, max_labels);
        edge_labels[e] = select_label(&counts, edge_labels[e], max_labels);
    }

    let incumbents: &[Label] = edge_labels;
    let updates: Vec<Label> = plan
        .wi_edges
        .par_iter()
        .map(|&e| {
            let e = e as usize;
            let counts = tally(flat.edge_slice(e), vertex_labels, max_labels);
            select_label(&counts, incumbents[e], max_labels)
        })
        .collect();
    for (&e, &label) in plan.wi_edges.iter().zip(&updates) {
        edge_labels[e as usize] = label;
    }
}

/// Phase 2: relabel the vertices of every tier pool, returning the number of
/// vertices whose label changed this iteration.
pub(crate) fn vertex_phase(
    flat: &FlatHypergraph,
    plan: &ExecutionPlan,
    vertex_labels: &mut [Label],
    edge_labels: &[Label],
    workgroup_size: usize,
    max_labels: usize,
) -> usize {
    let mut changes = 0usize;

    for &v in &plan.wg_vertices {
        let v = v as usize;
        let counts = cooperative_tally(flat.vertex_slice(v), edge_labels, workgroup_size, max_labels);
        let best = select_label(&counts, vertex_labels[v], max_labels);
        if best != vertex_labels[v] {
            vertex_labels[v] = best;
            changes += 1;
        }
    }
    for &v in &plan.sg_vertices {
        let v = v as usize;
        let counts = cooperative_tally(flat.vertex_slice(v), edge_labels, SUB_GROUP_LANES, max_labels);
        let best = select_label(&counts, vertex_labels[v], max_labels);
        if best != vertex_labels[v] {
            vertex_labels[v] = best;
            changes += 1;
        }
    }

    let incumbents: &[Label] = vertex_labels;
    let updates: Vec<Label> = plan
        .wi_vertices
        .par_iter()
        .map(|&v| {
            let v = v as usize;
            let counts = tally(flat.vertex_slice(v), edge_labels, max_labels);
            select_label(&counts, incumbents[v], max_labels)
        })
        .collect();
    for (&v, &label) in plan.wi_vertices.iter().zip(&updates) {
        if vertex_labels[v as usize] != label {
            vertex_labels[v as usize] = label;
            changes += 1;
        }
    }
    changes
}
