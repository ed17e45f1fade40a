use hlp_graph::FlatHypergraph;
use serde::{Deserialize, Serialize};

/// Cardinality thresholds selecting the kernel tier per entity.
///
/// An entity larger than the work-group threshold is handled by the
/// work-group kernel, one larger than the sub-group threshold by the
/// sub-group kernel, and everything else by the work-item kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Edge cardinality above which the work-group kernel is used.
    #[serde(default = "default_edge_workgroup")]
    pub edge_workgroup: usize,
    /// Edge cardinality above which the sub-group kernel is used.
    #[serde(default = "default_edge_subgroup")]
    pub edge_subgroup: usize,
    /// Vertex degree above which the work-group kernel is used.
    #[serde(default = "default_vertex_workgroup")]
    pub vertex_workgroup: usize,
    /// Vertex degree above which the sub-group kernel is used.
    #[serde(default = "default_vertex_subgroup")]
    pub vertex_subgroup: usize,
}

fn default_edge_workgroup() -> usize {
    256
}

fn default_edge_subgroup() -> usize {
    32
}

fn default_vertex_workgroup() -> usize {
    1024
}

fn default_vertex_subgroup() -> usize {
    256
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            edge_workgroup: default_edge_workgroup(),
            edge_subgroup: default_edge_subgroup(),
            vertex_workgroup: default_vertex_workgroup(),
            vertex_subgroup: default_vertex_subgroup(),
        }
    }
}

/// Static per-graph assignment of every edge and vertex to a kernel tier.
///
/// The three pools per entity kind are mutually exclusive and cover the full
/// id space; each pool lists raw ids in ascending order. Built once per
/// frozen graph; the planner is pure and deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Edges handled by the work-group kernel.
    pub wg_edges: Vec<u32>,
    /// Edges handled by the sub-group kernel.
    pub sg_edges: Vec<u32>,
    /// Edges handled by the work-item kernel.
    pub wi_edges: Vec<u32>,
    /// Vertices handled by the work-group kernel.
    pub wg_vertices: Vec<u32>,
    /// Vertices handled by the sub-group kernel.
    pub sg_vertices: Vec<u32>,
    /// Vertices handled by the work-item kernel.
    pub wi_vertices: Vec<u32>,
}

impl ExecutionPlan {
    /// Partitions the edge and vertex id spaces of `flat` into kernel tiers.
    pub fn build(flat: &FlatHypergraph, thresholds: &TierThresholds) -> Self {
        let mut plan = Self {
            wg_edges: Vec::new(),
            sg_edges: Vec::new(),
            wi_edges: Vec::new(),
            wg_vertices: Vec::new(),
            sg_vertices: Vec::new(),
            wi_vertices: Vec::new(),
        };

        for (e, &size) in flat.edge_sizes.iter().enumerate() {
            if size > thresholds.edge_workgroup {
                plan.wg_edges.push(e as u32);
            } else if size > thresholds.edge_subgroup {
                plan.sg_edges.push(e as u32);
            } else {
                plan.wi_edges.push(e as u32);
            }
        }

        for v in 0..flat.num_vertices {
            let degree = flat.vertex_degree(v);
            if degree > thresholds.vertex_workgroup {
                plan.wg_vertices.push(v as u32);
            } else if degree > thresholds.vertex_subgroup {
                plan.sg_vertices.push(v as u32);
            } else {
                plan.wi_vertices.push(v as u32);
            }
        }

        tracing::debug!(
            wg_edges = plan.wg_edges.len(),
            sg_edges = plan.sg_edges.len(),
            wi_edges = plan.wi_edges.len(),
            wg_vertices = plan.wg_vertices.len(),
            sg_vertices = plan.sg_vertices.len(),
            wi_vertices = plan.wi_vertices.len(),
            "execution plan built"
        );
        plan
    }
}
