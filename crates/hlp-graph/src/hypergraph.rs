use std::sync::Arc;

use hlp_core::{EdgeId, HlpError, Label, VertexId};

use crate::ids::{edge_index, make_edge, vertex_index};

/// Flat (CSR-style) rendering of a frozen hypergraph.
///
/// Two offset/value pairs: `edge_vertices`/`edge_offsets` concatenate the
/// hyperedges in [`EdgeId`] order, and `vertex_edges`/`vertex_offsets`
/// concatenate the incidence lists in [`VertexId`] order (each list sorted by
/// `EdgeId` because edges are appended globally in insertion order). This is
/// the only representation the propagation kernels consume; once built it is
/// read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatHypergraph {
    /// Number of vertices.
    pub num_vertices: usize,
    /// Number of hyperedges.
    pub num_edges: usize,
    /// Concatenated member vertices of every hyperedge.
    pub edge_vertices: Vec<u32>,
    /// Offsets into `edge_vertices`; length `num_edges + 1`.
    pub edge_offsets: Vec<usize>,
    /// Concatenated incident edge ids of every vertex.
    pub vertex_edges: Vec<u32>,
    /// Offsets into `vertex_edges`; length `num_vertices + 1`.
    pub vertex_offsets: Vec<usize>,
    /// Cardinality of every hyperedge; `edge_sizes[e] == edge_offsets[e+1] - edge_offsets[e]`.
    pub edge_sizes: Vec<usize>,
}

impl FlatHypergraph {
    /// Returns the member vertices of hyperedge `e`.
    pub fn edge_slice(&self, e: usize) -> &[u32] {
        &self.edge_vertices[self.edge_offsets[e]..self.edge_offsets[e + 1]]
    }

    /// Returns the incident edge ids of vertex `v`.
    pub fn vertex_slice(&self, v: usize) -> &[u32] {
        &self.vertex_edges[self.vertex_offsets[v]..self.vertex_offsets[v + 1]]
    }

    /// Returns the degree (incident edge count) of vertex `v`.
    pub fn vertex_degree(&self, v: usize) -> usize {
        self.vertex_offsets[v + 1] - self.vertex_offsets[v]
    }
}

/// Undirected hypergraph with per-vertex labels.
///
/// The vertex count is fixed at construction. Hyperedges are appended in
/// insertion order and assigned dense [`EdgeId`]s; the incidence lists are
/// maintained as the transpose. [`Hypergraph::freeze`] materializes and
/// caches the [`FlatHypergraph`], after which structural mutation is
/// rejected. Labels are not structural and may be replaced at any time.
#[derive(Debug, Clone)]
pub struct Hypergraph {
    num_vertices: usize,
    hyperedges: Vec<Vec<VertexId>>,
    incident: Vec<Vec<EdgeId>>,
    labels: Vec<Label>,
    degrees: Vec<usize>,
    edge_sizes: Vec<usize>,
    flat: Option<Arc<FlatHypergraph>>,
}

impl Hypergraph {
    /// Creates an empty hypergraph with `num_vertices` vertices, all labels 0.
    pub fn new(num_vertices: usize) -> Self {
        Self {
            num_vertices,
            hyperedges: Vec::new(),
            incident: vec![Vec::new(); num_vertices],
            labels: vec![0; num_vertices],
            degrees: vec![0; num_vertices],
            edge_sizes: Vec::new(),
            flat: None,
        }
    }

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Returns the number of hyperedges.
    pub fn num_edges(&self) -> usize {
        self.hyperedges.len()
    }

    /// Appends a hyperedge and returns its id.
    ///
    /// Fails without mutating the graph if the vertex set is empty, contains
    /// an id `>= num_vertices`, contains a duplicate, or the graph is frozen.
    /// The caller's vertex order is preserved.
    pub fn add_hyperedge(&mut self, vertices: &[VertexId]) -> Result<EdgeId, HlpError> {
        if self.flat.is_some() {
            return Err(HlpError::graph(
                "frozen",
                "cannot add hyperedges after the graph has been frozen",
            ));
        }
        if vertices.is_empty() {
            return Err(HlpError::graph("empty-hyperedge", "hyperedge cannot be empty"));
        }
        for vertex in vertices {
            if vertex_index(*vertex) >= self.num_vertices {
                return Err(
                    HlpError::graph("vertex-out-of-range", "vertex id out of range")
                        .with_context("vertex", vertex.as_raw())
                        .with_context("num_vertices", self.num_vertices),
                );
            }
        }
        let mut sorted: Vec<u32> = vertices.iter().map(|v| v.as_raw()).collect();
        sorted.sort_unstable();
        if sorted.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(HlpError::graph(
                "duplicate-vertex",
                "hyperedge contains a duplicate vertex",
            ));
        }

        let edge_id = make_edge(self.hyperedges.len());
        self.edge_sizes.push(vertices.len());
        for vertex in vertices {
            self.incident[vertex_index(*vertex)].push(edge_id);
            self.degrees[vertex_index(*vertex)] += 1;
        }
        self.hyperedges.push(vertices.to_vec());
        Ok(edge_id)
    }

    /// Returns the member vertices of a hyperedge.
    pub fn hyperedge(&self, edge: EdgeId) -> Result<&[VertexId], HlpError> {
        self.hyperedges
            .get(edge_index(edge))
            .map(Vec::as_slice)
            .ok_or_else(|| {
                HlpError::graph("edge-out-of-range", "edge id out of range")
                    .with_context("edge", edge.as_raw())
                    .with_context("num_edges", self.hyperedges.len())
            })
    }

    /// Iterates the hyperedges in insertion order.
    pub fn hyperedges(&self) -> impl ExactSizeIterator<Item = &[VertexId]> + '_ {
        self.hyperedges.iter().map(Vec::as_slice)
    }

    /// Returns the edges incident to a vertex, sorted by insertion order.
    pub fn incident_edges(&self, vertex: VertexId) -> Result<&[EdgeId], HlpError> {
        self.incident
            .get(vertex_index(vertex))
            .map(Vec::as_slice)
            .ok_or_else(|| {
                HlpError::graph("vertex-out-of-range", "vertex id out of range")
                    .with_context("vertex", vertex.as_raw())
                    .with_context("num_vertices", self.num_vertices)
            })
    }

    /// Returns the label vector.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Replaces the label vector. Fails unless `labels.len() == num_vertices`.
    pub fn set_labels(&mut self, labels: &[Label]) -> Result<(), HlpError> {
        if labels.len() != self.num_vertices {
            return Err(HlpError::graph(
                "labels-length-mismatch",
                "labels length must match number of vertices",
            )
            .with_context("labels", labels.len())
            .with_context("num_vertices", self.num_vertices));
        }
        self.labels.clear();
        self.labels.extend_from_slice(labels);
        Ok(())
    }

    /// Returns per-vertex degrees (incident hyperedge counts).
    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    /// Returns per-edge cardinalities.
    pub fn edge_sizes(&self) -> &[usize] {
        &self.edge_sizes
    }

    /// Returns whether [`Hypergraph::freeze`] has been called.
    pub fn is_frozen(&self) -> bool {
        self.flat.is_some()
    }

    /// Materializes and caches the flat view. Idempotent; afterwards
    /// structural mutation is rejected.
    pub fn freeze(&mut self) -> Arc<FlatHypergraph> {
        if let Some(flat) = &self.flat {
            return Arc::clone(flat);
        }
        let flat = Arc::new(self.flatten());
        self.flat = Some(Arc::clone(&flat));
        flat
    }

    /// Returns the cached flat view, if the graph has been frozen.
    pub fn flat(&self) -> Option<&Arc<FlatHypergraph>> {
        self.flat.as_ref()
    }

    fn flatten(&self) -> FlatHypergraph {
        let num_edges = self.hyperedges.len();
        let total: usize = self.edge_sizes.iter().sum();

        let mut edge_vertices = Vec::with_capacity(total);
        let mut edge_offsets = Vec::with_capacity(num_edges + 1);
        edge_offsets.push(0);
        for vertices in &self.hyperedges {
            edge_vertices.extend(vertices.iter().map(VertexId::as_raw));
            edge_offsets.push(edge_vertices.len());
        }

        let mut vertex_edges = Vec::with_capacity(total);
        let mut vertex_offsets = Vec::with_capacity(self.num_vertices + 1);
        vertex_offsets.push(0);
        for edges in &self.incident {
            vertex_edges.extend(edges.iter().map(EdgeId::as_raw));
            vertex_offsets.push(vertex_edges.len());
        }

        FlatHypergraph {
            num_vertices: self.num_vertices,
            num_edges,
            edge_vertices,
            edge_offsets,
            vertex_edges,
            vertex_offsets,
            edge_sizes: self.edge_sizes.clone(),
        }
    }
}
