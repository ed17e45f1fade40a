use hlp_core::{EdgeId, VertexId};

/// Converts a [`VertexId`] into its underlying index within dense arrays.
pub(crate) fn vertex_index(id: VertexId) -> usize {
    id.as_raw() as usize
}

/// Converts an [`EdgeId`] into its underlying index within dense arrays.
pub(crate) fn edge_index(id: EdgeId) -> usize {
    id.as_raw() as usize
}

/// Creates a [`VertexId`] from an index.
pub(crate) fn make_vertex(index: usize) -> VertexId {
    VertexId::from_raw(index as u32)
}

/// Creates an [`EdgeId`] from an index.
pub(crate) fn make_edge(index: usize) -> EdgeId {
    EdgeId::from_raw(index as u32)
}
