#![deny(missing_docs)]

//! Core vocabulary shared by every HLP crate: dense vertex/edge identifiers,
//! the label type, the structured error type, and the deterministic RNG
//! handle used by the random hypergraph generators.

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;

pub use errors::{ErrorKind, HlpError};
pub use rng::{derive_substream_seed, RngHandle};

/// Vertex label. Small non-negative values participate in propagation;
/// anything outside `[0, max_labels)` is ignored by the tallies.
pub type Label = i32;

/// Compile-time upper bound on `max_labels`. Kernel histograms are fixed
/// arrays of this length so they can live on the stack.
pub const MAX_LABELS_CAP: usize = 32;

/// Identifier for a vertex within a hypergraph, dense in `[0, N)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(u32);

impl VertexId {
    /// Creates an identifier from its raw index.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index of the identifier.
    pub fn as_raw(&self) -> u32 {
        self.0
    }
}

/// Identifier for a hyperedge, dense in `[0, M)` in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(u32);

impl EdgeId {
    /// Creates an identifier from its raw index.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index of the identifier.
    pub fn as_raw(&self) -> u32 {
        self.0
    }
}
