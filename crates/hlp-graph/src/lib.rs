#![deny(missing_docs)]

//! Undirected hypergraph store with a frozen flat (CSR) view, binary/JSON
//! serialization, and deterministic random generators.

mod generators;
mod hash;
mod hypergraph;
mod ids;
mod serialization;

pub use generators::{
    generate_fixed, generate_hsbm, generate_planted_partition, generate_random_labels,
    generate_uniform,
};
pub use hash::canonical_hash;
pub use hypergraph::{FlatHypergraph, Hypergraph};
pub use serialization::{
    graph_from_bytes, graph_from_json_str, graph_to_bytes, load_graph, save_graph, HGR_MAGIC,
    HGR_VERSION,
};
