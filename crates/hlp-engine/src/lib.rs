#![deny(missing_docs)]

//! Two-phase synchronous label propagation over frozen hypergraphs.
//!
//! An iteration first relabels every hyperedge with the most frequent label
//! among its member vertices, then relabels every vertex with the most
//! frequent label among its incident hyperedges, counting vertex changes for
//! the convergence test. Entities are dispatched to one of three kernels
//! (work-group / sub-group / work-item) chosen by cardinality, so skewed
//! degree distributions keep every worker busy.

/// Iteration driver and backend selection.
pub mod driver;
mod kernels;
mod multicore;
/// Device/backend configuration options.
pub mod options;
/// Performance report emitted by a run.
pub mod perf;
/// Cardinality-tiered execution planning.
pub mod plan;
mod serial;

pub use driver::{Backend, LabelPropagation};
pub use options::DeviceOptions;
pub use perf::{PerfMoment, PerfReport};
pub use plan::{ExecutionPlan, TierThresholds};
