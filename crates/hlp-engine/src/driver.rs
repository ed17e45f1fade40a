use std::time::Instant;

use hlp_core::{HlpError, Label};
use hlp_graph::Hypergraph;

use crate::multicore;
use crate::options::DeviceOptions;
use crate::perf::PerfReport;
use crate::plan::{ExecutionPlan, TierThresholds};
use crate::serial;

/// Available execution backends.
///
/// A tagged variant rather than a trait object: the backend is chosen once
/// per run and the selection must not cost a heap allocation or an indirect
/// call per phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Single-threaded reference implementation.
    Serial,
    /// Rayon-based implementation with tiered kernels.
    MultiCore,
}

/// Two-phase synchronous label propagation driver.
#[derive(Debug, Clone)]
pub struct LabelPropagation {
    backend: Backend,
    options: DeviceOptions,
    thresholds: TierThresholds,
}

impl LabelPropagation {
    /// Creates a driver for the given backend, validating the options.
    pub fn new(backend: Backend, options: DeviceOptions) -> Result<Self, HlpError> {
        Ok(Self {
            backend,
            options: options.validated()?,
            thresholds: TierThresholds::default(),
        })
    }

    /// Overrides the tier thresholds used by the execution planner.
    pub fn with_thresholds(mut self, thresholds: TierThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Returns the validated options in effect.
    pub fn options(&self) -> &DeviceOptions {
        &self.options
    }

    /// Runs label propagation on `graph` until fewer than
    /// `tolerance * num_vertices` vertices change in an iteration (strict
    /// comparison) or `max_iterations` is reached. The graph is frozen if it
    /// is not already; final labels are written back to the store.
    pub fn run(
        &self,
        graph: &mut Hypergraph,
        max_iterations: usize,
        tolerance: f64,
    ) -> Result<PerfReport, HlpError> {
        let overall_start = Instant::now();
        let mut report = PerfReport::default();

        let num_vertices = graph.num_vertices();
        let num_edges = graph.num_edges();
        if num_vertices == 0 || num_edges == 0 {
            tracing::info!(num_vertices, num_edges, "empty hypergraph; nothing to compute");
            report.total_time = overall_start.elapsed();
            return Ok(report);
        }

        let setup_start = Instant::now();
        let flat = graph.freeze();
        let mut vertex_labels: Vec<Label> = graph.labels().to_vec();
        let mut edge_labels: Vec<Label> = vec![0; num_edges];
        report.add_moment("setup", setup_start.elapsed());

        let init_start = Instant::now();
        let plan = ExecutionPlan::build(&flat, &self.thresholds);
        report.add_moment("init", init_start.elapsed());

        let iteration_start = Instant::now();
        let max_labels = self.options.max_labels;
        let iterations = match self.backend {
            Backend::Serial => converge(
                num_vertices,
                max_iterations,
                tolerance,
                |vertex_labels, edge_labels| {
                    serial::edge_phase(&flat, vertex_labels, edge_labels, max_labels);
                    serial::vertex_phase(&flat, vertex_labels, edge_labels, max_labels)
                },
                &mut vertex_labels,
                &mut edge_labels,
            ),
            Backend::MultiCore => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(self.options.threads)
                    .build()
                    .map_err(|err| HlpError::kernel("thread-pool", err.to_string()))?;
                let workgroup_size = self.options.workgroup_size;
                pool.install(|| {
                    converge(
                        num_vertices,
                        max_iterations,
                        tolerance,
                        |vertex_labels, edge_labels| {
                            multicore::edge_phase(
                                &flat,
                                &plan,
                                vertex_labels,
                                edge_labels,
                                workgroup_size,
                                max_labels,
                            );
                            multicore::vertex_phase(
                                &flat,
                                &plan,
                                vertex_labels,
                                edge_labels,
                                workgroup_size,
                                max_labels,
                            )
                        },
                        &mut vertex_labels,
                        &mut edge_labels,
                    )
                })
            }
        };
        report.add_moment("iterations", iteration_start.elapsed());

        let finalize_start = Instant::now();
        graph.set_labels(&vertex_labels)?;
        report.add_moment("finalize", finalize_start.elapsed());

        report.iterations = iterations;
        report.total_time = overall_start.elapsed();
        Ok(report)
    }
}

/// Shared convergence loop. `step` executes one full iteration (both phases)
/// and returns the vertex change count, which resets every iteration.
fn converge<F>(
    num_vertices: usize,
    max_iterations: usize,
    tolerance: f64,
    mut step: F,
    vertex_labels: &mut [Label],
    edge_labels: &mut [Label],
) -> usize
where
    F: FnMut(&mut [Label], &mut [Label]) -> usize,
{
    for iteration in 0..max_iterations {
        let changes = step(vertex_labels, edge_labels);
        let change_ratio = changes as f64 / num_vertices as f64;
        if change_ratio < tolerance {
            tracing::info!(iterations = iteration + 1, changes, "converged");
            return iteration + 1;
        }
        if (iteration + 1) % 10 == 0 {
            tracing::debug!(iteration = iteration + 1, changes, "iteration completed");
        }
    }
    max_iterations
}
