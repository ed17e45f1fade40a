use std::collections::BTreeSet;

use hlp_core::rng::RngHandle;
use hlp_core::{HlpError, Label, VertexId};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::hypergraph::Hypergraph;
use crate::ids::make_vertex;

/// Generates a hypergraph whose edge sizes are uniform in
/// `[min_edge_size, max_edge_size]`, vertices sampled without replacement.
pub fn generate_uniform(
    num_vertices: usize,
    num_edges: usize,
    min_edge_size: usize,
    max_edge_size: usize,
    seed: u64,
) -> Result<Hypergraph, HlpError> {
    validate_size_range(num_vertices, num_edges, min_edge_size, max_edge_size)?;

    let mut rng = RngHandle::from_seed(seed);
    let mut graph = Hypergraph::new(num_vertices);
    for _ in 0..num_edges {
        let k = rng.gen_range(min_edge_size..=max_edge_size);
        let vertices = sample_unique_vertices(num_vertices, k, &mut rng)?;
        graph.add_hyperedge(&vertices)?;
    }
    Ok(graph)
}

/// Generates a hypergraph in which every edge has exactly `edge_size` vertices.
pub fn generate_fixed(
    num_vertices: usize,
    num_edges: usize,
    edge_size: usize,
    seed: u64,
) -> Result<Hypergraph, HlpError> {
    validate_counts(num_vertices, num_edges)?;
    if edge_size < 2 {
        return Err(HlpError::config("edge-size", "edge_size must be >= 2")
            .with_context("edge_size", edge_size));
    }

    let mut rng = RngHandle::from_seed(seed);
    let mut graph = Hypergraph::new(num_vertices);
    for _ in 0..num_edges {
        let vertices = sample_unique_vertices(num_vertices, edge_size, &mut rng)?;
        graph.add_hyperedge(&vertices)?;
    }
    Ok(graph)
}

/// Generates a planted-partition hypergraph.
///
/// Vertices are assigned to communities round-robin (`v % num_communities`).
/// With probability `p_intra` an edge samples inside one community chosen
/// proportionally to its size (topping up from outside when the community is
/// smaller than the requested edge size); otherwise the edge samples
/// uniformly across all vertices.
pub fn generate_planted_partition(
    num_vertices: usize,
    num_edges: usize,
    num_communities: usize,
    p_intra: f64,
    min_edge_size: usize,
    max_edge_size: usize,
    seed: u64,
) -> Result<Hypergraph, HlpError> {
    validate_size_range(num_vertices, num_edges, min_edge_size, max_edge_size)?;
    validate_communities(num_communities)?;
    validate_probability("p_intra", p_intra)?;

    let mut rng = RngHandle::from_seed(seed);
    let mut graph = Hypergraph::new(num_vertices);
    let communities = round_robin_communities(num_vertices, num_communities);

    for _ in 0..num_edges {
        let k = rng.gen_range(min_edge_size..=max_edge_size);
        let intra = rng.gen_range(0.0..1.0) < p_intra;
        let vertices = if intra {
            let idx = pick_weighted_community(&communities, num_vertices, &mut rng);
            let community = &communities[idx];
            let mut vertices =
                sample_unique_from_pool(community, k.min(community.len()), &mut rng);
            if vertices.len() < k {
                // Community smaller than the edge; fill from the remainder.
                let mut pool = Vec::with_capacity(num_vertices - community.len());
                for (c, members) in communities.iter().enumerate() {
                    if c != idx {
                        pool.extend_from_slice(members);
                    }
                }
                let extra = sample_unique_from_pool(&pool, k - vertices.len(), &mut rng);
                vertices.extend(extra);
            }
            vertices
        } else {
            sample_unique_vertices(num_vertices, k, &mut rng)?
        };
        graph.add_hyperedge(&vertices)?;
    }
    Ok(graph)
}

/// Generates a hypergraph stochastic-block-model graph by rejection sampling:
/// a candidate edge is accepted with probability `p_intra` when all its
/// vertices share a community (`v % num_communities`) and `p_inter` otherwise.
pub fn generate_hsbm(
    num_vertices: usize,
    num_edges: usize,
    num_communities: usize,
    p_intra: f64,
    p_inter: f64,
    min_edge_size: usize,
    max_edge_size: usize,
    seed: u64,
) -> Result<Hypergraph, HlpError> {
    validate_size_range(num_vertices, num_edges, min_edge_size, max_edge_size)?;
    validate_communities(num_communities)?;
    validate_probability("p_intra", p_intra)?;
    validate_probability("p_inter", p_inter)?;

    let mut rng = RngHandle::from_seed(seed);
    let mut graph = Hypergraph::new(num_vertices);
    let max_attempts = (num_edges * 20).max(1000);

    let mut added = 0usize;
    let mut attempts = 0usize;
    while added < num_edges {
        if attempts > max_attempts {
            return Err(HlpError::config(
                "hsbm-rejections",
                "too many rejected edge candidates",
            )
            .with_context("attempts", attempts)
            .with_hint("increase p_intra/p_inter or adjust the edge size range"));
        }
        attempts += 1;

        let k = rng.gen_range(min_edge_size..=max_edge_size);
        let vertices = sample_unique_vertices(num_vertices, k, &mut rng)?;
        let base = vertices[0].as_raw() as usize % num_communities;
        let all_same = vertices
            .iter()
            .all(|v| v.as_raw() as usize % num_communities == base);

        let prob = if all_same { p_intra } else { p_inter };
        if rng.gen_range(0.0..1.0) <= prob {
            graph.add_hyperedge(&vertices)?;
            added += 1;
        }
    }
    tracing::debug!(edges = added, attempts, "hsbm generation complete");
    Ok(graph)
}

/// Generates a label vector with values uniform in `[0, num_classes)`.
pub fn generate_random_labels(
    num_vertices: usize,
    num_classes: usize,
    seed: u64,
) -> Result<Vec<Label>, HlpError> {
    if num_classes == 0 {
        return Err(HlpError::config("label-classes", "num_classes must be > 0"));
    }
    let mut rng = RngHandle::from_seed(seed);
    Ok((0..num_vertices)
        .map(|_| rng.gen_range(0..num_classes as Label))
        .collect())
}

fn sample_unique_vertices(
    num_vertices: usize,
    k: usize,
    rng: &mut RngHandle,
) -> Result<Vec<VertexId>, HlpError> {
    if k > num_vertices {
        return Err(HlpError::config(
            "edge-size-exceeds-vertices",
            "edge size exceeds number of vertices",
        )
        .with_context("edge_size", k)
        .with_context("num_vertices", num_vertices));
    }
    let mut picked = BTreeSet::new();
    while picked.len() < k {
        picked.insert(rng.gen_range(0..num_vertices));
    }
    Ok(picked.into_iter().map(make_vertex).collect())
}

fn sample_unique_from_pool(pool: &[VertexId], k: usize, rng: &mut RngHandle) -> Vec<VertexId> {
    let mut buffer = pool.to_vec();
    buffer.shuffle(rng);
    buffer.truncate(k.min(buffer.len()));
    buffer.sort_by_key(|id| id.as_raw());
    buffer
}

fn round_robin_communities(num_vertices: usize, num_communities: usize) -> Vec<Vec<VertexId>> {
    let mut communities = vec![Vec::new(); num_communities];
    for v in 0..num_vertices {
        communities[v % num_communities].push(make_vertex(v));
    }
    communities
}

fn pick_weighted_community(
    communities: &[Vec<VertexId>],
    total: usize,
    rng: &mut RngHandle,
) -> usize {
    let pick = rng.gen_range(0..total);
    let mut acc = 0usize;
    for (idx, community) in communities.iter().enumerate() {
        acc += community.len();
        if pick < acc {
            return idx;
        }
    }
    communities.len() - 1
}

fn validate_counts(num_vertices: usize, num_edges: usize) -> Result<(), HlpError> {
    if num_vertices == 0 {
        return Err(HlpError::config("num-vertices", "num_vertices must be > 0"));
    }
    if num_edges == 0 {
        return Err(HlpError::config("num-edges", "num_edges must be > 0"));
    }
    Ok(())
}

fn validate_size_range(
    num_vertices: usize,
    num_edges: usize,
    min_edge_size: usize,
    max_edge_size: usize,
) -> Result<(), HlpError> {
    validate_counts(num_vertices, num_edges)?;
    if min_edge_size < 2 {
        return Err(HlpError::config("min-edge-size", "min_edge_size must be >= 2")
            .with_context("min_edge_size", min_edge_size));
    }
    if max_edge_size < min_edge_size {
        return Err(
            HlpError::config("max-edge-size", "max_edge_size must be >= min_edge_size")
                .with_context("min_edge_size", min_edge_size)
                .with_context("max_edge_size", max_edge_size),
        );
    }
    Ok(())
}

fn validate_communities(num_communities: usize) -> Result<(), HlpError> {
    if num_communities == 0 {
        return Err(HlpError::config("num-communities", "num_communities must be > 0"));
    }
    Ok(())
}

fn validate_probability(name: &str, value: f64) -> Result<(), HlpError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(HlpError::config("probability-range", "probability must be in [0, 1]")
            .with_context(name, value));
    }
    Ok(())
}
