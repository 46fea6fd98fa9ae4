//! Global efficiency: mean reciprocal shortest-path distance.
//!
//! # Algorithm
//!
//! For a node set `S` of size `k` (either a uniform sample or every node):
//!
//! ```text
//! E = (1 / (k * (k - 1))) * Σ_{s ≠ t ∈ S} 1 / d(s, t)
//! ```
//!
//! Unreachable pairs (`d = +inf`) and zero distances contribute exactly `0`.
//! Self-pairs are never visited.
//!
//! The exhaustive mode runs one Dijkstra per node in parallel with rayon.
//! Per-source sums are added up in node order afterwards, so the result does
//! not depend on thread scheduling.

use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::graph::{GraphProvider, NodeId};
use crate::path::shortest_paths;
use crate::sample::sample_nodes;

/// Sample size used when the caller asks for a sampled estimate without one.
pub const DEFAULT_EFFICIENCY_SAMPLE_SIZE: usize = 20;

/// Global efficiency of `graph`.
///
/// With `Some(k)`, draws `k` distinct nodes from `rng` and averages over
/// their ordered pairs. With `None`, averages over every ordered pair and
/// leaves `rng` untouched.
///
/// # Errors
///
/// Returns [`crate::NetworkError::InvalidSampleSize`] if `k < 2` or
/// `k > node_count`.
#[instrument(skip(graph, rng))]
pub fn efficiency<G, R>(graph: &G, sample_size: Option<usize>, rng: &mut R) -> Result<f64>
where
    G: GraphProvider + Sync,
    R: Rng + ?Sized,
{
    let Some(k) = sample_size else {
        return exhaustive_efficiency(graph);
    };

    let sample = sample_nodes(graph, k, rng)?;
    let mut total = 0.0;
    for &source in &sample {
        total += reciprocal_sum(graph, source, sample.iter().copied())?;
    }
    let value = total / pair_count(k);
    debug!(sample_size = k, value, "sampled efficiency");
    Ok(value)
}

/// Global efficiency over every ordered pair of nodes.
///
/// A graph with fewer than two nodes has no pairs and yields `0.0`.
///
/// # Errors
///
/// Propagates engine errors; none occur for a well-formed provider.
#[instrument(skip(graph))]
pub fn exhaustive_efficiency<G: GraphProvider + Sync>(graph: &G) -> Result<f64> {
    let n = graph.node_count();
    if n < 2 {
        return Ok(0.0);
    }

    let per_source: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|source| reciprocal_sum(graph, source, 0..n))
        .collect::<Result<_>>()?;

    let value = per_source.iter().sum::<f64>() / pair_count(n);
    debug!(nodes = n, value, "exhaustive efficiency");
    Ok(value)
}

/// `Σ 1/d(source, t)` over `targets`, skipping the source itself.
fn reciprocal_sum<G: GraphProvider>(
    graph: &G,
    source: NodeId,
    targets: impl Iterator<Item = NodeId>,
) -> Result<f64> {
    let paths = shortest_paths(graph, source)?;
    Ok(targets
        .filter(|&t| t != source)
        .map(|t| reciprocal(paths.distance(t)))
        .sum())
}

fn reciprocal(distance: f64) -> f64 {
    if distance.is_finite() && distance > 0.0 {
        1.0 / distance
    } else {
        0.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn pair_count(k: usize) -> f64 {
    (k * (k - 1)) as f64
}
