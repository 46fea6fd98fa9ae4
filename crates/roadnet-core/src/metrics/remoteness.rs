//! Remoteness: mean finite distance from one node to everything it reaches.
//!
//! The source's own zero distance and unreachable nodes are both left out of
//! the mean. A node that reaches nothing else has remoteness `0.0`.

use rayon::prelude::*;
use tracing::{instrument, trace};

use crate::error::Result;
use crate::graph::{GraphProvider, NodeId};
use crate::path::shortest_paths;

/// Mean shortest-path distance from `source` to every other reachable node.
///
/// # Errors
///
/// Returns [`crate::NetworkError::NodeNotFound`] if `source` is not in
/// `graph`.
#[instrument(level = "debug", skip(graph))]
#[allow(clippy::cast_precision_loss)]
pub fn remoteness<G: GraphProvider>(graph: &G, source: NodeId) -> Result<f64> {
    let paths = shortest_paths(graph, source)?;

    let (sum, count) = paths
        .reachable()
        .filter(|&(node, _)| node != source)
        .fold((0.0, 0_usize), |(sum, count), (_, d)| (sum + d, count + 1));

    if count == 0 {
        trace!(source, "no other node reachable");
        return Ok(0.0);
    }
    Ok(sum / count as f64)
}

/// Remoteness of several sources, computed in parallel.
///
/// Results keep the order of `sources`.
///
/// # Errors
///
/// The first [`crate::NetworkError::NodeNotFound`] in input order.
pub fn remoteness_many<G: GraphProvider + Sync>(
    graph: &G,
    sources: &[NodeId],
) -> Result<Vec<(NodeId, f64)>> {
    let results: Vec<Result<(NodeId, f64)>> = sources
        .par_iter()
        .map(|&source| remoteness(graph, source).map(|value| (source, value)))
        .collect();
    // Sequential pass so the reported error is the earliest by position.
    results.into_iter().collect()
}
