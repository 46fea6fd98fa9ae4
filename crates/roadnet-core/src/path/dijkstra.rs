//! Single-source shortest paths (Dijkstra).
//!
//! # Algorithm
//!
//! Classical Dijkstra over a binary heap with lazy deletion:
//!
//! 1. Every node starts at `+inf` except the source at `0`.
//! 2. Pop the unsettled node with the smallest tentative distance (ties:
//!    smallest node id) and settle it.
//! 3. Relax each outgoing edge to an unsettled neighbor; a strictly smaller
//!    candidate replaces the distance and predecessor.
//!
//! Complexity: `O((V + E) log V)`.
//!
//! All distance, predecessor and frontier state is allocated per call, so
//! repeated and concurrent calls on one graph never observe each other.

use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use tracing::instrument;

use super::state::State;
use crate::error::{NetworkError, Result};
use crate::graph::{GraphProvider, NodeId, RoadAttributes};

/// Distances and predecessors from one source.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    source: NodeId,
    dist: Vec<f64>,
    prev: Vec<Option<NodeId>>,
}

impl ShortestPaths {
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Distance to `node`; `+inf` if unreachable or unknown.
    #[must_use]
    pub fn distance(&self, node: NodeId) -> f64 {
        self.dist.get(node).copied().unwrap_or(f64::INFINITY)
    }

    /// Immediate predecessor of `node` on one shortest path.
    #[must_use]
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.prev.get(node).copied().flatten()
    }

    /// Distance map indexed by node id.
    #[must_use]
    pub fn distances(&self) -> &[f64] {
        &self.dist
    }

    /// Predecessor map indexed by node id.
    #[must_use]
    pub fn predecessors(&self) -> &[Option<NodeId>] {
        &self.prev
    }

    #[must_use]
    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance(node).is_finite()
    }

    /// `(node, distance)` for every reachable node, the source included.
    pub fn reachable(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.dist
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, d)| d.is_finite())
    }

    /// Node sequence `source ..= target` along the predecessor chain.
    #[must_use]
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if !self.is_reachable(target) {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.predecessor(current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Shortest paths from `source`, weighted by [`RoadAttributes::weight`].
///
/// # Errors
///
/// Returns [`NetworkError::NodeNotFound`] if `source` is not in `graph`.
pub fn shortest_paths<G: GraphProvider>(graph: &G, source: NodeId) -> Result<ShortestPaths> {
    shortest_paths_by(graph, source, RoadAttributes::weight)
}

/// Shortest paths from `source` under a caller-supplied edge weight.
///
/// `weight` must return finite, non-negative values.
///
/// # Errors
///
/// Returns [`NetworkError::NodeNotFound`] if `source` is not in `graph`.
#[instrument(level = "trace", skip(graph, weight))]
pub fn shortest_paths_by<G, W>(graph: &G, source: NodeId, weight: W) -> Result<ShortestPaths>
where
    G: GraphProvider,
    W: Fn(&RoadAttributes) -> f64,
{
    let (dist, prev) = search(graph, source, None, &weight)?;
    Ok(ShortestPaths { source, dist, prev })
}

/// Length of the shortest path `source → target`; `+inf` if unreachable.
///
/// Stops as soon as `target` is settled.
///
/// # Errors
///
/// Returns [`NetworkError::NodeNotFound`] if either endpoint is absent.
pub fn shortest_path_length<G: GraphProvider>(
    graph: &G,
    source: NodeId,
    target: NodeId,
) -> Result<f64> {
    if !graph.contains_node(target) {
        return Err(NetworkError::NodeNotFound(target));
    }
    let (dist, _) = search(graph, source, Some(target), &RoadAttributes::weight)?;
    Ok(dist[target])
}

fn search<G, W>(
    graph: &G,
    source: NodeId,
    target: Option<NodeId>,
    weight: &W,
) -> Result<(Vec<f64>, Vec<Option<NodeId>>)>
where
    G: GraphProvider,
    W: Fn(&RoadAttributes) -> f64,
{
    if !graph.contains_node(source) {
        return Err(NetworkError::NodeNotFound(source));
    }

    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    let mut settled = FixedBitSet::with_capacity(n);
    let mut heap = BinaryHeap::new();

    dist[source] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: source,
    });

    while let Some(State { cost, node }) = heap.pop() {
        // Stale entry for an already settled node.
        if settled.contains(node) {
            continue;
        }
        settled.insert(node);

        if target == Some(node) {
            break;
        }

        for edge in graph.out_edges(node) {
            let next = edge.target;
            if settled.contains(next) {
                continue;
            }
            let candidate = cost + weight(edge.attrs);
            if candidate < dist[next] {
                dist[next] = candidate;
                prev[next] = Some(node);
                heap.push(State {
                    cost: candidate,
                    node: next,
                });
            }
        }
    }

    Ok((dist, prev))
}
