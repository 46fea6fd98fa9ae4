//! Shortest-path DAG: every shortest-path predecessor plus path counts.
//!
//! # Overview
//!
//! [`super::shortest_paths`] keeps a single predecessor per node. Load
//! estimation needs *all* shortest paths, so this variant records, for every
//! node `v`:
//!
//! - `preds[v]`: every `u` with `dist[u] + w(u, v) == dist[v]`,
//! - `sigma[v]`: the number of distinct shortest paths `source → v`.
//!
//! This is the forward phase of Brandes' algorithm with Dijkstra distances in
//! place of BFS levels, counting over the tight edges in topological order.
//!
//! # Edge shares
//!
//! For a target `t`, let `lambda[v]` be the number of shortest paths
//! `v → t` inside the DAG. Then the number of shortest `source → t` paths
//! through edge `u → v` is `sigma[u] * lambda[v]` (when `u ∈ preds[v]`), and
//! its share is that count over `sigma[t]`. This equals enumerating every
//! path and counting, without the exponential blow-up.
//!
//! # Ties
//!
//! Two path weights compare equal when they differ by at most
//! [`TIE_TOLERANCE`] relative to their magnitude, so floating-point rounding
//! does not split mathematically equal routes.

use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use super::dijkstra::shortest_paths;
use super::state::State;
use crate::error::Result;
use crate::graph::{GraphProvider, NodeId};

/// Relative tolerance under which two path weights count as equal.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// All shortest paths from one source, in compressed form.
#[derive(Debug, Clone)]
pub struct ShortestPathDag {
    source: NodeId,
    dist: Vec<f64>,
    sigma: Vec<f64>,
    preds: Vec<Vec<NodeId>>,
    /// Topological order of the DAG, source first.
    order: Vec<NodeId>,
}

/// Build the shortest-path DAG from `source`.
///
/// Distances come from a plain Dijkstra run. Every edge `u → v` with
/// `dist[u] + w(u, v) == dist[v]` is then *tight*, and path counts are
/// propagated over the tight edges in topological order. Across a
/// zero-weight edge a predecessor shares its successor's distance.
///
/// A cycle of zero-weight tight edges has no topological order. It is broken
/// at the node with the smallest `(distance, id)` among those already entered
/// from outside the cycle: that node is placed next and keeps only the
/// predecessors placed before it, so paths around the cycle back into it are
/// not counted.
///
/// # Errors
///
/// Returns [`crate::NetworkError::NodeNotFound`] if `source` is not in `graph`.
#[instrument(level = "trace", skip(graph))]
pub fn shortest_path_dag<G: GraphProvider>(graph: &G, source: NodeId) -> Result<ShortestPathDag> {
    let dist = shortest_paths(graph, source)?.distances().to_vec();
    let n = dist.len();

    let mut tight_preds: Vec<Vec<NodeId>> = vec![Vec::new(); n];
    let mut tight_succs: Vec<Vec<NodeId>> = vec![Vec::new(); n];
    for node in (0..n).filter(|&v| dist[v].is_finite()) {
        for edge in graph.out_edges(node) {
            // A simple path never returns to its source.
            if edge.target == source {
                continue;
            }
            if same_distance(dist[node] + edge.weight(), dist[edge.target]) {
                tight_preds[edge.target].push(node);
                tight_succs[node].push(edge.target);
            }
        }
    }

    let mut waiting: Vec<usize> = tight_preds.iter().map(Vec::len).collect();
    let mut ready = BinaryHeap::from([State {
        cost: 0.0,
        node: source,
    }]);
    // Nodes with some but not all tight predecessors placed. Only consulted
    // when `ready` runs dry, which takes a zero-weight cycle.
    let mut partial = BinaryHeap::new();

    let mut sigma = vec![0.0_f64; n];
    let mut preds: Vec<Vec<NodeId>> = vec![Vec::new(); n];
    let mut order = Vec::with_capacity(n);
    let mut placed = FixedBitSet::with_capacity(n);

    while let Some(State { node, .. }) = ready.pop().or_else(|| partial.pop()) {
        if placed.contains(node) {
            continue;
        }
        placed.insert(node);
        order.push(node);

        if node == source {
            sigma[node] = 1.0;
        } else {
            if waiting[node] > 0 {
                debug!(node, "zero-weight cycle broken");
            }
            preds[node] = tight_preds[node]
                .iter()
                .copied()
                .filter(|&p| placed.contains(p))
                .collect();
            sigma[node] = preds[node].iter().map(|&p| sigma[p]).sum();
        }

        for &next in &tight_succs[node] {
            if placed.contains(next) {
                continue;
            }
            waiting[next] -= 1;
            let entry = State {
                cost: dist[next],
                node: next,
            };
            if waiting[next] == 0 {
                ready.push(entry);
            } else {
                partial.push(entry);
            }
        }
    }

    Ok(ShortestPathDag {
        source,
        dist,
        sigma,
        preds,
        order,
    })
}

fn same_distance(a: f64, b: f64) -> bool {
    b.is_finite() && (a == b || (a - b).abs() <= TIE_TOLERANCE * a.abs().max(b.abs()))
}

impl ShortestPathDag {
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Distance to `node`; `+inf` if unreachable or unknown.
    #[must_use]
    pub fn distance(&self, node: NodeId) -> f64 {
        self.dist.get(node).copied().unwrap_or(f64::INFINITY)
    }

    /// Number of distinct shortest paths `source → node` (0 if unreachable).
    #[must_use]
    pub fn path_count(&self, node: NodeId) -> f64 {
        self.sigma.get(node).copied().unwrap_or(0.0)
    }

    /// Every predecessor of `node` on some shortest path.
    #[must_use]
    pub fn predecessors(&self, node: NodeId) -> &[NodeId] {
        self.preds.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Per-edge path counts towards `target`.
    ///
    /// Returns `None` when `target` is the source or unreachable: there is
    /// no path to share out.
    #[must_use]
    pub fn shares_to(&self, target: NodeId) -> Option<PathShares<'_>> {
        if target == self.source || self.path_count(target) <= 0.0 {
            return None;
        }

        let mut lambda = vec![0.0_f64; self.dist.len()];
        lambda[target] = 1.0;
        // Reverse topological order visits every node before its predecessors.
        for &node in self.order.iter().rev() {
            let through = lambda[node];
            if through <= 0.0 {
                continue;
            }
            for &pred in &self.preds[node] {
                lambda[pred] += through;
            }
        }

        Some(PathShares {
            dag: self,
            target,
            lambda,
        })
    }

    /// Enumerate every shortest path `source → target` explicitly.
    ///
    /// The number of paths can grow exponentially with graph size; prefer
    /// [`Self::shares_to`] for anything but small graphs.
    #[must_use]
    pub fn all_paths_to(&self, target: NodeId) -> Vec<Vec<NodeId>> {
        let mut paths = Vec::new();
        if !self.distance(target).is_finite() {
            return paths;
        }

        let mut stack = vec![(target, vec![target])];
        while let Some((node, reversed)) = stack.pop() {
            if node == self.source {
                let mut path = reversed;
                path.reverse();
                paths.push(path);
                continue;
            }
            for &pred in self.predecessors(node) {
                let mut extended = reversed.clone();
                extended.push(pred);
                stack.push((pred, extended));
            }
        }
        paths
    }
}

/// Shortest-path counts towards one target, per edge.
#[derive(Debug)]
pub struct PathShares<'a> {
    dag: &'a ShortestPathDag,
    target: NodeId,
    lambda: Vec<f64>,
}

impl PathShares<'_> {
    #[must_use]
    pub const fn target(&self) -> NodeId {
        self.target
    }

    /// Total number of shortest paths `source → target`.
    #[must_use]
    pub fn total_paths(&self) -> f64 {
        self.dag.path_count(self.target)
    }

    /// Number of those paths that traverse `u → v`.
    #[must_use]
    pub fn paths_through(&self, u: NodeId, v: NodeId) -> f64 {
        let through = self.lambda.get(v).copied().unwrap_or(0.0);
        if through <= 0.0 || !self.dag.predecessors(v).contains(&u) {
            return 0.0;
        }
        self.dag.path_count(u) * through
    }

    /// Fraction of shortest paths `source → target` that traverse `u → v`.
    #[must_use]
    pub fn share(&self, u: NodeId, v: NodeId) -> f64 {
        self.paths_through(u, v) / self.total_paths()
    }
}
