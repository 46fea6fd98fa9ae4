//! The read-only graph interface every algorithm consumes.

use super::road::{Coordinate, RoadAttributes};

/// Dense node identifier in `0..node_count`.
pub type NodeId = usize;

/// One directed edge as seen through a [`GraphProvider`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView<'a> {
    pub source: NodeId,
    pub target: NodeId,
    pub attrs: &'a RoadAttributes,
}

impl EdgeView<'_> {
    /// `(source, target)` key of this edge.
    #[must_use]
    pub const fn key(&self) -> (NodeId, NodeId) {
        (self.source, self.target)
    }

    /// Search weight of this edge (see [`RoadAttributes::weight`]).
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.attrs.weight()
    }
}

/// Read-only access to a directed road graph.
///
/// Implementors must number nodes densely: every id in `0..node_count()` is a
/// node and no other id is. Algorithms size their per-call state from
/// `node_count()` and index it by [`NodeId`].
///
/// Any storage (adjacency list, CSR, petgraph) can satisfy this trait; the
/// bundled implementation is [`super::RoadNetwork`].
pub trait GraphProvider {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Outgoing edges of `node`. Empty for unknown nodes.
    fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeView<'_>> + '_;

    /// Display coordinate of `node`, if known.
    fn coordinate(&self, node: NodeId) -> Option<Coordinate>;

    /// All node ids in ascending order.
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        0..self.node_count()
    }

    /// Whether `node` is a valid id.
    fn contains_node(&self, node: NodeId) -> bool {
        node < self.node_count()
    }

    /// Every edge, grouped by source in ascending source order.
    fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        self.nodes().flat_map(move |node| self.out_edges(node))
    }

    /// Number of directed edges.
    fn edge_count(&self) -> usize {
        self.edges().count()
    }
}
