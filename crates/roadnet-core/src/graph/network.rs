//! Petgraph-backed immutable road network.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use super::provider::{EdgeView, GraphProvider, NodeId};
use super::road::{Coordinate, RoadAttributes};
use crate::error::{NetworkError, Result};

/// Per-node payload: the ingestion key and an optional display coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub key: u64,
    pub coordinate: Option<Coordinate>,
}

/// A directed road network with dense node ids.
///
/// Node `i` is petgraph node index `i`. Nodes are never removed after
/// construction, so the ids stay dense. At most one edge exists per ordered
/// pair `(u, v)`; opposite directions are independent edges.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    graph: DiGraph<NodeData, RoadAttributes>,
    key_index: HashMap<u64, NodeId>,
}

impl RoadNetwork {
    /// Build a network directly from dense ids.
    ///
    /// Node `i` gets ingestion key `i`. No component filtering happens here;
    /// use [`super::RoadNetworkBuilder`] for raw segment data. A repeated
    /// `(u, v)` pair replaces the earlier attributes.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidNetwork`] for self-loops, ids outside
    /// `0..node_count`, or weights that are negative or not finite.
    pub fn from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (NodeId, NodeId, RoadAttributes)>,
    ) -> Result<Self> {
        let mut graph = DiGraph::with_capacity(node_count, node_count * 2);
        let mut key_index = HashMap::with_capacity(node_count);
        for id in 0..node_count {
            let key = id as u64;
            graph.add_node(NodeData {
                key,
                coordinate: None,
            });
            key_index.insert(key, id);
        }

        for (u, v, attrs) in edges {
            if u >= node_count || v >= node_count {
                return Err(NetworkError::InvalidNetwork(format!(
                    "edge ({u}, {v}) references a node outside 0..{node_count}"
                )));
            }
            if u == v {
                return Err(NetworkError::InvalidNetwork(format!("self-loop at node {u}")));
            }
            check_weight(&attrs)?;
            graph.update_edge(NodeIndex::new(u), NodeIndex::new(v), attrs);
        }

        Ok(Self { graph, key_index })
    }

    /// Assemble from already-validated parts (used by the builder).
    pub(crate) fn from_graph(graph: DiGraph<NodeData, RoadAttributes>) -> Self {
        let key_index = graph
            .node_indices()
            .map(|idx| (graph[idx].key, idx.index()))
            .collect();
        Self { graph, key_index }
    }

    /// Attach a display coordinate to `node`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::NodeNotFound`] if `node` is not in the network.
    pub fn set_coordinate(&mut self, node: NodeId, coordinate: Coordinate) -> Result<()> {
        let data = self
            .graph
            .node_weight_mut(NodeIndex::new(node))
            .ok_or(NetworkError::NodeNotFound(node))?;
        data.coordinate = Some(coordinate);
        Ok(())
    }

    /// Attributes of the edge `u → v`, if present.
    #[must_use]
    pub fn edge(&self, u: NodeId, v: NodeId) -> Option<&RoadAttributes> {
        self.graph
            .find_edge(NodeIndex::new(u), NodeIndex::new(v))
            .and_then(|e| self.graph.edge_weight(e))
    }

    /// Ingestion key of `node`.
    #[must_use]
    pub fn external_key(&self, node: NodeId) -> Option<u64> {
        self.graph.node_weight(NodeIndex::new(node)).map(|n| n.key)
    }

    /// Dense id of the node with ingestion key `key`.
    #[must_use]
    pub fn node_for_key(&self, key: u64) -> Option<NodeId> {
        self.key_index.get(&key).copied()
    }

    /// Number of incoming edges of `node`.
    #[must_use]
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.graph
            .neighbors_directed(NodeIndex::new(node), petgraph::Direction::Incoming)
            .count()
    }

    /// Number of outgoing edges of `node`.
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.graph.neighbors(NodeIndex::new(node)).count()
    }

    /// Underlying petgraph graph, for petgraph algorithms.
    #[must_use]
    pub const fn inner(&self) -> &DiGraph<NodeData, RoadAttributes> {
        &self.graph
    }
}

impl GraphProvider for RoadNetwork {
    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        self.graph.edges(NodeIndex::new(node)).map(|e| EdgeView {
            source: e.source().index(),
            target: e.target().index(),
            attrs: e.weight(),
        })
    }

    fn coordinate(&self, node: NodeId) -> Option<Coordinate> {
        self.graph
            .node_weight(NodeIndex::new(node))
            .and_then(|n| n.coordinate)
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

pub(crate) fn check_weight(attrs: &RoadAttributes) -> Result<()> {
    let weight = attrs.weight();
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(NetworkError::InvalidNetwork(format!(
            "edge on '{}' has unusable weight {weight}",
            attrs.name
        )))
    }
}
