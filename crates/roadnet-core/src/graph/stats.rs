//! Basic statistics for a road network.
//!
//! # Statistics Provided
//!
//! - **node_count**: Number of intersections / segment endpoints.
//! - **edge_count**: Number of directed road edges.
//! - **density**: `edge_count / (node_count * (node_count - 1))`. Zero for
//!   graphs with 0 or 1 node.
//! - **weakly_connected_component_count**: Components when edge direction is
//!   ignored. A network from [`super::RoadNetworkBuilder`] always reports 1.
//! - **one_way_edge_count**: Edges `u → v` with no `v → u` twin.
//! - **max_in_degree** / **max_out_degree**: Highest degrees over all nodes.
//! - **road_name_count**: Distinct road names.

use std::collections::BTreeSet;

use petgraph::algo::connected_components;
use serde::Serialize;

use super::network::RoadNetwork;
use super::provider::GraphProvider;

/// Summary statistics for a road network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Ranges from 0.0 (no edges) to 1.0 (all ordered pairs connected).
    pub density: f64,
    pub weakly_connected_component_count: usize,
    pub one_way_edge_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    pub road_name_count: usize,
}

impl GraphStats {
    /// Compute statistics for `network`.
    #[must_use]
    pub fn from_network(network: &RoadNetwork) -> Self {
        let node_count = network.node_count();
        let edge_count = network.edge_count();

        let one_way_edge_count = network
            .edges()
            .filter(|e| network.edge(e.target, e.source).is_none())
            .count();

        let max_in_degree = network
            .nodes()
            .map(|n| network.in_degree(n))
            .max()
            .unwrap_or(0);
        let max_out_degree = network
            .nodes()
            .map(|n| network.out_degree(n))
            .max()
            .unwrap_or(0);

        let road_name_count = network
            .edges()
            .map(|e| e.attrs.name.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count),
            weakly_connected_component_count: connected_components(network.inner()),
            one_way_edge_count,
            max_in_degree,
            max_out_degree,
            road_name_count,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}
