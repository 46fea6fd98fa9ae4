//! Network assembly from road segments.
//!
//! # Overview
//!
//! An ingestion collaborator hands over a flat list of [`RoadSegment`]s whose
//! endpoints are arbitrary `u64` keys (e.g. snapped coordinate hashes or
//! source-dataset ids). [`RoadNetworkBuilder::build`] turns that list into an
//! immutable [`RoadNetwork`]:
//!
//! 1. Each segment materializes as one or two directed edges according to its
//!    [`super::OneWay`] status. Segments whose endpoints coincide are skipped.
//! 2. A later segment for an ordered pair `(u, v)` replaces the earlier one.
//! 3. Only the largest weakly connected component is kept. On a size tie the
//!    component containing the smallest key wins.
//! 4. Surviving keys are sorted ascending and renumbered `0..N-1`.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::{
    graph::{DiGraph, NodeIndex},
    unionfind::UnionFind,
};
use tracing::{debug, info, instrument};

use super::network::{NodeData, RoadNetwork, check_weight};
use super::road::{Coordinate, RoadAttributes, RoadSegment};
use crate::error::{NetworkError, Result};

/// Collects segments and coordinates, then assembles a [`RoadNetwork`].
#[derive(Debug, Clone, Default)]
pub struct RoadNetworkBuilder {
    segments: Vec<RoadSegment>,
    coordinates: HashMap<u64, Coordinate>,
}

impl RoadNetworkBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_segment(&mut self, segment: RoadSegment) -> &mut Self {
        self.segments.push(segment);
        self
    }

    pub fn add_segments(&mut self, segments: impl IntoIterator<Item = RoadSegment>) -> &mut Self {
        self.segments.extend(segments);
        self
    }

    /// Record a display coordinate for an endpoint key. Keys that end up
    /// outside the kept component are ignored.
    pub fn set_coordinate(&mut self, key: u64, coordinate: Coordinate) -> &mut Self {
        self.coordinates.insert(key, coordinate);
        self
    }

    /// Number of segments added so far.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Assemble the network.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidNetwork`] if a segment has a negative or
    /// non-finite weight, or if no segment survives self-loop removal.
    #[instrument(skip(self), fields(segments = self.segments.len()))]
    pub fn build(&self) -> Result<RoadNetwork> {
        let mut directed: BTreeMap<(u64, u64), &RoadAttributes> = BTreeMap::new();
        let mut self_loops = 0_usize;

        for segment in &self.segments {
            if segment.from == segment.to {
                self_loops += 1;
                continue;
            }
            check_weight(&segment.attrs)?;
            for pair in segment.directed_pairs() {
                directed.insert(pair, &segment.attrs);
            }
        }

        if directed.is_empty() {
            return Err(NetworkError::InvalidNetwork(
                "no usable road segments".to_string(),
            ));
        }
        if self_loops > 0 {
            debug!(self_loops, "skipped segments that start and end at the same point");
        }

        let kept = largest_weak_component(directed.keys().copied());
        let dense: HashMap<u64, usize> = kept.iter().enumerate().map(|(i, &k)| (k, i)).collect();

        let mut graph = DiGraph::with_capacity(kept.len(), directed.len());
        for &key in &kept {
            graph.add_node(NodeData {
                key,
                coordinate: self.coordinates.get(&key).copied(),
            });
        }

        let mut dropped_edges = 0_usize;
        for ((from, to), attrs) in directed {
            match (dense.get(&from), dense.get(&to)) {
                (Some(&u), Some(&v)) => {
                    graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), attrs.clone());
                }
                _ => dropped_edges += 1,
            }
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dropped_edges,
            "road network assembled"
        );

        Ok(RoadNetwork::from_graph(graph))
    }
}

/// Keys of the largest weakly connected component, sorted ascending.
fn largest_weak_component(pairs: impl Iterator<Item = (u64, u64)> + Clone) -> Vec<u64> {
    let keys: BTreeSet<u64> = pairs.clone().flat_map(|(a, b)| [a, b]).collect();
    let keys: Vec<u64> = keys.into_iter().collect();
    let position: HashMap<u64, usize> = keys.iter().enumerate().map(|(i, &k)| (k, i)).collect();

    let mut components = UnionFind::<usize>::new(keys.len());
    for (a, b) in pairs {
        components.union(position[&a], position[&b]);
    }

    let mut sizes: HashMap<usize, usize> = HashMap::new();
    for i in 0..keys.len() {
        *sizes.entry(components.find(i)).or_default() += 1;
    }

    // Keys are visited in ascending order, so the first root reaching the
    // maximum size is the one containing the smallest key.
    let mut best_root = None;
    let mut best_size = 0;
    for i in 0..keys.len() {
        let root = components.find(i);
        let size = sizes[&root];
        if size > best_size {
            best_size = size;
            best_root = Some(root);
        }
    }

    keys.iter()
        .enumerate()
        .filter(|&(i, _)| Some(components.find(i)) == best_root)
        .map(|(_, &k)| k)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphProvider, OneWay};

    fn seg(from: u64, to: u64, name: &str) -> RoadSegment {
        RoadSegment::new(from, to, name, 25.0, 25)
    }

    #[test]
    fn two_way_segments_produce_both_directions() {
        let mut builder = RoadNetworkBuilder::new();
        builder.add_segment(seg(100, 200, "MAIN ST"));
        let net = builder.build().expect("builds");
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 2);
        assert!(net.edge(0, 1).is_some());
        assert!(net.edge(1, 0).is_some());
    }

    #[test]
    fn one_way_codes_pick_direction() {
        let mut builder = RoadNetworkBuilder::new();
        builder
            .add_segment(seg(1, 2, "FWD").one_way(OneWay::Forward))
            .add_segment(seg(2, 3, "BWD").one_way(OneWay::Backward));
        let net = builder.build().expect("builds");
        assert_eq!(net.edge_count(), 2);
        assert!(net.edge(0, 1).is_some());
        assert!(net.edge(1, 0).is_none());
        assert!(net.edge(2, 1).is_some());
        assert!(net.edge(1, 2).is_none());
    }

    #[test]
    fn self_loops_are_skipped() {
        let mut builder = RoadNetworkBuilder::new();
        builder
            .add_segment(seg(5, 5, "CUL DE SAC"))
            .add_segment(seg(5, 6, "A"));
        let net = builder.build().expect("builds");
        assert_eq!(net.edge_count(), 2);
    }

    #[test]
    fn only_self_loops_is_an_error() {
        let mut builder = RoadNetworkBuilder::new();
        builder.add_segment(seg(5, 5, "LOOP"));
        assert!(matches!(builder.build(), Err(NetworkError::InvalidNetwork(_))));
    }

    #[test]
    fn keeps_largest_weak_component_and_sorts_keys() {
        let mut builder = RoadNetworkBuilder::new();
        builder
            .add_segment(seg(30, 10, "BIG").one_way(OneWay::Forward))
            .add_segment(seg(20, 10, "BIG").one_way(OneWay::Forward))
            .add_segment(seg(7, 8, "SMALL"));
        let net = builder.build().expect("builds");
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.external_key(0), Some(10));
        assert_eq!(net.external_key(1), Some(20));
        assert_eq!(net.external_key(2), Some(30));
        assert_eq!(net.node_for_key(7), None);
        // 30 -> 10 and 20 -> 10 in dense ids.
        assert!(net.edge(2, 0).is_some());
        assert!(net.edge(1, 0).is_some());
    }

    #[test]
    fn component_size_tie_keeps_smallest_key() {
        let mut builder = RoadNetworkBuilder::new();
        builder.add_segment(seg(50, 60, "B")).add_segment(seg(1, 2, "A"));
        let net = builder.build().expect("builds");
        assert_eq!(net.external_key(0), Some(1));
        assert_eq!(net.node_count(), 2);
    }

    #[test]
    fn later_segment_replaces_earlier_for_same_pair() {
        let mut builder = RoadNetworkBuilder::new();
        builder
            .add_segment(seg(1, 2, "FIRST"))
            .add_segment(seg(1, 2, "SECOND").one_way(OneWay::Forward));
        let net = builder.build().expect("builds");
        assert_eq!(net.edge(0, 1).map(|a| a.name.as_str()), Some("SECOND"));
        assert_eq!(net.edge(1, 0).map(|a| a.name.as_str()), Some("FIRST"));
    }

    #[test]
    fn coordinates_follow_their_keys() {
        let mut builder = RoadNetworkBuilder::new();
        builder
            .add_segment(seg(9, 4, "A"))
            .set_coordinate(9, Coordinate::new(1.0, 2.0))
            .set_coordinate(77, Coordinate::new(5.0, 5.0));
        let net = builder.build().expect("builds");
        assert_eq!(net.coordinate(1), Some(Coordinate::new(1.0, 2.0)));
        assert_eq!(net.coordinate(0), None);
    }

    #[test]
    fn unusable_weight_is_rejected() {
        let mut builder = RoadNetworkBuilder::new();
        builder.add_segment(seg(1, 2, "BAD").travel_time(f64::INFINITY));
        assert!(matches!(builder.build(), Err(NetworkError::InvalidNetwork(_))));
    }
}
