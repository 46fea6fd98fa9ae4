//! Road search: which nodes lie on every one of several named roads?
//!
//! A node lies on a road when it is either endpoint of at least one edge
//! carrying that name. The usual query is two names, giving the junction
//! nodes where the roads meet; the result feeds `source` arguments of the
//! path and metric functions.
//!
//! [`find_intersections`] scans the edges once per call. [`RoadIndex`]
//! scans once up front and answers repeated queries from the index.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, instrument};

use crate::error::{NetworkError, Result};
use crate::graph::{GraphProvider, NodeId};

/// Nodes lying on every road in `road_names`.
///
/// An empty `road_names` yields an empty set.
///
/// # Errors
///
/// Returns [`NetworkError::RoadNotFound`] for the first name, in list order,
/// that no edge carries. Nothing is intersected before every name resolves.
#[instrument(skip(graph, road_names), fields(roads = road_names.len()))]
pub fn find_intersections<G, S>(graph: &G, road_names: &[S]) -> Result<BTreeSet<NodeId>>
where
    G: GraphProvider,
    S: AsRef<str>,
{
    let mut per_road = Vec::with_capacity(road_names.len());
    for name in road_names {
        let name = name.as_ref();
        let nodes = nodes_on_road(graph, name);
        if nodes.is_empty() {
            return Err(NetworkError::RoadNotFound(name.to_string()));
        }
        per_road.push(nodes);
    }
    Ok(intersect_all(per_road))
}

fn nodes_on_road<G: GraphProvider>(graph: &G, name: &str) -> BTreeSet<NodeId> {
    graph
        .edges()
        .filter(|e| e.attrs.name == name)
        .flat_map(|e| [e.source, e.target])
        .collect()
}

fn intersect_all(mut sets: Vec<BTreeSet<NodeId>>) -> BTreeSet<NodeId> {
    // Start from the smallest set so the intersection shrinks fastest.
    sets.sort_by_key(BTreeSet::len);
    let mut iter = sets.into_iter();
    let Some(mut acc) = iter.next() else {
        return BTreeSet::new();
    };
    for set in iter {
        acc.retain(|node| set.contains(node));
        if acc.is_empty() {
            break;
        }
    }
    acc
}

/// Precomputed road name → node set index.
#[derive(Debug, Clone, Default)]
pub struct RoadIndex {
    roads: BTreeMap<String, BTreeSet<NodeId>>,
}

impl RoadIndex {
    /// Index every edge name in `graph`.
    #[must_use]
    pub fn new<G: GraphProvider>(graph: &G) -> Self {
        let mut roads: BTreeMap<String, BTreeSet<NodeId>> = BTreeMap::new();
        for edge in graph.edges() {
            let nodes = roads.entry(edge.attrs.name.clone()).or_default();
            nodes.insert(edge.source);
            nodes.insert(edge.target);
        }
        debug!(roads = roads.len(), "road index built");
        Self { roads }
    }

    /// Nodes on road `name`, if any edge carries it.
    #[must_use]
    pub fn nodes_on(&self, name: &str) -> Option<&BTreeSet<NodeId>> {
        self.roads.get(name)
    }

    /// Same contract as the free [`find_intersections`].
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::RoadNotFound`] for the first unknown name.
    pub fn find_intersections<S: AsRef<str>>(&self, road_names: &[S]) -> Result<BTreeSet<NodeId>> {
        let per_road = road_names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.nodes_on(name)
                    .cloned()
                    .ok_or_else(|| NetworkError::RoadNotFound(name.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(intersect_all(per_road))
    }

    /// Every indexed road name, sorted.
    pub fn road_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.roads.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }
}
