//! Road load: sampled edge betweenness for one named road.
//!
//! # Algorithm
//!
//! 1. Select every edge whose name equals the road name.
//! 2. Draw `k` distinct nodes uniformly without replacement.
//! 3. For each sampled source `s`, build the shortest-path DAG once. For each
//!    other sampled node `t`, every selected edge gains the fraction of
//!    shortest `s → t` paths that traverse it. Unreachable pairs add nothing.
//! 4. Divide each edge total by `k * (k - 1)`, the number of ordered pairs.
//!
//! Complexity: `O(k * ((V + E) log V + k * (V + E)))` regardless of how many
//! equal-weight paths exist, because paths are counted, not listed.
//!
//! # Output
//!
//! A [`RoadLoad`] holding one [`EdgeLoad`] per selected edge, each in
//! `[0, 1]`, sorted by `(source, target)`.
//!
//! Opposite directions of a two-way road are separate edges, and a trip uses
//! only one of them. [`RoadLoad::segments`] folds each direction pair into one
//! [`SegmentLoad`], which is the share of trips crossing that stretch of road
//! in either direction.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{NetworkError, Result};
use crate::graph::{GraphProvider, NodeId};
use crate::path::shortest_path_dag;
use crate::sample::{sample_nodes, validate_sample_size};

/// Sample size used when the caller has no preference.
pub const DEFAULT_LOAD_SAMPLE_SIZE: usize = 10;

/// Estimated relative load on one directed edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeLoad {
    pub source: NodeId,
    pub target: NodeId,
    pub load: f64,
}

/// Load on one stretch of road, both directions combined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentLoad {
    /// Smaller endpoint id.
    pub a: NodeId,
    /// Larger endpoint id.
    pub b: NodeId,
    pub load: f64,
}

/// Load estimate for every edge of one road.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadLoad {
    pub road: String,
    /// Sampled nodes, in draw order.
    pub sample: Vec<NodeId>,
    pub edges: Vec<EdgeLoad>,
}

impl RoadLoad {
    /// Arithmetic mean load across the road's edges.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> f64 {
        if self.edges.is_empty() {
            return 0.0;
        }
        self.edges.iter().map(|e| e.load).sum::<f64>() / self.edges.len() as f64
    }

    /// Per-segment loads: `a → b` and `b → a` summed, sorted by `(a, b)`.
    ///
    /// A shortest trip never crosses both directions of a segment, so the
    /// sum stays in `[0, 1]`.
    #[must_use]
    pub fn segments(&self) -> Vec<SegmentLoad> {
        let mut merged: BTreeMap<(NodeId, NodeId), f64> = BTreeMap::new();
        for edge in &self.edges {
            let key = (edge.source.min(edge.target), edge.source.max(edge.target));
            *merged.entry(key).or_default() += edge.load;
        }
        merged
            .into_iter()
            .map(|((a, b), load)| SegmentLoad { a, b, load })
            .collect()
    }

    /// Load on `source → target`, if that edge belongs to the road.
    #[must_use]
    pub fn load(&self, source: NodeId, target: NodeId) -> Option<f64> {
        self.edges
            .binary_search_by(|e| (e.source, e.target).cmp(&(source, target)))
            .ok()
            .map(|i| self.edges[i].load)
    }
}

/// Estimate the relative load on every edge named `road_name`.
///
/// # Errors
///
/// - [`NetworkError::InvalidSampleSize`] if `sample_size < 2` or
///   `sample_size > node_count`.
/// - [`NetworkError::RoadNotFound`] if no edge carries `road_name`.
#[instrument(skip(graph, rng))]
pub fn estimate_load<G, R>(
    graph: &G,
    road_name: &str,
    sample_size: usize,
    rng: &mut R,
) -> Result<RoadLoad>
where
    G: GraphProvider,
    R: Rng + ?Sized,
{
    validate_sample_size(sample_size, graph.node_count())?;

    let mut matched: Vec<(NodeId, NodeId)> = graph
        .edges()
        .filter(|e| e.attrs.name == road_name)
        .map(|e| e.key())
        .collect();
    if matched.is_empty() {
        return Err(NetworkError::RoadNotFound(road_name.to_string()));
    }
    matched.sort_unstable();

    let sample = sample_nodes(graph, sample_size, rng)?;
    load_from_sample(graph, road_name, &matched, sample)
}

/// Estimate load for several roads concurrently.
///
/// Road `i` draws its sample from `StdRng::seed_from_u64(seed + i)`, so the
/// result does not depend on thread scheduling. Results are in input order.
///
/// # Errors
///
/// The first error (in input order) among the individual estimates.
pub fn estimate_load_many<G, S>(
    graph: &G,
    roads: &[S],
    sample_size: usize,
    seed: u64,
) -> Result<Vec<RoadLoad>>
where
    G: GraphProvider + Sync,
    S: AsRef<str> + Sync,
{
    let results: Vec<Result<RoadLoad>> = roads
        .par_iter()
        .enumerate()
        .map(|(i, road)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            estimate_load(graph, road.as_ref(), sample_size, &mut rng)
        })
        .collect();
    results.into_iter().collect()
}

#[allow(clippy::cast_precision_loss)]
fn load_from_sample<G: GraphProvider>(
    graph: &G,
    road_name: &str,
    matched: &[(NodeId, NodeId)],
    sample: Vec<NodeId>,
) -> Result<RoadLoad> {
    let mut totals = vec![0.0_f64; matched.len()];
    let mut unreachable_pairs = 0_usize;

    for (i, &source) in sample.iter().enumerate() {
        let dag = shortest_path_dag(graph, source)?;
        for &target in sample.iter().filter(|&&t| t != source) {
            let Some(shares) = dag.shares_to(target) else {
                unreachable_pairs += 1;
                continue;
            };
            for (total, &(u, v)) in totals.iter_mut().zip(matched) {
                *total += shares.share(u, v);
            }
        }
        debug!(road = road_name, done = i + 1, of = sample.len(), "sampled source processed");
    }

    if unreachable_pairs > 0 {
        debug!(road = road_name, unreachable_pairs, "pairs without a path contributed zero");
    }

    let pairs = (sample.len() * (sample.len() - 1)) as f64;
    let edges = matched
        .iter()
        .zip(totals)
        .map(|(&(source, target), total)| EdgeLoad {
            source,
            target,
            load: total / pairs,
        })
        .collect();

    Ok(RoadLoad {
        road: road_name.to_string(),
        sample,
        edges,
    })
}
