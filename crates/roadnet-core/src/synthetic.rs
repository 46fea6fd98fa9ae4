//! Random test networks.
//!
//! [`random_regular_network`] builds a simple undirected `degree`-regular
//! graph with the configuration (pairing) model, turns every undirected edge
//! into two directed ones and finally deletes one directed edge at random.
//! The deleted edge leaves exactly one one-way segment, so direction handling
//! is exercised without breaking weak connectivity.

use std::collections::BTreeSet;

use petgraph::unionfind::UnionFind;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use crate::error::{NetworkError, Result};
use crate::graph::{NodeId, RoadAttributes, RoadNetwork};

/// Pairing attempts before giving up.
pub const MAX_PAIRING_ATTEMPTS: usize = 10_000;

/// Speed limits drawn for synthetic roads; `0` stands for a missing value.
pub const SPEED_LIMITS: [u32; 4] = [0, 25, 35, 45];

const LENGTH_RANGE: std::ops::Range<f64> = 50.0..500.0;

/// Random connected `degree`-regular network on `nodes` nodes, minus one
/// directed edge.
///
/// Undirected edge `i` (in ascending `(u, v)` order) is named `road-{i}` and
/// both of its directions share one random length in `[50, 500)` and one
/// speed limit from [`SPEED_LIMITS`].
///
/// # Errors
///
/// Returns [`NetworkError::InvalidNetwork`] if `nodes * degree` is odd, if
/// `degree == 0` or `degree >= nodes`, or if no simple connected pairing turns
/// up within [`MAX_PAIRING_ATTEMPTS`].
#[instrument(skip(rng))]
pub fn random_regular_network<R>(nodes: usize, degree: usize, rng: &mut R) -> Result<RoadNetwork>
where
    R: Rng + ?Sized,
{
    if degree == 0 || degree >= nodes {
        return Err(NetworkError::InvalidNetwork(format!(
            "degree {degree} needs 1..{nodes} for {nodes} nodes"
        )));
    }
    if (nodes * degree) % 2 != 0 {
        return Err(NetworkError::InvalidNetwork(format!(
            "{nodes} nodes of degree {degree} leave an unpaired edge end"
        )));
    }

    let pairs = (1..=MAX_PAIRING_ATTEMPTS)
        .find_map(|attempt| {
            let pairs = try_pairing(nodes, degree, rng)?;
            is_connected(nodes, &pairs).then(|| {
                debug!(attempt, "regular pairing found");
                pairs
            })
        })
        .ok_or_else(|| {
            NetworkError::InvalidNetwork(format!(
                "no connected {degree}-regular pairing on {nodes} nodes after \
                 {MAX_PAIRING_ATTEMPTS} attempts"
            ))
        })?;

    let mut edges = Vec::with_capacity(pairs.len() * 2);
    for (i, &(u, v)) in pairs.iter().enumerate() {
        let length = rng.gen_range(LENGTH_RANGE);
        let speed_limit = SPEED_LIMITS[rng.gen_range(0..SPEED_LIMITS.len())];
        let attrs = RoadAttributes::new(format!("road-{i}"), length, speed_limit);
        edges.push((u, v, attrs.clone()));
        edges.push((v, u, attrs));
    }

    let removed = edges.swap_remove(rng.gen_range(0..edges.len()));
    debug!(source = removed.0, target = removed.1, road = %removed.2.name, "one-way edge created");

    RoadNetwork::from_edges(nodes, edges)
}

/// One round of the pairing model; `None` on a self-loop or repeated pair.
fn try_pairing<R: Rng + ?Sized>(
    nodes: usize,
    degree: usize,
    rng: &mut R,
) -> Option<BTreeSet<(NodeId, NodeId)>> {
    let mut stubs: Vec<NodeId> = (0..nodes)
        .flat_map(|node| std::iter::repeat_n(node, degree))
        .collect();
    stubs.shuffle(rng);

    let mut pairs = BTreeSet::new();
    for pair in stubs.chunks_exact(2) {
        let (u, v) = (pair[0].min(pair[1]), pair[0].max(pair[1]));
        if u == v || !pairs.insert((u, v)) {
            return None;
        }
    }
    Some(pairs)
}

fn is_connected(nodes: usize, pairs: &BTreeSet<(NodeId, NodeId)>) -> bool {
    let mut components = UnionFind::<usize>::new(nodes);
    let mut merges = 0;
    for &(u, v) in pairs {
        if components.union(u, v) {
            merges += 1;
        }
    }
    merges + 1 == nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphProvider;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn has_one_fewer_than_full_regular_edge_count() {
        let mut rng = StdRng::seed_from_u64(2024);
        let net = random_regular_network(100, 4, &mut rng).expect("pairing found");
        assert_eq!(net.node_count(), 100);
        assert_eq!(net.edge_count(), 100 * 4 - 1);
    }

    #[test]
    fn degrees_are_regular_except_removed_edge() {
        let mut rng = StdRng::seed_from_u64(9);
        let net = random_regular_network(30, 3, &mut rng).expect("pairing found");
        let short_out: Vec<_> = net.nodes().filter(|&n| net.out_degree(n) != 3).collect();
        let short_in: Vec<_> = net.nodes().filter(|&n| net.in_degree(n) != 3).collect();
        assert_eq!(short_out.len(), 1);
        assert_eq!(short_in.len(), 1);
        assert_eq!(net.out_degree(short_out[0]), 2);
    }

    #[test]
    fn attributes_follow_ranges() {
        let mut rng = StdRng::seed_from_u64(5);
        let net = random_regular_network(20, 4, &mut rng).expect("pairing found");
        for edge in net.edges() {
            assert!(LENGTH_RANGE.contains(&edge.attrs.length));
            assert!(SPEED_LIMITS.contains(&edge.attrs.speed_limit));
            assert!(edge.attrs.name.starts_with("road-"));
            assert!(edge.weight().is_finite() && edge.weight() > 0.0);
        }
    }

    #[test]
    fn same_seed_same_network() {
        let a = random_regular_network(40, 4, &mut StdRng::seed_from_u64(77)).expect("found");
        let b = random_regular_network(40, 4, &mut StdRng::seed_from_u64(77)).expect("found");
        let ea: Vec<_> = a.edges().map(|e| (e.key(), e.attrs.clone())).collect();
        let eb: Vec<_> = b.edges().map(|e| (e.key(), e.attrs.clone())).collect();
        assert_eq!(ea, eb);
    }

    #[test]
    fn impossible_parameters_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        for (nodes, degree) in [(5, 3), (4, 4), (10, 0)] {
            assert!(matches!(
                random_regular_network(nodes, degree, &mut rng),
                Err(NetworkError::InvalidNetwork(_))
            ));
        }
    }
}
