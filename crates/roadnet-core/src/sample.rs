//! Uniform node sampling for the Monte-Carlo estimators.

use rand::{Rng, seq::index};

use crate::error::{NetworkError, Result};
use crate::graph::{GraphProvider, NodeId};

/// Smallest usable sample: one ordered pair needs two nodes.
pub const MIN_SAMPLE_SIZE: usize = 2;

/// Check that `sample_size` lies in `2..=node_count`.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidSampleSize`] otherwise.
pub const fn validate_sample_size(sample_size: usize, node_count: usize) -> Result<()> {
    if sample_size < MIN_SAMPLE_SIZE || sample_size > node_count {
        return Err(NetworkError::InvalidSampleSize {
            requested: sample_size,
            node_count,
        });
    }
    Ok(())
}

/// Draw `sample_size` distinct nodes uniformly without replacement.
///
/// The result is in draw order. The same RNG state always yields the same
/// sample.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidSampleSize`] if `sample_size < 2` or
/// `sample_size > node_count`.
pub fn sample_nodes<G, R>(graph: &G, sample_size: usize, rng: &mut R) -> Result<Vec<NodeId>>
where
    G: GraphProvider,
    R: Rng + ?Sized,
{
    let node_count = graph.node_count();
    validate_sample_size(sample_size, node_count)?;
    Ok(index::sample(rng, node_count, sample_size).into_vec())
}
