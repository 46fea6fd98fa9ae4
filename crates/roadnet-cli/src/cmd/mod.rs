//! Command handlers. Each module exposes an `Args` struct and a `run_*`
//! function taking the parsed args, the output mode and the [`Session`].

pub mod completions;
pub mod efficiency;
pub mod intersections;
pub mod load;
pub mod paths;
pub mod remoteness;
pub mod stats;

use rand::{SeedableRng, rngs::StdRng};
use roadnet_core::RoadNetwork;

use crate::config::Config;

/// Everything a metric command needs: the network, the effective seed and
/// the configuration it was resolved from.
#[derive(Debug)]
pub struct Session {
    pub network: RoadNetwork,
    pub seed: u64,
    pub config: Config,
}

impl Session {
    /// Fresh RNG seeded with the session seed.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}
