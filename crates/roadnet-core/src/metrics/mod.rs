//! Network metrics built on the shortest-path engine.
//!
//! # Overview
//!
//! - **Road load** (`load`): Monte-Carlo edge betweenness restricted to the
//!   edges of one named road. Which share of shortest trips between sampled
//!   nodes runs over each segment?
//! - **Efficiency** (`efficiency`): mean reciprocal shortest-path distance
//!   over sampled or all ordered node pairs. Higher means better connected.
//! - **Remoteness** (`remoteness`): mean finite distance from one node to
//!   every node it can reach. Higher means more peripheral.
//!
//! Unreachable pairs never raise errors here: they contribute zero to load
//! and efficiency and are left out of remoteness.
//!
//! ```rust,ignore
//! use rand::{SeedableRng, rngs::StdRng};
//! use roadnet_core::metrics::{efficiency::efficiency, load::estimate_load, remoteness::remoteness};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let load = estimate_load(&network, "I-80 WB FWY", 10, &mut rng)?;
//! let eff = efficiency(&network, Some(20), &mut rng)?;
//! let far = remoteness(&network, 0)?;
//! println!("mean load {:.4}, efficiency {eff:.4}, remoteness {far:.2}", load.mean());
//! ```

pub mod efficiency;
pub mod load;
pub mod remoteness;

pub use efficiency::{DEFAULT_EFFICIENCY_SAMPLE_SIZE, efficiency, exhaustive_efficiency};
pub use load::{
    DEFAULT_LOAD_SAMPLE_SIZE, EdgeLoad, RoadLoad, SegmentLoad, estimate_load,
    estimate_load_many,
};
pub use remoteness::{remoteness, remoteness_many};
