#![forbid(unsafe_code)]
//! roadnet-core library.
//!
//! Shortest paths and derived network metrics over directed, weighted road
//! networks.
//!
//! # Conventions
//!
//! - **Errors**: Fallible operations return [`Result`], whose error type is
//!   [`NetworkError`]. An unreachable pair inside an aggregate metric is not
//!   an error; it contributes zero.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).
//! - **State**: Graphs are immutable once built. Every algorithm allocates its
//!   own distance/predecessor/frontier state per call, so one graph can be
//!   shared read-only across threads.
//! - **Randomness**: Sampling estimators take `&mut impl Rng`; seed a
//!   `StdRng` for reproducible runs.
//!
//! # Layout
//!
//! ```text
//! graph::build    RoadSegment list  ->  RoadNetwork (immutable)
//! graph::provider GraphProvider trait consumed by every algorithm
//! path::dijkstra  single-source distances + predecessors
//! path::dag       all shortest-path predecessors + path counts
//! metrics         road load, efficiency, remoteness
//! search          intersections of named roads
//! sample          seedable uniform node sampling
//! synthetic       random regular test networks
//! ```

pub mod error;
pub mod graph;
pub mod metrics;
pub mod path;
pub mod sample;
pub mod search;
pub mod synthetic;

pub use error::{NetworkError, Result};
pub use graph::{
    Coordinate, EdgeView, GraphProvider, NodeId, OneWay, RoadAttributes, RoadNetwork,
    RoadNetworkBuilder, RoadSegment,
};
