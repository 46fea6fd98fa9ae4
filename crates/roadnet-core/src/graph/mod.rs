//! Road network graph model.
//!
//! # Overview
//!
//! Algorithms never touch the storage directly. They consume the
//! [`GraphProvider`] trait, which exposes dense node ids, outgoing edges with
//! their [`RoadAttributes`], and optional coordinates. [`RoadNetwork`] is the
//! concrete petgraph-backed provider produced by [`RoadNetworkBuilder`].
//!
//! ## Pipeline
//!
//! ```text
//! RoadSegment list (from an ingestion collaborator)
//!        ↓  build::RoadNetworkBuilder::build()
//! RoadNetwork (largest weak component, dense ids 0..N-1, immutable)
//!        ↓  stats::GraphStats::from_network()
//! GraphStats (density, components, one-way edges, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use roadnet_core::graph::{OneWay, RoadNetworkBuilder, RoadSegment};
//!
//! let mut builder = RoadNetworkBuilder::new();
//! builder.add_segment(RoadSegment::new(10, 20, "MAIN ST", 120.0, 25).one_way(OneWay::TwoWay));
//! let network = builder.build()?;
//! ```

pub mod build;
pub mod network;
pub mod provider;
pub mod road;
pub mod stats;

pub use build::RoadNetworkBuilder;
pub use network::RoadNetwork;
pub use provider::{EdgeView, GraphProvider, NodeId};
pub use road::{Coordinate, DEFAULT_SPEED_LIMIT, OneWay, RoadAttributes, RoadSegment};
pub use stats::GraphStats;
