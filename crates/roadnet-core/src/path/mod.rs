//! Shortest-path engine.
//!
//! - [`dijkstra`]: distances plus one predecessor per node, deterministic
//!   `(distance, node_id)` tie-break.
//! - [`dag`]: every shortest-path predecessor and path counts, used by the
//!   road load estimator.

pub mod dag;
pub mod dijkstra;
mod state;

pub use dag::{PathShares, ShortestPathDag, TIE_TOLERANCE, shortest_path_dag};
pub use dijkstra::{ShortestPaths, shortest_path_length, shortest_paths, shortest_paths_by};
