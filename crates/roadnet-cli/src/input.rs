//! Network acquisition: a JSON hand-over file or a synthetic network.

use anyhow::{Context, Result, bail};
use rand::{SeedableRng, rngs::StdRng};
use roadnet_core::synthetic::random_regular_network;
use roadnet_core::{Coordinate, RoadNetwork, RoadNetworkBuilder, RoadSegment};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Endpoint record in the hand-over file.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub key: u64,
    pub x: f64,
    pub y: f64,
}

/// The JSON document an ingestion pipeline hands over.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkFile {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    pub segments: Vec<RoadSegment>,
}

impl NetworkFile {
    pub fn into_network(self) -> Result<RoadNetwork> {
        let mut builder = RoadNetworkBuilder::new();
        builder.add_segments(self.segments);
        for node in self.nodes {
            builder.set_coordinate(node.key, Coordinate::new(node.x, node.y));
        }
        Ok(builder.build()?)
    }
}

/// Where the network comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkSource {
    File(PathBuf),
    Synthetic { nodes: usize, degree: usize },
}

impl NetworkSource {
    /// Pick the source from flags, falling back to the configured path.
    pub fn resolve(
        file: Option<PathBuf>,
        synthetic: Option<usize>,
        configured: Option<PathBuf>,
        degree: usize,
    ) -> Result<Self> {
        match (file, synthetic) {
            (Some(path), _) => Ok(Self::File(path)),
            (None, Some(nodes)) => Ok(Self::Synthetic { nodes, degree }),
            (None, None) => match configured {
                Some(path) => Ok(Self::File(path)),
                None => bail!(
                    "no network given: pass --network <FILE>, --synthetic <N>, \
                     or set [network] path in roadnet.toml"
                ),
            },
        }
    }

    /// Load or generate the network. Synthetic networks draw from `seed`.
    pub fn load(&self, seed: u64) -> Result<RoadNetwork> {
        let network = match self {
            Self::File(path) => load_network_file(path)?,
            Self::Synthetic { nodes, degree } => {
                let mut rng = StdRng::seed_from_u64(seed);
                random_regular_network(*nodes, *degree, &mut rng).with_context(|| {
                    format!("Failed to generate a {degree}-regular network on {nodes} nodes")
                })?
            }
        };
        info!(source = ?self, "network ready");
        Ok(network)
    }
}

/// Read and assemble a network hand-over file.
pub fn load_network_file(path: &Path) -> Result<RoadNetwork> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file: NetworkFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    file.into_network()
        .with_context(|| format!("Failed to assemble network from {}", path.display()))
}
