use std::fmt;

use crate::graph::NodeId;

/// Result alias used throughout the core.
pub type Result<T, E = NetworkError> = std::result::Result<T, E>;

/// Errors raised by network queries and estimators.
///
/// Lookup errors are fatal to the single call that raised them. A missing
/// path between two nodes during an aggregate computation is never reported
/// here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// The requested source/target node is not part of the graph.
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),
    /// No edge carries the requested road name.
    #[error("road not found: {0}")]
    RoadNotFound(String),
    /// Sample size is below 2 or above the node count.
    #[error("invalid sample size {requested}: must be between 2 and {node_count}")]
    InvalidSampleSize { requested: usize, node_count: usize },
    /// The network could not be assembled or generated.
    #[error("invalid network: {0}")]
    InvalidNetwork(String),
}

impl NetworkError {
    /// Machine-readable classification of this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NodeNotFound(_) => ErrorCode::NodeNotFound,
            Self::RoadNotFound(_) => ErrorCode::RoadNotFound,
            Self::InvalidSampleSize { .. } => ErrorCode::InvalidSampleSize,
            Self::InvalidNetwork(_) => ErrorCode::InvalidNetwork,
        }
    }
}

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NodeNotFound,
    RoadNotFound,
    InvalidSampleSize,
    InvalidNetwork,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NodeNotFound => "E2001",
            Self::RoadNotFound => "E2002",
            Self::InvalidSampleSize => "E2003",
            Self::InvalidNetwork => "E3001",
        }
    }

    /// Optional remediation hint surfaced next to the error message.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NodeNotFound => Some("Node ids are dense: use a value below the node count."),
            Self::RoadNotFound => Some("Road names are matched exactly, including case."),
            Self::InvalidSampleSize => {
                Some("Pick a sample size of at least 2 and at most the node count.")
            }
            Self::InvalidNetwork => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
