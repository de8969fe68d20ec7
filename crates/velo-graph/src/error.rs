//! Graph-subsystem error type.

use std::path::PathBuf;

use thiserror::Error;

use velo_core::NodeId;

/// Errors produced by `velo-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid graph data: {0}")]
    InvalidFormat(String),

    #[error("attribute bits {0:#x} use undefined attributes")]
    InvalidAttributeBits(u64),

    #[error("node {node} is out of sector order; nodes must be added grouped by sector")]
    NodesNotBucketed { node: NodeId },

    #[error("node {node} has {degree} outgoing edges (at most 15 are representable)")]
    DegreeOverflow { node: NodeId, degree: usize },

    #[error("edge length or elevation gain {0} m exceeds the 16-bit fixed-point range")]
    ValueOverflow(f64),

    #[error("profile has {got} samples, an edge of this length needs {expected}")]
    ProfileLength { expected: usize, got: usize },

    #[error("altitude {0} m cannot be encoded as an unsigned fixed-point sample")]
    AltitudeOverflow(f32),
}

impl GraphError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GraphError::Io { path: path.into(), source }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
