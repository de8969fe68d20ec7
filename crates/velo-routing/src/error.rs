//! Routing-subsystem error type.

use thiserror::Error;

use velo_core::NodeId;

/// Errors produced by `velo-routing`.
///
/// All variants are invalid-argument conditions.  Absence of a route is not
/// an error: it is reported as `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoutingError {
    #[error("a route needs at least one edge or segment")]
    EmptyRoute,

    #[error("start and end are the same node ({0})")]
    SameEndpoints(NodeId),

    #[error("{node} is not a node of the graph ({node_count} nodes)")]
    UnknownNode { node: NodeId, node_count: usize },

    #[error("maximum step length must be positive, got {0}")]
    InvalidStep(f64),

    #[error("an elevation profile needs a positive length and at least 2 samples (length {length}, {samples} samples)")]
    InvalidProfile { length: f64, samples: usize },
}

pub type RoutingResult<T> = Result<T, RoutingError>;
