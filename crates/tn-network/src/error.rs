//! Network-subsystem error type.

use thiserror::Error;

use tn_core::{NodeId, RoadId};

/// Errors produced by `tn-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("intersection {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("intersection {0} appears more than once")]
    DuplicateNode(NodeId),

    #[error("road {0} not found in network")]
    RoadNotFound(RoadId),

    #[error("road {0} appears more than once")]
    DuplicateRoad(RoadId),

    #[error("road from intersection {0} to itself")]
    SelfLoop(NodeId),

    #[error("road {road}: {reason}")]
    InvalidRoad { road: RoadId, reason: String },

    #[error("incident severity {0} outside [0, 1]")]
    InvalidSeverity(f64),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
