//! Routing error type.

use thiserror::Error;

use tn_core::NodeId;
use tn_network::NetworkError;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
