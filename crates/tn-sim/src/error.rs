use thiserror::Error;

use tn_core::TnError;
use tn_network::NetworkError;
use tn_routing::RoutingError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] TnError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

pub type SimResult<T> = Result<T, SimError>;
