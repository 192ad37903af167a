//! Engine configuration.

use crate::{TnError, TnResult};

/// Global knobs for the simulation orchestrator and route sampler.
///
/// Construct with struct-update syntax over [`Default`] and call
/// [`validate`](Self::validate) before handing it to the orchestrator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Root seed for callers that want one `SimRng` per service.
    pub seed: u64,

    /// Route sampling gives up after `retry_factor × requested` attempts.
    pub retry_factor: usize,

    /// Routes produced by the basic scenario.
    pub basic_route_count: usize,

    /// Routes produced by the single-incident scenario.
    pub dynamic_route_count: usize,

    /// Duration reported by the square-intersection scenario, in seconds.
    pub square_duration_secs: u32,
}

impl SimConfig {
    /// Reject settings that would make sampling a no-op.
    pub fn validate(&self) -> TnResult<()> {
        if self.retry_factor == 0 {
            return Err(TnError::Config("retry_factor must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                 42,
            retry_factor:         10,
            basic_route_count:    5,
            dynamic_route_count:  5,
            square_duration_secs: 300,
        }
    }
}
