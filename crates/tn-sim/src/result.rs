//! Request and result records exchanged with callers.

use tn_network::Incident;
use tn_routing::Route;
use tn_signal::SignalPlan;

/// Everything one scenario run produced.
///
/// Built fresh per request; the service keeps no reference to it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    pub signal_plans: Vec<SignalPlan>,
    pub routes:       Vec<Route>,
    /// The incidents that were applied to the working graph, as given.
    pub incidents:    Vec<Incident>,
    /// Seconds; `None` for scenarios without a duration.
    pub duration:     Option<u32>,
}

/// Multi-incident scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComplexRequest {
    pub duration:  Option<u32>,
    pub incidents: Vec<Incident>,
    pub vehicles:  usize,
}

impl Default for ComplexRequest {
    fn default() -> Self {
        Self { duration: Some(300), incidents: Vec::new(), vehicles: 10 }
    }
}

/// Four-way square intersection scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SquareRequest {
    pub vehicles:      usize,
    /// Put the canonical accident on the north road (1-2).
    pub with_incident: bool,
}

impl Default for SquareRequest {
    fn default() -> Self {
        Self { vehicles: 10, with_incident: false }
    }
}

/// Size of the current graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkSummary {
    pub nodes: usize,
    pub roads: usize,
}
