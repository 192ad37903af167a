//! `tn-sim` — the simulation orchestrator.
//!
//! A [`TrafficService`] owns the current road graph and answers four kinds of
//! request.  Each one snapshots the graph, applies its incidents to the copy,
//! then asks the signal planner and route generator for results:
//!
//! | Request        | Signal plan | Routes                                    |
//! |----------------|-------------|-------------------------------------------|
//! | `run_basic`    | default     | random                                    |
//! | `run_dynamic`  | adaptive    | incident-avoiding                         |
//! | `run_complex`  | adaptive    | incident-avoiding, caller's vehicle count |
//! | `run_square`   | square      | templates, then incident-avoiding         |
//!
//! The canonical graph is never mutated by a scenario.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tn_core::{SimConfig, SimRng};
//! use tn_network::SampleSource;
//! use tn_sim::TrafficService;
//!
//! let config = SimConfig::default();
//! let mut rng = SimRng::new(config.seed);
//! let service = TrafficService::new(config, SampleSource)?;
//! let result = service.run_basic(&mut rng)?;
//! ```

pub mod error;
pub mod result;
pub mod service;

#[cfg(test)]
mod tests;

pub use error::{SimError, SimResult};
pub use result::{ComplexRequest, NetworkSummary, SimulationResult, SquareRequest};
pub use service::TrafficService;
