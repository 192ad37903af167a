//! `tn-signal` — traffic-signal cycle planning.
//!
//! | Module      | Contents                                             |
//! |-------------|------------------------------------------------------|
//! | [`plan`]    | `Cycle`, `SignalPlan` (chained by construction)      |
//! | [`planner`] | `SignalPlanner`: default, adaptive, square plans     |
//! | [`timing`]  | `SignalTimings`                                      |
//!
//! Planners are stateless: every call recomputes from the graph and the
//! incidents it is given.

pub mod plan;
pub mod planner;
pub mod timing;


pub use plan::{Cycle, SignalPlan};
pub use planner::SignalPlanner;
pub use timing::SignalTimings;
