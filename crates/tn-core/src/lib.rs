//! `tn-core` — foundational types for the traffic-network engine.
//!
//! Every other `tn-*` crate depends on this one.  It has no `tn-*`
//! dependencies and minimal external ones (`rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `RoadId` (stable keys), `NodeIx`, `EdgeIx`    |
//! | [`geo`]      | `GeoPoint`, deterministic pseudo-coordinates            |
//! | [`config`]   | `SimConfig`                                             |
//! | [`rng`]      | `SimRng` (seeded, reproducible route sampling)          |
//! | [`error`]    | `TnError`, `TnResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public record types. |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{TnError, TnResult};
pub use geo::GeoPoint;
pub use ids::{EdgeIx, NodeId, NodeIx, RoadId};
pub use rng::SimRng;
