//! `tn-routing` — shortest paths and route generation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`path`]      | `PathFinder` trait, `Path`, `Search`, `DijkstraPathFinder` |
//! | [`route`]     | `Route`, `Waypoint`                                     |
//! | [`generator`] | `RouteGenerator` (random, incident-avoiding, templates) |
//! | [`error`]     | `RoutingError`, `RoutingResult<T>`                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Route` and `Waypoint`. |

pub mod error;
pub mod generator;
pub mod path;
pub mod route;


pub use error::{RoutingError, RoutingResult};
pub use generator::RouteGenerator;
pub use path::{DijkstraPathFinder, Path, PathFinder, Search};
pub use route::{Route, Waypoint};
