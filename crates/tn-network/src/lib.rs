//! `tn-network` — road graph, incident overlay, and load sources.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`graph`]    | `RoadGraph` (arena + shared topology), `RoadGraphBuilder` |
//! | [`incident`] | `Incident`, `effective_travel_time`, overlay application  |
//! | [`source`]   | `NetworkSource` trait, records, CSV loader                |
//! | [`samples`]  | Built-in sample and square networks, `SquareLayout`       |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public record types.    |

pub mod error;
pub mod graph;
pub mod incident;
pub mod samples;
pub mod source;


pub use error::{NetworkError, NetworkResult};
pub use graph::{IncidentState, Intersection, Road, RoadGraph, RoadGraphBuilder};
pub use incident::{BLOCKING_SEVERITY, Incident, effective_travel_time};
pub use samples::{SquareLayout, sample_network, square_network};
pub use source::{
    CsvSource, EdgeRecord, LoadDefaults, NetworkData, NetworkSource, NodeRecord, SampleSource,
    StaticSource, load_csv_readers,
};
