//! Network-load sources.
//!
//! A [`NetworkSource`] hands the engine plain node/edge records; turning them
//! into a [`RoadGraph`](crate::RoadGraph) is
//! [`RoadGraph::load`](crate::RoadGraph::load)'s job.
//!
//! # CSV format
//!
//! [`CsvSource`] reads two files.  Empty cells mean "missing".
//!
//! ```csv
//! id,lat,lon
//! 1,31.5200,74.3587
//! 2,,
//! ```
//!
//! ```csv
//! source,target,length,speed,travel_time,name
//! 1,2,100,,10,Satyana Road
//! 2,3,1200,40,,
//! ```
//!
//! | Column        | Missing means                                         |
//! |---------------|-------------------------------------------------------|
//! | `length`      | [`LoadDefaults::length`]                              |
//! | `speed`       | [`LoadDefaults::speed`]                               |
//! | `travel_time` | derived: `(length / 1000) / (speed / 60)` minutes     |

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use tn_core::{GeoPoint, NodeId};

use crate::{NetworkError, NetworkResult};

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct NodeRecord {
    pub id:  NodeId,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl NodeRecord {
    pub fn new(id: u64, lat: f64, lon: f64) -> Self {
        Self { id: NodeId(id), lat: Some(lat), lon: Some(lon) }
    }

    /// Position when both coordinates are present.
    pub fn position(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.lat?, self.lon?))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRecord {
    pub source:      NodeId,
    pub target:      NodeId,
    pub length:      Option<f64>,
    pub speed:       Option<f64>,
    /// Explicit base travel time in minutes; overrides length/speed.
    pub travel_time: Option<f64>,
    pub name:        Option<String>,
}

impl EdgeRecord {
    /// Road with an explicit length and travel time, as the built-in networks
    /// declare them.
    pub fn timed(source: u64, target: u64, length: f64, travel_time: f64, name: &str) -> Self {
        Self {
            source:      NodeId(source),
            target:      NodeId(target),
            length:      Some(length),
            speed:       None,
            travel_time: Some(travel_time),
            name:        Some(name.to_owned()),
        }
    }

    /// Base travel time in minutes.
    ///
    /// A non-positive speed yields a non-finite or negative time, which the
    /// graph builder rejects.
    pub fn base_travel_time(&self, defaults: &LoadDefaults) -> f64 {
        if let Some(t) = self.travel_time {
            return t;
        }
        let length = self.length.unwrap_or(defaults.length);
        let speed = self.speed.unwrap_or(defaults.speed);
        (length / 1000.0) / (speed / 60.0)
    }
}

/// Everything a source supplies for one network.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkData {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

/// Fallbacks for edge attributes the source left out.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadDefaults {
    /// Distance units per hour.
    pub speed:  f64,
    /// Distance units.
    pub length: f64,
}

impl Default for LoadDefaults {
    fn default() -> Self {
        Self { speed: 50.0, length: 100.0 }
    }
}

// ── NetworkSource ─────────────────────────────────────────────────────────────

/// Supplier of road-network data.
///
/// Implementations must be `Send + Sync` so one long-lived service can share
/// them across request threads.
pub trait NetworkSource: Send + Sync {
    fn fetch(&self) -> NetworkResult<NetworkData>;
}

/// The built-in four-intersection sample network.
pub struct SampleSource;

impl NetworkSource for SampleSource {
    fn fetch(&self) -> NetworkResult<NetworkData> {
        Ok(crate::samples::sample_network())
    }
}

/// Serves a fixed, pre-built [`NetworkData`].
pub struct StaticSource(pub NetworkData);

impl NetworkSource for StaticSource {
    fn fetch(&self) -> NetworkResult<NetworkData> {
        Ok(self.0.clone())
    }
}

/// Reads `nodes.csv`-style and `edges.csv`-style files on every fetch.
pub struct CsvSource {
    pub nodes_path: PathBuf,
    pub edges_path: PathBuf,
}

impl CsvSource {
    /// `nodes.csv` and `edges.csv` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            nodes_path: dir.join("nodes.csv"),
            edges_path: dir.join("edges.csv"),
        }
    }
}

impl NetworkSource for CsvSource {
    fn fetch(&self) -> NetworkResult<NetworkData> {
        let nodes = std::fs::File::open(&self.nodes_path)?;
        let edges = std::fs::File::open(&self.edges_path)?;
        load_csv_readers(nodes, edges)
    }
}

// ── CSV parsing ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRow {
    id:  u64,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Deserialize)]
struct EdgeRow {
    source:      u64,
    target:      u64,
    length:      Option<f64>,
    speed:       Option<f64>,
    travel_time: Option<f64>,
    name:        Option<String>,
}

/// Parse network data from any pair of `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from streams.
pub fn load_csv_readers<N: Read, E: Read>(nodes: N, edges: E) -> NetworkResult<NetworkData> {
    let mut data = NetworkData::default();

    for row in csv::Reader::from_reader(nodes).deserialize::<NodeRow>() {
        let row = row.map_err(|e| NetworkError::Parse(format!("nodes: {e}")))?;
        data.nodes.push(NodeRecord { id: NodeId(row.id), lat: row.lat, lon: row.lon });
    }

    for row in csv::Reader::from_reader(edges).deserialize::<EdgeRow>() {
        let row = row.map_err(|e| NetworkError::Parse(format!("edges: {e}")))?;
        data.edges.push(EdgeRecord {
            source:      NodeId(row.source),
            target:      NodeId(row.target),
            length:      row.length,
            speed:       row.speed,
            travel_time: row.travel_time,
            name:        row.name.filter(|n| !n.is_empty()),
        });
    }

    Ok(data)
}
