//! Route and waypoint records.

use tn_core::{NodeId, NodeIx};
use tn_network::RoadGraph;

use crate::Path;

/// One stop along a route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub node_id:      NodeId,
    pub latitude:     f64,
    pub longitude:    f64,
    /// Minutes since departure; non-decreasing along the route.
    #[cfg_attr(feature = "serde", serde(with = "minutes"))]
    pub arrival_time: f64,
}

/// A vehicle route with timed waypoints.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub id:          String,
    pub source:      NodeId,
    pub target:      NodeId,
    pub path:        Vec<NodeId>,
    /// Total minutes; equals the last waypoint's `arrival_time`.  Infinite
    /// when the route crosses a road that is blocked and has no detour.
    #[cfg_attr(feature = "serde", serde(with = "minutes"))]
    pub travel_time: f64,
    pub waypoints:   Vec<Waypoint>,
}

impl Route {
    /// Route along a search result, timed with each road's effective travel
    /// time in `graph`.
    pub fn from_path(id: String, graph: &RoadGraph, path: &Path) -> Route {
        let legs: Vec<f64> = path.edges.iter().map(|&e| graph.road(e).travel_time()).collect();
        Route::assemble(id, graph, &path.nodes, &legs)
    }

    /// Build from visited nodes and the time of each leg between them.
    ///
    /// `nodes` is never empty (every caller starts from a search result or
    /// a non-empty template) and `legs.len()` must be `nodes.len() - 1`.  Positions missing from the
    /// graph become deterministic pseudo-coordinates.
    pub(crate) fn assemble(id: String, graph: &RoadGraph, nodes: &[NodeIx], legs: &[f64]) -> Route {
        debug_assert_eq!(legs.len() + 1, nodes.len());

        let mut waypoints = Vec::with_capacity(nodes.len());
        let mut elapsed = 0.0;
        for (i, &ix) in nodes.iter().enumerate() {
            if i > 0 {
                elapsed += legs[i - 1];
            }
            let node = graph.intersection(ix);
            let pos = node.position();
            waypoints.push(Waypoint {
                node_id:      node.id,
                latitude:     pos.lat,
                longitude:    pos.lon,
                arrival_time: elapsed,
            });
        }

        let path: Vec<NodeId> = waypoints.iter().map(|w| w.node_id).collect();
        Route {
            id,
            source: path[0],
            target: path[path.len() - 1],
            path,
            travel_time: elapsed,
            waypoints,
        }
    }

    /// `true` when some leg of the route is impassable.
    pub fn is_impassable(&self) -> bool {
        self.travel_time.is_infinite()
    }
}

/// Sequential route id, 1-based.
pub(crate) fn route_id(n: usize) -> String {
    format!("route-{n}")
}

/// Serde encoding for minute totals that may be `f64::INFINITY`.
///
/// JSON has no infinity, so an impassable total is written as the string
/// `"Infinity"` and read back from it; finite values stay plain numbers.
#[cfg(feature = "serde")]
mod minutes {
    use serde::de::{Error, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    const INFINITE: &str = "Infinity";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Finite(f64),
        Named(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
        if *value == f64::INFINITY {
            s.serialize_str(INFINITE)
        } else {
            s.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        match Repr::deserialize(d)? {
            Repr::Finite(v) => Ok(v),
            Repr::Named(s) if s == INFINITE => Ok(f64::INFINITY),
            Repr::Named(s) => Err(D::Error::invalid_value(
                Unexpected::Str(&s),
                &"a number of minutes or \"Infinity\"",
            )),
        }
    }
}
