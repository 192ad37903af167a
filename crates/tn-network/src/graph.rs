//! Road graph arena and builder.
//!
//! # Data layout
//!
//! Intersections and roads live in two arenas addressed by [`NodeIx`] and
//! [`EdgeIx`].  Each intersection owns an adjacency list of the roads that
//! touch it, kept in road-insertion order.  That order is the graph's
//! "edge-discovery order": signal cycles and search expansion both follow it,
//! so results never depend on hashing.
//!
//! # Snapshots
//!
//! Topology (intersections, the id lookup, adjacency) sits behind `Arc` and is
//! never mutated after [`RoadGraphBuilder::build`].  Only the road arena is
//! owned per graph, because that is where incident overlays write.  A
//! [`RoadGraph::snapshot`] is therefore one `Vec<Road>` copy plus three
//! reference-count bumps, and nothing written to a snapshot can reach the
//! graph it came from.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use tn_core::{EdgeIx, GeoPoint, NodeId, NodeIx, RoadId};

use crate::incident::BLOCKING_SEVERITY;
use crate::source::{LoadDefaults, NetworkData};
use crate::{NetworkError, NetworkResult};

// ── Intersection ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Intersection {
    pub id: NodeId,
    /// `None` when the load source had no coordinates for this node.
    pub pos: Option<GeoPoint>,
}

impl Intersection {
    /// Known position, or the deterministic pseudo-position for this id.
    #[inline]
    pub fn position(&self) -> GeoPoint {
        self.pos.unwrap_or_else(|| GeoPoint::pseudo(self.id))
    }
}

// ── Road ──────────────────────────────────────────────────────────────────────

/// Incident fields carried by a road once an overlay has been applied.
#[derive(Clone, Debug, PartialEq)]
pub struct IncidentState {
    pub severity: f64,
    pub description: Option<String>,
}

/// Undirected road between two intersections.
///
/// The base travel time is fixed at load.  The effective travel time and
/// incident state change only through
/// [`RoadGraph::apply_incident`], which writes them together.
#[derive(Clone, Debug)]
pub struct Road {
    pub id: RoadId,
    /// Endpoints in load order.
    pub ends: [NodeIx; 2],
    pub name: Option<Arc<str>>,
    pub length: f64,
    base_travel_time: f64,
    travel_time: f64,
    incident: Option<IncidentState>,
}

impl Road {
    /// Incident-free travel time computed at load.
    #[inline]
    pub fn base_travel_time(&self) -> f64 {
        self.base_travel_time
    }

    /// Incident-adjusted travel time; `f64::INFINITY` when blocked.
    #[inline]
    pub fn travel_time(&self) -> f64 {
        self.travel_time
    }

    #[inline]
    pub fn incident(&self) -> Option<&IncidentState> {
        self.incident.as_ref()
    }

    #[inline]
    pub fn has_incident(&self) -> bool {
        self.incident.is_some()
    }

    /// `true` when an incident makes this road impassable for routing.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.incident
            .as_ref()
            .is_some_and(|i| i.severity >= BLOCKING_SEVERITY)
    }

    /// The endpoint opposite `from`.
    #[inline]
    pub fn other_end(&self, from: NodeIx) -> NodeIx {
        if self.ends[0] == from { self.ends[1] } else { self.ends[0] }
    }

    pub(crate) fn set_incident(&mut self, travel_time: f64, state: IncidentState) {
        self.travel_time = travel_time;
        self.incident = Some(state);
    }
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Weighted undirected road graph.
///
/// Do not construct directly; use [`RoadGraphBuilder`] or [`RoadGraph::load`].
#[derive(Clone)]
pub struct RoadGraph {
    nodes:     Arc<[Intersection]>,
    lookup:    Arc<FxHashMap<NodeId, NodeIx>>,
    adjacency: Arc<[Vec<EdgeIx>]>,
    roads:     Vec<Road>,
}

impl RoadGraph {
    /// A graph with no intersections or roads.
    pub fn empty() -> Self {
        RoadGraphBuilder::new().build()
    }

    /// Build a graph from load-source records, filling missing speeds and
    /// lengths from `defaults`.
    pub fn load(data: &NetworkData, defaults: &LoadDefaults) -> NetworkResult<Self> {
        let mut b = RoadGraphBuilder::with_capacity(data.nodes.len(), data.edges.len());
        for node in &data.nodes {
            b.add_node(node.id, node.position())?;
        }
        for edge in &data.edges {
            let travel_time = edge.base_travel_time(defaults);
            let length = edge.length.unwrap_or(defaults.length);
            b.add_road(edge.source, edge.target, length, travel_time, edge.name.as_deref())?;
        }
        Ok(b.build())
    }

    /// Independent copy for one request.  See the module docs for cost.
    #[inline]
    pub fn snapshot(&self) -> RoadGraph {
        self.clone()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Arena index of the intersection with stable id `id`.
    pub fn index_of(&self, id: NodeId) -> NetworkResult<NodeIx> {
        self.lookup.get(&id).copied().ok_or(NetworkError::NodeNotFound(id))
    }

    #[inline]
    pub fn intersection(&self, ix: NodeIx) -> &Intersection {
        &self.nodes[ix.index()]
    }

    /// All intersections in load order.
    pub fn intersections(&self) -> &[Intersection] {
        &self.nodes
    }

    #[inline]
    pub fn road(&self, e: EdgeIx) -> &Road {
        &self.roads[e.index()]
    }

    pub(crate) fn road_mut(&mut self, e: EdgeIx) -> &mut Road {
        &mut self.roads[e.index()]
    }

    /// All roads in load order.
    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// The road joining `id`'s endpoints, if both exist and are connected.
    pub fn find_road(&self, id: RoadId) -> Option<EdgeIx> {
        let (a, b) = id.endpoints();
        let a = self.lookup.get(&a).copied()?;
        let b = self.lookup.get(&b).copied()?;
        self.road_between(a, b)
    }

    /// Like [`find_road`](Self::find_road), but an unknown road is an error.
    pub fn road_by_id(&self, id: RoadId) -> NetworkResult<&Road> {
        self.find_road(id)
            .map(|e| self.road(e))
            .ok_or(NetworkError::RoadNotFound(id))
    }

    /// The road joining two arena nodes, in either direction.
    pub fn road_between(&self, a: NodeIx, b: NodeIx) -> Option<EdgeIx> {
        self.adjacency[a.index()]
            .iter()
            .copied()
            .find(|&e| self.roads[e.index()].other_end(a) == b)
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Roads touching `ix`, in edge-discovery order.
    #[inline]
    pub fn out_edges(&self, ix: NodeIx) -> &[EdgeIx] {
        &self.adjacency[ix.index()]
    }

    /// Roads touching intersection `id`, in edge-discovery order.
    pub fn edges_of(&self, id: NodeId) -> NetworkResult<&[EdgeIx]> {
        Ok(self.out_edges(self.index_of(id)?))
    }

    /// Number of roads touching intersection `id`.
    pub fn degree(&self, id: NodeId) -> NetworkResult<usize> {
        self.edges_of(id).map(<[EdgeIx]>::len)
    }

    // ── Derived graphs ────────────────────────────────────────────────────

    /// A copy with every road in `removed` physically dropped.
    ///
    /// Ids that do not name a road are ignored.  Intersections are shared
    /// with `self`; surviving roads keep their overlay state and relative
    /// order.
    pub fn without_roads(&self, removed: &[RoadId]) -> RoadGraph {
        let roads: Vec<Road> = self
            .roads
            .iter()
            .filter(|r| !removed.contains(&r.id))
            .cloned()
            .collect();
        let adjacency = adjacency_of(self.nodes.len(), &roads);
        RoadGraph {
            nodes:  Arc::clone(&self.nodes),
            lookup: Arc::clone(&self.lookup),
            adjacency,
            roads,
        }
    }
}

fn adjacency_of(node_count: usize, roads: &[Road]) -> Arc<[Vec<EdgeIx>]> {
    let mut adjacency = vec![Vec::new(); node_count];
    for (i, road) in roads.iter().enumerate() {
        let e = EdgeIx(i as u32);
        adjacency[road.ends[0].index()].push(e);
        adjacency[road.ends[1].index()].push(e);
    }
    adjacency.into()
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] incrementally, then call [`build`](Self::build).
///
/// Roads may only reference intersections added earlier.
///
/// # Example
///
/// ```
/// use tn_core::{GeoPoint, NodeId};
/// use tn_network::RoadGraphBuilder;
///
/// let mut b = RoadGraphBuilder::new();
/// b.add_node(NodeId(1), Some(GeoPoint::new(31.52, 74.35))).unwrap();
/// b.add_node(NodeId(2), None).unwrap();
/// b.add_road(NodeId(1), NodeId(2), 100.0, 10.0, Some("Link Road")).unwrap();
/// let graph = b.build();
/// assert_eq!(graph.degree(NodeId(1)).unwrap(), 1);
/// ```
pub struct RoadGraphBuilder {
    nodes:  Vec<Intersection>,
    lookup: FxHashMap<NodeId, NodeIx>,
    roads:  Vec<Road>,
    seen:   FxHashMap<RoadId, EdgeIx>,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    pub fn with_capacity(nodes: usize, roads: usize) -> Self {
        Self {
            nodes:  Vec::with_capacity(nodes),
            lookup: FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            roads:  Vec::with_capacity(roads),
            seen:   FxHashMap::with_capacity_and_hasher(roads, Default::default()),
        }
    }

    pub fn add_node(&mut self, id: NodeId, pos: Option<GeoPoint>) -> NetworkResult<NodeIx> {
        if self.lookup.contains_key(&id) {
            return Err(NetworkError::DuplicateNode(id));
        }
        let ix = NodeIx(self.nodes.len() as u32);
        self.nodes.push(Intersection { id, pos });
        self.lookup.insert(id, ix);
        Ok(ix)
    }

    /// Add an undirected road.
    ///
    /// - `length`: physical length in distance units.
    /// - `travel_time`: incident-free travel time in minutes.
    pub fn add_road(
        &mut self,
        a: NodeId,
        b: NodeId,
        length: f64,
        travel_time: f64,
        name: Option<&str>,
    ) -> NetworkResult<EdgeIx> {
        if a == b {
            return Err(NetworkError::SelfLoop(a));
        }
        let id = RoadId::new(a, b);
        let from = *self.lookup.get(&a).ok_or(NetworkError::NodeNotFound(a))?;
        let to = *self.lookup.get(&b).ok_or(NetworkError::NodeNotFound(b))?;
        if self.seen.contains_key(&id) {
            return Err(NetworkError::DuplicateRoad(id));
        }
        if !(length.is_finite() && length >= 0.0) {
            return Err(NetworkError::InvalidRoad {
                road:   id,
                reason: format!("length {length} is not a non-negative number"),
            });
        }
        if !(travel_time.is_finite() && travel_time >= 0.0) {
            return Err(NetworkError::InvalidRoad {
                road:   id,
                reason: format!("travel time {travel_time} is not a non-negative number"),
            });
        }

        let e = EdgeIx(self.roads.len() as u32);
        self.roads.push(Road {
            id,
            ends: [from, to],
            name: name.map(Arc::from),
            length,
            base_travel_time: travel_time,
            travel_time,
            incident: None,
        });
        self.seen.insert(id, e);
        Ok(e)
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn road_count(&self) -> usize { self.roads.len() }

    /// Consume the builder and produce a [`RoadGraph`].
    pub fn build(self) -> RoadGraph {
        let adjacency = adjacency_of(self.nodes.len(), &self.roads);
        RoadGraph {
            nodes:  self.nodes.into(),
            lookup: Arc::new(self.lookup),
            adjacency,
            roads:  self.roads,
        }
    }
}

impl Default for RoadGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
