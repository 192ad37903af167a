//! Path-finding trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! [`RouteGenerator`](crate::RouteGenerator) searches through the
//! [`PathFinder`] trait, so a different algorithm (A*, bidirectional) can be
//! dropped in without touching route assembly.
//!
//! # Costs
//!
//! Edge cost is the road's effective travel time in minutes.  Roads blocked
//! by an incident are skipped outright instead of being relaxed with an
//! infinite weight, so no comparison ever involves `f64::INFINITY`.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use log::debug;

use tn_core::{EdgeIx, NodeId, NodeIx};
use tn_network::RoadGraph;

use crate::{RoutingError, RoutingResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// A connected walk through one graph.
///
/// `edges[i]` joins `nodes[i]` and `nodes[i + 1]`.  Indices are only valid
/// for the graph the path was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub nodes: Vec<NodeIx>,
    pub edges: Vec<EdgeIx>,
    /// Sum of effective travel times along `edges`, in minutes.
    pub cost:  f64,
}

impl Path {
    /// Stable ids of the visited intersections.
    pub fn node_ids(&self, graph: &RoadGraph) -> Vec<NodeId> {
        self.nodes.iter().map(|&ix| graph.intersection(ix).id).collect()
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Outcome of a search between two known intersections.
#[derive(Debug, Clone, PartialEq)]
pub enum Search {
    Found(Path),
    NotFound,
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable non-negative-weight shortest-path search.
///
/// # Determinism
///
/// Implementations must return the same path for the same graph and
/// endpoints on every call.  Among equal-cost paths the one discovered first
/// under a fixed expansion order wins; never a random one.
pub trait PathFinder: Send + Sync {
    /// Cheapest path from `from` to `to`, ignoring blocked roads.
    fn search(&self, graph: &RoadGraph, from: NodeIx, to: NodeIx) -> Search;

    /// Cheapest path between two stable ids.
    ///
    /// Fails with `NodeNotFound` for an unknown id and `NoPath` when the two
    /// intersections are disconnected.
    fn shortest_path(&self, graph: &RoadGraph, source: NodeId, target: NodeId) -> RoutingResult<Path> {
        let from = graph.index_of(source)?;
        let to = graph.index_of(target)?;
        match self.search(graph, from, to) {
            Search::Found(path) => Ok(path),
            Search::NotFound => Err(RoutingError::NoPath { from: source, to: target }),
        }
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

/// Dijkstra's algorithm over the road arena.
///
/// The heap is keyed on `(cost, push sequence)`, and a node's predecessor is
/// replaced only on a strictly cheaper offer.  Together with adjacency lists
/// in discovery order this makes the expansion order, and so the winning
/// path among ties, a pure function of the graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPathFinder;

impl PathFinder for DijkstraPathFinder {
    fn search(&self, graph: &RoadGraph, from: NodeIx, to: NodeIx) -> Search {
        dijkstra(graph, from, to)
    }
}

/// Total order over finite, non-negative costs.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn dijkstra(graph: &RoadGraph, from: NodeIx, to: NodeIx) -> Search {
    if from == to {
        return Search::Found(Path { nodes: vec![from], edges: vec![], cost: 0.0 });
    }

    let n = graph.node_count();
    // dist[v] = best known cost to reach v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = road that reached v; EdgeIx::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeIx::INVALID; n];
    let mut settled   = vec![false; n];

    dist[from.index()] = 0.0;

    // Reverse makes BinaryHeap (max) behave as a min-heap.
    let mut heap: BinaryHeap<Reverse<(Cost, u64, NodeIx)>> = BinaryHeap::new();
    let mut seq = 0u64;
    heap.push(Reverse((Cost(0.0), seq, from)));

    while let Some(Reverse((Cost(cost), _, node))) = heap.pop() {
        if node == to {
            return Search::Found(reconstruct(graph, &prev_edge, from, to, cost));
        }
        if settled[node.index()] {
            continue;
        }
        settled[node.index()] = true;

        for &edge in graph.out_edges(node) {
            let road = graph.road(edge);
            if road.is_blocked() {
                continue;
            }
            let neighbor = road.other_end(node);
            if settled[neighbor.index()] {
                continue;
            }
            let new_cost = cost + road.travel_time();
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                seq += 1;
                heap.push(Reverse((Cost(new_cost), seq, neighbor)));
            }
        }
    }

    debug!(
        "no path from {} to {}",
        graph.intersection(from).id,
        graph.intersection(to).id
    );
    Search::NotFound
}

fn reconstruct(
    graph: &RoadGraph,
    prev_edge: &[EdgeIx],
    from: NodeIx,
    to: NodeIx,
    cost: f64,
) -> Path {
    let mut nodes = vec![to];
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        edges.push(e);
        cur = graph.road(e).other_end(cur);
        nodes.push(cur);
    }
    nodes.reverse();
    edges.reverse();
    Path { nodes, edges, cost }
}
