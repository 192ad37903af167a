//! Route generation: random sampling, incident avoidance, fixed templates.
//!
//! # Attempt cap
//!
//! Random modes draw a distinct source/target pair, search, and keep the
//! route if one exists.  A miss just draws again, but the whole loop stops
//! after `retry_factor × count` draws, so a nearly disconnected graph yields
//! a short list instead of spinning.  Graphs with fewer than two
//! intersections yield an empty list.

use log::{debug, warn};

use tn_core::{NodeId, NodeIx, RoadId, SimConfig, SimRng};
use tn_network::{Incident, RoadGraph};

use crate::path::{DijkstraPathFinder, PathFinder, Search};
use crate::route::{Route, route_id};
use crate::{RoutingError, RoutingResult};

/// Builds routes over a working graph.
///
/// # Type parameter
///
/// `P` is the search algorithm; the default is [`DijkstraPathFinder`].
pub struct RouteGenerator<P: PathFinder = DijkstraPathFinder> {
    finder:       P,
    retry_factor: usize,
}

impl RouteGenerator<DijkstraPathFinder> {
    /// Dijkstra-backed generator with the attempt cap from `config`.
    pub fn from_config(config: &SimConfig) -> Self {
        Self::with_finder(DijkstraPathFinder, config.retry_factor)
    }
}

impl<P: PathFinder> RouteGenerator<P> {
    pub fn with_finder(finder: P, retry_factor: usize) -> Self {
        Self { finder, retry_factor: retry_factor.max(1) }
    }

    pub fn finder(&self) -> &P {
        &self.finder
    }

    /// Up to `count` shortest-path routes between random distinct pairs.
    pub fn random_routes(&self, graph: &RoadGraph, count: usize, rng: &mut SimRng) -> Vec<Route> {
        self.sample(graph, count, rng, 1)
    }

    /// Like [`random_routes`](Self::random_routes), but on a copy of `graph`
    /// with every incident road removed, so no route touches one while a
    /// bypass exists.  Pairs with no bypass are skipped.
    pub fn incident_avoiding_routes(
        &self,
        graph:     &RoadGraph,
        count:     usize,
        incidents: &[Incident],
        rng:       &mut SimRng,
    ) -> Vec<Route> {
        self.avoiding(graph, count, incidents, rng, 1)
    }

    /// Evaluate `templates` in order, up to `count`, then fill the remaining
    /// slots with incident-avoiding routes.
    ///
    /// A template leg over a blocked road is replaced by the cheapest local
    /// detour between that road's endpoints.  With no detour the leg costs
    /// `f64::INFINITY` and the route is returned as impassable.
    ///
    /// # Errors
    ///
    /// `NodeNotFound` if a template names an unknown intersection; `NoPath`
    /// if two consecutive template nodes are not joined by a road.
    pub fn template_routes(
        &self,
        graph:     &RoadGraph,
        count:     usize,
        templates: &[Vec<NodeId>],
        incidents: &[Incident],
        rng:       &mut SimRng,
    ) -> RoutingResult<Vec<Route>> {
        let mut routes = Vec::with_capacity(count);
        for template in templates.iter().filter(|t| !t.is_empty()).take(count) {
            let (nodes, legs) = self.walk_template(graph, template)?;
            routes.push(Route::assemble(route_id(routes.len() + 1), graph, &nodes, &legs));
        }

        let remaining = count - routes.len();
        if remaining > 0 {
            let first_id = routes.len() + 1;
            routes.extend(self.avoiding(graph, remaining, incidents, rng, first_id));
        }
        Ok(routes)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn avoiding(
        &self,
        graph:     &RoadGraph,
        count:     usize,
        incidents: &[Incident],
        rng:       &mut SimRng,
        first_id:  usize,
    ) -> Vec<Route> {
        let closed: Vec<RoadId> = incidents.iter().map(|i| i.road_id).collect();
        let routing = graph.without_roads(&closed);
        debug!(
            "routing graph drops {} of {} roads",
            graph.road_count() - routing.road_count(),
            graph.road_count()
        );
        self.sample(&routing, count, rng, first_id)
    }

    fn sample(&self, graph: &RoadGraph, count: usize, rng: &mut SimRng, first_id: usize) -> Vec<Route> {
        let nodes = graph.node_count();
        if nodes < 2 {
            if count > 0 {
                warn!("cannot sample routes from a graph with {nodes} intersection(s)");
            }
            return Vec::new();
        }

        let max_attempts = count.saturating_mul(self.retry_factor);
        let mut routes = Vec::with_capacity(count);
        let mut attempts = 0;
        while routes.len() < count && attempts < max_attempts {
            attempts += 1;
            let Some((a, b)) = rng.distinct_pair(nodes) else { break };
            let (from, to) = (NodeIx(a as u32), NodeIx(b as u32));
            match self.finder.search(graph, from, to) {
                Search::Found(path) => {
                    let id = route_id(first_id + routes.len());
                    routes.push(Route::from_path(id, graph, &path));
                }
                Search::NotFound => continue,
            }
        }

        if routes.len() < count {
            warn!(
                "sampled {} of {count} routes before hitting the {max_attempts}-attempt cap",
                routes.len()
            );
        }
        routes
    }

    /// Visited nodes and per-leg times for one template.
    fn walk_template(
        &self,
        graph:    &RoadGraph,
        template: &[NodeId],
    ) -> RoutingResult<(Vec<NodeIx>, Vec<f64>)> {
        let stops = template
            .iter()
            .map(|&id| graph.index_of(id))
            .collect::<Result<Vec<_>, _>>()?;

        let mut nodes = vec![stops[0]];
        let mut legs = Vec::with_capacity(stops.len());
        for pair in stops.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            let road = graph
                .road_between(u, v)
                .map(|e| graph.road(e))
                .ok_or_else(|| RoutingError::NoPath {
                    from: graph.intersection(u).id,
                    to:   graph.intersection(v).id,
                })?;

            if !road.is_blocked() {
                nodes.push(v);
                legs.push(road.travel_time());
                continue;
            }

            match self.finder.search(graph, u, v) {
                Search::Found(detour) => {
                    debug!("template leg {} detours over {} roads", road.id, detour.edges.len());
                    for (&n, &e) in detour.nodes[1..].iter().zip(&detour.edges) {
                        nodes.push(n);
                        legs.push(graph.road(e).travel_time());
                    }
                }
                Search::NotFound => {
                    warn!("template leg {} is blocked with no detour", road.id);
                    nodes.push(v);
                    legs.push(f64::INFINITY);
                }
            }
        }
        Ok((nodes, legs))
    }
}
