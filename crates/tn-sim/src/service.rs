//! The long-lived simulation service.

use std::sync::{Arc, PoisonError, RwLock};

use log::{info, warn};

use tn_core::{SimConfig, SimRng};
use tn_network::{
    Incident, LoadDefaults, NetworkData, NetworkSource, RoadGraph, SquareLayout, square_network,
};
use tn_routing::{DijkstraPathFinder, PathFinder, RouteGenerator};
use tn_signal::{SignalPlanner, SignalTimings};

use crate::{ComplexRequest, NetworkSummary, SimResult, SimulationResult, SquareRequest};

/// Owns the current road graph and runs scenarios against private copies
/// of it.
///
/// # Access discipline
///
/// The current graph sits behind an `RwLock<Option<Arc<RoadGraph>>>`.
/// [`load`](Self::load) builds the new graph outside the lock and swaps it in
/// under the write lock; every scenario takes the read lock only long enough
/// to clone the `Arc`, then snapshots and mutates its own copy.  Concurrent
/// scenario runs therefore never block each other, and a load never observes
/// a half-built graph.
///
/// If no graph has been loaded when a scenario starts, one is fetched from
/// the service's [`NetworkSource`].
///
/// # Type parameters
///
/// - `S`: where the default network comes from.
/// - `P`: the path search used by route generation.
pub struct TrafficService<S: NetworkSource, P: PathFinder = DijkstraPathFinder> {
    config:   SimConfig,
    defaults: LoadDefaults,
    source:   S,
    routes:   RouteGenerator<P>,
    signals:  SignalPlanner,
    current:  RwLock<Option<Arc<RoadGraph>>>,
}

impl<S: NetworkSource> TrafficService<S, DijkstraPathFinder> {
    /// Dijkstra-backed service.  Fails if `config` does not validate.
    pub fn new(config: SimConfig, source: S) -> SimResult<Self> {
        Self::with_finder(config, source, DijkstraPathFinder)
    }
}

impl<S: NetworkSource, P: PathFinder> TrafficService<S, P> {
    pub fn with_finder(config: SimConfig, source: S, finder: P) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            routes:   RouteGenerator::with_finder(finder, config.retry_factor),
            signals:  SignalPlanner::default(),
            defaults: LoadDefaults::default(),
            current:  RwLock::new(None),
            config,
            source,
        })
    }

    /// Replace the signal timing constants.
    pub fn timings(mut self, timings: SignalTimings) -> Self {
        self.signals = SignalPlanner::new(timings);
        self
    }

    /// Replace the fallbacks used for edges without speed or length.
    pub fn load_defaults(mut self, defaults: LoadDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    // ── Current graph ─────────────────────────────────────────────────────

    /// Build a graph from `data` and make it current.
    ///
    /// On error the previous graph stays current.
    pub fn load(&self, data: &NetworkData) -> SimResult<NetworkSummary> {
        let graph = RoadGraph::load(data, &self.defaults)?;
        let summary = summarize(&graph);
        self.install(graph);
        info!("loaded network: {} intersections, {} roads", summary.nodes, summary.roads);
        Ok(summary)
    }

    /// Fetch from the configured source and make the result current.
    pub fn reload(&self) -> SimResult<NetworkSummary> {
        let data = self.source.fetch()?;
        self.load(&data)
    }

    /// The current graph, loading it from the source on first use.
    pub fn current(&self) -> SimResult<Arc<RoadGraph>> {
        if let Some(graph) = self.read_current() {
            return Ok(graph);
        }
        let fresh = RoadGraph::load(&self.source.fetch()?, &self.defaults)?;
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have loaded while we were fetching; theirs wins.
        let graph = slot.get_or_insert_with(|| {
            info!(
                "loaded default network: {} intersections, {} roads",
                fresh.node_count(),
                fresh.road_count()
            );
            Arc::new(fresh)
        });
        Ok(Arc::clone(graph))
    }

    /// An independent copy of the current graph.
    pub fn snapshot(&self) -> SimResult<RoadGraph> {
        Ok(self.current()?.snapshot())
    }

    pub fn network_summary(&self) -> SimResult<NetworkSummary> {
        let graph = self.current()?;
        Ok(summarize(&graph))
    }

    // ── Scenarios ─────────────────────────────────────────────────────────

    /// Default signal plans and random routes on the unmodified graph.
    pub fn run_basic(&self, rng: &mut SimRng) -> SimResult<SimulationResult> {
        let graph = self.snapshot()?;
        let signal_plans = self.signals.default_plan(&graph);
        let routes = self.routes.random_routes(&graph, self.config.basic_route_count, rng);
        info!("basic run: {} plans, {} routes", signal_plans.len(), routes.len());
        Ok(SimulationResult { signal_plans, routes, incidents: Vec::new(), duration: None })
    }

    /// One incident: adaptive plans and routes that avoid the incident road.
    pub fn run_dynamic(&self, incident: Incident, rng: &mut SimRng) -> SimResult<SimulationResult> {
        let incidents = vec![incident];
        let graph = self.working_graph(&incidents)?;
        let signal_plans = self.signals.adaptive_plan(&graph, &incidents);
        let routes = self.routes.incident_avoiding_routes(
            &graph,
            self.config.dynamic_route_count,
            &incidents,
            rng,
        );
        info!("dynamic run: {} plans, {} routes", signal_plans.len(), routes.len());
        Ok(SimulationResult { signal_plans, routes, incidents, duration: None })
    }

    /// Any number of incidents, a caller-chosen vehicle count and duration.
    pub fn run_complex(&self, request: ComplexRequest, rng: &mut SimRng) -> SimResult<SimulationResult> {
        let ComplexRequest { duration, incidents, vehicles } = request;
        let graph = self.working_graph(&incidents)?;
        let signal_plans = self.signals.adaptive_plan(&graph, &incidents);
        let routes = self.routes.incident_avoiding_routes(&graph, vehicles, &incidents, rng);
        if routes.len() < vehicles {
            warn!("complex run produced {} of {vehicles} requested routes", routes.len());
        }
        info!(
            "complex run: {} incidents, {} plans, {} routes",
            incidents.len(),
            signal_plans.len(),
            routes.len()
        );
        Ok(SimulationResult { signal_plans, routes, incidents, duration })
    }

    /// The square-intersection scenario.
    ///
    /// Makes the square network current, then plans its four corners and
    /// drives vehicles along the canonical templates, filling any remaining
    /// slots with random incident-avoiding routes.
    pub fn run_square(&self, request: SquareRequest, rng: &mut SimRng) -> SimResult<SimulationResult> {
        let layout = SquareLayout::standard();
        let canonical = self.install(RoadGraph::load(&square_network(), &self.defaults)?);

        let incidents = if request.with_incident {
            vec![layout.north_road_incident()]
        } else {
            Vec::new()
        };
        let mut graph = canonical.snapshot();
        graph.apply_incidents(&incidents)?;

        let signal_plans = self.signals.square_plan(&graph, &layout, &incidents)?;
        let routes = self.routes.template_routes(
            &graph,
            request.vehicles,
            &layout.templates(),
            &incidents,
            rng,
        )?;
        info!(
            "square run: incident={}, {} routes",
            request.with_incident,
            routes.len()
        );
        Ok(SimulationResult {
            signal_plans,
            routes,
            incidents,
            duration: Some(self.config.square_duration_secs),
        })
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn read_current(&self) -> Option<Arc<RoadGraph>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn install(&self, graph: RoadGraph) -> Arc<RoadGraph> {
        let graph = Arc::new(graph);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&graph));
        graph
    }

    /// Snapshot of the current graph with `incidents` applied.  Nothing is
    /// applied unless every incident validates.
    fn working_graph(&self, incidents: &[Incident]) -> SimResult<RoadGraph> {
        let mut graph = self.snapshot()?;
        graph.apply_incidents(incidents)?;
        Ok(graph)
    }
}

fn summarize(graph: &RoadGraph) -> NetworkSummary {
    NetworkSummary { nodes: graph.node_count(), roads: graph.road_count() }
}
