//! Signal planners.
//!
//! All three planners walk intersections in load order and each
//! intersection's roads in edge-discovery order, so the same graph and
//! incidents always produce the same plans.  Nothing is cached between calls.

use log::debug;

use tn_core::{NodeId, NodeIx, RoadId};
use tn_network::{Incident, NetworkResult, RoadGraph, SquareLayout};

use crate::{SignalPlan, SignalTimings};

/// Derives per-intersection cycle schedules from a working graph.
#[derive(Clone, Debug, Default)]
pub struct SignalPlanner {
    pub timings: SignalTimings,
}

impl SignalPlanner {
    pub fn new(timings: SignalTimings) -> Self {
        Self { timings }
    }

    /// Equal green for every road at every intersection with more than one
    /// road.
    pub fn default_plan(&self, graph: &RoadGraph) -> Vec<SignalPlan> {
        self.adaptive_plan(graph, &[])
    }

    /// Like [`default_plan`](Self::default_plan), except at intersections
    /// touching an incident's endpoint: there incident-free roads go first
    /// with a longer green, followed by the incident roads with a shorter one.
    pub fn adaptive_plan(&self, graph: &RoadGraph, incidents: &[Incident]) -> Vec<SignalPlan> {
        let t = &self.timings;
        let closed: Vec<RoadId> = incidents.iter().map(|i| i.road_id).collect();
        let affected = |node: NodeId| closed.iter().any(|r| r.touches(node));

        let mut plans = Vec::new();
        for (i, node) in graph.intersections().iter().enumerate() {
            let edges = graph.out_edges(NodeIx(i as u32));
            if edges.len() <= 1 {
                continue;
            }
            let roads = edges.iter().map(|&e| graph.road(e).id);

            let plan = if affected(node.id) {
                let (hit, clear): (Vec<RoadId>, Vec<RoadId>) = roads.partition(|r| closed.contains(r));
                debug!("intersection {} is next to {} incident road(s)", node.id, hit.len());
                let phases = clear
                    .into_iter()
                    .map(|r| (r, t.priority_green, t.yellow))
                    .chain(hit.into_iter().map(|r| (r, t.incident_green, t.yellow)));
                SignalPlan::chained(node.id, phases)
            } else {
                SignalPlan::chained(node.id, roads.map(|r| (r, t.default_green, t.yellow)))
            };
            plans.push(plan);
        }
        plans
    }

    /// Coordinated plan for the four corners of a square intersection.
    ///
    /// Square-internal roads go first, then approach roads.  A square road
    /// gets the shortened green when an incident whose endpoints are both
    /// corners names it.
    ///
    /// # Errors
    ///
    /// `NodeNotFound` if a corner of `layout` is missing from `graph`.
    pub fn square_plan(
        &self,
        graph:     &RoadGraph,
        layout:    &SquareLayout,
        incidents: &[Incident],
    ) -> NetworkResult<Vec<SignalPlan>> {
        let t = &self.timings;
        let flagged: Vec<RoadId> = incidents
            .iter()
            .map(|i| i.road_id)
            .filter(|&r| layout.is_square_road(r))
            .collect();

        let mut plans = Vec::with_capacity(layout.corners.len());
        for &corner in &layout.corners {
            let roads: Vec<RoadId> = graph
                .edges_of(corner)?
                .iter()
                .map(|&e| graph.road(e).id)
                .collect();
            let (inner, outer): (Vec<RoadId>, Vec<RoadId>) =
                roads.into_iter().partition(|&r| layout.is_square_road(r));

            let phases = inner
                .into_iter()
                .map(|r| {
                    let green = if flagged.contains(&r) {
                        t.square_incident_green
                    } else {
                        t.square_green
                    };
                    (r, green, t.yellow)
                })
                .chain(outer.into_iter().map(|r| (r, t.external_green, t.yellow)));
            plans.push(SignalPlan::chained(corner, phases));
        }
        Ok(plans)
    }
}
