//! Unit tests for tn-sim.

#[cfg(test)]
mod helpers {
    use tn_core::{NodeId, RoadId, SimConfig};
    use tn_network::{EdgeRecord, NetworkData, NetworkError, NetworkResult, NetworkSource, NodeRecord, SampleSource};
    use tn_routing::Route;

    use crate::TrafficService;

    pub fn road(a: u64, b: u64) -> RoadId {
        RoadId::new(NodeId(a), NodeId(b))
    }

    pub fn crosses(route: &Route, r: RoadId) -> bool {
        route.path.windows(2).any(|w| RoadId::new(w[0], w[1]) == r)
    }

    pub fn ids(routes: &[Route]) -> Vec<String> {
        routes.iter().map(|r| r.id.clone()).collect()
    }

    /// Six intersections with several alternatives between any pair.
    pub fn six_node() -> NetworkData {
        let edge = |a, b, t| EdgeRecord::timed(a, b, t * 10.0, t, "Test Road");
        NetworkData {
            nodes: (1..=6).map(|i| NodeRecord::new(i, 40.0 + i as f64 * 0.001, -74.0)).collect(),
            edges: vec![
                edge(1, 2, 20.0),
                edge(1, 3, 30.0),
                edge(1, 4, 25.0),
                edge(2, 3, 15.0),
                edge(2, 6, 22.0),
                edge(3, 5, 18.0),
                edge(4, 5, 23.0),
                edge(5, 6, 21.0),
            ],
        }
    }

    pub fn sample_service() -> TrafficService<SampleSource> {
        TrafficService::new(SimConfig::default(), SampleSource).unwrap()
    }

    /// A source whose backing store is unreachable.
    pub struct Offline;

    impl NetworkSource for Offline {
        fn fetch(&self) -> NetworkResult<NetworkData> {
            Err(NetworkError::Parse("source offline".into()))
        }
    }
}

// ── Current graph ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod current_graph {
    use tn_core::{SimConfig, TnError};
    use tn_network::{EdgeRecord, NetworkError, SampleSource};

    use crate::{NetworkSummary, SimError, TrafficService};
    use super::helpers::{Offline, sample_service, six_node};

    #[test]
    fn first_use_loads_from_source() {
        let service = sample_service();
        assert_eq!(service.network_summary().unwrap(), NetworkSummary { nodes: 4, roads: 4 });
    }

    #[test]
    fn load_replaces_wholesale() {
        let service = sample_service();
        service.network_summary().unwrap();
        let summary = service.load(&six_node()).unwrap();
        assert_eq!(summary, NetworkSummary { nodes: 6, roads: 8 });
        assert_eq!(service.network_summary().unwrap(), summary);
    }

    #[test]
    fn failed_load_keeps_previous_graph() {
        let service = sample_service();
        service.load(&six_node()).unwrap();

        let mut bad = six_node();
        bad.edges.push(EdgeRecord::timed(2, 1, 5.0, 1.0, "Duplicate"));
        let err = service.load(&bad).unwrap_err();
        assert!(matches!(err, SimError::Network(NetworkError::DuplicateRoad(_))));
        assert_eq!(service.network_summary().unwrap().nodes, 6);
    }

    #[test]
    fn reload_goes_back_to_source() {
        let service = sample_service();
        service.load(&six_node()).unwrap();
        assert_eq!(service.reload().unwrap().nodes, 4);
    }

    #[test]
    fn unreachable_source_is_an_error() {
        let service = TrafficService::new(SimConfig::default(), Offline).unwrap();
        assert!(matches!(service.current(), Err(SimError::Network(NetworkError::Parse(_)))));
        // An explicit load still works.
        service.load(&six_node()).unwrap();
        assert_eq!(service.network_summary().unwrap().roads, 8);
    }

    #[test]
    fn zero_retry_factor_is_rejected() {
        let config = SimConfig { retry_factor: 0, ..SimConfig::default() };
        let err = TrafficService::new(config, SampleSource).err().unwrap();
        assert!(matches!(err, SimError::Config(TnError::Config(_))));
    }

    #[test]
    fn snapshots_are_independent() {
        let service = sample_service();
        let a = service.snapshot().unwrap();
        let b = service.snapshot().unwrap();
        assert_eq!(a.road_count(), b.road_count());
        assert_eq!(service.current().unwrap().road_count(), 4);
    }
}

// ── Basic ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod basic {
    use tn_core::SimRng;

    use super::helpers::{ids, sample_service};

    #[test]
    fn sample_network_result_shape() {
        let service = sample_service();
        let result = service.run_basic(&mut SimRng::new(42)).unwrap();

        // Node 4 is a dead end and gets no signal.
        let planned: Vec<u64> = result.signal_plans.iter().map(|p| p.intersection_id.0).collect();
        assert_eq!(planned, vec![1, 2, 3]);
        assert!(result.signal_plans.iter().all(|p| p.cycles.iter().all(|c| c.green_duration == 30)));

        assert_eq!(ids(&result.routes), ["route-1", "route-2", "route-3", "route-4", "route-5"]);
        assert!(result.incidents.is_empty());
        assert_eq!(result.duration, None);
    }

    #[test]
    fn same_seed_same_result() {
        let service = sample_service();
        let a = service.run_basic(&mut SimRng::new(7)).unwrap();
        let b = service.run_basic(&mut SimRng::new(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn concurrent_runs_share_one_graph() {
        let service = sample_service();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|seed| {
                    let service = &service;
                    s.spawn(move || service.run_basic(&mut SimRng::new(seed)).map(|r| r.routes.len()))
                })
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap().unwrap(), 5);
            }
        });
    }
}

// ── Dynamic ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dynamic {
    use tn_core::SimRng;
    use tn_network::{Incident, NetworkError};

    use crate::SimError;
    use super::helpers::{crosses, road, sample_service, six_node};

    #[test]
    fn routes_avoid_the_incident_road() {
        let service = sample_service();
        service.load(&six_node()).unwrap();
        let incident = Incident::new(road(1, 2), 0.7, Some("Accident".into())).unwrap();
        let result = service.run_dynamic(incident.clone(), &mut SimRng::new(3)).unwrap();

        assert_eq!(result.incidents, vec![incident]);
        assert_eq!(result.routes.len(), 5);
        assert!(result.routes.iter().all(|r| !crosses(r, road(1, 2))));

        let hub = result.signal_plans.iter().find(|p| p.intersection_id.0 == 1).unwrap();
        assert_eq!(hub.cycles.last().unwrap().road_id, road(1, 2));
        assert_eq!(hub.cycles.last().unwrap().green_duration, 15);
    }

    #[test]
    fn canonical_graph_is_untouched() {
        let service = sample_service();
        let incident = Incident::new(road(1, 2), 0.9, None).unwrap();
        service.run_dynamic(incident, &mut SimRng::new(3)).unwrap();

        let g = service.current().unwrap();
        let r = g.road_by_id(road(1, 2)).unwrap();
        assert!(!r.has_incident());
        assert_eq!(r.travel_time(), 10.0);
    }

    #[test]
    fn invalid_severity_is_rejected() {
        let service = sample_service();
        let incident = Incident { road_id: road(1, 2), severity: 1.5, description: None };
        let err = service.run_dynamic(incident, &mut SimRng::new(3)).unwrap_err();
        assert!(matches!(err, SimError::Network(NetworkError::InvalidSeverity(_))));
    }
}

// ── Complex ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod complex {
    use tn_core::SimRng;
    use tn_network::{Incident, NetworkError};

    use crate::{ComplexRequest, SimError};
    use super::helpers::{crosses, ids, road, sample_service, six_node};

    #[test]
    fn several_incidents_and_vehicle_count() {
        let service = sample_service();
        service.load(&six_node()).unwrap();
        let incidents = vec![
            Incident::new(road(1, 2), 0.8, None).unwrap(),
            Incident::new(road(5, 6), 1.0, None).unwrap(),
        ];
        let request = ComplexRequest { duration: Some(120), incidents: incidents.clone(), vehicles: 8 };
        let result = service.run_complex(request, &mut SimRng::new(11)).unwrap();

        assert_eq!(result.duration, Some(120));
        assert_eq!(result.incidents, incidents);
        assert_eq!(result.routes.len(), 8);
        let expected: Vec<String> = (1..=8).map(|i| format!("route-{i}")).collect();
        assert_eq!(ids(&result.routes), expected);
        for r in &result.routes {
            assert!(!crosses(r, road(1, 2)) && !crosses(r, road(5, 6)));
            assert!(r.travel_time.is_finite());
        }
    }

    #[test]
    fn defaults_match_the_api() {
        let request = ComplexRequest::default();
        assert_eq!(request.duration, Some(300));
        assert_eq!(request.vehicles, 10);
        assert!(request.incidents.is_empty());
    }

    #[test]
    fn one_bad_incident_rejects_the_request() {
        let service = sample_service();
        let request = ComplexRequest {
            incidents: vec![
                Incident::new(road(1, 2), 0.5, None).unwrap(),
                Incident { road_id: road(2, 3), severity: -0.1, description: None },
            ],
            ..ComplexRequest::default()
        };
        let err = service.run_complex(request, &mut SimRng::new(1)).unwrap_err();
        assert!(matches!(err, SimError::Network(NetworkError::InvalidSeverity(_))));
    }

    #[test]
    fn incident_on_unknown_road_is_reported_but_ignored() {
        let service = sample_service();
        let stale = Incident::new(road(40, 41), 0.5, None).unwrap();
        let request = ComplexRequest { incidents: vec![stale.clone()], vehicles: 3, ..ComplexRequest::default() };
        let result = service.run_complex(request, &mut SimRng::new(1)).unwrap();
        assert_eq!(result.incidents, vec![stale]);
        assert_eq!(result.routes.len(), 3);
        assert!(result.signal_plans.iter().all(|p| p.cycles.iter().all(|c| c.green_duration == 30)));
    }
}

// ── Square ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod square {
    use tn_core::{NodeId, SimRng};

    use crate::{NetworkSummary, SquareRequest};
    use super::helpers::{ids, road, sample_service};

    #[test]
    fn square_becomes_current() {
        let service = sample_service();
        service.run_square(SquareRequest::default(), &mut SimRng::new(1)).unwrap();
        assert_eq!(service.network_summary().unwrap(), NetworkSummary { nodes: 8, roads: 8 });
    }

    #[test]
    fn plain_square_run() {
        let service = sample_service();
        let result = service.run_square(SquareRequest::default(), &mut SimRng::new(1)).unwrap();

        assert_eq!(result.duration, Some(300));
        assert!(result.incidents.is_empty());
        assert_eq!(result.signal_plans.len(), 4);
        assert!(result.signal_plans.iter().all(|p| p.total_cycle_time == 95));

        assert_eq!(result.routes.len(), 10);
        let first: Vec<u64> = result.routes[0].path.iter().map(|n| n.0).collect();
        assert_eq!(first, vec![5, 1, 2, 6]);
        assert_eq!(result.routes[0].travel_time, 11.0);
    }

    #[test]
    fn north_road_incident() {
        let service = sample_service();
        let request = SquareRequest { with_incident: true, ..SquareRequest::default() };
        let result = service.run_square(request, &mut SimRng::new(1)).unwrap();

        assert_eq!(result.incidents.len(), 1);
        assert_eq!(result.incidents[0].road_id, road(1, 2));

        let corner = &result.signal_plans[0];
        assert_eq!(corner.intersection_id, NodeId(1));
        assert_eq!(corner.cycle_for(road(1, 2)).unwrap().green_duration, 15);
        assert_eq!(corner.total_cycle_time, 80);

        // 5-1 and 2-6 at 4.0 each, 1-2 slowed from 3.0 to 15.0.
        assert!((result.routes[0].travel_time - 23.0).abs() < 1e-9);
    }

    #[test]
    fn extra_vehicles_fall_back_to_random() {
        let service = sample_service();
        let request = SquareRequest { vehicles: 14, ..SquareRequest::default() };
        let result = service.run_square(request, &mut SimRng::new(9)).unwrap();

        let expected: Vec<String> = (1..=14).map(|i| format!("route-{i}")).collect();
        assert_eq!(ids(&result.routes), expected);
    }
}

// ── Serialization boundary ────────────────────────────────────────────────────

#[cfg(all(test, feature = "serde"))]
mod serde_boundary {
    use tn_core::{NodeId, RoadId, SimRng};
    use tn_network::Incident;

    use crate::{ComplexRequest, SimulationResult, SquareRequest};
    use super::helpers::{road, sample_service};

    fn square_result(with_incident: bool) -> SimulationResult {
        let request = SquareRequest { vehicles: 14, with_incident };
        sample_service().run_square(request, &mut SimRng::new(5)).unwrap()
    }

    #[test]
    fn result_round_trips() {
        let result = square_result(true);
        let json = serde_json::to_string(&result).unwrap();
        let back: SimulationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn impassable_route_survives_round_trip() {
        let mut result = square_result(false);
        let route = &mut result.routes[0];
        route.travel_time = f64::INFINITY;
        route.waypoints.last_mut().unwrap().arrival_time = f64::INFINITY;

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""travel_time":"Infinity""#));
        assert!(!json.contains("null"));

        let back: SimulationResult = serde_json::from_str(&json).unwrap();
        assert!(back.routes[0].is_impassable());
        assert_eq!(back, result);
    }

    #[test]
    fn unknown_time_word_is_rejected() {
        let mut value = serde_json::to_value(square_result(false)).unwrap();
        value["routes"][0]["travel_time"] = serde_json::json!("forever");
        assert!(serde_json::from_value::<SimulationResult>(value).is_err());
    }

    #[test]
    fn road_id_is_a_lo_hi_string() {
        assert_eq!(serde_json::to_string(&road(4, 1)).unwrap(), r#""1-4""#);
        let parsed: RoadId = serde_json::from_str(r#""4-1""#).unwrap();
        assert_eq!(parsed, road(1, 4));
        assert!(serde_json::from_str::<RoadId>(r#""1_4""#).is_err());
    }

    #[test]
    fn incident_description_is_optional() {
        let incident: Incident = serde_json::from_str(r#"{"road_id":"2-1","severity":0.8}"#).unwrap();
        assert_eq!(incident.road_id, RoadId::new(NodeId(1), NodeId(2)));
        assert_eq!(incident.description, None);
    }

    #[test]
    fn requests_fill_missing_fields() {
        let complex: ComplexRequest = serde_json::from_str(r#"{"vehicles":3}"#).unwrap();
        assert_eq!(complex, ComplexRequest { vehicles: 3, ..ComplexRequest::default() });

        let complex: ComplexRequest = serde_json::from_str(r#"{"duration":null}"#).unwrap();
        assert_eq!(complex.duration, None);
        assert_eq!(complex.vehicles, 10);

        let square: SquareRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(square, SquareRequest::default());
        let square: SquareRequest = serde_json::from_str(r#"{"with_incident":true}"#).unwrap();
        assert!(square.with_incident);
        assert_eq!(square.vehicles, 10);
    }
}
