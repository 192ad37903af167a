//! square — runs every scenario of the traffic-network engine once and
//! prints each result as JSON on stdout.
//!
//! ```text
//! square [NETWORK_DIR]
//! ```
//!
//! With `NETWORK_DIR`, the default network is read from
//! `NETWORK_DIR/nodes.csv` and `NETWORK_DIR/edges.csv`; otherwise the
//! built-in sample network is used.  Set `RUST_LOG=info` (or `debug`) for
//! progress on stderr.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use tn_core::{NodeId, RoadId, SimConfig, SimRng};
use tn_network::{CsvSource, Incident, NetworkSource, SampleSource};
use tn_sim::{ComplexRequest, SimulationResult, SquareRequest, TrafficService};

// ── Constants ─────────────────────────────────────────────────────────────────

const COMPLEX_VEHICLES: usize = 8;
const COMPLEX_DURATION: u32   = 600;
const SQUARE_VEHICLES:  usize = 14;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let config = SimConfig::default();
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(dir) => {
            info!("reading network from {}", dir.display());
            run_all(TrafficService::new(config, CsvSource::in_dir(&dir))?)
        }
        None => run_all(TrafficService::new(config, SampleSource)?),
    }
}

fn run_all<S: NetworkSource>(service: TrafficService<S>) -> Result<()> {
    let t0 = Instant::now();
    let mut rng = SimRng::new(service.config().seed);

    let summary = service.network_summary().context("loading the default network")?;
    info!("network: {} intersections, {} roads", summary.nodes, summary.roads);

    // First road of the current network carries the incidents below.
    let graph = service.current()?;
    let Some(first) = graph.roads().first().map(|r| r.id) else {
        anyhow::bail!("the network has no roads");
    };

    print("basic", &service.run_basic(&mut rng)?)?;

    let accident = Incident::new(first, 0.7, Some("Accident".into()))?;
    print("dynamic", &service.run_dynamic(accident, &mut rng)?)?;

    let mut incidents = vec![Incident::new(first, 1.0, Some("Road closed".into()))?];
    if let Some(second) = graph.roads().get(1) {
        incidents.push(Incident::new(second.id, 0.4, Some("Roadworks".into()))?);
    }
    let complex = ComplexRequest {
        duration: Some(COMPLEX_DURATION),
        incidents,
        vehicles: COMPLEX_VEHICLES,
    };
    print("complex", &service.run_complex(complex, &mut rng)?)?;

    let square = SquareRequest { vehicles: SQUARE_VEHICLES, with_incident: true };
    let result = service.run_square(square, &mut rng)?;
    let north = RoadId::new(NodeId(1), NodeId(2));
    if let Some(plan) = result.signal_plans.first()
        && let Some(cycle) = plan.cycle_for(north)
    {
        info!("square corner {}: north road green {}s", plan.intersection_id, cycle.green_duration);
    }
    print("square", &result)?;

    info!("all scenarios finished in {:.1?}", t0.elapsed());
    Ok(())
}

fn print(label: &str, result: &SimulationResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)
        .with_context(|| format!("serializing the {label} result"))?;
    println!("{json}");
    info!("{label}: {} signal plans, {} routes", result.signal_plans.len(), result.routes.len());
    Ok(())
}
