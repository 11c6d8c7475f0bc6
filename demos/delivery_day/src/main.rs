//! delivery_day: one simulated working day for a small delivery fleet.
//!
//! Orders each van's drops with the route solver, then drives every van
//! through the motion engine on its own thread with seeded hazards, and
//! writes `tracks.csv` / `stops.csv` for a map renderer.
//!
//! ```text
//! RUST_LOG=debug cargo run -p delivery_day -- [config.json]
//! ```

mod fleet;

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fleet_core::{Coordinate, SeededRandom, SimConfig};
use fleet_motion::{
    DeliveryWaypoint, HazardGenerator, MotionConfig, MotionEngine, VehicleSimBuilder, VehicleSimState,
};
use fleet_output::{CsvTrackWriter, TrackBuffer, TrackRecorder, TrackWriter};
use fleet_route::{DistanceMatrix, solve_route};
use fleet_traffic::{SpeedModel, load_zones_reader};

use fleet::{DEPOT, VanPlan, ZONES_CSV};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:    &str = "output/delivery_day";
/// Track rows every 6 ticks (one per minute at 10 s ticks).
const SAMPLE_EVERY:  u64  = 6;
const SPEED_JITTER:  f64  = 0.05;

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config(path: Option<String>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let file = File::open(&path).with_context(|| format!("opening config {path}"))?;
    let config = serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing config {path}"))?;
    Ok(config)
}

/// Solve the visiting order for one van and build its initial state.
fn plan_vehicle(plan: &VanPlan, config: &SimConfig) -> Result<VehicleSimState> {
    let points: Vec<Coordinate> = std::iter::once(DEPOT).chain(plan.drops.iter().map(|d| d.at)).collect();
    let matrix = DistanceMatrix::from_coordinates(&points)?;
    let order = solve_route(&matrix, 0)?;
    if !order.is_complete(points.len()) {
        bail!("{}: only {} of {} stops reachable", plan.vehicle, order.len(), points.len());
    }

    let route = order.polyline(&points)?;
    let waypoints = order
        .order
        .iter()
        .enumerate()
        .skip(1)
        .map(|(route_index, &stop)| {
            let d = &plan.drops[stop - 1];
            DeliveryWaypoint::new(route_index, d.facility, d.dwell_minutes, d.quantity)
        })
        .collect();

    tracing::info!(
        vehicle = %plan.vehicle,
        stops = plan.drops.len(),
        order = ?order.order,
        km = order.total_cost / 1_000.0,
        "route planned"
    );

    Ok(VehicleSimBuilder::new(plan.vehicle, route)
        .waypoints(waypoints)
        .with_config(config)
        .build()?)
}

// ── Driving loop ──────────────────────────────────────────────────────────────

struct Outcome {
    state:  VehicleSimState,
    ticks:  u64,
    events: usize,
    buffer: TrackBuffer,
}

/// Fixed-step loop for one van until it completes or the day runs out.
fn simulate(engine: &MotionEngine, hazards: &HazardGenerator, config: &SimConfig, mut state: VehicleSimState) -> Outcome {
    let mut rng = SeededRandom::for_vehicle(config.seed, state.vehicle);
    let mut clock = config.make_clock();
    let dt = clock.tick_secs();
    let mut recorder = TrackRecorder::new(TrackBuffer::new(), SAMPLE_EVERY);
    let mut events = 0;

    recorder.record(clock.current_tick, clock.now(), &state);
    while !state.is_complete() && clock.current_tick < config.max_ticks {
        let before = state.active_events.len();
        state = hazards.maybe_inject(&state, dt, clock.now(), &mut rng);
        events += state.active_events.len() - before;

        clock.advance();
        state = engine.advance(&state, dt, clock.now(), &mut rng);
        recorder.record(clock.current_tick, clock.now(), &state);
    }
    if !state.is_complete() {
        tracing::warn!(vehicle = %state.vehicle, remaining_m = state.remaining_distance_m(), "day ended before route");
    }

    recorder.finish(&state);
    if let Some(e) = recorder.take_error() {
        tracing::warn!(vehicle = %state.vehicle, error = %e, "track buffer error");
    }
    Outcome { state, ticks: clock.current_tick, events, buffer: recorder.into_writer() }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(std::env::args().nth(1))?;
    config.validate()?;
    tracing::info!(?config, "run configuration");

    // 1. Reference data.
    let zones = load_zones_reader(Cursor::new(ZONES_CSV))?;
    let engine = MotionEngine::new(SpeedModel::new(zones, config.utc_offset_secs))
        .with_config(MotionConfig { speed_jitter: SPEED_JITTER, ..MotionConfig::default() });
    let hazards = HazardGenerator::default();

    // 2. Routes.
    let vehicles = fleet::plans()
        .iter()
        .map(|plan| plan_vehicle(plan, &config))
        .collect::<Result<Vec<_>>>()?;

    // 3. Drive every van on its own worker.
    let t0 = Instant::now();
    let mut outcomes: Vec<Outcome> = vehicles
        .into_par_iter()
        .map(|state| simulate(&engine, &hazards, &config, state))
        .collect();
    let elapsed = t0.elapsed();

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut writer = CsvTrackWriter::new(Path::new(OUTPUT_DIR))?;
    let mut rows = 0;
    for outcome in &mut outcomes {
        rows += outcome.buffer.tracks.len();
        outcome.buffer.drain_into(&mut writer)?;
    }
    writer.finish()?;
    tracing::info!(rows, dir = OUTPUT_DIR, secs = elapsed.as_secs_f64(), "simulation written");

    // 5. Summary.
    println!("{:<12} {:<10} {:>8} {:>8} {:>10} {:>7}", "Vehicle", "Phase", "Stops", "Minutes", "Delivered", "Events");
    println!("{}", "-".repeat(60));
    for o in &outcomes {
        let s = &o.state;
        println!(
            "{:<12} {:<10} {:>4}/{:<3} {:>8.1} {:>10.1} {:>7}",
            s.vehicle.to_string(),
            s.phase.as_str(),
            s.completed_stops(),
            s.stops.len(),
            o.ticks as f64 * config.tick_duration_ms as f64 / 60_000.0,
            s.delivered_total(),
            o.events,
        );
    }

    Ok(())
}
