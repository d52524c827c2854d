//! patrol — command-line run of the swarm_patrol simulator.
//!
//! ```text
//! patrol [SCENARIO] [--config FILE.json] [--ticks N] [--out DIR]
//! ```
//!
//! SCENARIO is one of `none`, `sparse`, `normal`, `heavy`, `rapid`.  A JSON
//! config file overrides the defaults field by field; the scenario, when
//! given, is applied on top.  Set `RUST_LOG=debug` to see every drone
//! transition.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sp_core::{Point, Scenario, SimConfig};
use sp_field::AnomalyKind;
use sp_output::{CsvWriter, SimOutputObserver};
use sp_sim::SimBuilder;

// ── Defaults ──────────────────────────────────────────────────────────────────

const DEFAULT_TICKS: u64 = 9_000; // 30 simulated minutes at 200 ms per tick
const DEFAULT_OUT:   &str = "output/patrol";
const EVENT_TAIL:    usize = 10;

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(version, about = "Run the swarm_patrol drone simulator and write CSV output", long_about = None)]
struct Cli {
    /// Anomaly regime: none, sparse, normal, heavy or rapid.
    #[arg(value_parser = Scenario::from_str)]
    scenario: Option<Scenario>,

    /// JSON file overriding `SimConfig` defaults field by field.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_TICKS)]
    ticks: u64,

    /// Directory for metrics.csv and measurements.csv.
    #[arg(long, default_value = DEFAULT_OUT)]
    out: PathBuf,
}

fn load_config(args: &Cli) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(scenario) = args.scenario {
        scenario.apply(&mut config);
    }
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Cli::parse();
    let config = load_config(&args)?;

    println!("=== patrol — swarm_patrol drone simulator ===");
    println!(
        "Drones: {}  |  Grid: {}×{}  |  Ticks: {}  |  Seed: {}",
        config.drone_count, config.grid_width, config.grid_height, args.ticks, config.seed
    );
    if let Some(scenario) = args.scenario {
        println!("Scenario: {scenario}");
    }
    println!();

    // 1. Build the sim with one anomaly in the middle so there is something
    //    to find from the first tick.
    let centre = Point::new(config.grid_width as f64 / 2.0, config.grid_height as f64 / 2.0);
    let mut sim = SimBuilder::new(config)
        .seed_anomaly(centre, 1.0, AnomalyKind::Pollution)
        .build()?;

    // 2. Stream output while running.
    let writer = CsvWriter::new(&args.out)?;
    let mut obs = SimOutputObserver::new(writer, sim.clock());

    // 3. Run.
    let t0 = Instant::now();
    sim.start();
    let ran = sim.run_ticks(args.ticks, &mut obs);
    sim.stop();
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Summary.
    println!(
        "Ran {ran} ticks ({:.1} s simulated) in {:.3} s",
        sim.elapsed_ms() as f64 / 1000.0,
        elapsed.as_secs_f64()
    );
    println!("Output written to {}", args.out.display());
    println!();

    if let Some(last) = sim.snapshots().last() {
        println!("Final snapshot at t={:.1}s", last.time_s());
        println!("  coverage            {:>8.2} %", last.coverage_pct);
        println!("  live anomalies      {:>8}", last.anomaly_count);
        println!("  missed anomalies    {:>8}", last.missed_anomalies);
        println!("  success rate        {:>8.1} %", last.success_rate_pct);
        println!("  detection latency   {:>8.0} ms", last.detection_latency_ms);
        println!("  energy efficiency   {:>8.3}", last.energy_efficiency);
        println!("  coordination score  {:>8.1}", last.coordination_score);
        println!();
    }

    println!("{:<10} {:<11} {:>8} {:>14}", "Drone", "State", "Battery", "Position");
    println!("{}", "-".repeat(46));
    for drone in sim.drones() {
        println!(
            "{:<10} {:<11} {:>7.0}% {:>14}",
            drone.id().to_string(),
            drone.state().label(),
            drone.battery_fraction() * 100.0,
            drone.position().to_string(),
        );
    }
    println!();

    let log = sim.event_log();
    println!("Last {} of {} events:", EVENT_TAIL.min(log.len()), log.len());
    for line in log.iter().skip(log.len().saturating_sub(EVENT_TAIL)) {
        println!("  {line}");
    }

    Ok(())
}
