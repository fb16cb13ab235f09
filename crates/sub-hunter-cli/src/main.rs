//! Headless runner for the Sub Hunter simulation.
//!
//! Runs the standard opening for a number of ticks, optionally feeding
//! scripted pilot commands, and logs sounds and scope updates through
//! `tracing`. Useful for replaying a session from a seed and a script.
//!
//! Usage:
//!   sub-hunter --seed 7 --ticks 1800 --script demo.json -v

mod script;
mod surface;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use sub_hunter_core::scope::present;
use sub_hunter_core::{Event, PresentationSurface, SimConfig, Simulation};
use tracing::{debug, info, warn, Level};

use crate::script::Script;
use crate::surface::LoggingSurface;

#[derive(Parser, Debug)]
#[command(name = "sub-hunter")]
#[command(about = "Run the Sub Hunter sonar simulation without a window")]
struct Args {
    /// Seed for the simulation's random source
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Maximum number of ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Seconds per tick (defaults to the configured fixed timestep)
    #[arg(long)]
    dt: Option<f32>,

    /// JSON file overriding simulation constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON list of `{ "tick": N, "command": "..." }` pilot inputs
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write the final scope frame as JSON to this file
    #[arg(long)]
    frame_out: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// End-of-run totals printed as JSON.
#[derive(Debug, Default, Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    torpedoes_fired: usize,
    detonations: usize,
    contacts_pinged: usize,
    game_over: bool,
}

impl Summary {
    fn record(&mut self, event: &Event) {
        match event {
            Event::TorpedoLaunched { .. } => self.torpedoes_fired += 1,
            Event::Detonation { .. } => self.detonations += 1,
            Event::ContactPinged { .. } => self.contacts_pinged += 1,
            Event::GameOver { .. } => self.game_over = true,
            Event::WaypointChanged { .. } => {}
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    SimConfig::from_json(&json).with_context(|| format!("invalid config {}", path.display()))
}

/// Picks the seconds per tick, rejecting zero, negative and non-finite values.
fn tick_length(requested: Option<f32>, fixed_dt: f32) -> Result<f32> {
    let dt = requested.unwrap_or(fixed_dt);
    if !(dt > 0.0 && dt.is_finite()) {
        anyhow::bail!("--dt must be a positive number of seconds, got {dt}");
    }
    Ok(dt)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(args.config.as_ref())?;
    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::default(),
    };
    let dt = tick_length(args.dt, config.fixed_dt)?;

    let mut sim = Simulation::with_config(config, args.seed).context("invalid configuration")?;
    sim.populate_standard();
    info!(seed = args.seed, ticks = args.ticks, dt, commands = script.len(), "starting run");

    let mut surface = LoggingSurface::new();
    let mut summary = Summary {
        seed: args.seed,
        ..Summary::default()
    };

    for tick in 0..args.ticks {
        for &command in script.commands_at(tick) {
            match sim.apply_control(command) {
                Ok(events) => {
                    for event in &events {
                        summary.record(event);
                        if let Some(cue) = event.cue() {
                            surface.play(cue);
                        }
                    }
                }
                Err(err) => warn!(tick, %command, error = %err, "command rejected"),
            }
        }

        let report = sim.step(dt);
        for event in &report.events {
            summary.record(event);
        }
        let frame = sim.frame();
        let stats = present(&report, frame.as_ref(), &mut surface);
        if stats.failed > 0 {
            debug!(tick, failed = stats.failed, "frame partially drawn");
        }
        summary.ticks = tick + 1;
        if surface.closed {
            break;
        }
    }

    if let Some(path) = &args.frame_out {
        let frame = sim.frame().context("no player to capture a frame for")?;
        let json = serde_json::to_string_pretty(&frame)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write frame {}", path.display()))?;
    }

    info!(
        primitives = surface.primitives,
        sounds = surface.cues,
        "run finished"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
