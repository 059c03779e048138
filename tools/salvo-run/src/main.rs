//! salvo-run: headless driver for the SALVO simulation.
//!
//! Usage:
//!   salvo-run [--ticks N] [--config path.json] [--seed S]
//!
//! Runs the engine for N ticks after a start command and prints the final
//! snapshot as JSON on stdout. Set RUST_LOG (e.g. `RUST_LOG=salvo_sim=info`)
//! for progress logs on stderr.

use std::path::PathBuf;
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use salvo_core::commands::SimCommand;
use salvo_core::state::SimSnapshot;
use salvo_sim::{SimConfig, SimulationEngine};

const DEFAULT_TICKS: u64 = 600;

struct Args {
    ticks: u64,
    config: Option<PathBuf>,
    seed: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args
        .iter()
        .any(|a| matches!(a.as_str(), "help" | "--help" | "-h"))
    {
        print_usage();
        return;
    }

    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("Error: {msg}");
            print_usage();
            process::exit(1);
        }
    };

    let mut config = match &args.config {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut engine = match SimulationEngine::try_new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    engine.queue_command(SimCommand::Start);

    let snapshot = run_ticks(&mut engine, args.ticks);
    info!(
        ticks = snapshot.time.tick,
        hits = engine.hits(),
        projectiles = snapshot.projectiles.len(),
        "run complete"
    );

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing snapshot: {e}");
            process::exit(1);
        }
    }
}

/// Tick `ticks` times and return the last snapshot. Zero ticks leaves the
/// engine untouched and yields an empty snapshot.
fn run_ticks(engine: &mut SimulationEngine, ticks: u64) -> SimSnapshot {
    let mut snapshot = SimSnapshot::default();
    for _ in 0..ticks {
        snapshot = engine.tick();
    }
    snapshot
}

fn print_usage() {
    eprintln!(
        "salvo-run: run the SALVO simulation headless\n\
         \n\
         Options:\n\
         \n\
           --ticks <N>        Ticks to simulate (default: {DEFAULT_TICKS})\n\
           --config <path>    JSON config file (missing fields use defaults)\n\
           --seed <S>         RNG seed, overrides the config file\n\
         \n\
         Example:\n\
         \n\
           RUST_LOG=info salvo-run --ticks 3600 --seed 7 > snapshot.json\n"
    );
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args {
        ticks: DEFAULT_TICKS,
        config: None,
        seed: None,
    };
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match flag.as_str() {
            "--ticks" => {
                let v = value()?;
                parsed.ticks = v.parse().map_err(|_| format!("Invalid tick count: {v}"))?;
            }
            "--config" => parsed.config = Some(PathBuf::from(value()?)),
            "--seed" => {
                let v = value()?;
                parsed.seed = Some(v.parse().map_err(|_| format!("Invalid seed: {v}"))?);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(parsed)
}
