//! Adventuria - Entry Point
//!
//! Builds a world from config and command-line overrides, wires the general
//! log and the world history, and ticks the world on a fixed cadence until
//! Ctrl-C or the tick limit.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use adventuria::core::config::WorldConfig;
use adventuria::core::error::Result;
use adventuria::simulation::scheduler::{share, Scheduler};
use adventuria::world::events::{HistoryFile, TracingSink};
use adventuria::world::{RunSummary, World};
use clap::Parser;
use tokio::runtime::Runtime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Run the Adventuria world simulation
#[derive(Parser, Debug)]
#[command(name = "adventuria")]
#[command(about = "Tick a world of praying, cursed and punished actors")]
struct Args {
    /// TOML config file; missing keys fall back to defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Probability of a new actor appearing each moment
    #[arg(long)]
    spawn_rate: Option<f64>,

    /// Seconds between moments
    #[arg(long)]
    tick_interval: Option<f64>,

    /// Actors created before the first moment
    #[arg(long)]
    population: Option<usize>,

    /// Stop after this many moments (runs until Ctrl-C otherwise)
    #[arg(long)]
    ticks: Option<u64>,

    /// World history file (narrative events)
    #[arg(long, default_value = "adventuria.history")]
    history: PathBuf,

    /// General log file (all levels)
    #[arg(long, default_value = "game.log")]
    log_file: PathBuf,

    /// Write a JSON run summary here on exit
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    fn world_config(&self) -> Result<WorldConfig> {
        let mut config = match &self.config {
            Some(path) => WorldConfig::from_file(path)?,
            None => WorldConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(rate) = self.spawn_rate {
            config.monster_spawn_rate = rate;
        }
        if let Some(interval) = self.tick_interval {
            config.tick_interval_seconds = interval;
        }
        if let Some(population) = self.population {
            config.initial_population = population;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("adventuria=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_file)?;

    let mut config = args.world_config()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    config.seed = Some(seed);
    tracing::info!("Adventuria starting with seed {}...", seed);

    let rt = Runtime::new()?;
    rt.block_on(run(args, config))
}

async fn run(args: Args, config: WorldConfig) -> Result<()> {
    // Seeded residents go through the sinks like any later spawn
    let mut world = World::new(&WorldConfig {
        initial_population: 0,
        ..config.clone()
    })?;
    world.add_sink(Box::new(TracingSink));
    world.add_sink(Box::new(HistoryFile::open(&args.history)?));
    world.seed_population(config.initial_population);

    let world = share(world);
    let mut scheduler = Scheduler::from_seconds(config.tick_interval_seconds)?;
    if let Some(ticks) = args.ticks {
        scheduler = scheduler.with_max_ticks(ticks);
    }

    let start = Instant::now();
    let handle = scheduler.start(world.clone());

    let stop = handle.stop_signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, finishing the current moment");
            stop.stop();
        }
    });

    let report = handle.join().await?;
    let world = world.lock().await;
    let summary = RunSummary::new(&world, report.ticks_run, start.elapsed());

    println!("{}", summary.summary());

    if let Some(path) = &args.output {
        std::fs::write(path, summary.to_json()?)?;
        println!("Run summary written to {}", path.display());
    }

    match report.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
