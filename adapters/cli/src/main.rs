#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a farm raid level headlessly.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use farm_raid_core::{EngineState, IVec2};
use farm_raid_simulation::{Simulation, SimulationConfig};
use farm_raid_system_creatures::DefenderKind;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const MEADOW_MAP: &str = include_str!("../assets/meadow.map");
const MEADOW_DETAILS: &str = include_str!("../assets/meadow.details");

/// Runs a farm raid level for a fixed number of ticks and reports the outcome.
#[derive(Debug, Parser)]
#[command(name = "farm-raid", version, about)]
struct Args {
    /// Map file; defaults to the bundled meadow layout.
    #[arg(long)]
    map: Option<PathBuf>,
    /// Detail file; defaults to the bundled meadow details.
    #[arg(long)]
    details: Option<PathBuf>,
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
    /// Builds a scarecrow on the given `column,row` cell before the run.
    #[arg(long, value_parser = parse_cell)]
    scarecrow: Vec<(i32, i32)>,
    /// Builds a hive on the given `column,row` cell before the run.
    #[arg(long, value_parser = parse_cell)]
    hive: Vec<(i32, i32)>,
}

/// Entry point for the farm raid command-line interface.
fn main() {
    init_tracing();
    if let Err(err) = run(Args::parse()) {
        error!(error = %err, "run_failed");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config at {}", path.display()))?;
            SimulationConfig::from_toml_str(&contents)
                .with_context(|| format!("failed to parse config at {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };
    let map = read_or_bundled(args.map.as_ref(), MEADOW_MAP, "map")?;
    let details = read_or_bundled(args.details.as_ref(), MEADOW_DETAILS, "details")?;

    let mut sim =
        Simulation::load(&map, &details, config).context("failed to load the level")?;

    let dimensions = sim.dimensions();
    let orders = args
        .scarecrow
        .iter()
        .map(|cell| (DefenderKind::Scarecrow, *cell))
        .chain(args.hive.iter().map(|cell| (DefenderKind::Hive, *cell)));
    for (kind, (column, row)) in orders {
        let point = dimensions.cell_to_pixel(column, row);
        if !sim.build(kind, point) {
            warn!(?kind, column, row, coins = sim.inventory().coins(), "build_refused");
        }
    }

    for _ in 0..args.ticks {
        let engine = EngineState::new(sim.ticks(), dimensions);
        sim.tick(&engine)
            .with_context(|| format!("tick {} failed", sim.ticks()))?;
    }

    report(&sim);
    Ok(())
}

fn read_or_bundled(path: Option<&PathBuf>, bundled: &str, what: &str) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {what} file at {}", path.display())),
        None => Ok(bundled.to_owned()),
    }
}

fn parse_cell(value: &str) -> Result<(i32, i32), String> {
    let (column, row) = value
        .split_once(',')
        .ok_or_else(|| format!("'{value}' is not a 'column,row' pair"))?;
    let column = column
        .trim()
        .parse()
        .map_err(|_| format!("'{column}' is not a column"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("'{row}' is not a row"))?;
    Ok((column, row))
}

fn report(sim: &Simulation) {
    let inventory = sim.inventory();
    let raiders = sim.raiders();
    let defenders = sim.defenders();
    let player: IVec2 = sim.player().position();
    info!(
        ticks = sim.ticks(),
        coins = inventory.coins(),
        food = inventory.food(),
        raiders = raiders.len(),
        defenders = defenders.len(),
        "run_complete"
    );

    println!("ticks simulated: {}", sim.ticks());
    println!("coins: {}", inventory.coins());
    println!("food: {}", inventory.food());
    println!("player: {},{}", player.x, player.y);
    println!(
        "raiders alive: {} (magpies {}, eagles {}, pigeons {})",
        raiders.len(),
        raiders.magpies().count(),
        raiders.eagles().count(),
        raiders.pigeons().count()
    );
    println!(
        "defenders: {} (scarecrows {}, hives {}, guard bees {})",
        defenders.len(),
        defenders.of_kind(DefenderKind::Scarecrow).count(),
        defenders.of_kind(DefenderKind::Hive).count(),
        defenders.of_kind(DefenderKind::GuardBee).count()
    );
}
