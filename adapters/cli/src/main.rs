#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that resolves and inspects Gravewatch rulesets.
//!
//! Every command first merges the shipped base configuration of an episode
//! with a difficulty overlay, optionally read from a TOML file, and fails with
//! a descriptive error before anything else runs when the result is invalid.

mod overlay_file;
mod summary;
mod timeline;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gravewatch_catalog::{base_config, overlay};
use gravewatch_core::{Boundary, Difficulty, Direction, Episode, GridPosition, KeyLayout, RuleSet};
use gravewatch_system_merger::ConfigMerger;
use gravewatch_system_selection::WeightedSelector;
use gravewatch_system_wall_behavior::{WallBehaviorPolicy, WallOutcome};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Resolve and inspect Gravewatch rulesets.
#[derive(Debug, Parser)]
#[command(name = "gravewatch", version, about)]
struct Cli {
    /// Episode whose base configuration is loaded.
    #[arg(long, default_value = "cemetery")]
    episode: Episode,

    /// Difficulty overlay applied on top of the base configuration.
    #[arg(long, default_value = "normal")]
    difficulty: Difficulty,

    /// TOML overlay replacing the shipped overlay for its difficulty.
    #[arg(long, value_name = "PATH")]
    overlay: Option<PathBuf>,

    /// Seed for every random draw.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the resolved ruleset.
    Show,
    /// Draw enemies from the spawn distribution.
    Sample {
        /// Number of draws.
        #[arg(default_value_t = 10)]
        count: usize,
    },
    /// List the movement keys of a layout.
    Keys {
        /// Keyboard layout.
        #[arg(long, default_value = "qwerty")]
        layout: KeyLayout,
    },
    /// Run the timers of one enemy, one grave, one box and the spawner.
    Timeline {
        /// Simulated length in seconds.
        #[arg(default_value_t = 30)]
        seconds: u64,
        /// Simulated frame length in milliseconds.
        #[arg(long, default_value_t = 16)]
        step_ms: u64,
    },
    /// Resolve an actor crossing a grid boundary.
    Wall {
        /// Column of the crossing actor.
        x: u32,
        /// Row of the crossing actor.
        y: u32,
        /// Boundary being crossed.
        boundary: Boundary,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rules = resolve(&cli)?;
    info!(
        episode = %rules.episode(),
        difficulty = %rules.difficulty(),
        wall_behavior = %rules.wall_behavior(),
        "ruleset ready"
    );

    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
    match cli.command.unwrap_or(Command::Show) {
        Command::Show => print!("{}", summary::render(&rules)),
        Command::Sample { count } => sample(&rules, count, &mut rng),
        Command::Keys { layout } => keys(layout),
        Command::Timeline { seconds, step_ms } => {
            let lines = timeline::simulate(
                &rules,
                Duration::from_secs(seconds),
                Duration::from_millis(step_ms),
                &mut rng,
            )?;
            for line in lines {
                println!("{line}");
            }
        }
        Command::Wall { x, y, boundary } => wall(&rules, GridPosition::new(x, y), boundary)?,
    }
    Ok(())
}

fn resolve(cli: &Cli) -> Result<RuleSet> {
    let base = base_config(cli.episode);
    let overlay = match &cli.overlay {
        Some(path) => overlay_file::load(path, cli.difficulty)?,
        None => overlay(cli.episode, cli.difficulty),
    };
    ConfigMerger::new()
        .resolve(&base, &overlay)
        .with_context(|| {
            format!(
                "failed to resolve {} rules at {} difficulty",
                cli.episode,
                overlay.difficulty()
            )
        })
}

fn sample(rules: &RuleSet, count: usize, rng: &mut ChaCha8Rng) {
    let selector = WeightedSelector::new();
    for draw in 1..=count {
        let Some(kind) = selector.sample(rules.enemy_spawn(), rng) else {
            break;
        };
        let speed = selector.sample_range(rules.enemy_speed(), rng);
        println!(
            "{draw:>3}  {:<10} {:<14} step {:.0}ms",
            kind.label(),
            rules.enemy_name(*kind),
            speed
        );
    }
}

fn keys(layout: KeyLayout) {
    for direction in Direction::ALL {
        println!("{:<6} {}", direction.name(), layout.keys(direction).join(", "));
    }
}

fn wall(rules: &RuleSet, position: GridPosition, boundary: Boundary) -> Result<()> {
    anyhow::ensure!(
        rules.grid().contains(position),
        "({}, {}) lies outside the {}x{} grid",
        position.x(),
        position.y(),
        rules.grid().width(),
        rules.grid().height()
    );
    let policy = WallBehaviorPolicy::from_rules(rules);
    match policy.resolve(position, boundary) {
        WallOutcome::Moved(to) => {
            println!("{} moves to ({}, {})", policy.behavior(), to.x(), to.y());
        }
        WallOutcome::Blocked(at) => {
            println!("{} blocks at ({}, {})", policy.behavior(), at.x(), at.y());
        }
        WallOutcome::Terminal(event) => println!(
            "{} ends the run crossing {}",
            policy.behavior(),
            event.boundary.name()
        ),
    }
    Ok(())
}
