//! # Chaser Headless Runner
//!
//! Loads a maze and settings, plays a session on a simulated clock with
//! random turn requests, and prints the final snapshot as JSON.

use chaser::{
    Board, ChaseResult, Clock, Direction, Game, GameSettings, GameStatus, ManualClock,
};
use clap::Parser;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::rc::Rc;

/// Maze used when no `--map` is given.
const DEFAULT_MAZE: &str = "\
###################
#o.......#.......o#
#.##.###.#.###.##.#
#.................#
#.##.#.#####.#.##.#
#....#...#...#....#
####.### # ###.####
   #.#       #.#   
####.# ##G## #.####
    .  #   #  .    
####.# ##### #.####
   #.#       #.#   
####.# ##### #.####
#........#........#
#.##.###.#.###.##.#
#o.#.....P.....#.o#
##.#.#.#####.#.#.##
#....#...#...#....#
#.######.#.######.#
#.................#
###################";

/// Chance per tick that the simulated player asks for a new direction.
const TURN_CHANCE: f64 = 0.1;

/// Command line arguments for the headless runner.
#[derive(Parser, Debug)]
#[command(name = "chaser")]
#[command(about = "Runs a headless chase game session and prints the outcome")]
#[command(version)]
struct Args {
    /// Maze file; uses the built-in maze when omitted
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// JSON settings file; uses the defaults when omitted
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Random seed for pursuers, bonus placement and simulated input
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Maximum number of ticks to simulate
    #[arg(short, long, default_value_t = 2_000)]
    ticks: u64,

    /// Simulated milliseconds per tick
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ChaseResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level)?;

    info!("Starting chaser v{}", chaser::VERSION);

    let board = match &args.map {
        Some(path) => Board::parse(&std::fs::read_to_string(path)?)?,
        None => Board::parse(DEFAULT_MAZE)?,
    };
    let settings = match &args.settings {
        Some(path) => GameSettings::load(path)?,
        None => GameSettings::new(),
    };

    let clock = ManualClock::new(0);
    let mut game = Game::new(board, settings, Rc::new(clock.clone()), args.seed)?;
    let mut input = StdRng::seed_from_u64(args.seed.wrapping_add(1));

    let mut ticks = 0;
    while ticks < args.ticks && game.status() == GameStatus::Playing {
        let turn = if game.is_paused() || input.gen_bool(TURN_CHANCE) {
            Some(Direction::ALL[input.gen_range(0..Direction::ALL.len())])
        } else {
            None
        };
        game.update(turn);
        if game.take_redraw() {
            debug!(
                "t={}ms score={} lives={} coins={}",
                clock.now_ms(),
                game.score(),
                game.lives(),
                game.coins_remaining()
            );
        }
        clock.advance(args.tick_ms);
        ticks += 1;
    }

    info!(
        "Session ended after {} ticks: {:?}, score {}, lives {}",
        ticks,
        game.status(),
        game.score(),
        game.lives()
    );
    println!("{}", serde_json::to_string_pretty(&game.snapshot())?);

    Ok(())
}

/// Initializes logging at the requested level.
fn initialize_logging(log_level: &str) -> ChaseResult<()> {
    let filter = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    #[cfg(feature = "dev-tools")]
    {
        let level = match filter {
            log::LevelFilter::Error => tracing::Level::ERROR,
            log::LevelFilter::Warn => tracing::Level::WARN,
            log::LevelFilter::Debug => tracing::Level::DEBUG,
            log::LevelFilter::Trace => tracing::Level::TRACE,
            _ => tracing::Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .filter_level(filter)
            .format_target(false)
            .init();
    }

    Ok(())
}
