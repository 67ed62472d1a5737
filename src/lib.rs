//! # Chaser
//!
//! A real-time, tile-based chase game simulation engine.
//!
//! ## Architecture Overview
//!
//! The engine is a fixed-tick, single-threaded simulation. Everything that
//! happens over time is driven by a cooperative scheduler that the caller
//! advances explicitly:
//!
//! - **Geometry**: integer positions and the four axis-aligned directions
//! - **Board**: the tile grid with spawn points and coin bookkeeping
//! - **Scheduler**: a priority queue of timed actions with pause-aware resume
//! - **Entities**: the player and four pursuers with pluggable targeting
//! - **Game**: the orchestrator owning all of the above, resolving collisions,
//!   scoring and the scatter/chase/frighten mode machine
//!
//! Rendering, menus and file formats for records live outside this crate.
//! The renderer reads state through [`Game`] queries and [`GameSnapshot`].

pub mod game;

pub use game::*;

/// Core error type for the chase engine.
#[derive(thiserror::Error, Debug)]
pub enum ChaseError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A tile was queried outside the grid
    #[error("Position ({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },

    /// Board could not be constructed
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    /// Timer task could not be constructed
    #[error("Invalid timer task: {0}")]
    InvalidTimer(String),

    /// Game settings failed validation
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type used throughout the chaser codebase.
pub type ChaseResult<T> = Result<T, ChaseError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed game rules that are not exposed as tunables.
pub mod config {
    /// Points for eating a coin
    pub const COIN_SCORE: u32 = 10;

    /// Points for eating a bonus item
    pub const BONUS_SCORE: u32 = 100;

    /// Base points for eating a frightened pursuer, multiplied by the streak
    pub const KILL_BASE_SCORE: u32 = 200;

    /// Random draws made when trying to place a bonus item
    pub const BONUS_PLACEMENT_ATTEMPTS: usize = 5;

    /// How far ahead of the player the ambusher aims
    pub const AMBUSH_LOOKAHEAD: i32 = 4;

    /// How far ahead of the player the flanker's pivot point lies
    pub const FLANK_LOOKAHEAD: i32 = 2;

    /// Distance beyond which the opportunist chases instead of retreating
    pub const OPPORTUNIST_RADIUS: f64 = 8.0;

    /// How far behind the player a low-intelligence frightened pursuer aims
    pub const FRIGHTENED_RETREAT_DISTANCE: i32 = 4;

    /// Number of pursuers in a session
    pub const ENEMY_COUNT: usize = 4;
}
