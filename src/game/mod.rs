//! # Game Module
//!
//! Core simulation: geometry, board, scheduler, entities and the orchestrating
//! game state.
//!
//! This module contains the fundamental building blocks of the chase engine:
//! - Integer geometry shared by every other component
//! - The tile board and its movement queries
//! - The cooperative timer used to drive everything over time
//! - Player and pursuer entities
//! - The game state machine tying them together

pub mod board;
pub mod enemy;
pub mod entities;
pub mod settings;
pub mod state;
pub mod timer;

pub use board::*;
pub use enemy::*;
pub use entities::*;
pub use settings::*;
pub use state::*;
pub use timer::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on the board.
///
/// # Examples
///
/// ```
/// use chaser::{Direction, Position};
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.moved_by(2, Direction::Up), Position::new(10, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position `steps` tiles away along `direction`.
    ///
    /// Negative step counts move backwards.
    pub fn moved_by(self, steps: i32, direction: Direction) -> Self {
        let delta = direction.to_delta();
        Self::new(self.x + delta.x * steps, self.y + delta.y * steps)
    }

    /// Returns the adjacent position along `direction`.
    pub fn moved(self, direction: Direction) -> Self {
        self.moved_by(1, direction)
    }

    /// Calculates the Euclidean distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use chaser::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.euclidean_distance(pos2), 5.0);
    /// ```
    pub fn euclidean_distance(self, other: Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<i32> for Position {
    type Output = Self;

    fn mul(self, factor: i32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// The four axis-aligned directions an entity can face.
///
/// The declaration order is the cyclic order and doubles as the tie-break
/// order when two candidate moves are equally good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// All directions in scan order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Converts a direction to a unit position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use chaser::{Direction, Position};
    ///
    /// assert_eq!(Direction::Up.to_delta(), Position::new(0, -1));
    /// assert_eq!(Direction::Right.to_delta(), Position::new(1, 0));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Left => Position::new(-1, 0),
            Direction::Down => Position::new(0, 1),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Returns the reverse direction.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A position together with a facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Position,
    pub rotation: Direction,
}

impl Transform {
    /// Creates a new transform.
    pub fn new(position: Position, rotation: Direction) -> Self {
        Self { position, rotation }
    }

    /// Returns the position `steps` tiles ahead along the current facing.
    pub fn ahead(&self, steps: i32) -> Position {
        self.position.moved_by(steps, self.rotation)
    }

    /// Advances the position `steps` tiles along the current facing.
    pub fn move_by(&mut self, steps: i32) {
        self.position = self.ahead(steps);
    }
}

/// Stable index of a pursuer inside the game's enemy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub usize);
