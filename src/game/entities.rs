//! # Entities Module
//!
//! Shared entity contract and the player character.

use crate::{Board, Direction, Position, Transform};
use serde::{Deserialize, Serialize};

/// What every entity on the board exposes to the game and the renderer.
pub trait Entity {
    /// Current position and facing.
    fn transform(&self) -> Transform;

    /// Whether the entity takes part in collisions.
    fn is_alive(&self) -> bool;

    /// Character the renderer draws for this entity.
    fn glyph(&self) -> char;

    /// Current position.
    fn position(&self) -> Position {
        self.transform().position
    }

    /// Current facing.
    fn rotation(&self) -> Direction {
        self.transform().rotation
    }
}

/// The player-controlled character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub transform: Transform,
    /// Turn requested by the player, applied as soon as it is possible
    pub next_rotation: Direction,
    pub alive: bool,
}

impl Player {
    /// Creates a player at `position` facing `rotation`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chaser::{Direction, Entity, Player, Position};
    ///
    /// let player = Player::new(Position::new(5, 5), Direction::Left);
    /// assert!(player.is_alive());
    /// assert_eq!(player.position(), Position::new(5, 5));
    /// ```
    pub fn new(position: Position, rotation: Direction) -> Self {
        Self {
            transform: Transform::new(position, rotation),
            next_rotation: rotation,
            alive: true,
        }
    }

    /// Requests a turn. Nothing moves until the next [`Player::step`].
    pub fn rotate(&mut self, direction: Direction) {
        self.next_rotation = direction;
    }

    /// Moves one tile: the requested turn if that tile is open, otherwise
    /// straight ahead if that is open, otherwise nowhere.
    ///
    /// Returns whether the player moved.
    pub fn step(&mut self, board: &Board) -> bool {
        for rotation in [self.next_rotation, self.transform.rotation] {
            let target = self.transform.position.moved(rotation);
            if board.is_allowing_movement(target) {
                self.transform.rotation = rotation;
                self.transform.position = board.wrapped(target);
                return true;
            }
        }
        false
    }
}

impl Entity for Player {
    fn transform(&self) -> Transform {
        self.transform
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn glyph(&self) -> char {
        // mouth opens against the direction of travel
        match self.transform.rotation {
            Direction::Up => 'v',
            Direction::Left => '>',
            Direction::Down => '^',
            Direction::Right => '<',
        }
    }
}
