//! # Enemy Module
//!
//! Pursuers and their steering.
//!
//! Every pursuer runs the same movement algorithm. It commits to the turn it
//! will take one tile ahead of time: at a crossroad it picks the open
//! neighbour closest to its current target, elsewhere it follows the
//! corridor. What differs between pursuers is only how the target is chosen,
//! which depends on the pursuer's [`EnemyKind`], its mode flags and its
//! [`Intelligence`].

use crate::config::{
    AMBUSH_LOOKAHEAD, FLANK_LOOKAHEAD, FRIGHTENED_RETREAT_DISTANCE, OPPORTUNIST_RADIUS,
};
use crate::{Board, ChaseError, Direction, Entity, Position, Transform};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Glyph shared by all frightened pursuers.
pub const FRIGHTENED_GLYPH: char = 'w';

/// Chance that a low-intelligence pursuer takes the worst turn at a crossroad.
const BLUNDER_CHANCE: f64 = 0.25;

/// How sophisticated a pursuer's decisions are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Intelligence {
    Low,
    Medium,
    High,
}

impl TryFrom<u8> for Intelligence {
    type Error = ChaseError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Intelligence::Low),
            1 => Ok(Intelligence::Medium),
            2 => Ok(Intelligence::High),
            other => Err(ChaseError::InvalidSettings(format!(
                "intelligence must be 0, 1 or 2, got {}",
                other
            ))),
        }
    }
}

impl From<Intelligence> for u8 {
    fn from(level: Intelligence) -> u8 {
        match level {
            Intelligence::Low => 0,
            Intelligence::Medium => 1,
            Intelligence::High => 2,
        }
    }
}

/// The four pursuer personalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Heads straight for the player
    Direct,
    /// Aims a few tiles ahead of the player
    Ambush,
    /// Pincers the player together with the direct pursuer
    Flank,
    /// Chases from afar, retreats when close
    Opportunist,
}

impl EnemyKind {
    /// All kinds in table order. The flank pursuer pivots on the first.
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Direct,
        EnemyKind::Ambush,
        EnemyKind::Flank,
        EnemyKind::Opportunist,
    ];

    pub fn glyph(self) -> char {
        match self {
            EnemyKind::Direct => 'B',
            EnemyKind::Ambush => 'P',
            EnemyKind::Flank => 'I',
            EnemyKind::Opportunist => 'C',
        }
    }

    /// Board corner this kind retreats to while scattering.
    pub fn scatter_corner(self, board: &Board) -> Position {
        let right = board.width() - 1;
        let bottom = board.height() - 1;
        match self {
            EnemyKind::Direct => Position::new(right, 0),
            EnemyKind::Ambush => Position::new(0, 0),
            EnemyKind::Flank => Position::new(right, bottom),
            EnemyKind::Opportunist => Position::new(0, bottom),
        }
    }
}

/// Read-only view of the world a pursuer needs to pick its target.
#[derive(Debug, Clone, Copy)]
pub struct ChaseContext<'a> {
    pub board: &'a Board,
    /// Where the player is and which way it faces
    pub player: Transform,
    /// Position of the pursuer the flanker pivots on
    pub anchor: Position,
}

/// A pursuer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub transform: Transform,
    /// Direction to take once the tile ahead is reached
    pub next_rotation: Direction,
    pub alive: bool,
    pub frightened: bool,
    pub scatter: bool,
    pub intelligence: Intelligence,
    pub scatter_target: Position,
    /// Target chosen on the last step
    pub target: Position,
}

impl Enemy {
    /// Creates a pursuer waiting inside the spawn. It stays out of play
    /// until [`Enemy::release`] is called.
    pub fn new(
        kind: EnemyKind,
        spawn: Position,
        intelligence: Intelligence,
        scatter_target: Position,
    ) -> Self {
        Self {
            kind,
            transform: Transform::new(spawn, Direction::Up),
            next_rotation: Direction::Up,
            alive: false,
            frightened: false,
            scatter: false,
            intelligence,
            scatter_target,
            target: scatter_target,
        }
    }

    /// Brings the pursuer into play with the given scatter state.
    pub fn release<R: Rng + ?Sized>(&mut self, board: &Board, scatter: bool, rng: &mut R) {
        self.alive = true;
        self.frightened = false;
        self.scatter = scatter;
        self.transform.rotation = Direction::Up;
        self.calculate_next_direction(board, rng);
    }

    /// Takes the pursuer out of play and puts it back in the spawn.
    pub fn send_home(&mut self, spawn: Position) {
        self.alive = false;
        self.frightened = false;
        self.transform = Transform::new(spawn, Direction::Up);
        self.next_rotation = Direction::Up;
    }

    /// One movement tick: advance, pick a new target, commit the next turn.
    pub fn step<R: Rng + ?Sized>(&mut self, context: &ChaseContext<'_>, rng: &mut R) {
        self.advance(context.board);
        self.target = self.calculate_target(context, rng);
        self.calculate_next_direction(context.board, rng);
    }

    /// Moves one tile using the committed turn, wrapping through tunnels.
    ///
    /// Returns whether the pursuer moved.
    pub fn advance(&mut self, board: &Board) -> bool {
        let ahead = self.transform.ahead(1);
        if !board.is_allowing_movement(ahead) {
            // turn decided in place
            self.transform.rotation = self.next_rotation;
            let turned = self.transform.ahead(1);
            if !board.is_allowing_movement(turned) {
                return false;
            }
            self.transform.position = board.wrapped(turned);
            return true;
        }
        self.transform.position = board.wrapped(ahead);
        self.transform.rotation = self.next_rotation;
        true
    }

    /// Picks the point this pursuer steers towards.
    pub fn calculate_target<R: Rng + ?Sized>(
        &self,
        context: &ChaseContext<'_>,
        rng: &mut R,
    ) -> Position {
        let player = context.player;
        let board = context.board;

        if self.frightened {
            return match self.intelligence {
                Intelligence::Low => player.ahead(-FRIGHTENED_RETREAT_DISTANCE),
                Intelligence::Medium => Position::new(
                    rng.gen_range(0..board.width()),
                    rng.gen_range(0..board.height()),
                ),
                Intelligence::High => {
                    let x = if player.position.x < board.width() / 2 {
                        board.width() - 1
                    } else {
                        0
                    };
                    let y = if player.position.y < board.height() / 2 {
                        board.height() - 1
                    } else {
                        0
                    };
                    Position::new(x, y)
                }
            };
        }

        if self.scatter {
            return self.scatter_target;
        }

        match self.kind {
            EnemyKind::Direct => player.position,
            EnemyKind::Ambush => {
                let ahead = player.ahead(AMBUSH_LOOKAHEAD);
                if player.rotation == Direction::Up {
                    ahead.moved_by(AMBUSH_LOOKAHEAD, Direction::Left)
                } else {
                    ahead
                }
            }
            EnemyKind::Flank => {
                // twice the anchor-to-pivot vector, laid off from the pivot
                let pivot = player.ahead(FLANK_LOOKAHEAD);
                pivot + (pivot - context.anchor) * 2
            }
            EnemyKind::Opportunist => {
                if self.transform.position.euclidean_distance(player.position) > OPPORTUNIST_RADIUS
                {
                    player.position
                } else {
                    self.scatter_target
                }
            }
        }
    }

    /// Commits the turn to take on the tile ahead, based on `self.target`.
    ///
    /// When the tile ahead is blocked the decision is made for the current
    /// tile instead.
    pub fn calculate_next_direction<R: Rng + ?Sized>(&mut self, board: &Board, rng: &mut R) {
        let position = self.transform.position;
        let travel = self.transform.rotation;
        let ahead = board.wrapped(position.moved(travel));
        let origin = if board.is_allowing_movement(ahead) {
            ahead
        } else {
            position
        };
        let reverse = travel.opposite();

        let candidates: Vec<(Direction, f64)> = Direction::ALL
            .iter()
            .copied()
            .filter(|&direction| direction != reverse)
            .filter(|&direction| board.is_allowing_movement(origin.moved(direction)))
            .map(|direction| {
                let neighbour = board.wrapped(origin.moved(direction));
                (direction, self.target.euclidean_distance(neighbour))
            })
            .collect();

        if !board.is_crossroad(origin) {
            self.next_rotation = candidates
                .first()
                .map(|&(direction, _)| direction)
                .unwrap_or(reverse);
            return;
        }

        let distance = |a: &(Direction, f64), b: &(Direction, f64)| {
            a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal)
        };
        let blunder =
            self.intelligence == Intelligence::Low && rng.gen_bool(BLUNDER_CHANCE);
        // ties go to the earlier direction either way
        let choice = if blunder {
            candidates
                .iter()
                .copied()
                .max_by(|a, b| distance(a, b).then_with(|| b.0.cmp(&a.0)))
        } else {
            candidates
                .iter()
                .copied()
                .min_by(|a, b| distance(a, b).then_with(|| a.0.cmp(&b.0)))
        };
        self.next_rotation = choice.map(|(direction, _)| direction).unwrap_or(reverse);
    }

    /// Flips scatter mode. Unless frightened, the pursuer turns around.
    pub fn toggle_scatter(&mut self, board: &Board) {
        self.scatter = !self.scatter;
        if !self.frightened {
            self.reverse(board);
        }
    }

    /// Flips frighten mode. Entering it turns the pursuer around.
    pub fn toggle_frighten(&mut self, board: &Board) {
        let was_frightened = self.frightened;
        self.frightened = !was_frightened;
        if !was_frightened {
            self.reverse(board);
        }
    }

    /// Turns around on the spot. Skipped on edge tiles, where the reversed
    /// move would leave the board right after a tunnel jump.
    pub fn reverse(&mut self, board: &Board) {
        if board.is_edge(self.transform.position) {
            return;
        }
        self.transform.rotation = self.transform.rotation.opposite();
        self.next_rotation = self.transform.rotation;
    }
}

impl Entity for Enemy {
    fn transform(&self) -> Transform {
        self.transform
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn glyph(&self) -> char {
        if self.frightened {
            FRIGHTENED_GLYPH
        } else {
            self.kind.glyph()
        }
    }
}
