//! # Board Module
//!
//! The tile grid entities move on.
//!
//! A board is fixed in size once built. Individual tiles only change through
//! [`Board::interact`] (eating coins, pellets and bonus items) and
//! [`Board::place_bonus_at_random`]. The number of remaining coins is kept in
//! step with the grid on every such change.

use crate::config::BONUS_PLACEMENT_ATTEMPTS;
use crate::{ChaseError, ChaseResult, Direction, Position};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Character marking the player spawn in the text form of a board.
pub const PLAYER_SPAWN_MARKER: char = 'P';

/// Character marking the pursuer spawn in the text form of a board.
pub const ENEMY_SPAWN_MARKER: char = 'G';

/// The kinds of tile a board is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Space,
    Coin,
    FrightenPellet,
    Bonus,
}

impl Tile {
    /// Whether entities may enter this tile.
    pub fn allows_movement(self) -> bool {
        !matches!(self, Tile::Wall)
    }

    /// Whether the player consumes this tile by stepping on it.
    pub fn allows_interaction(self) -> bool {
        matches!(self, Tile::Coin | Tile::FrightenPellet | Tile::Bonus)
    }

    /// Character used by the text form and the terminal renderer.
    pub fn glyph(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Space => ' ',
            Tile::Coin => '.',
            Tile::FrightenPellet => 'o',
            Tile::Bonus => '$',
        }
    }

    /// Decodes a tile character. Spawn markers are not tiles.
    pub fn from_glyph(glyph: char) -> Option<Tile> {
        match glyph {
            '#' => Some(Tile::Wall),
            ' ' => Some(Tile::Space),
            '.' => Some(Tile::Coin),
            'o' => Some(Tile::FrightenPellet),
            '$' => Some(Tile::Bonus),
            _ => None,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Space
    }
}

/// Fixed-size tile grid with the two spawn points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Vec<Tile>>,
    width: i32,
    height: i32,
    coins: usize,
    player_spawn: Position,
    enemy_spawn: Position,
}

impl Board {
    /// Builds a board from decoded rows of tiles.
    ///
    /// Fails if the grid is empty, the rows differ in length, or either
    /// spawn lies outside the grid or on a wall.
    pub fn new(
        tiles: Vec<Vec<Tile>>,
        player_spawn: Position,
        enemy_spawn: Position,
    ) -> ChaseResult<Self> {
        let height = tiles.len();
        let width = tiles.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(ChaseError::InvalidBoard("board has no tiles".to_string()));
        }
        if let Some(row) = tiles.iter().position(|row| row.len() != width) {
            return Err(ChaseError::InvalidBoard(format!(
                "row {} has length {}, expected {}",
                row,
                tiles[row].len(),
                width
            )));
        }

        let coins = tiles
            .iter()
            .flatten()
            .filter(|&&tile| tile == Tile::Coin)
            .count();

        let board = Self {
            tiles,
            width: width as i32,
            height: height as i32,
            coins,
            player_spawn,
            enemy_spawn,
        };

        for (name, spawn) in [("player", player_spawn), ("pursuer", enemy_spawn)] {
            match board.tile_at(spawn) {
                Err(_) => {
                    return Err(ChaseError::InvalidBoard(format!(
                        "{} spawn ({}, {}) is outside the board",
                        name, spawn.x, spawn.y
                    )))
                }
                Ok(Tile::Wall) => {
                    return Err(ChaseError::InvalidBoard(format!(
                        "{} spawn ({}, {}) is inside a wall",
                        name, spawn.x, spawn.y
                    )))
                }
                Ok(_) => {}
            }
        }

        Ok(board)
    }

    /// Builds a board from a character grid containing exactly one player
    /// spawn marker and one pursuer spawn marker.
    ///
    /// # Examples
    ///
    /// ```
    /// use chaser::{Board, Position};
    ///
    /// let board = Board::from_chars(&[
    ///     "#####",
    ///     "#P..#",
    ///     "#.#.#",
    ///     "#..G#",
    ///     "#####",
    /// ]).unwrap();
    /// assert_eq!(board.player_spawn(), Position::new(1, 1));
    /// assert_eq!(board.coins_remaining(), 6);
    /// ```
    pub fn from_chars<S: AsRef<str>>(rows: &[S]) -> ChaseResult<Self> {
        let mut tiles = Vec::with_capacity(rows.len());
        let mut player_spawn = None;
        let mut enemy_spawn = None;

        for (y, row) in rows.iter().enumerate() {
            let mut tile_row = Vec::new();
            for (x, glyph) in row.as_ref().chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                let tile = match glyph {
                    PLAYER_SPAWN_MARKER => {
                        Self::record_spawn(&mut player_spawn, pos, "player")?;
                        Tile::Space
                    }
                    ENEMY_SPAWN_MARKER => {
                        Self::record_spawn(&mut enemy_spawn, pos, "pursuer")?;
                        Tile::Space
                    }
                    other => Tile::from_glyph(other).ok_or_else(|| {
                        ChaseError::InvalidBoard(format!(
                            "unknown tile character {:?} at ({}, {})",
                            other, x, y
                        ))
                    })?,
                };
                tile_row.push(tile);
            }
            tiles.push(tile_row);
        }

        let player_spawn = player_spawn
            .ok_or_else(|| ChaseError::InvalidBoard("missing player spawn".to_string()))?;
        let enemy_spawn = enemy_spawn
            .ok_or_else(|| ChaseError::InvalidBoard("missing pursuer spawn".to_string()))?;

        Self::new(tiles, player_spawn, enemy_spawn)
    }

    /// Parses the newline separated text form of a board.
    pub fn parse(text: &str) -> ChaseResult<Self> {
        let rows: Vec<&str> = text.lines().map(|line| line.trim_end_matches('\r')).collect();
        Self::from_chars(&rows)
    }

    fn record_spawn(slot: &mut Option<Position>, pos: Position, name: &str) -> ChaseResult<()> {
        if let Some(existing) = slot {
            return Err(ChaseError::InvalidBoard(format!(
                "duplicate {} spawn at ({}, {}), first at ({}, {})",
                name, pos.x, pos.y, existing.x, existing.y
            )));
        }
        *slot = Some(pos);
        Ok(())
    }

    /// Board width in tiles.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Board height in tiles.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Tile rows, indexed `[y][x]`.
    pub fn tiles(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    pub fn player_spawn(&self) -> Position {
        self.player_spawn
    }

    pub fn enemy_spawn(&self) -> Position {
        self.enemy_spawn
    }

    /// Number of coin tiles still on the board.
    pub fn coins_remaining(&self) -> usize {
        self.coins
    }

    /// Returns the tile at `pos`.
    pub fn tile_at(&self, pos: Position) -> ChaseResult<Tile> {
        if !self.is_valid_coordinate(pos) {
            return Err(ChaseError::OutOfBounds { x: pos.x, y: pos.y });
        }
        Ok(self.tiles[pos.y as usize][pos.x as usize])
    }

    /// Bounds check.
    pub fn is_valid_coordinate(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// True if `pos` lies on the outermost row or column.
    pub fn is_edge(&self, pos: Position) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == self.width - 1 || pos.y == self.height - 1
    }

    /// Mirrors an edge position onto the opposite edge.
    ///
    /// Positions away from the edges are returned unchanged.
    pub fn complementary_edge(&self, pos: Position) -> Position {
        let mut mirrored = pos;
        if pos.x == 0 || pos.x == self.width - 1 {
            mirrored.x = self.width - 1 - pos.x;
        }
        if pos.y == 0 || pos.y == self.height - 1 {
            mirrored.y = self.height - 1 - pos.y;
        }
        mirrored
    }

    /// Applies tunnel wraparound: edge positions jump to the opposite edge.
    pub fn wrapped(&self, pos: Position) -> Position {
        if self.is_edge(pos) {
            self.complementary_edge(pos)
        } else {
            pos
        }
    }

    /// True if the tile at `pos` exists and can be entered.
    pub fn is_allowing_movement(&self, pos: Position) -> bool {
        self.tile_at(pos)
            .map(Tile::allows_movement)
            .unwrap_or(false)
    }

    /// A crossroad is an enterable tile with at least three enterable
    /// neighbours.
    pub fn is_crossroad(&self, pos: Position) -> bool {
        if !self.is_allowing_movement(pos) {
            return false;
        }
        let open = Direction::ALL
            .iter()
            .filter(|&&direction| self.is_allowing_movement(pos.moved(direction)))
            .count();
        open >= 3
    }

    /// Consumes an interactable tile, replacing it with empty space.
    ///
    /// Returns false and leaves the board untouched if there is nothing to
    /// consume at `pos`.
    pub fn interact(&mut self, pos: Position) -> bool {
        let tile = match self.tile_at(pos) {
            Ok(tile) if tile.allows_interaction() => tile,
            _ => return false,
        };
        if tile == Tile::Coin {
            self.coins -= 1;
        }
        self.tiles[pos.y as usize][pos.x as usize] = Tile::default();
        true
    }

    /// Tries a few random tiles and turns the first empty one into a bonus.
    pub fn place_bonus_at_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Position> {
        for _ in 0..BONUS_PLACEMENT_ATTEMPTS {
            let pos = Position::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height));
            if self.tiles[pos.y as usize][pos.x as usize] == Tile::Space {
                self.tiles[pos.y as usize][pos.x as usize] = Tile::Bonus;
                debug!("Placed bonus at {:?}", pos);
                return Some(pos);
            }
        }
        None
    }

    /// Text rows of the current grid, spawn markers omitted.
    pub fn render_rows(&self) -> Vec<String> {
        self.tiles
            .iter()
            .map(|row| row.iter().map(|tile| tile.glyph()).collect())
            .collect()
    }
}
