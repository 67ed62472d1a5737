//! # Game State Module
//!
//! Central game state and the rules tying all components together.
//!
//! [`Game`] owns the board, the player, the pursuers and the scheduler. All
//! movement happens through scheduled [`GameAction`]s; each call to
//! [`Game::update`] fires whatever is due and then resolves collisions,
//! scoring and mode changes. Scheduled actions refer to pursuers by
//! [`EnemyId`] and are resolved against the current enemy table when they
//! fire, so a restart that rebuilds the table cannot leave them dangling.

use crate::config::{BONUS_SCORE, COIN_SCORE, ENEMY_COUNT, KILL_BASE_SCORE};
use crate::{
    Board, ChaseContext, ChaseError, ChaseResult, Clock, Direction, Enemy, EnemyId, EnemyKind,
    Entity, GameSettings, Player, Position, Scheduler, SystemClock, Tile,
};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use std::rc::Rc;

/// Index of the pursuer the flanker pivots on.
const ANCHOR: EnemyId = EnemyId(0);

/// Periods of the recurring actions, checked once when the game is built.
#[derive(Debug, Clone, Copy)]
struct TickPeriods {
    player: NonZeroU64,
    enemies: NonZeroU64,
    bonus: NonZeroU64,
    scatter_cycle: NonZeroU64,
}

impl TickPeriods {
    fn from_settings(settings: &GameSettings) -> ChaseResult<Self> {
        let nonzero = |name: &str, value: u64| {
            NonZeroU64::new(value).ok_or_else(|| {
                ChaseError::InvalidSettings(format!("{} must be greater than zero", name))
            })
        };
        Ok(Self {
            player: nonzero("player_speed", settings.player_speed)?,
            enemies: nonzero("enemy_speed", settings.enemy_speed)?,
            bonus: nonzero("bonus_period", settings.bonus_period)?,
            scatter_cycle: nonzero(
                "scatter_duration + chase_duration",
                settings
                    .scatter_duration
                    .saturating_add(settings.chase_duration),
            )?,
        })
    }
}

/// Deferred work queued on the game's scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Regular player movement tick
    MovePlayer,
    /// Regular movement tick for pursuers that are not frightened
    MoveEnemies,
    /// Movement tick for frightened pursuers; reschedules itself while any
    /// frighten window is open
    MoveFrightenedEnemies,
    /// Try to drop a bonus item somewhere on the board
    SpawnBonus,
    /// First scatter phase is over; starts the chase half of the cadence
    EnterChase,
    /// First chase phase is over; starts the scatter half of the cadence
    EnterScatter,
    /// Recurring scatter/chase flip
    ToggleScatter,
    /// A pursuer leaves the spawn for the first time this session
    ReleaseEnemy(EnemyId),
    /// An eaten pursuer comes back into play
    ReviveEnemy(EnemyId),
    /// One frighten window has run out
    EndFrighten,
}

/// Session outcome as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is still in progress
    Playing,
    /// Every coin has been eaten
    Won,
    /// No lives left
    Lost,
}

/// What the renderer needs to draw one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityView {
    pub glyph: char,
    pub position: Position,
    pub rotation: Direction,
    pub alive: bool,
    pub frightened: bool,
}

/// Everything visible about a game at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: i32,
    pub height: i32,
    pub rows: Vec<String>,
    pub player: EntityView,
    pub enemies: Vec<EntityView>,
    pub score: u32,
    pub lives: u32,
    pub coins_remaining: usize,
    pub paused: bool,
    pub scatter: bool,
    pub frightened: bool,
    pub status: GameStatus,
}

/// One play session.
pub struct Game {
    board: Board,
    player: Player,
    enemies: Vec<Enemy>,
    scheduler: Scheduler<GameAction>,
    clock: Rc<dyn Clock>,
    rng: StdRng,
    settings: GameSettings,
    periods: TickPeriods,
    score: u32,
    lives: u32,
    kill_streak: u32,
    frighten_activations: u32,
    frightened_tick_pending: bool,
    scatter: bool,
    needs_redraw: bool,
}

impl Game {
    /// Creates a session on `board` and starts it.
    ///
    /// The clock drives every scheduled action; the seed feeds the single
    /// random generator used for bonus placement and pursuer decisions.
    ///
    /// # Examples
    ///
    /// ```
    /// use chaser::{Board, Game, GameSettings, ManualClock};
    /// use std::rc::Rc;
    ///
    /// let board = Board::from_chars(&["#####", "#P.G#", "#####"]).unwrap();
    /// let game = Game::new(board, GameSettings::new(), Rc::new(ManualClock::new(0)), 42).unwrap();
    /// assert_eq!(game.score(), 0);
    /// assert_eq!(game.lives(), 3);
    /// assert!(!game.is_paused());
    /// ```
    pub fn new(
        board: Board,
        settings: GameSettings,
        clock: Rc<dyn Clock>,
        seed: u64,
    ) -> ChaseResult<Self> {
        settings.validate()?;
        let periods = TickPeriods::from_settings(&settings)?;

        let player = Player::new(board.player_spawn(), Direction::Left);
        let enemies = Self::spawn_enemies(&board, &settings);
        let mut game = Self {
            player,
            enemies,
            scheduler: Scheduler::new(clock.clone()),
            clock,
            rng: StdRng::seed_from_u64(seed),
            lives: settings.lives,
            settings,
            periods,
            board,
            score: 0,
            kill_streak: 0,
            frighten_activations: 0,
            frightened_tick_pending: false,
            scatter: true,
            needs_redraw: true,
        };
        game.restart();
        Ok(game)
    }

    /// Creates a session driven by the wall clock.
    pub fn with_system_clock(board: Board, settings: GameSettings, seed: u64) -> ChaseResult<Self> {
        Self::new(board, settings, Rc::new(SystemClock::new()), seed)
    }

    fn spawn_enemies(board: &Board, settings: &GameSettings) -> Vec<Enemy> {
        EnemyKind::ALL
            .iter()
            .map(|&kind| {
                Enemy::new(
                    kind,
                    board.enemy_spawn(),
                    settings.intelligence,
                    kind.scatter_corner(board),
                )
            })
            .collect()
    }

    /// Puts every entity back at its spawn and re-registers all recurring
    /// actions on a fresh scheduler. Score, lives and the board's tiles are
    /// left alone.
    pub fn restart(&mut self) {
        let settings = &self.settings;
        let periods = self.periods;
        let mut scheduler = Scheduler::new(self.clock.clone());
        scheduler.schedule_every(periods.player, GameAction::MovePlayer);
        scheduler.schedule_every(periods.enemies, GameAction::MoveEnemies);
        scheduler.schedule_every(periods.bonus, GameAction::SpawnBonus);
        scheduler.schedule_once(settings.scatter_duration, GameAction::EnterChase);
        for index in 0..ENEMY_COUNT {
            scheduler.schedule_once(
                index as u64 * settings.come_out_period,
                GameAction::ReleaseEnemy(EnemyId(index)),
            );
        }

        self.scheduler = scheduler;
        self.player = Player::new(self.board.player_spawn(), Direction::Left);
        self.enemies = Self::spawn_enemies(&self.board, &self.settings);
        self.kill_streak = 0;
        self.frighten_activations = 0;
        self.frightened_tick_pending = false;
        self.scatter = true;
        self.needs_redraw = true;

        info!(
            "Session restarted: score {}, lives {}, coins left {}",
            self.score,
            self.lives,
            self.board.coins_remaining()
        );
    }

    /// Advances the simulation by one tick.
    ///
    /// A turn request is handed to the player and wakes a paused game. While
    /// running, due actions fire first and collisions are resolved after.
    pub fn update(&mut self, turn: Option<Direction>) {
        if let Some(direction) = turn {
            self.player.rotate(direction);
            if self.scheduler.is_paused() {
                self.scheduler.resume();
                self.needs_redraw = true;
            }
        }

        if self.scheduler.is_paused() {
            return;
        }

        for action in self.scheduler.update() {
            self.perform(action);
        }
        self.detect_collisions();
    }

    /// Pauses or resumes the session.
    pub fn toggle_pause(&mut self) {
        self.scheduler.toggle_pause();
        self.needs_redraw = true;
    }

    fn perform(&mut self, action: GameAction) {
        match action {
            GameAction::MovePlayer => {
                if self.player.step(&self.board) {
                    self.needs_redraw = true;
                }
            }
            GameAction::MoveEnemies => self.move_enemies(false),
            GameAction::MoveFrightenedEnemies => {
                self.move_enemies(true);
                if self.frighten_activations > 0 {
                    self.scheduler.schedule_once(
                        self.settings.frightened_enemy_speed(),
                        GameAction::MoveFrightenedEnemies,
                    );
                } else {
                    self.frightened_tick_pending = false;
                }
            }
            GameAction::SpawnBonus => match self.board.place_bonus_at_random(&mut self.rng) {
                Some(_) => self.needs_redraw = true,
                None => warn!("No free tile found for a bonus item"),
            },
            GameAction::EnterChase => {
                self.toggle_scatter();
                self.schedule_scatter_cadence();
                self.scheduler
                    .schedule_once(self.settings.chase_duration, GameAction::EnterScatter);
            }
            GameAction::EnterScatter => {
                self.toggle_scatter();
                self.schedule_scatter_cadence();
            }
            GameAction::ToggleScatter => self.toggle_scatter(),
            GameAction::ReleaseEnemy(id) => {
                self.release_enemy(id);
                debug!("Pursuer {} left the spawn", id.0);
            }
            GameAction::ReviveEnemy(id) => {
                self.release_enemy(id);
                debug!("Pursuer {} revived", id.0);
            }
            GameAction::EndFrighten => self.toggle_frighten(false),
        }
    }

    fn schedule_scatter_cadence(&mut self) {
        self.scheduler
            .schedule_every(self.periods.scatter_cycle, GameAction::ToggleScatter);
    }

    fn anchor_position(&self) -> Position {
        self.enemies
            .get(ANCHOR.0)
            .map(|enemy| enemy.position())
            .unwrap_or_else(|| self.board.enemy_spawn())
    }

    fn move_enemies(&mut self, frightened: bool) {
        let player = self.player.transform;
        for index in 0..self.enemies.len() {
            let anchor = self.anchor_position();
            let enemy = &mut self.enemies[index];
            if !enemy.alive || enemy.frightened != frightened {
                continue;
            }
            let context = ChaseContext {
                board: &self.board,
                player,
                anchor,
            };
            enemy.step(&context, &mut self.rng);
            self.needs_redraw = true;
        }
    }

    fn release_enemy(&mut self, id: EnemyId) {
        let Some(enemy) = self.enemies.get_mut(id.0) else {
            warn!("Release scheduled for unknown pursuer {:?}", id);
            return;
        };
        enemy.release(&self.board, self.scatter, &mut self.rng);
        self.needs_redraw = true;
    }

    /// Flips scatter mode for the session and every pursuer in play.
    pub fn toggle_scatter(&mut self) {
        self.scatter = !self.scatter;
        for enemy in self.enemies.iter_mut().filter(|enemy| enemy.alive) {
            if enemy.scatter != self.scatter {
                enemy.toggle_scatter(&self.board);
            }
        }
        self.needs_redraw = true;
        debug!(
            "Pursuers switched to {}",
            if self.scatter { "scatter" } else { "chase" }
        );
    }

    /// Opens (`true`) or closes (`false`) one frighten window.
    ///
    /// Windows overlap: pursuers stay frightened until every opened window
    /// has been closed again.
    pub fn toggle_frighten(&mut self, on: bool) {
        if on {
            self.frighten_activations += 1;
            self.scheduler
                .schedule_once(self.settings.frighten_duration, GameAction::EndFrighten);
            if self.frighten_activations == 1 && !self.frightened_tick_pending {
                self.scheduler.schedule_once(
                    self.settings.frightened_enemy_speed(),
                    GameAction::MoveFrightenedEnemies,
                );
                self.frightened_tick_pending = true;
            }
            info!(
                "Frighten window opened ({} active)",
                self.frighten_activations
            );
        } else {
            self.frighten_activations = self.frighten_activations.saturating_sub(1);
            if self.frighten_activations == 0 {
                self.kill_streak = 0;
                info!("Frighten mode over");
            }
        }

        let active = self.frighten_activations > 0;
        for enemy in self.enemies.iter_mut().filter(|enemy| enemy.alive) {
            let entering = on && !enemy.frightened;
            let leaving = !on && !active && enemy.frightened;
            if entering || leaving {
                enemy.toggle_frighten(&self.board);
            }
        }
        self.needs_redraw = true;
    }

    fn detect_collisions(&mut self) {
        let position = self.player.position();

        if let Ok(tile) = self.board.tile_at(position) {
            if tile.allows_interaction() {
                match tile {
                    Tile::Coin => self.score += COIN_SCORE,
                    Tile::Bonus => self.score += BONUS_SCORE,
                    Tile::FrightenPellet => self.toggle_frighten(true),
                    Tile::Wall | Tile::Space => {}
                }
                self.board.interact(position);
                self.needs_redraw = true;
            }
        }

        for index in 0..self.enemies.len() {
            let enemy = &self.enemies[index];
            if !enemy.alive || enemy.position() != position {
                continue;
            }
            if enemy.frightened {
                self.kill_enemy(EnemyId(index));
            } else {
                self.lose_life();
                return;
            }
        }
    }

    fn kill_enemy(&mut self, id: EnemyId) {
        let spawn = self.board.enemy_spawn();
        let enemy = &mut self.enemies[id.0];
        enemy.send_home(spawn);
        let kind = enemy.kind;

        self.scheduler
            .schedule_once(self.settings.kill_duration, GameAction::ReviveEnemy(id));
        let points = KILL_BASE_SCORE * (self.kill_streak + 1);
        self.score += points;
        self.kill_streak += 1;
        self.needs_redraw = true;
        debug!(
            "{:?} pursuer eaten for {} points (streak {})",
            kind, points, self.kill_streak
        );
    }

    fn lose_life(&mut self) {
        self.restart();
        self.scheduler.pause();
        self.lives = self.lives.saturating_sub(1);
        info!("Player caught, {} lives left", self.lives);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// All pursuers, indexed by [`EnemyId`].
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(id.0)
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn kill_streak(&self) -> u32 {
        self.kill_streak
    }

    /// Number of frighten windows currently open.
    pub fn frighten_activations(&self) -> u32 {
        self.frighten_activations
    }

    pub fn coins_remaining(&self) -> usize {
        self.board.coins_remaining()
    }

    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    pub fn is_scatter(&self) -> bool {
        self.scatter
    }

    pub fn is_frightened(&self) -> bool {
        self.frighten_activations > 0
    }

    /// Win/loss state for the caller to act on.
    pub fn status(&self) -> GameStatus {
        if self.lives == 0 {
            GameStatus::Lost
        } else if self.board.coins_remaining() == 0 {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    /// Whether anything visible changed since the last [`Game::take_redraw`].
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Returns and clears the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.needs_redraw, false)
    }

    /// Captures the visible state for a renderer.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            rows: self.board.render_rows(),
            player: view_of(&self.player, false),
            enemies: self
                .enemies
                .iter()
                .map(|enemy| view_of(enemy, enemy.frightened))
                .collect(),
            score: self.score,
            lives: self.lives,
            coins_remaining: self.board.coins_remaining(),
            paused: self.is_paused(),
            scatter: self.scatter,
            frightened: self.is_frightened(),
            status: self.status(),
        }
    }
}

fn view_of<E: Entity>(entity: &E, frightened: bool) -> EntityView {
    EntityView {
        glyph: entity.glyph(),
        position: entity.position(),
        rotation: entity.rotation(),
        alive: entity.is_alive(),
        frightened,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChaseError, ManualClock};

    const MAZE: [&str; 7] = [
        "#########",
        "#P......#",
        "#.##.##.#",
        "#...G...#",
        "#.##.##.#",
        "#.......#",
        "#########",
    ];

    fn game_with(rows: &[&str]) -> (ManualClock, Game) {
        let clock = ManualClock::new(0);
        let board = Board::from_chars(rows).unwrap();
        let game = Game::new(
            board,
            GameSettings::for_testing(),
            Rc::new(clock.clone()),
            12345,
        )
        .unwrap();
        (clock, game)
    }

    fn release_all(clock: &ManualClock, game: &mut Game) {
        let stagger = game.settings.come_out_period;
        for _ in 0..ENEMY_COUNT {
            game.update(None);
            clock.advance(stagger);
        }
        game.update(None);
    }

    #[test]
    fn test_game_creation() {
        let (_clock, game) = game_with(&MAZE);
        assert_eq!(game.score(), 0);
        assert_eq!(game.lives(), 3);
        assert_eq!(game.enemies().len(), ENEMY_COUNT);
        assert!(game.enemies().iter().all(|enemy| !enemy.is_alive()));
        assert!(game.is_scatter());
        assert!(!game.is_paused());
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.player().position(), Position::new(1, 1));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let board = Board::from_chars(&MAZE).unwrap();
        let mut settings = GameSettings::for_testing();
        settings.enemy_speed = 0;
        let result = Game::new(board, settings, Rc::new(ManualClock::new(0)), 1);
        assert!(matches!(result, Err(ChaseError::InvalidSettings(_))));
    }

    #[test]
    fn test_enemies_come_out_staggered() {
        let (clock, mut game) = game_with(&MAZE);
        game.update(None);
        assert!(game.enemy(EnemyId(0)).unwrap().is_alive());
        assert!(!game.enemy(EnemyId(1)).unwrap().is_alive());

        clock.advance(game.settings.come_out_period);
        game.update(None);
        assert!(game.enemy(EnemyId(1)).unwrap().is_alive());
        assert!(!game.enemy(EnemyId(2)).unwrap().is_alive());

        release_all(&clock, &mut game);
        assert!(game.enemies().iter().all(|enemy| enemy.is_alive()));
        let scatter = game.is_scatter();
        assert!(game.enemies().iter().all(|enemy| enemy.scatter == scatter));
    }

    #[test]
    fn test_player_eats_coins_on_its_tick() {
        let (clock, mut game) = game_with(&MAZE);
        let coins = game.coins_remaining();
        game.update(Some(Direction::Right));
        assert_eq!(game.score(), 0);

        clock.advance(game.settings.player_speed);
        game.update(None);
        assert_eq!(game.player().position(), Position::new(2, 1));
        assert_eq!(game.score(), COIN_SCORE);
        assert_eq!(game.coins_remaining(), coins - 1);
    }

    #[test]
    fn test_overlapping_frighten_windows() {
        let (clock, mut game) = game_with(&MAZE);
        release_all(&clock, &mut game);

        game.toggle_frighten(true);
        game.toggle_frighten(true);
        assert_eq!(game.frighten_activations(), 2);
        assert!(game.enemies().iter().all(|enemy| enemy.frightened));

        game.toggle_frighten(false);
        assert!(game.is_frightened());
        assert!(game.enemies().iter().all(|enemy| enemy.frightened));

        game.toggle_frighten(false);
        assert!(!game.is_frightened());
        assert!(game.enemies().iter().all(|enemy| !enemy.frightened));
    }

    #[test]
    fn test_frighten_window_expires() {
        let (clock, mut game) = game_with(&MAZE);
        release_all(&clock, &mut game);
        game.toggle_frighten(true);

        clock.advance(game.settings.frighten_duration - 1);
        game.update(None);
        assert!(game.is_frightened());

        clock.advance(1);
        game.update(None);
        assert!(!game.is_frightened());
        assert!(game.enemies().iter().all(|enemy| !enemy.frightened));
    }

    #[test]
    fn test_frighten_started_while_paused_lasts_full_window() {
        let (clock, mut game) = game_with(&MAZE);
        release_all(&clock, &mut game);
        let duration = game.settings.frighten_duration;

        game.toggle_pause();
        clock.advance(300);
        game.toggle_frighten(true);
        clock.advance(400);
        game.toggle_pause();
        let resumed_at = clock.now_ms();

        clock.set(resumed_at + duration - 1);
        game.update(None);
        assert!(game.is_frightened());

        clock.set(resumed_at + duration);
        game.update(None);
        assert!(!game.is_frightened());
    }

    #[test]
    fn test_frightened_enemies_use_their_own_cadence() {
        let (clock, mut game) = game_with(&MAZE);
        release_all(&clock, &mut game);
        game.toggle_frighten(true);
        let before: Vec<Position> = game.enemies().iter().map(|e| e.position()).collect();

        // for_testing: enemy_speed 150, frightened ticks every 300
        clock.advance(200);
        game.update(None);
        let during: Vec<Position> = game.enemies().iter().map(|e| e.position()).collect();
        assert_eq!(before, during);

        clock.advance(100);
        game.update(None);
        let after: Vec<Position> = game.enemies().iter().map(|e| e.position()).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_eating_frightened_enemies_scores_streak() {
        let (clock, mut game) = game_with(&MAZE);
        release_all(&clock, &mut game);
        game.toggle_frighten(true);

        let position = game.player.position();
        game.enemies[0].transform.position = position;
        game.enemies[1].transform.position = position;
        game.detect_collisions();

        assert_eq!(game.score(), KILL_BASE_SCORE + 2 * KILL_BASE_SCORE);
        assert_eq!(game.kill_streak(), 2);
        assert_eq!(game.lives(), 3);
        let eaten = game.enemy(EnemyId(0)).unwrap();
        assert!(!eaten.is_alive());
        assert!(!eaten.frightened);
        assert_eq!(eaten.position(), game.board().enemy_spawn());

        game.toggle_frighten(false);
        assert_eq!(game.kill_streak(), 0);

        // eaten pursuers come back after the kill duration
        clock.advance(game.settings.kill_duration);
        game.update(None);
        assert!(game.enemy(EnemyId(0)).unwrap().is_alive());
    }

    #[test]
    fn test_caught_by_enemy_costs_a_life() {
        let (clock, mut game) = game_with(&MAZE);
        release_all(&clock, &mut game);
        game.score = 120;
        let coins = game.coins_remaining();

        game.player.transform.position = Position::new(4, 1);
        game.enemies[2].transform.position = Position::new(4, 1);
        game.detect_collisions();

        assert_eq!(game.lives(), 2);
        assert!(game.is_paused());
        assert_eq!(game.score(), 120 + COIN_SCORE);
        assert_eq!(game.coins_remaining(), coins - 1);
        assert_eq!(game.player().position(), game.board().player_spawn());
        assert!(game.enemies().iter().all(|enemy| !enemy.is_alive()));

        // paused until the player asks to move
        clock.advance(10_000);
        game.update(None);
        assert_eq!(game.player().position(), game.board().player_spawn());
        game.update(Some(Direction::Right));
        assert!(!game.is_paused());
    }

    #[test]
    fn test_scatter_chase_cadence() {
        let (clock, mut game) = game_with(&MAZE);
        let scatter = game.settings.scatter_duration;
        let chase = game.settings.chase_duration;
        game.update(None);
        assert!(game.is_scatter());

        clock.set(scatter);
        game.update(None);
        assert!(!game.is_scatter());

        clock.set(scatter + chase);
        game.update(None);
        assert!(game.is_scatter());

        clock.set(2 * scatter + chase);
        game.update(None);
        assert!(!game.is_scatter());

        clock.set(2 * scatter + 2 * chase);
        game.update(None);
        assert!(game.is_scatter());
    }

    #[test]
    fn test_redraw_flag() {
        let (clock, mut game) = game_with(&MAZE);
        assert!(game.take_redraw());
        assert!(!game.take_redraw());

        game.update(Some(Direction::Right));
        clock.advance(game.settings.player_speed);
        game.update(None);
        assert!(game.needs_redraw());
    }

    #[test]
    fn test_snapshot_and_status() {
        let (_clock, mut game) = game_with(&["#####", "#P.G#", "#####"]);
        let snapshot = game.snapshot();
        assert_eq!(snapshot.width, 5);
        assert_eq!(snapshot.rows[1], "# . #");
        assert_eq!(snapshot.enemies.len(), ENEMY_COUNT);
        assert_eq!(snapshot.player.glyph, '>');
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"status\":\"Playing\""));

        game.lives = 0;
        assert_eq!(game.status(), GameStatus::Lost);
        game.lives = 1;
        game.board.interact(Position::new(2, 1));
        assert_eq!(game.status(), GameStatus::Won);
    }
}
