//! End-to-end rule scenarios driven through the public game API on a
//! manual clock.

use chaser::config::{BONUS_SCORE, COIN_SCORE, KILL_BASE_SCORE};
use chaser::{
    Board, ChaseResult, Direction, EnemyId, Entity, Game, GameSettings, GameStatus, ManualClock,
    Position, Tile,
};
use std::rc::Rc;

fn start(board: Board, settings: GameSettings) -> ChaseResult<(ManualClock, Game)> {
    let clock = ManualClock::new(0);
    let game = Game::new(board, settings, Rc::new(clock.clone()), 2024)?;
    Ok((clock, game))
}

/// Walled 5x5 board with coins everywhere inside, the player spawning on
/// one of them.
fn coin_box() -> ChaseResult<Board> {
    let mut tiles = vec![vec![Tile::Wall; 5]; 5];
    for row in tiles.iter_mut().take(4).skip(1) {
        for tile in row.iter_mut().take(4).skip(1) {
            *tile = Tile::Coin;
        }
    }
    tiles[3][3] = Tile::Space;
    Board::new(tiles, Position::new(1, 1), Position::new(3, 3))
}

#[test]
fn test_coin_under_spawn_is_collected_on_first_update() -> ChaseResult<()> {
    let mut settings = GameSettings::new();
    settings.player_speed = 200;
    settings.enemy_speed = 300;
    let (_clock, mut game) = start(coin_box()?, settings)?;
    let coins = game.coins_remaining();

    game.update(None);

    assert_eq!(game.score(), COIN_SCORE);
    assert_eq!(game.coins_remaining(), coins - 1);
    assert_eq!(game.board().tile_at(Position::new(1, 1))?, Tile::Space);
    Ok(())
}

#[test]
fn test_caught_player_loses_life_and_board_resets() -> ChaseResult<()> {
    let board = Board::parse("#######\n#PG...#\n#######")?;
    let (clock, mut game) = start(board, GameSettings::for_testing())?;
    let coins = game.coins_remaining();

    game.update(Some(Direction::Right));
    assert!(game.enemy(EnemyId(0)).map_or(false, |enemy| enemy.is_alive()));

    // the player walks into the pursuer before it gets to move
    clock.advance(100);
    game.update(None);

    assert_eq!(game.lives(), 2);
    assert_eq!(game.score(), 0);
    assert_eq!(game.coins_remaining(), coins);
    assert!(game.is_paused());
    assert_eq!(game.player().position(), Position::new(1, 1));
    assert!(game.enemies().iter().all(|enemy| !enemy.is_alive()));
    assert!(game
        .enemies()
        .iter()
        .all(|enemy| enemy.position() == Position::new(2, 1)));

    // nothing happens until a turn is requested
    clock.advance(5_000);
    game.update(None);
    assert!(game.is_paused());
    assert!(game.enemies().iter().all(|enemy| !enemy.is_alive()));

    game.update(Some(Direction::Right));
    assert!(!game.is_paused());
    assert!(game.enemy(EnemyId(0)).map_or(false, |enemy| enemy.is_alive()));
    Ok(())
}

#[test]
fn test_last_life_lost_ends_session() -> ChaseResult<()> {
    let board = Board::parse("#######\n#PG...#\n#######")?;
    let mut settings = GameSettings::for_testing();
    settings.lives = 1;
    let (clock, mut game) = start(board, settings)?;

    game.update(Some(Direction::Right));
    clock.advance(100);
    game.update(None);

    assert_eq!(game.lives(), 0);
    assert_eq!(game.status(), GameStatus::Lost);
    Ok(())
}

#[test]
fn test_eating_last_coin_wins() -> ChaseResult<()> {
    let board = Board::parse("#####\n#P.G#\n#####")?;
    let (clock, mut game) = start(board, GameSettings::for_testing())?;

    game.update(Some(Direction::Right));
    assert_eq!(game.status(), GameStatus::Playing);

    clock.advance(100);
    game.update(None);
    assert_eq!(game.score(), COIN_SCORE);
    assert_eq!(game.status(), GameStatus::Won);
    Ok(())
}

#[test]
fn test_pellet_lets_player_eat_pursuers_with_growing_reward() -> ChaseResult<()> {
    let board = Board::parse("#########\n#Po G...#\n#########")?;
    let mut settings = GameSettings::for_testing();
    settings.come_out_period = 10;
    let (clock, mut game) = start(board, settings)?;

    game.update(Some(Direction::Right));
    clock.set(40);
    game.update(None);
    assert!(game.enemies().iter().all(|enemy| enemy.is_alive()));

    // pellet
    clock.set(100);
    game.update(None);
    assert!(game.is_frightened());
    assert!(game.enemies().iter().all(|enemy| enemy.frightened));

    // the pursuers are still waiting at the spawn when the player gets there
    clock.set(200);
    game.update(None);
    clock.set(300);
    game.update(None);

    let expected = KILL_BASE_SCORE * (1 + 2 + 3 + 4);
    assert_eq!(game.score(), expected);
    assert_eq!(game.kill_streak(), 4);
    assert_eq!(game.lives(), 3);
    assert!(game
        .enemies()
        .iter()
        .all(|enemy| !enemy.is_alive() && !enemy.frightened));

    // revived after the kill duration
    clock.set(800);
    game.update(None);
    assert!(game.enemies().iter().all(|enemy| enemy.is_alive()));

    // the streak lasts until the frighten window closes
    assert_eq!(game.kill_streak(), 4);
    clock.set(900);
    game.update(None);
    assert!(!game.is_frightened());
    assert_eq!(game.kill_streak(), 0);
    Ok(())
}

#[test]
fn test_frighten_windows_overlap() -> ChaseResult<()> {
    let board = Board::parse("#######\n#P..G.#\n#.....#\n#######")?;
    let (_clock, mut game) = start(board, GameSettings::for_testing())?;
    game.update(None);

    game.toggle_frighten(true);
    game.toggle_frighten(true);
    game.toggle_frighten(false);
    assert!(game.is_frightened());
    assert!(game.enemy(EnemyId(0)).map_or(false, |enemy| enemy.frightened));

    game.toggle_frighten(false);
    assert!(!game.is_frightened());
    assert!(game.enemy(EnemyId(0)).map_or(false, |enemy| !enemy.frightened));
    Ok(())
}

#[test]
fn test_bonus_appears_on_its_period() -> ChaseResult<()> {
    let board = Board::from_chars(&["P    ", "     ", "  G  ", "     ", "     "])?;
    let mut settings = GameSettings::for_testing();
    settings.bonus_period = 50;
    let (clock, mut game) = start(board, settings)?;

    game.update(None);
    clock.set(50);
    game.update(None);

    let bonuses = game
        .board()
        .tiles()
        .iter()
        .flatten()
        .filter(|&&tile| tile == Tile::Bonus)
        .count();
    // a bonus dropped right under the player is eaten straight away
    assert!(bonuses == 1 || game.score() == BONUS_SCORE);
    Ok(())
}

#[test]
fn test_snapshot_reflects_session() -> ChaseResult<()> {
    let board = Board::parse("#######\n#P....#\n#.##G.#\n#######")?;
    let (clock, mut game) = start(board, GameSettings::for_testing())?;
    game.update(Some(Direction::Right));
    clock.advance(100);
    game.update(None);

    let snapshot = game.snapshot();
    assert_eq!(snapshot.score, game.score());
    assert_eq!(snapshot.player.position, Position::new(2, 1));
    assert_eq!(snapshot.player.glyph, '<');
    assert_eq!(snapshot.rows[1], "#  ...#");
    assert_eq!(snapshot.enemies[0].glyph, 'B');
    assert_eq!(snapshot.status, GameStatus::Playing);

    let json = serde_json::to_string(&snapshot)?;
    let parsed: chaser::GameSnapshot = serde_json::from_str(&json)?;
    assert_eq!(parsed, snapshot);
    Ok(())
}
