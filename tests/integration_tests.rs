//! Integration tests for the game loop as the binary drives it

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tui_blockfall::core::{Game, GameConfig, PieceBag};
use tui_blockfall::input::SoftDropLatch;
use tui_blockfall::term::{FrameTimes, GameView, Viewport};
use tui_blockfall::types::{Command, GameState, TICK_MS};

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_game_lifecycle() {
    let mut game = Game::new(GameConfig::default(), 12345);
    assert_eq!(game.state(), GameState::Menu);

    assert!(game.apply(Command::Start));
    assert_eq!(game.state(), GameState::Running);
    game.tick(TICK_MS);
    assert!(game.current().unwrap().is_spawned());

    assert!(game.apply(Command::PauseToggle));
    assert_eq!(game.state(), GameState::Paused);
    assert!(game.apply(Command::PauseToggle));
    assert_eq!(game.state(), GameState::Running);
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        Command::MoveLeft,
        Command::RotateCw,
        Command::HardDrop,
        Command::MoveRight,
        Command::MoveRight,
        Command::HardDrop,
        Command::RotateCcw,
        Command::HardDrop,
    ];
    let play = |seed: u32| {
        let mut game = Game::new(GameConfig::default(), seed);
        game.apply(Command::Start);
        for command in script {
            game.tick(TICK_MS);
            game.apply(command);
        }
        game.snapshot()
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn test_injected_bag_is_independent() {
    let bag = PieceBag::new(5);
    let expected = bag.peek();
    let mut a = Game::with_bag(GameConfig::default(), bag.clone());
    let b = Game::with_bag(GameConfig::default(), bag);

    a.apply(Command::Start);
    a.tick(TICK_MS);
    a.apply(Command::HardDrop);
    assert_eq!(b.bag().remaining().len(), 7);
    assert_eq!(b.bag().peek(), expected);
}

#[test]
fn test_hard_drops_until_game_over() {
    let mut game = Game::new(GameConfig::default(), 7);
    game.apply(Command::Start);

    let mut locks = 0;
    for _ in 0..500 {
        if game.state() == GameState::GameOver {
            break;
        }
        game.tick(TICK_MS);
        if game.apply(Command::HardDrop) {
            locks += 1;
        }
    }
    assert_eq!(game.state(), GameState::GameOver);
    assert!(locks > 0);
    assert!(!game.apply(Command::MoveLeft));

    // Restart gives a clean board.
    assert!(game.apply(Command::Start));
    assert!(game.board().tiles().iter().all(|t| t.is_empty()));
    assert_eq!(game.score(), 0);
}

#[test]
fn test_soft_drop_through_latch() {
    let cfg = GameConfig::default()
        .with_starting_gravity(1.0)
        .with_soft_drop_gravity(10.0);
    let mut game = Game::new(cfg, 3);
    let mut latch = SoftDropLatch::new().with_release_timeout_ms(50);
    game.apply(Command::Start);
    game.tick(0);

    for command in latch.handle_key(press(KeyCode::Down)) {
        game.apply(command);
    }
    assert!(game.soft_drop());
    // The press also stepped the piece one row.
    assert_eq!(game.current().unwrap().position().unwrap().y, 1.0);

    game.tick(100);
    assert_eq!(game.current().unwrap().position().unwrap().y, 2.0);

    let release = KeyEvent::new_with_kind(KeyCode::Down, KeyModifiers::NONE, KeyEventKind::Release);
    for command in latch.handle_key(release) {
        game.apply(command);
    }
    assert!(!game.soft_drop());

    for command in latch.handle_key(press(KeyCode::Down)) {
        game.apply(command);
    }
    assert!(game.soft_drop());
    if let Some(command) = latch.update(60) {
        game.apply(command);
    }
    assert!(!game.soft_drop());
}

#[test]
fn test_frame_times_drive_ticks() {
    let mut game = Game::new(GameConfig::default().with_starting_gravity(1.0), 11);
    game.apply(Command::Start);
    game.tick(0);

    let mut frames = FrameTimes::primed(TICK_MS);
    for ms in [10, 22, 16, 16, 18, 14, 16, 16] {
        frames.push(ms);
    }
    assert_eq!(frames.mean(), 16);

    for _ in 0..130 {
        game.tick(frames.mean());
    }
    // 130 ticks of 16ms at one row per second: 2.08 rows.
    assert_eq!(game.current().unwrap().position().unwrap().row(), 2);
}

#[test]
fn test_render_running_game() {
    let mut game = Game::new(GameConfig::default(), 21);
    game.apply(Command::Start);
    game.tick(TICK_MS);
    game.apply(Command::HardDrop);

    let fb = GameView::default().render(&game.snapshot(), Viewport::new(80, 30));
    let blocks = fb.cells().iter().filter(|c| c.ch == '█').count();
    // Four locked cells two columns wide, plus the next-piece preview.
    assert_eq!(blocks, 4 * 2 + 4 * 2);
}
