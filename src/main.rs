//! Terminal falling-block game runner.
//!
//! Drives the core `Game` from a fixed-rate loop: crossterm events become
//! commands, the smoothed frame time becomes the tick length, and every frame
//! is rendered through the framebuffer renderer.

use std::env;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_blockfall::core::{Game, GameConfig, GameSnapshot};
use tui_blockfall::input::{should_quit, SoftDropLatch};
use tui_blockfall::term::{FrameBuffer, FrameTimes, GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::{LockEvent, BOARD_HEIGHT, BOARD_WIDTH, TICK_MS};

/// Settings read from the environment.
#[derive(Debug, Clone, Copy)]
struct RunConfig {
    width: usize,
    height: usize,
    seed: u32,
}

impl RunConfig {
    /// `BLOCKFALL_WIDTH`, `BLOCKFALL_HEIGHT`, `BLOCKFALL_SEED`; missing or
    /// unparsable values fall back to the defaults.
    fn from_env() -> Self {
        let width = env::var("BLOCKFALL_WIDTH")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(BOARD_WIDTH);
        let height = env::var("BLOCKFALL_HEIGHT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(BOARD_HEIGHT);
        let seed = env::var("BLOCKFALL_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        Self {
            width,
            height,
            seed,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Totals reported after the terminal is restored.
#[derive(Debug, Default)]
struct SessionStats {
    pieces_locked: u32,
    games_over: u32,
    best_score: u32,
}

impl SessionStats {
    fn record(&mut self, event: LockEvent, score: u32) {
        if event.top_out {
            self.games_over += 1;
        } else {
            self.pieces_locked += 1;
        }
        self.best_score = self.best_score.max(score);
    }
}

fn main() -> Result<()> {
    let run_cfg = RunConfig::from_env();
    let config = GameConfig::default().with_board(run_cfg.width, run_cfg.height);
    config
        .validate()
        .with_context(|| format!("BLOCKFALL_WIDTH/BLOCKFALL_HEIGHT give {}x{}", run_cfg.width, run_cfg.height))?;

    let mut game = Game::new(config, run_cfg.seed);
    let mut stats = SessionStats::default();

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut game, &mut stats);
    // Always try to restore terminal state.
    let _ = term.exit();

    eprintln!(
        "[blockfall] seed {} board {}x{}",
        run_cfg.seed, run_cfg.width, run_cfg.height
    );
    eprintln!(
        "[blockfall] final state {} score {} level {} lines {}",
        game.state().as_str(),
        game.score(),
        game.level(),
        game.lines()
    );
    eprintln!(
        "[blockfall] {} pieces locked, {} games over, best score {}",
        stats.pieces_locked,
        stats.games_over,
        stats.best_score.max(game.score())
    );
    eprintln!("[blockfall] bag rng state {}", game.bag().seed());
    if let Err(e) = &result {
        eprintln!("[blockfall] stopped on error: {:#}", e);
    }
    result
}

fn run(term: &mut TerminalRenderer, game: &mut Game, stats: &mut SessionStats) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut latch = SoftDropLatch::new();
    let mut frame_times = FrameTimes::primed(TICK_MS);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout).context("poll terminal events")? {
            match event::read().context("read terminal event")? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        return Ok(());
                    }
                    for command in latch.handle_key(key) {
                        game.apply(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
            frame_times.push(elapsed_ms);

            if let Some(command) = latch.update(elapsed_ms) {
                game.apply(command);
            }
            game.tick(frame_times.mean());
        }

        if let Some(event) = game.take_last_event() {
            stats.record(event, game.score());
        }
    }
}
