//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Grid, Matrix};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameState, Tile};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PLAY_BG: Rgb = Rgb::new(0, 0, 0);
const GRID_DOT: Rgb = Rgb::new(60, 60, 70);
const BORDER: Rgb = Rgb::new(200, 200, 200);
const TEXT: Rgb = Rgb::new(220, 220, 220);

/// Display color of a tile.
pub fn tile_color(tile: Tile) -> Rgb {
    match tile {
        Tile::Empty => PLAY_BG,
        Tile::LightBlue => Rgb::from_hex(0x00BCD4),
        Tile::DarkBlue => Rgb::from_hex(0x3F51B5),
        Tile::Orange => Rgb::from_hex(0xFF9800),
        Tile::Yellow => Rgb::from_hex(0xFFEB3B),
        Tile::Green => Rgb::from_hex(0x4CAF50),
        Tile::Red => Rgb::from_hex(0xD32F2F),
        Tile::Magenta => Rgb::from_hex(0xAD1457),
    }
}

/// Draws the playfield, a side panel and state overlays.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up a typical terminal glyph.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(CellStyle::default());

        let field = &snap.playfield;
        let frame_w = span(field.width(), self.cell_w);
        let frame_h = span(field.height(), self.cell_h);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        draw_border(fb, start_x, start_y, frame_w, frame_h);
        self.draw_grid(fb, field, start_x + 1, start_y + 1, true);
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, snap, panel_x, start_y);

        let overlay = match snap.state {
            GameState::Menu => Some("PRESS ENTER"),
            GameState::Paused => Some("PAUSED"),
            GameState::GameOver => Some("GAME OVER"),
            GameState::Running => None,
        };
        if let Some(text) = overlay {
            draw_centered(fb, start_x, start_y + frame_h / 3, frame_w, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_grid(&self, fb: &mut FrameBuffer, grid: &Grid, x0: u16, y0: u16, dots: bool) {
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let tile = grid.get(x, y);
                let (ch, style) = if tile.is_filled() {
                    ('█', CellStyle::new(tile_color(tile), PLAY_BG))
                } else if dots {
                    ('·', CellStyle::new(GRID_DOT, PLAY_BG))
                } else {
                    continue;
                };
                let px = x0.saturating_add((x as u16).saturating_mul(self.cell_w));
                let py = y0.saturating_add((y as u16).saturating_mul(self.cell_h));
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y0: u16) {
        if x >= fb.width() {
            return;
        }
        let label = CellStyle::new(TEXT, PLAY_BG).bold();
        let value = CellStyle::new(TEXT, PLAY_BG);

        let mut y = y0;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_str(x, y + 1, &n.to_string(), value);
            y += 3;
        }

        fb.put_str(x, y, "NEXT", label);
        if let Some(next) = &snap.next {
            self.draw_grid(fb, next, x, y + 1, false);
        }
    }
}

/// Terminal extent of `cells` board cells plus the two border columns.
fn span(cells: usize, cell_size: u16) -> u16 {
    u16::try_from(cells)
        .unwrap_or(u16::MAX)
        .saturating_mul(cell_size)
        .saturating_add(2)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::new(BORDER, PLAY_BG);
    let (right, bottom) = (x + w - 1, y + h - 1);
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in x + 1..right {
        fb.put_char(dx, y, '─', style);
        fb.put_char(dx, bottom, '─', style);
    }
    for dy in y + 1..bottom {
        fb.put_char(x, dy, '│', style);
        fb.put_char(right, dy, '│', style);
    }
}

fn draw_centered(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let tx = x + w.saturating_sub(text_w) / 2;
    fb.put_str(tx, y, text, CellStyle::new(Rgb::new(255, 255, 255), PLAY_BG).bold());
}
