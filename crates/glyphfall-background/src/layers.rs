//! Per-layer animation states for the background compositor.

pub mod figures;
pub mod grid;
pub mod noise;
pub mod quotes;
pub mod tokens;

use glyphfall_core::{PoolError, TokenPool};
use rand::Rng;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

/// Write one glyph into the frame buffer, clipped to `area`. Blank cells are
/// never written, so lower layers stay visible through them.
pub fn put_char(buf: &mut Buffer, area: Rect, x: u16, y: u16, ch: char, color: Color) {
    if ch == ' ' || x >= area.width || y >= area.height {
        return;
    }
    if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
        cell.set_char(ch);
        cell.set_fg(color);
    }
}

/// Write a string horizontally starting at `(x, y)`, clipped to `area`.
pub fn put_str(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str, color: Color) {
    for (i, ch) in text.chars().enumerate() {
        let cx = x as u32 + i as u32;
        if cx >= area.width as u32 {
            break;
        }
        put_char(buf, area, cx as u16, y, ch, color);
    }
}

/// Pool wrapper that reshuffles after each full consumption cycle, so every
/// token appears once per cycle in a fresh order.
#[derive(Debug)]
pub(crate) struct CyclingSource {
    pool: TokenPool,
    consumed: usize,
}

impl CyclingSource {
    pub(crate) fn new(pool: TokenPool) -> Self {
        Self { pool, consumed: 0 }
    }

    /// Take the next token text, reshuffling at cycle boundaries.
    pub(crate) fn next_text<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String, PoolError> {
        if self.consumed >= self.pool.len() && self.pool.len() > 1 {
            self.pool.shuffle(rng);
            self.consumed = 0;
        }
        let text = self.pool.next()?.text.clone();
        self.consumed += 1;
        Ok(text)
    }

    /// Reshuffle immediately, restarting the cycle count.
    pub(crate) fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pool.shuffle(rng);
        self.consumed = 0;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}
