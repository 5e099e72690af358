//! Geometric figure layer: sparse glyphs with slow drift and shape cycling.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::put_char;
use crate::color::{FIGURE_GOLD, dim};
use crate::words::FIGURE_GLYPHS;

/// State for a single figure.
#[derive(Debug, Clone)]
pub struct Figure {
    /// Base position in cells.
    pub x: u16,
    pub y: u16,
    /// Phase offset for drift and brightness.
    pub phase: f32,
    /// Seed for glyph selection.
    pub glyph_seed: usize,
}

/// Initialize figures for the given dimensions.
pub fn init_figures(width: u16, height: u16, count: usize, init_seed: u64) -> Vec<Figure> {
    (0..count)
        .map(|i| {
            let mixed = i.wrapping_mul(37).wrapping_add(init_seed as usize);
            Figure {
                x: ((mixed.wrapping_mul(11).wrapping_add(3)) % width.max(1) as usize) as u16,
                y: ((mixed.wrapping_mul(19).wrapping_add(7)) % height.max(1) as usize) as u16,
                phase: ((mixed.wrapping_mul(29)) % 100) as f32 / 100.0,
                glyph_seed: mixed.wrapping_mul(13),
            }
        })
        .collect()
}

/// Render the figures. Each cycles through the glyph set on a ~4s step and
/// drifts on ~15-18s periods, matching the slowest layer of the scene.
pub fn render(figures: &[Figure], buf: &mut Buffer, area: Rect, elapsed_ms: u64) {
    let tau = std::f32::consts::TAU;
    let t = elapsed_ms as f32;
    for figure in figures {
        let dx = ((t / 15_000.0 + figure.phase) * tau).sin() * 1.5;
        let dy = ((t / 18_000.0 + figure.phase) * tau).cos() * 1.0;
        let x = (figure.x as f32 + dx).rem_euclid(area.width.max(1) as f32) as u16;
        let y = (figure.y as f32 + dy).rem_euclid(area.height.max(1) as f32) as u16;

        let step = (elapsed_ms / 4_000) as usize;
        let glyph = FIGURE_GLYPHS[figure.glyph_seed.wrapping_add(step) % FIGURE_GLYPHS.len()];

        let level = 0.35 + ((t / 8_000.0 + figure.phase) * tau).sin() * 0.2;
        put_char(buf, area, x, y, glyph, dim(FIGURE_GOLD, level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_positions_inside_dimensions() {
        for figure in init_figures(60, 20, 24, 99) {
            assert!(figure.x < 60);
            assert!(figure.y < 20);
        }
    }

    #[test]
    fn test_init_is_deterministic_for_seed() {
        let a = init_figures(60, 20, 8, 5);
        let b = init_figures(60, 20, 8, 5);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!((x.x, x.y, x.glyph_seed), (y.x, y.y, y.glyph_seed));
        }
    }
}
