//! Grid line layer: slow positional drift with a luminosity pulse.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::put_char;
use crate::color::{GRID_GRAY, dim};

/// State for a single grid line.
#[derive(Debug, Clone)]
pub struct GridLine {
    /// Base position: row for horizontal lines, column for vertical ones.
    pub position: u16,
    /// Line orientation.
    pub horizontal: bool,
    /// Phase offset for drift and pulse.
    pub phase: f32,
    /// Base brightness in 0..1.
    pub base_level: f32,
}

/// Initialize grid lines for the given dimensions.
pub fn init_lines(width: u16, height: u16, count: usize, init_seed: u64) -> Vec<GridLine> {
    (0..count)
        .map(|i| {
            // Mix line index with the time-based seed so runs differ
            let mixed = i.wrapping_mul(31).wrapping_add(init_seed as usize);
            let horizontal = mixed % 2 == 0;
            let span = if horizontal { height } else { width };
            GridLine {
                position: ((mixed.wrapping_mul(13).wrapping_add(5)) % span.max(1) as usize) as u16,
                horizontal,
                phase: ((mixed.wrapping_mul(23)) % 100) as f32 / 100.0,
                base_level: 0.25 + ((mixed.wrapping_mul(17)) % 20) as f32 / 100.0,
            }
        })
        .collect()
}

/// Render the grid lines. Drift shifts each line by up to two cells on a
/// ~15s period; the luminosity pulse runs on a ~16s period.
pub fn render(lines: &[GridLine], buf: &mut Buffer, area: Rect, elapsed_ms: u64) {
    for line in lines {
        let t = elapsed_ms as f32;
        let drift = ((t / 15_000.0 + line.phase) * std::f32::consts::TAU).sin() * 2.0;
        let pulse = ((t / 16_000.0 + line.phase) * std::f32::consts::TAU).sin() * 0.5 + 0.5;
        let level = (line.base_level + pulse * 0.25).clamp(0.1, 0.6);
        let color = dim(GRID_GRAY, level);

        if line.horizontal {
            let y = shifted(line.position, drift, area.height);
            for x in 0..area.width {
                put_char(buf, area, x, y, '─', color);
            }
        } else {
            let x = shifted(line.position, drift, area.width);
            for y in 0..area.height {
                put_char(buf, area, x, y, '│', color);
            }
        }
    }
}

/// Apply a fractional drift to a base position, wrapping within the span.
fn shifted(base: u16, drift: f32, span: u16) -> u16 {
    if span == 0 {
        return 0;
    }
    (base as f32 + drift).rem_euclid(span as f32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_deterministic_for_seed() {
        let a = init_lines(80, 24, 10, 42);
        let b = init_lines(80, 24, 10, 42);
        assert_eq!(a.len(), 10);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.horizontal, y.horizontal);
        }
    }

    #[test]
    fn test_positions_stay_in_span() {
        for line in init_lines(80, 24, 32, 7) {
            let span = if line.horizontal { 24 } else { 80 };
            assert!(line.position < span);
        }
    }

    #[test]
    fn test_shifted_wraps() {
        assert!(shifted(0, -2.5, 24) < 24);
        assert!(shifted(23, 2.5, 24) < 24);
        assert_eq!(shifted(5, 0.0, 0), 0);
    }
}
