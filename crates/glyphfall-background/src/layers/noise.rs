//! Noise overlay: deterministic sparse speckle, denser toward the edges.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::put_char;
use crate::color::NOISE_GRAY;

/// Speckle characters, dimmest first.
const NOISE_CHARS: &[char] = &['·', '░'];

/// Render the speckle. Uses position/time hashing only, so the pattern is a
/// pure function of `(x, y, elapsed_ms, init_seed)`.
pub fn render(buf: &mut Buffer, area: Rect, elapsed_ms: u64, init_seed: u64) {
    // Re-roll the pattern every 400ms.
    let frame = (elapsed_ms / 400) as usize;
    for y in 0..area.height {
        for x in 0..area.width {
            let seed = (x as usize)
                .wrapping_mul(31)
                .wrapping_add((y as usize).wrapping_mul(17))
                .wrapping_add(frame.wrapping_mul(41))
                .wrapping_add(init_seed as usize);

            // Speckle density climbs from ~0.5% at the center to ~3% at the
            // edges, standing in for the vignette of the full scene.
            let edge_x = x.min(area.width.saturating_sub(1 + x));
            let edge_y = y.min(area.height.saturating_sub(1 + y));
            let edge_dist = edge_x.min(edge_y * 2) as usize;
            let threshold = if edge_dist < 3 {
                30
            } else if edge_dist < 8 {
                12
            } else {
                5
            };

            if seed % 1000 < threshold {
                let ch = NOISE_CHARS[seed % NOISE_CHARS.len()];
                put_char(buf, area, x, y, ch, NOISE_GRAY);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speckle_is_deterministic() {
        let area = Rect::new(0, 0, 40, 12);
        let mut a = Buffer::empty(area);
        let mut b = Buffer::empty(area);
        render(&mut a, area, 1_234, 9);
        render(&mut b, area, 1_234, 9);
        assert_eq!(a, b);
    }

    #[test]
    fn test_speckle_is_sparse() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        render(&mut buf, area, 5_000, 3);
        let filled = (0..24)
            .flat_map(|y| (0..80).map(move |x| (x, y)))
            .filter(|&(x, y)| buf[(x, y)].symbol() != " ")
            .count();
        // Well under a tenth of the cells.
        assert!(filled < 80 * 24 / 10);
    }
}
