//! Palette and color helpers for the background layers.

use ratatui::style::Color;

/// Matrix token green.
pub const TOKEN_GREEN: Color = Color::Rgb(0x4a, 0xde, 0x80);

/// Narrative quote orange.
pub const QUOTE_ORANGE: Color = Color::Rgb(0xff, 0x5a, 0x24);

/// Grid line gray.
pub const GRID_GRAY: Color = Color::Rgb(120, 120, 132);

/// Figure gold.
pub const FIGURE_GOLD: Color = Color::Rgb(0xff, 0xd7, 0x00);

/// Noise speckle gray.
pub const NOISE_GRAY: Color = Color::Rgb(58, 58, 66);

/// Scale an RGB color toward black by `factor` in 0..1. Non-RGB colors pass
/// through unchanged.
pub fn dim(color: Color, factor: f32) -> Color {
    let factor = factor.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * factor) as u8,
            (g as f32 * factor) as u8,
            (b as f32 * factor) as u8,
        ),
        other => other,
    }
}

/// Hue-rotated color for glitch frames, varied by seed.
pub fn glitch_color(seed: usize) -> Color {
    let hue = ((seed.wrapping_mul(53)) % 360) as f32;
    hsl_to_rgb(hue, 0.7, 0.6)
}

/// Convert HSL to RGB color.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return Color::Rgb(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dim_scales_toward_black() {
        assert_eq!(dim(Color::Rgb(200, 100, 50), 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(dim(Color::Rgb(200, 100, 50), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(dim(Color::Rgb(200, 100, 50), 1.0), Color::Rgb(200, 100, 50));
    }

    #[test]
    fn test_hsl_gray_when_unsaturated() {
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.5), Color::Rgb(127, 127, 127));
    }

    #[test]
    fn test_glitch_color_is_deterministic() {
        assert_eq!(glitch_color(7), glitch_color(7));
    }
}
