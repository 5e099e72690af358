//! Matrix token layer: drifting vocabulary glyphs fed by a token pool.

use glyphfall_config::MsRange;
use glyphfall_core::{PoolError, TokenPool};
use rand::Rng;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::{CyclingSource, put_str};
use crate::color::{TOKEN_GREEN, dim, glitch_color};

/// Sprite lifetime bounds in milliseconds; the respawn delay from the
/// configuration is added on top.
const LIFETIME_MS: (u64, u64) = (9_000, 15_000);

/// Glitch burst duration in milliseconds.
const GLITCH_MS: u64 = 80;

/// Chance per update tick that an idle sprite starts glitching.
const GLITCH_CHANCE: f64 = 0.003;

/// One on-screen token sprite.
#[derive(Debug, Clone)]
pub struct TokenSprite {
    /// Display text, drawn from the pool.
    pub text: String,
    /// Base position in cells.
    pub x: u16,
    pub y: u16,
    /// Phase offset for drift and brightness oscillation.
    pub phase: f32,
    /// When this sprite expires and takes the next pool token.
    pub respawn_at_ms: u64,
    /// Glitching while `elapsed < glitch_until_ms`.
    pub glitch_until_ms: u64,
    /// Seed for glitch coloring.
    pub seed: usize,
}

/// Matrix token layer state.
#[derive(Debug)]
pub struct TokenLayer {
    pub sprites: Vec<TokenSprite>,
    source: CyclingSource,
}

impl TokenLayer {
    /// Create the layer around a pool; sprites are populated on the first
    /// frame once the viewport size is known.
    pub fn new(pool: TokenPool) -> Self {
        Self {
            sprites: Vec::new(),
            source: CyclingSource::new(pool),
        }
    }

    /// Grow or shrink the sprite population to `count`.
    pub fn resize<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        area: Rect,
        elapsed_ms: u64,
        spawn_delay: MsRange,
        rng: &mut R,
    ) -> Result<(), PoolError> {
        self.sprites.truncate(count);
        while self.sprites.len() < count {
            let sprite = self.spawn(area, elapsed_ms, spawn_delay, rng)?;
            self.sprites.push(sprite);
        }
        Ok(())
    }

    /// Advance respawn and glitch state.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        elapsed_ms: u64,
        area: Rect,
        spawn_delay: MsRange,
        rng: &mut R,
    ) {
        if self.source.is_empty() {
            return;
        }
        for i in 0..self.sprites.len() {
            if elapsed_ms >= self.sprites[i].respawn_at_ms {
                if let Ok(sprite) = self.spawn(area, elapsed_ms, spawn_delay, rng) {
                    self.sprites[i] = sprite;
                }
            } else {
                let sprite = &mut self.sprites[i];
                let glitching = elapsed_ms < sprite.glitch_until_ms;
                if !glitching && rng.random_bool(GLITCH_CHANCE) {
                    sprite.glitch_until_ms = elapsed_ms + GLITCH_MS;
                }
            }
        }
    }

    /// Render the sprites with drift offsets and brightness oscillation.
    /// `dim_factor` below 1.0 pulls the whole layer back while a quote is
    /// active.
    pub fn render(&self, buf: &mut Buffer, area: Rect, elapsed_ms: u64, dim_factor: f32) {
        let t = elapsed_ms as f32;
        for sprite in &self.sprites {
            let tau = std::f32::consts::TAU;
            let dx = ((t / 9_000.0 + sprite.phase) * tau).sin() * 2.0;
            let dy = ((t / 12_000.0 + sprite.phase) * tau).cos() * 1.0;
            let x = (sprite.x as f32 + dx).rem_euclid(area.width.max(1) as f32) as u16;
            let y = (sprite.y as f32 + dy).rem_euclid(area.height.max(1) as f32) as u16;

            let glitching = elapsed_ms < sprite.glitch_until_ms;
            let color = if glitching {
                glitch_color(sprite.seed)
            } else {
                let level = 0.55 + ((t / 6_000.0 + sprite.phase) * tau).sin() * 0.35;
                dim(TOKEN_GREEN, level * dim_factor)
            };
            put_str(buf, area, x, y, &sprite.text, color);
        }
    }

    /// Reshuffle the pool immediately.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.source.reshuffle(rng);
    }

    fn spawn<R: Rng + ?Sized>(
        &mut self,
        area: Rect,
        elapsed_ms: u64,
        spawn_delay: MsRange,
        rng: &mut R,
    ) -> Result<TokenSprite, PoolError> {
        let text = self.source.next_text(rng)?;
        let lifetime = rng.random_range(LIFETIME_MS.0..=LIFETIME_MS.1);
        Ok(TokenSprite {
            text,
            x: rng.random_range(0..area.width.max(1)),
            y: rng.random_range(0..area.height.max(1)),
            phase: rng.random::<f32>(),
            respawn_at_ms: elapsed_ms + lifetime + spawn_delay.sample(rng),
            glitch_until_ms: 0,
            seed: rng.random_range(0..usize::MAX),
        })
    }
}
