//! Background composition state: per-layer populations rendered back to
//! front in the fixed stacking order.

use glyphfall_config::BackgroundConfig;
use glyphfall_core::{
    Densities, FrameTier, LAYER_ORDER, Layer, NARROW_VIEWPORT_COLS, PoolError, ResolvedMotion,
    TokenPool,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::color::{GRID_GRAY, QUOTE_ORANGE, dim};
use crate::layers::{figures, grid, noise, put_char, put_str, quotes, tokens};
use crate::words::STATIC_QUOTE;

/// Column spacing of the static presentation's grid.
const STATIC_GRID_STEP: u16 = 12;

/// Everything the compositor needs to know about one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    /// Milliseconds since the renderer started.
    pub elapsed_ms: u64,
    /// Motion resolved for this frame.
    pub motion: ResolvedMotion,
    /// Measured performance tier.
    pub tier: FrameTier,
}

/// Layered background state.
///
/// Owned by exactly one renderer; all methods are synchronous and meant to be
/// called from a single animation tick loop.
#[derive(Debug)]
pub struct BackgroundState {
    token_layer: tokens::TokenLayer,
    quote_layer: quotes::QuoteLayer,
    grid_lines: Vec<grid::GridLine>,
    figures: Vec<figures::Figure>,
    /// Last known viewport width.
    last_width: u16,
    /// Last known viewport height.
    last_height: u16,
    /// Seed captured at initialization for the deterministic layers.
    init_seed: u64,
    rng: StdRng,
}

impl BackgroundState {
    /// Create background state around the token and quote pools.
    pub fn new(token_pool: TokenPool, quote_pool: TokenPool, seed: u64) -> Self {
        Self {
            token_layer: tokens::TokenLayer::new(token_pool),
            quote_layer: quotes::QuoteLayer::new(quote_pool),
            grid_lines: Vec::new(),
            figures: Vec::new(),
            last_width: 0,
            last_height: 0,
            init_seed: seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Advance animation state and render into the frame, back to front.
    ///
    /// Fails only when a populated layer is asked to draw from an empty pool.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        config: &BackgroundConfig,
        ctx: RenderContext,
    ) -> Result<(), PoolError> {
        let area = frame.area();
        if ctx.motion == ResolvedMotion::Static {
            render_static(frame.buffer_mut(), area);
            return Ok(());
        }

        let narrow = area.width < NARROW_VIEWPORT_COLS;
        let densities = Densities::for_motion(ctx.motion, ctx.tier, narrow);

        let dimensions_changed = area.width != self.last_width || area.height != self.last_height;
        if dimensions_changed {
            self.token_layer.sprites.clear();
            self.last_width = area.width;
            self.last_height = area.height;
        }
        if dimensions_changed || self.grid_lines.len() != densities.grid_lines {
            self.grid_lines =
                grid::init_lines(area.width, area.height, densities.grid_lines, self.init_seed);
        }
        if dimensions_changed || self.figures.len() != densities.figures {
            self.figures =
                figures::init_figures(area.width, area.height, densities.figures, self.init_seed);
        }

        self.token_layer.resize(
            densities.tokens,
            area,
            ctx.elapsed_ms,
            config.token_spawn_delay_ms,
            &mut self.rng,
        )?;
        self.token_layer.update(
            ctx.elapsed_ms,
            area,
            config.token_spawn_delay_ms,
            &mut self.rng,
        );
        self.quote_layer.update(
            ctx.elapsed_ms,
            area,
            densities.quotes.min(config.max_quotes as usize),
            config.quote_delay_ms,
            config.typing_speed_ms(area.width),
            &mut self.rng,
        );

        // Active quotes pull the token layer back by 30%.
        let token_dim = if self.quote_layer.has_active() { 0.7 } else { 1.0 };

        let buf = frame.buffer_mut();
        for layer in LAYER_ORDER {
            match layer {
                // The terminal itself is the canvas.
                Layer::BaseCanvas => {}
                Layer::GridLines => grid::render(&self.grid_lines, buf, area, ctx.elapsed_ms),
                Layer::MatrixTokens => {
                    self.token_layer.render(buf, area, ctx.elapsed_ms, token_dim)
                }
                Layer::BackgroundFigures => {
                    figures::render(&self.figures, buf, area, ctx.elapsed_ms)
                }
                Layer::MatrixQuotes => self.quote_layer.render(buf, area, ctx.elapsed_ms),
                Layer::NoiseOverlay => noise::render(buf, area, ctx.elapsed_ms, self.init_seed),
                // Drawn by the application, above the background.
                Layer::HeroContent | Layer::MicroUi => {}
            }
        }
        Ok(())
    }

    /// Reshuffle both pools immediately.
    pub fn reshuffle(&mut self) {
        self.token_layer.reshuffle(&mut self.rng);
        self.quote_layer.reshuffle(&mut self.rng);
    }
}

/// Degraded presentation for reduced motion: a dim column grid and one fixed
/// quote, nothing animated.
fn render_static(buf: &mut Buffer, area: Rect) {
    let color = dim(GRID_GRAY, 0.25);
    let mut x = STATIC_GRID_STEP;
    while x < area.width {
        for y in 0..area.height {
            put_char(buf, area, x, y, '│', color);
        }
        x += STATIC_GRID_STEP;
    }
    put_str(buf, area, 4, 2, STATIC_QUOTE, dim(QUOTE_ORANGE, 0.7));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::{builtin_quotes, builtin_tokens};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn full_state() -> BackgroundState {
        let mut rng = StdRng::seed_from_u64(4);
        let tokens = builtin_tokens();
        let quotes = builtin_quotes();
        BackgroundState::new(
            TokenPool::shuffled(&tokens, 48, &mut rng),
            TokenPool::shuffled(&quotes, quotes.len(), &mut rng),
            4,
        )
    }

    #[test]
    fn test_full_motion_paints_cells() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut state = full_state();
        let config = BackgroundConfig::default();
        let ctx = RenderContext {
            elapsed_ms: 8_000,
            motion: ResolvedMotion::Full,
            tier: FrameTier::Hi,
        };

        let mut result = Ok(());
        terminal
            .draw(|frame| result = state.render(frame, &config, ctx))
            .unwrap();
        result.unwrap();

        let buffer = terminal.backend().buffer();
        let filled = buffer.content.iter().filter(|c| c.symbol() != " ").count();
        assert!(filled > 0);
    }

    #[test]
    fn test_static_motion_shows_fixed_quote() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut state = full_state();
        let config = BackgroundConfig::default();
        let ctx = RenderContext {
            elapsed_ms: 1_000,
            motion: ResolvedMotion::Static,
            tier: FrameTier::Low,
        };

        let mut result = Ok(());
        terminal
            .draw(|frame| result = state.render(frame, &config, ctx))
            .unwrap();
        result.unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..120).map(|x| buffer[(x, 2)].symbol()).collect();
        assert!(row.contains("The prompt"));
    }

    #[test]
    fn test_empty_token_pool_surfaces_error() {
        let mut rng = StdRng::seed_from_u64(8);
        let quotes = builtin_quotes();
        let mut state = BackgroundState::new(
            TokenPool::new(&[]),
            TokenPool::shuffled(&quotes, quotes.len(), &mut rng),
            8,
        );
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let config = BackgroundConfig::default();
        let ctx = RenderContext {
            elapsed_ms: 0,
            motion: ResolvedMotion::Full,
            tier: FrameTier::Hi,
        };

        let mut result = Ok(());
        terminal
            .draw(|frame| result = state.render(frame, &config, ctx))
            .unwrap();
        assert_eq!(result, Err(PoolError::Empty));
    }

    #[test]
    fn test_resize_repopulates_layers() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut state = full_state();
        let config = BackgroundConfig::default();
        let ctx = RenderContext {
            elapsed_ms: 100,
            motion: ResolvedMotion::Full,
            tier: FrameTier::Hi,
        };
        let mut result = Ok(());
        terminal
            .draw(|frame| result = state.render(frame, &config, ctx))
            .unwrap();
        result.unwrap();

        // Narrower viewport: densities drop on the next frame.
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let ctx = RenderContext {
            elapsed_ms: 200,
            motion: ResolvedMotion::Full,
            tier: FrameTier::Hi,
        };
        let mut result = Ok(());
        terminal
            .draw(|frame| result = state.render(frame, &config, ctx))
            .unwrap();
        result.unwrap();
        assert_eq!(state.token_layer.sprites.len(), 60);
    }
}
