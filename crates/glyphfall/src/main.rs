use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use color_eyre::eyre::ensure;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glyphfall_background::{
    BackgroundState, RenderContext, builtin_quotes, builtin_tokens, put_str,
};
use glyphfall_config::BackgroundConfig;
use glyphfall_core::{
    LAYER_ORDER, Layer, MotionLevel, ResolvedMotion, TokenPool, resolve,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
};

mod perf;

use perf::{CpuSampler, FrameClock};

/// Accent color for key hints.
const ACCENT: Color = Color::Rgb(0x4a, 0xde, 0x80);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = BackgroundConfig::load()?;
    config.validate()?;
    let app = App::new(config)?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Validated animation configuration.
    config: BackgroundConfig,
    /// Current motion level (starts from the config, cycled with `m`).
    motion_level: MotionLevel,
    /// Reduced-motion request (env var at startup, toggled with `d`).
    reduced_requested: bool,
    /// Layered background state.
    background: BackgroundState,
    /// Frame-rate tier measurement.
    frame_clock: FrameClock,
    /// Background CPU sampler.
    cpu: CpuSampler,
    /// Wall time the renderer started.
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`] from a validated configuration.
    pub fn new(config: BackgroundConfig) -> color_eyre::Result<Self> {
        // Capture system time as seed for randomness
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let mut rng = StdRng::seed_from_u64(seed);

        let token_pool =
            TokenPool::shuffled(&builtin_tokens(), config.max_tokens as usize, &mut rng);
        ensure!(
            !token_pool.is_empty(),
            "token pool is empty; raise max_tokens in the config"
        );
        let quotes = builtin_quotes();
        let quote_pool = TokenPool::shuffled(&quotes, quotes.len(), &mut rng);

        let cpu = CpuSampler::new();
        cpu.start();

        Ok(Self {
            running: false,
            motion_level: config.motion_level,
            reduced_requested: std::env::var_os("GLYPHFALL_REDUCED_MOTION").is_some(),
            config,
            background: BackgroundState::new(token_pool, quote_pool, seed),
            frame_clock: FrameClock::new(),
            cpu,
            started: Instant::now(),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let mut frame_result = Ok(());
            terminal.draw(|frame| frame_result = self.render(frame))?;
            frame_result?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Renders one frame: the background layers first, then the layers this
    /// application owns, in stacking order.
    fn render(&mut self, frame: &mut Frame) -> Result<(), glyphfall_core::PoolError> {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        let tier = self.frame_clock.note_frame();
        let motion = resolve(
            self.motion_level,
            tier,
            self.cpu.load(),
            self.reduced_requested,
            self.config.reduced_motion_fallback,
        );

        let ctx = RenderContext {
            elapsed_ms,
            motion,
            tier,
        };
        self.background.render(frame, &self.config, ctx)?;

        for layer in LAYER_ORDER {
            match layer {
                Layer::HeroContent => self.render_hero(frame),
                Layer::MicroUi => self.render_micro_ui(frame, motion),
                _ => {}
            }
        }
        Ok(())
    }

    /// Render the wordmark above the background layers.
    fn render_hero(&self, frame: &mut Frame) {
        let area = frame.area();
        let buf = frame.buffer_mut();

        let title = "g l y p h f a l l";
        let title_w = title.chars().count() as u16;
        let y = area.height / 3;
        put_str(
            buf,
            area,
            area.width.saturating_sub(title_w) / 2,
            y,
            title,
            Color::Rgb(230, 230, 235),
        );

        let subtitle = "an ambient cyber-poetic background";
        let subtitle_w = subtitle.chars().count() as u16;
        put_str(
            buf,
            area,
            area.width.saturating_sub(subtitle_w) / 2,
            y + 2,
            subtitle,
            Color::Rgb(120, 120, 132),
        );
    }

    /// Render the help line at the bottom, above everything else.
    fn render_micro_ui(&self, frame: &mut Frame, motion: ResolvedMotion) {
        let chunks =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());

        let resolved = match motion {
            ResolvedMotion::Full => "full",
            ResolvedMotion::Soft => "soft",
            ResolvedMotion::Static => "static",
        };
        let help = Line::from(vec![
            "q".bold().fg(ACCENT),
            " quit  ".dark_gray(),
            "m".bold().fg(ACCENT),
            format!(" motion {}→{resolved}  ", self.motion_level.name()).dark_gray(),
            "r".bold().fg(ACCENT),
            " reshuffle  ".dark_gray(),
            "d".bold().fg(ACCENT),
            " reduced motion".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with timeout so the animation keeps ticking.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        // ~30fps tick
        if event::poll(Duration::from_millis(33))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('m')) => self.cycle_motion_level(),
            (_, KeyCode::Char('r')) => self.background.reshuffle(),
            (_, KeyCode::Char('d')) => self.toggle_reduced_motion(),
            _ => {}
        }
    }

    /// Cycle through the motion levels.
    fn cycle_motion_level(&mut self) {
        self.motion_level = self.motion_level.cycled();
    }

    /// Toggle the reduced-motion request.
    fn toggle_reduced_motion(&mut self) {
        self.reduced_requested = !self.reduced_requested;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
