//! Narrative quote layer: typed quotes with pre-delay, hold and fade phases.

use glyphfall_config::MsRange;
use glyphfall_core::TokenPool;
use rand::Rng;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::{CyclingSource, put_char, put_str};
use crate::color::{QUOTE_ORANGE, dim};

/// Delay before typing starts once a quote is scheduled.
const PRE_DELAY_MS: u64 = 400;

/// Hold at full visibility after typing completes.
const HOLD_MS: u64 = 6_000;

/// Fade-out duration.
const FADE_MS: u64 = 2_000;

/// Delay before the very first quote of a session.
const FIRST_SPAWN_MS: u64 = 3_000;

/// Wrap width for quote text.
const WRAP_COLS: usize = 36;

/// Distance from the viewport edges for corner placement.
const MARGIN: u16 = 4;

/// Lifecycle phase of an active quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotePhase {
    Pre,
    Typing,
    Hold,
    FadeOut,
}

/// An on-screen quote.
#[derive(Debug, Clone)]
pub struct ActiveQuote {
    /// Word-wrapped text.
    pub lines: Vec<String>,
    /// Total characters across all lines.
    pub total_chars: usize,
    /// Top-left position.
    pub x: u16,
    pub y: u16,
    pub phase: QuotePhase,
    /// When the current phase started.
    pub phase_started_ms: u64,
    /// Characters revealed so far.
    pub chars_shown: usize,
    /// When the last character was revealed.
    pub last_char_ms: u64,
    /// Per-character typing delay, sampled at spawn.
    pub typing_ms: u64,
}

/// Quote layer state.
#[derive(Debug)]
pub struct QuoteLayer {
    source: CyclingSource,
    pub active: Vec<ActiveQuote>,
    next_spawn_at_ms: u64,
}

impl QuoteLayer {
    /// Create the layer around a quote pool.
    pub fn new(pool: TokenPool) -> Self {
        Self {
            source: CyclingSource::new(pool),
            active: Vec::new(),
            next_spawn_at_ms: FIRST_SPAWN_MS,
        }
    }

    /// True while at least one quote is visible; the token layer dims while
    /// this holds.
    pub fn has_active(&self) -> bool {
        self.active.iter().any(|q| q.phase != QuotePhase::Pre)
    }

    /// Advance spawning and the per-quote phase machines.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        elapsed_ms: u64,
        area: Rect,
        max_active: usize,
        quote_delay: MsRange,
        typing: MsRange,
        rng: &mut R,
    ) {
        if self.active.len() < max_active
            && elapsed_ms >= self.next_spawn_at_ms
            && let Ok(text) = self.source.next_text(rng)
        {
            self.active.push(spawn_quote(&text, area, elapsed_ms, typing, rng));
            self.next_spawn_at_ms = elapsed_ms + quote_delay.sample(rng);
        }

        for quote in &mut self.active {
            let in_phase = elapsed_ms.saturating_sub(quote.phase_started_ms);
            match quote.phase {
                QuotePhase::Pre => {
                    if in_phase >= PRE_DELAY_MS {
                        quote.phase = QuotePhase::Typing;
                        quote.phase_started_ms = elapsed_ms;
                        quote.last_char_ms = elapsed_ms;
                    }
                }
                QuotePhase::Typing => {
                    while quote.chars_shown < quote.total_chars
                        && elapsed_ms.saturating_sub(quote.last_char_ms) >= quote.typing_ms
                    {
                        quote.chars_shown += 1;
                        quote.last_char_ms += quote.typing_ms;
                    }
                    if quote.chars_shown >= quote.total_chars {
                        quote.phase = QuotePhase::Hold;
                        quote.phase_started_ms = elapsed_ms;
                    }
                }
                QuotePhase::Hold => {
                    if in_phase >= HOLD_MS {
                        quote.phase = QuotePhase::FadeOut;
                        quote.phase_started_ms = elapsed_ms;
                    }
                }
                QuotePhase::FadeOut => {}
            }
        }

        self.active.retain(|q| {
            q.phase != QuotePhase::FadeOut
                || elapsed_ms.saturating_sub(q.phase_started_ms) < FADE_MS
        });
    }

    /// Render the visible quotes.
    pub fn render(&self, buf: &mut Buffer, area: Rect, elapsed_ms: u64) {
        for quote in &self.active {
            let level = match quote.phase {
                QuotePhase::Pre => continue,
                QuotePhase::Typing | QuotePhase::Hold => 1.0,
                QuotePhase::FadeOut => {
                    let progress = elapsed_ms.saturating_sub(quote.phase_started_ms) as f32
                        / FADE_MS as f32;
                    (1.0 - progress).max(0.0)
                }
            };
            let color = dim(QUOTE_ORANGE, 0.25 + level * 0.75);

            let mut remaining = quote.chars_shown;
            let mut cursor_pos = None;
            for (row, line) in quote.lines.iter().enumerate() {
                let line_chars = line.chars().count();
                let take = remaining.min(line_chars);
                let shown: String = line.chars().take(take).collect();
                put_str(buf, area, quote.x, quote.y + row as u16, &shown, color);
                remaining -= take;
                if remaining == 0 {
                    cursor_pos = Some((quote.x + take as u16, quote.y + row as u16));
                    break;
                }
            }

            // Blinking caret while typing.
            if quote.phase == QuotePhase::Typing
                && (elapsed_ms / 500) % 2 == 0
                && let Some((cx, cy)) = cursor_pos
            {
                put_char(buf, area, cx, cy, '▌', color);
            }
        }
    }

    /// Reshuffle the pool immediately.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.source.reshuffle(rng);
    }
}

fn spawn_quote<R: Rng + ?Sized>(
    text: &str,
    area: Rect,
    elapsed_ms: u64,
    typing: MsRange,
    rng: &mut R,
) -> ActiveQuote {
    let lines = wrap_text(text, WRAP_COLS);
    let total_chars = lines.iter().map(|l| l.chars().count()).sum();
    let box_w = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let box_h = lines.len() as u16;
    let (x, y) = corner_position(rng.random_range(0..5), area, box_w, box_h);
    ActiveQuote {
        lines,
        total_chars,
        x,
        y,
        phase: QuotePhase::Pre,
        phase_started_ms: elapsed_ms,
        chars_shown: 0,
        last_char_ms: elapsed_ms,
        typing_ms: typing.sample(rng),
    }
}

/// Top-left position for one of the five placement slots: four corners and
/// the center.
fn corner_position(slot: u8, area: Rect, box_w: u16, box_h: u16) -> (u16, u16) {
    let right = area.width.saturating_sub(box_w + MARGIN);
    let bottom = area.height.saturating_sub(box_h + MARGIN);
    match slot {
        0 => (MARGIN, MARGIN),
        1 => (right, MARGIN),
        2 => (MARGIN, bottom),
        3 => (right, bottom),
        _ => (
            area.width.saturating_sub(box_w) / 2,
            area.height.saturating_sub(box_h) / 2,
        ),
    }
}

/// Greedy word wrap; words never split mid-character.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphfall_core::Token;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_wrap_text_respects_width() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 12);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 12);
        }
        assert_eq!(
            lines.join(" "),
            "the quick brown fox jumps over the lazy dog"
        );
    }

    #[test]
    fn test_corner_positions_stay_in_area() {
        let area = Rect::new(0, 0, 80, 24);
        for slot in 0..5 {
            let (x, y) = corner_position(slot, area, 30, 3);
            assert!(x + 30 <= 80);
            assert!(y + 3 <= 24);
        }
    }

    #[test]
    fn test_phase_machine_runs_to_completion() {
        let pool = TokenPool::new(&[Token::new(0, "hi there")]);
        let mut layer = QuoteLayer::new(pool);
        let mut rng = StdRng::seed_from_u64(17);
        let area = Rect::new(0, 0, 80, 24);
        let delay = MsRange(1_000, 1_000);
        let typing = MsRange(10, 10);

        // Nothing spawns before the initial delay.
        layer.update(1_000, area, 1, delay, typing, &mut rng);
        assert!(layer.active.is_empty());

        layer.update(3_000, area, 1, delay, typing, &mut rng);
        assert_eq!(layer.active.len(), 1);
        assert_eq!(layer.active[0].phase, QuotePhase::Pre);
        assert!(!layer.has_active());

        layer.update(3_500, area, 1, delay, typing, &mut rng);
        assert_eq!(layer.active[0].phase, QuotePhase::Typing);

        // 8 characters at 10ms each complete well within 500ms.
        layer.update(4_000, area, 1, delay, typing, &mut rng);
        assert_eq!(layer.active[0].phase, QuotePhase::Hold);
        assert_eq!(layer.active[0].chars_shown, layer.active[0].total_chars);
        assert!(layer.has_active());

        layer.update(4_000 + HOLD_MS, area, 1, delay, typing, &mut rng);
        assert_eq!(layer.active[0].phase, QuotePhase::FadeOut);

        layer.update(4_000 + HOLD_MS + FADE_MS, area, 1, delay, typing, &mut rng);
        assert!(layer.active.is_empty());
    }

    #[test]
    fn test_concurrency_cap_is_respected() {
        let quotes: Vec<Token> = (0..4).map(|i| Token::new(i, format!("quote {i}"))).collect();
        let mut layer = QuoteLayer::new(TokenPool::new(&quotes));
        let mut rng = StdRng::seed_from_u64(23);
        let area = Rect::new(0, 0, 80, 24);
        // Zero delay between spawns: only the cap limits growth.
        let delay = MsRange(0, 0);
        let typing = MsRange(10, 10);

        for step in 0..20 {
            layer.update(3_000 + step * 50, area, 2, delay, typing, &mut rng);
            assert!(layer.active.len() <= 2);
        }
    }
}
