//! Motion levels, measured frame tiers, and the resolution between them.

/// Configured motion level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MotionLevel {
    /// Resolve from the measured frame tier and system load.
    #[default]
    Auto,
    /// Always run the softened animation set.
    Medium,
    /// Always run the static presentation.
    Low,
}

impl MotionLevel {
    /// Name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            MotionLevel::Auto => "auto",
            MotionLevel::Medium => "medium",
            MotionLevel::Low => "low",
        }
    }

    /// Parse a configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(MotionLevel::Auto),
            "medium" => Some(MotionLevel::Medium),
            "low" => Some(MotionLevel::Low),
            _ => None,
        }
    }

    /// Next level in the cycle, for interactive toggling.
    pub fn cycled(self) -> Self {
        match self {
            MotionLevel::Auto => MotionLevel::Medium,
            MotionLevel::Medium => MotionLevel::Low,
            MotionLevel::Low => MotionLevel::Auto,
        }
    }
}

/// Measured rendering performance tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameTier {
    #[default]
    Hi,
    Mid,
    Low,
}

impl FrameTier {
    /// Classify a measured frame rate.
    pub fn from_fps(fps: f32) -> Self {
        if fps >= 50.0 {
            FrameTier::Hi
        } else if fps >= 30.0 {
            FrameTier::Mid
        } else {
            FrameTier::Low
        }
    }

    /// Population multiplier applied to layer density counts.
    pub fn density_multiplier(self) -> f32 {
        match self {
            FrameTier::Hi => 1.0,
            FrameTier::Mid => 0.7,
            FrameTier::Low => 0.5,
        }
    }
}

/// Presentation actually rendered once a level is resolved against measured
/// conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedMotion {
    Full,
    Soft,
    Static,
}

/// Viewports narrower than this use the reduced density counts.
pub const NARROW_VIEWPORT_COLS: u16 = 100;

/// CPU load (0.0-1.0) above which `auto` falls back to the softened set.
const HIGH_CPU_LOAD: f32 = 0.85;

/// Resolve a configured motion level against measured conditions.
///
/// A reduced-motion request wins when the fallback is enabled; otherwise
/// `low` and `medium` are unconditional and `auto` degrades when the frame
/// tier or CPU load says the machine is struggling.
pub fn resolve(
    level: MotionLevel,
    tier: FrameTier,
    cpu_load: f32,
    reduced_requested: bool,
    reduced_fallback: bool,
) -> ResolvedMotion {
    if reduced_requested && reduced_fallback {
        return ResolvedMotion::Static;
    }
    match level {
        MotionLevel::Low => ResolvedMotion::Static,
        MotionLevel::Medium => ResolvedMotion::Soft,
        MotionLevel::Auto => {
            if tier == FrameTier::Low || cpu_load >= HIGH_CPU_LOAD {
                ResolvedMotion::Soft
            } else {
                ResolvedMotion::Full
            }
        }
    }
}

/// Per-layer population counts for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Densities {
    pub grid_lines: usize,
    pub tokens: usize,
    pub figures: usize,
    pub quotes: usize,
}

impl Densities {
    /// Counts for the resolved motion, scaled by the frame tier; narrow
    /// viewports get the reduced set.
    pub fn for_motion(motion: ResolvedMotion, tier: FrameTier, narrow: bool) -> Self {
        let mult = tier.density_multiplier();
        let scaled = |base: usize| (base as f32 * mult) as usize;
        match motion {
            ResolvedMotion::Static => Self {
                grid_lines: 0,
                tokens: 0,
                figures: 0,
                quotes: 0,
            },
            ResolvedMotion::Soft => Self {
                grid_lines: scaled(if narrow { 8 } else { 12 }),
                tokens: scaled(if narrow { 20 } else { 30 }),
                // No figures in the softened set.
                figures: 0,
                quotes: if narrow { 1 } else { 2 },
            },
            ResolvedMotion::Full => Self {
                grid_lines: scaled(if narrow { 20 } else { 30 }),
                tokens: scaled(if narrow { 60 } else { 100 }),
                figures: scaled(if narrow { 8 } else { 15 }),
                quotes: if narrow { 2 } else { 3 },
            },
        }
    }
}
