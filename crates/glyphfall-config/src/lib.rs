//! Animation tuning configuration for glyphfall.
//!
//! The configuration is a single immutable value: loaded from the user's
//! config file (or defaulted) and validated once at startup, then passed by
//! reference to the renderer. There is no runtime mutation and no ambient
//! global.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use glyphfall_core::{MotionLevel, NARROW_VIEWPORT_COLS};
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

/// Errors produced while loading or validating a configuration.
///
/// All of these are fatal to startup of the animation subsystem; none are
/// retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `[min, max]` pair with `min > max`.
    #[error("invalid range for `{field}`: min {min} > max {max}")]
    InvalidRange {
        field: &'static str,
        min: u64,
        max: u64,
    },
    /// The config file exists but does not match the schema. Out-of-domain
    /// values (a negative count, an unknown motion level) land here too.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
}

/// A `[min, max]` millisecond pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MsRange(pub u64, pub u64);

impl MsRange {
    /// Lower bound.
    pub fn min(self) -> u64 {
        self.0
    }

    /// Upper bound.
    pub fn max(self) -> u64 {
        self.1
    }

    /// True when the pair is well-formed (`min <= max`).
    pub fn is_valid(self) -> bool {
        self.0 <= self.1
    }

    /// Uniform sample from the inclusive range.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> u64 {
        rng.random_range(self.0..=self.1)
    }
}

/// Animation tuning for the background engine.
///
/// Counts are unsigned by type, so negative values are rejected while the
/// file is parsed; range inversions are caught by [`BackgroundConfig::validate`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    /// Configured motion level: `auto`, `medium` or `low`.
    #[serde(deserialize_with = "de_motion_level")]
    pub motion_level: MotionLevel,
    /// Degrade to the static presentation when reduced motion is requested.
    pub reduced_motion_fallback: bool,
    /// Maximum quotes visible at once.
    pub max_quotes: u32,
    /// Cap applied when the token pool is built.
    pub max_tokens: u32,
    /// Delay between quote spawns.
    pub quote_delay_ms: MsRange,
    /// Delay between token respawns.
    pub token_spawn_delay_ms: MsRange,
    /// Typing speed per character on wide viewports.
    pub typing_speed_desktop_ms: MsRange,
    /// Typing speed per character on narrow viewports.
    pub typing_speed_mobile_ms: MsRange,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            motion_level: MotionLevel::Auto,
            reduced_motion_fallback: true,
            max_quotes: 3,
            max_tokens: 48,
            quote_delay_ms: MsRange(15_000, 20_000),
            token_spawn_delay_ms: MsRange(100, 800),
            typing_speed_desktop_ms: MsRange(40, 60),
            typing_speed_mobile_ms: MsRange(60, 90),
        }
    }
}

impl BackgroundConfig {
    /// Check every numeric range once; call before the first frame.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges = [
            ("quote_delay_ms", self.quote_delay_ms),
            ("token_spawn_delay_ms", self.token_spawn_delay_ms),
            ("typing_speed_desktop_ms", self.typing_speed_desktop_ms),
            ("typing_speed_mobile_ms", self.typing_speed_mobile_ms),
        ];
        for (field, range) in ranges {
            if !range.is_valid() {
                return Err(ConfigError::InvalidRange {
                    field,
                    min: range.min(),
                    max: range.max(),
                });
            }
        }
        Ok(())
    }

    /// Typing speed range for the given viewport width.
    pub fn typing_speed_ms(&self, width: u16) -> MsRange {
        if width < NARROW_VIEWPORT_COLS {
            self.typing_speed_mobile_ms
        } else {
            self.typing_speed_desktop_ms
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to the default when no file exists.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_toml(&fs::read_to_string(path)?)
    }

    /// Load from the platform config directory (`glyphfall.toml`).
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }
}

/// Platform path of the user's config file, if a home directory exists.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "glyphfall").map(|dirs| dirs.config_dir().join("glyphfall.toml"))
}

fn de_motion_level<'de, D>(deserializer: D) -> Result<MotionLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    MotionLevel::from_name(&name).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "unknown motion level `{name}`, expected auto, medium or low"
        ))
    })
}
