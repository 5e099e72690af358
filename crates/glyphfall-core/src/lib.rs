//! Core types for the glyphfall ambient background engine.
//!
//! This crate holds the pieces the renderer is built on: the cyclic,
//! shuffleable [`TokenPool`] that feeds the animated glyph layers, the fixed
//! [`LAYER_ORDER`] that determines compositing, and the motion model that
//! resolves a configured level against measured conditions.

mod layer;
mod motion;
mod token;

pub use layer::{Layer, LayerError, LAYER_ORDER, z_index_of, z_index_table};
pub use motion::{
    Densities, FrameTier, MotionLevel, ResolvedMotion, NARROW_VIEWPORT_COLS, resolve,
};
pub use token::{PoolError, Token, TokenPool};
