//! Visual compositing layers and their fixed stacking order.

use thiserror::Error;

/// Errors from layer lookups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayerError {
    /// The name does not match any layer in the fixed set.
    #[error("unknown layer `{0}`")]
    Unknown(String),
}

/// A named compositing tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The dark base the whole scene sits on.
    BaseCanvas,
    /// Slowly drifting horizontal and vertical grid lines.
    GridLines,
    /// Drifting vocabulary glyphs.
    MatrixTokens,
    /// Sparse geometric figures.
    BackgroundFigures,
    /// Typed narrative quotes.
    MatrixQuotes,
    /// Deterministic speckle overlay.
    NoiseOverlay,
    /// Foreground content owned by the application.
    HeroContent,
    /// Help line and other small chrome, above everything.
    MicroUi,
}

/// Stacking order, back to front. The list order IS the z order; nothing
/// else assigns indices, so inserting a layer here is the only way to
/// renumber.
pub const LAYER_ORDER: [Layer; 8] = [
    Layer::BaseCanvas,
    Layer::GridLines,
    Layer::MatrixTokens,
    Layer::BackgroundFigures,
    Layer::MatrixQuotes,
    Layer::NoiseOverlay,
    Layer::HeroContent,
    Layer::MicroUi,
];

impl Layer {
    /// Kebab-case identifier for this layer.
    pub fn name(self) -> &'static str {
        match self {
            Layer::BaseCanvas => "base-canvas",
            Layer::GridLines => "grid-lines",
            Layer::MatrixTokens => "matrix-tokens",
            Layer::BackgroundFigures => "background-figures",
            Layer::MatrixQuotes => "matrix-quotes",
            Layer::NoiseOverlay => "noise",
            Layer::HeroContent => "hero-content",
            Layer::MicroUi => "micro-ui",
        }
    }

    /// Look up a layer by its kebab-case identifier.
    pub fn from_name(name: &str) -> Result<Self, LayerError> {
        LAYER_ORDER
            .into_iter()
            .find(|layer| layer.name() == name)
            .ok_or_else(|| LayerError::Unknown(name.to_string()))
    }

    /// 1-based stacking index, derived from position in [`LAYER_ORDER`].
    /// Index 1 renders at the back.
    pub fn z_index(self) -> u16 {
        LAYER_ORDER
            .iter()
            .position(|&layer| layer == self)
            .map(|pos| pos as u16 + 1)
            .expect("every layer variant appears in LAYER_ORDER")
    }
}

/// Stacking index for a layer given by name.
pub fn z_index_of(name: &str) -> Result<u16, LayerError> {
    Layer::from_name(name).map(Layer::z_index)
}

/// Name → stacking index pairs in back-to-front order, for use as
/// render-layer metadata. Pure function of [`LAYER_ORDER`].
pub fn z_index_table() -> [(&'static str, u16); LAYER_ORDER.len()] {
    std::array::from_fn(|i| (LAYER_ORDER[i].name(), i as u16 + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_index_is_injective_and_order_preserving() {
        let indices: Vec<u16> = LAYER_ORDER.iter().map(|l| l.z_index()).collect();
        for pair in indices.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_z_index_bounds() {
        assert_eq!(LAYER_ORDER[0].z_index(), 1);
        assert_eq!(
            LAYER_ORDER[LAYER_ORDER.len() - 1].z_index(),
            LAYER_ORDER.len() as u16
        );
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(z_index_of("base-canvas"), Ok(1));
        assert_eq!(z_index_of("grid-lines"), Ok(2));
        assert_eq!(z_index_of("micro-ui"), Ok(8));
    }

    #[test]
    fn test_unknown_layer_errors() {
        assert_eq!(
            z_index_of("NotALayer"),
            Err(LayerError::Unknown("NotALayer".to_string()))
        );
    }

    #[test]
    fn test_name_round_trips() {
        for layer in LAYER_ORDER {
            assert_eq!(Layer::from_name(layer.name()), Ok(layer));
        }
    }

    #[test]
    fn test_z_index_table_matches_order() {
        let table = z_index_table();
        assert_eq!(table.len(), LAYER_ORDER.len());
        for (i, (name, z)) in table.iter().enumerate() {
            assert_eq!(*name, LAYER_ORDER[i].name());
            assert_eq!(*z, LAYER_ORDER[i].z_index());
        }
    }
}
