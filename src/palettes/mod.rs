//! Built-in palettes.
//!
//! - [`struct@BLANK`]: three empty layers, what a [`LayerContext`]
//!   starts with.
//! - A neutral gray theme, as elevation sources
//!   ([`struct@NEUTRAL_LIGHT`], [`struct@NEUTRAL_DARK`], [`neutral`])
//!   and as layer palettes ([`neutral_layers`]).
//!
//! [`LayerContext`]: crate::LayerContext

use std::sync::Arc;
use lazy_static::lazy_static;
use crate::container::PaletteContainer;
use crate::elevation::PaletteSource;
use crate::resolve::LayerPalette;
use crate::ColorScheme;

pub(crate) mod ty;
use ty::SchemeData;

static LIGHT: SchemeData = SchemeData {
    bg: &["#ffffff", "#f6f8fa", "#eaeef2", "#d0d7de", "#afb8c1"],
    fg: &["#1f2328", "#1f2328", "#24292f", "#32383f", "#424a53"],
    flat: &[("accent", "#0969da"), ("danger", "#cf222e"),
            ("success", "#1a7f37")],
    is_dark: false,
};

static DARK: SchemeData = SchemeData {
    bg: &["#0d1117", "#161b22", "#21262d", "#30363d", "#484f58"],
    fg: &["#e6edf3", "#e6edf3", "#d1d7e0", "#c9d1d9", "#b1bac4"],
    flat: &[("accent", "#2f81f7"), ("danger", "#f85149"),
            ("success", "#3fb950")],
    is_dark: true,
};

lazy_static! {
    /// Three empty layers, light.
    pub static ref BLANK: Arc<LayerPalette> = Arc::new(LayerPalette::default());

    /// Neutral gray light source.
    pub static ref NEUTRAL_LIGHT: PaletteSource = LIGHT.source();

    /// Neutral gray dark source.
    pub static ref NEUTRAL_DARK: PaletteSource = DARK.source();

    static ref NEUTRAL: Arc<PaletteContainer> = Arc::new(
        PaletteContainer::themed(&*NEUTRAL_LIGHT, &*NEUTRAL_DARK)
            .expect("built-in sources have at least 2 colors"));

    static ref NEUTRAL_LIGHT_LAYERS: Arc<LayerPalette> =
        Arc::new(LIGHT.layers().expect("built-in palettes have 5 layers"));

    static ref NEUTRAL_DARK_LAYERS: Arc<LayerPalette> =
        Arc::new(DARK.layers().expect("built-in palettes have 5 layers"));
}

/// The [`struct@BLANK`] palette.
pub fn blank() -> Arc<LayerPalette> { Arc::clone(&BLANK) }

/// The neutral theme, light and dark chains combined.
pub fn neutral() -> Arc<PaletteContainer> { Arc::clone(&NEUTRAL) }

/// The neutral theme as a layer palette.
pub fn neutral_layers(scheme: ColorScheme) -> Arc<LayerPalette> {
    match scheme {
        ColorScheme::Light => Arc::clone(&NEUTRAL_LIGHT_LAYERS),
        ColorScheme::Dark => Arc::clone(&NEUTRAL_DARK_LAYERS),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LinkKind, Prominence};

    #[test]
    fn blank_is_shared() {
        assert!(Arc::ptr_eq(&blank(), &blank()));
        assert_eq!(blank().layers().len(), 3);
    }

    #[test]
    fn neutral_container() {
        let c = neutral();
        assert_eq!(c.len(), 4 + 4);
        let l0 = c.base(ColorScheme::Light);
        assert_eq!(l0.bg_primary().as_str(), "#ffffff");
        assert_eq!(l0.attrs()["fg"].as_str(), "#1f2328");
        let d0 = c.resolve_link(l0, LinkKind::Inverse).unwrap();
        assert_eq!(d0.bg_primary().as_str(), "#0d1117");
        assert_eq!(d0.attrs()["accent"].as_str(), "#2f81f7");
    }

    #[test]
    fn neutral_layer_palettes() {
        let dark = neutral_layers(ColorScheme::Dark);
        assert!(dark.is_dark());
        assert_eq!(dark.max_elevation(), 2);
        let r = dark.resolve(2);
        assert_eq!(r.color("bg", Prominence::Tertiary).unwrap().as_str(),
                   "#484f58");
        assert_eq!(r.flat("danger").unwrap().as_str(), "#f85149");
        assert!(!neutral_layers(ColorScheme::Light).is_dark());
    }
}
