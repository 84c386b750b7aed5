//! Elevation, light/dark linking and prominence resolution for UI
//! color palettes.
//!
//! - [`build_elevation_chain`] turns a list of background colors into
//!   two-tone [`ElevationEntry`]s.
//! - [`PaletteContainer`] stores a light and a dark chain side by side
//!   and links them by index.
//! - [`resolve()`] collapses a [`LayerPalette`] at some elevation into a
//!   [`ResolvedPalette`] of [`ProminenceLevels`].
//!
//! [`PaletteContext`] and [`LayerContext`] carry the “current palette”
//! explicitly down a render tree.  A few ready-made palettes live in
//! [`palettes`].
//!
//! Colors are opaque: this crate never parses or blends them.

use std::collections::BTreeMap;
use std::fmt;
use rgb::{RGB8, RGBA8};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod container;
mod context;
mod elevation;
pub mod palettes;
mod resolve;

pub use container::{LinkKind, PaletteContainer};
pub use context::{LayerContext, PaletteContext};
pub use elevation::{build_elevation_chain, ElevationEntry, Links, PaletteSource};
pub use resolve::{resolve, LayerPalette, LayerPaletteBuilder, PaletteOverlay,
                  Prominence, ProminenceLevels, ResolveCache, ResolvedPalette,
                  ResolvedValue, WINDOW};

/// A color, kept exactly as the caller wrote it (`"#1e1e2e"`,
/// `"rebeccapurple"`, `"var(--bg)"`, …).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Color(String);

impl Color {
    pub fn new(c: impl Into<String>) -> Self { Color(c.into()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Color {
    fn as_ref(&self) -> &str { &self.0 }
}

impl From<&str> for Color {
    fn from(c: &str) -> Self { Color(c.to_owned()) }
}

impl From<String> for Color {
    fn from(c: String) -> Self { Color(c) }
}

/// CSS hex notation, `#rrggbb`.
impl From<RGB8> for Color {
    fn from(c: RGB8) -> Self {
        Color(format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b))
    }
}

/// CSS hex notation with alpha, `#rrggbbaa`.
impl From<RGBA8> for Color {
    fn from(c: RGBA8) -> Self {
        Color(format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a))
    }
}

/// Named attributes of a palette (`"fg"`, `"border"`, …).
pub type Attributes = BTreeMap<String, Color>;

/// Build an [`Attributes`] map from `(name, color)` pairs.
///
/// ```
/// let attrs = palette_elevation::attributes([("fg", "#eee")]);
/// assert_eq!(attrs["fg"].as_str(), "#eee");
/// ```
pub fn attributes<K, C>(pairs: impl IntoIterator<Item = (K, C)>) -> Attributes
where K: Into<String>, C: Into<Color> {
    pairs.into_iter().map(|(k, c)| (k.into(), c.into())).collect()
}

/// Either of the two color schemes.  They are always mutual inverses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize),
           serde(rename_all = "lowercase"))]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// The other scheme.
    pub fn inverse(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn is_dark(self) -> bool { matches!(self, ColorScheme::Dark) }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { ColorScheme::Light => "light",
                                 ColorScheme::Dark => "dark" })
    }
}

/// Errors raised while building or navigating palettes.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A [`PaletteSource`] needs at least two background colors to
    /// yield one elevation.
    #[error("palette source has {len} background color(s), at least 2 are required")]
    InvalidSource { len: usize },

    /// A link points outside its container.  Only happens when an
    /// entry is looked up in a container it does not belong to, or
    /// when deserializing a corrupted container.
    #[error("palette index {index} out of range for a container of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    /// A stored entry claims an index other than its position.
    #[error("palette entry at position {position} claims index {index}")]
    MisplacedEntry { index: usize, position: usize },

    /// An overlay layer would leave empty layers between the palette
    /// and itself.
    #[error("overlay layer {index} is past the end of a palette of {len} layer(s)")]
    OverlayGap { index: usize, len: usize },

    /// A [`LayerPalette`] needs at least [`WINDOW`] layers.
    #[error("layer palette has {len} layer(s), at least 3 are required")]
    TooFewLayers { len: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_rgb() {
        assert_eq!(Color::from(RGB8::new(255, 0, 16)).as_str(), "#ff0010");
        assert_eq!(Color::from(RGBA8::new(0, 1, 2, 128)).as_str(),
                   "#00010280");
    }

    #[test]
    fn color_is_opaque() {
        let c = Color::from("not a color at all");
        assert_eq!(c.to_string(), "not a color at all");
    }

    #[test]
    fn scheme_inverse() {
        assert_eq!(ColorScheme::Light.inverse(), ColorScheme::Dark);
        assert_eq!(ColorScheme::Dark.inverse().inverse(), ColorScheme::Dark);
        assert!(ColorScheme::Dark.is_dark());
        assert_eq!(ColorScheme::default(), ColorScheme::Light);
    }

    #[test]
    fn error_messages() {
        assert_eq!(Error::InvalidSource { len: 1 }.to_string(),
                   "palette source has 1 background color(s), at least 2 are required");
        assert_eq!(Error::TooFewLayers { len: 2 }.to_string(),
                   "layer palette has 2 layer(s), at least 3 are required");
    }
}
