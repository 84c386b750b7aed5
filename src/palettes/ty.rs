use crate::elevation::PaletteSource;
use crate::resolve::LayerPalette;
use crate::{attributes, Attributes, Result};

/// One color scheme of a built-in theme.
pub(crate) struct SchemeData {
    pub(crate) bg: &'static [&'static str], // Invariant: length ≥ 3
    pub(crate) fg: &'static [&'static str], // Same length as `bg`
    pub(crate) flat: &'static [(&'static str, &'static str)],
    pub(crate) is_dark: bool,
}

impl SchemeData {
    fn flat(&self) -> Attributes { attributes(self.flat.iter().copied()) }

    /// The source of an elevation chain: background colors plus the
    /// base foreground and the flat attributes.
    pub(crate) fn source(&self) -> PaletteSource {
        let mut attrs = self.flat();
        attrs.insert("fg".into(), self.fg[0].into());
        PaletteSource::new(self.bg.iter().copied(), attrs)
    }

    /// One layer per background color, each with its foreground.
    pub(crate) fn layers(&self) -> Result<LayerPalette> {
        let layers = self.bg.iter().zip(self.fg)
            .map(|(&bg, &fg)| attributes([("bg", bg), ("fg", fg)]))
            .collect();
        LayerPalette::new(layers, self.flat(), self.is_dark)
    }
}
