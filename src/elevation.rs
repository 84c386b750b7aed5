//! Elevation chains: one two-tone palette per adjacent pair of
//! background colors.
//!
//! ```text
//! bg:   c0 c1 c2 c3
//!   0:  c0 c1
//!   1:     c1 c2
//!   2:        c2 c3
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use crate::{Attributes, Color, Error, Result};

/// What a theme author writes: background colors ordered from the
/// lowest to the highest surface, plus any other attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PaletteSource<A = Attributes> {
    pub bg: Vec<Color>, // At least 2 colors to be usable.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub attrs: A,
}

impl<A> PaletteSource<A> {
    pub fn new<C: Into<Color>>(bg: impl IntoIterator<Item = C>, attrs: A) -> Self {
        PaletteSource { bg: bg.into_iter().map(Into::into).collect(), attrs }
    }

    /// Number of [`ElevationEntry`]s this source yields.
    pub fn depth(&self) -> usize { self.bg.len().saturating_sub(1) }
}

/// Positions of the related entries, within the entry's own chain or
/// container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Links {
    pub light: usize,
    pub dark: usize,
    pub inverse: usize,
    pub elevated: usize,
}

/// A two-tone palette at a given elevation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElevationEntry<A = Attributes> {
    attrs: A,
    bg_primary: Color,
    bg_secondary: Color,
    index: usize,
    elevation: usize,
    links: Links,
}

impl<A> ElevationEntry<A> {
    /// The source attributes, `bg` excepted.
    pub fn attrs(&self) -> &A { &self.attrs }

    pub fn bg_primary(&self) -> &Color { &self.bg_primary }

    pub fn bg_secondary(&self) -> &Color { &self.bg_secondary }

    /// Position of this entry in the sequence that owns it.
    pub fn index(&self) -> usize { self.index }

    /// Elevation within its own color scheme (`0` is the base).
    pub fn elevation(&self) -> usize { self.elevation }

    pub fn links(&self) -> Links { self.links }

    /// Move the entry (and its `elevated` link) to start at `base`
    /// and point the scheme links at the given positions.
    pub(crate) fn relink(&mut self, base: usize, light: usize, dark: usize,
                         inverse: usize) {
        self.index += base;
        self.links = Links { light, dark, inverse,
                             elevated: self.links.elevated + base };
    }
}

/// Derive the elevation chain of `source`.
///
/// Entry `i` has `bg[i]` as primary and `bg[i+1]` as secondary
/// background; every other attribute is copied.  Entries link to
/// themselves for light, dark and inverse, and `elevated` points to
/// the next entry, the last one pointing to itself.
///
/// # Errors
///
/// [`Error::InvalidSource`] if `source.bg` has fewer than 2 colors.
pub fn build_elevation_chain<A>(source: &PaletteSource<A>)
                                -> Result<Vec<ElevationEntry<A>>>
where A: Clone {
    let len = source.bg.len();
    if len < 2 {
        return Err(Error::InvalidSource { len })
    }
    let last = len - 2;
    let chain = source.bg.windows(2).enumerate()
        .map(|(i, bg)| ElevationEntry {
            attrs: source.attrs.clone(),
            bg_primary: bg[0].clone(),
            bg_secondary: bg[1].clone(),
            index: i,
            elevation: i,
            links: Links { light: i, dark: i, inverse: i,
                           elevated: (i + 1).min(last) },
        })
        .collect();
    Ok(chain)
}
