//! The “current palette” of a subtree, passed down explicitly.
//!
//! Contexts are small immutable values: elevating or inverting returns
//! a new context and leaves the parent's untouched, so a renderer can
//! hand a derived context to a child and keep using its own.

use std::sync::Arc;
use crate::container::{LinkKind, PaletteContainer};
use crate::elevation::ElevationEntry;
use crate::resolve::{LayerPalette, PaletteOverlay, ResolveCache, ResolvedPalette};
use crate::{palettes, Attributes, ColorScheme, Error, Result};

/// A position in a shared [`PaletteContainer`].
#[derive(Debug)]
pub struct PaletteContext<A = Attributes> {
    container: Arc<PaletteContainer<A>>,
    index: usize, // Invariant: < container.len()
}

impl<A> Clone for PaletteContext<A> {
    fn clone(&self) -> Self {
        PaletteContext { container: Arc::clone(&self.container),
                         index: self.index }
    }
}

impl<A> PartialEq for PaletteContext<A> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.container, &other.container)
            && self.index == other.index
    }
}

impl<A> Eq for PaletteContext<A> {}

impl<A> PaletteContext<A> {
    /// Start at the base of `scheme`.
    pub fn root(container: Arc<PaletteContainer<A>>, scheme: ColorScheme)
                -> Self {
        let index = container.base(scheme).index();
        PaletteContext { container, index }
    }

    /// Start at an arbitrary entry.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index` is not in the container.
    pub fn at(container: Arc<PaletteContainer<A>>, index: usize)
              -> Result<Self> {
        if index >= container.len() {
            return Err(Error::IndexOutOfRange { index, len: container.len() })
        }
        Ok(PaletteContext { container, index })
    }

    pub fn container(&self) -> &Arc<PaletteContainer<A>> { &self.container }

    pub fn index(&self) -> usize { self.index }

    /// The current palette.
    pub fn entry(&self) -> &ElevationEntry<A> {
        &self.container.entries()[self.index]
    }

    pub fn elevation(&self) -> usize { self.entry().elevation() }

    /// `None` when the container is unthemed.
    pub fn scheme(&self) -> Option<ColorScheme> {
        self.container.scheme_of(self.index)
    }

    fn moved_to(&self, index: usize) -> Self {
        PaletteContext { container: Arc::clone(&self.container), index }
    }

    /// Go `offset` elevations up, stopping at the top of the chain.
    pub fn elevate(&self, offset: usize) -> Self {
        let index = self.container.elevate(self.entry(), offset)
            .map_or(self.index, ElevationEntry::index);
        self.moved_to(index)
    }

    /// One elevation up.
    pub fn elevated(&self) -> Self { self.elevate(1) }

    /// Switch to the base of the other scheme.
    pub fn invert(&self) -> Self {
        let index = self.container.resolve_link(self.entry(), LinkKind::Inverse)
            .map_or(self.index, ElevationEntry::index);
        self.moved_to(index)
    }

    /// The counterpart in `scheme`, as given by the entry's links.
    pub fn with_scheme(&self, scheme: ColorScheme) -> Self {
        let index = self.container.resolve_by_color_scheme(self.entry(), scheme)
            .map_or(self.index, ElevationEntry::index);
        self.moved_to(index)
    }
}

/// The layer palettes of a subtree, the requested elevation and the
/// scheme of the `regular` palette.
#[derive(Clone, Debug)]
pub struct LayerContext {
    regular: Arc<LayerPalette>,
    inverse: Arc<LayerPalette>,
    scheme: ColorScheme,
    elevation: usize,
}

impl Default for LayerContext {
    /// Blank palettes, light scheme, no elevation.
    fn default() -> Self {
        let blank = palettes::blank();
        LayerContext { regular: Arc::clone(&blank), inverse: blank,
                       scheme: ColorScheme::Light, elevation: 0 }
    }
}

impl LayerContext {
    /// Pick the regular and inverse palettes according to `scheme`.
    pub fn new(light: Arc<LayerPalette>, dark: Arc<LayerPalette>,
               scheme: ColorScheme) -> Self {
        let (regular, inverse) = match scheme {
            ColorScheme::Light => (light, dark),
            ColorScheme::Dark => (dark, light),
        };
        LayerContext { regular, inverse, scheme, elevation: 0 }
    }

    /// Same palettes at an absolute elevation.
    pub fn with_elevation(&self, elevation: usize) -> Self {
        LayerContext { elevation, ..self.clone() }
    }

    pub fn regular(&self) -> &Arc<LayerPalette> { &self.regular }

    pub fn inverse(&self) -> &Arc<LayerPalette> { &self.inverse }

    pub fn scheme(&self) -> ColorScheme { self.scheme }

    /// Requested elevation.  It may exceed what the palette supports;
    /// see [`ResolvedPalette::elevation`] for the one applied.
    pub fn elevation(&self) -> usize { self.elevation }

    pub fn elevate(&self, offset: usize) -> Self {
        self.with_elevation(self.elevation.saturating_add(offset))
    }

    pub fn elevated(&self) -> Self { self.elevate(1) }

    /// Swap the palettes and schemes, back to elevation zero.
    pub fn invert(&self) -> Self {
        LayerContext { regular: Arc::clone(&self.inverse),
                       inverse: Arc::clone(&self.regular),
                       scheme: self.scheme.inverse(),
                       elevation: 0 }
    }

    /// Apply `regular` on the regular palette and `inverse` on the
    /// inverse one.  An empty overlay keeps the palette as is.
    ///
    /// # Errors
    ///
    /// See [`LayerPalette::merge`].
    pub fn overlay(&self, regular: &PaletteOverlay, inverse: &PaletteOverlay)
                   -> Result<Self> {
        fn apply(p: &Arc<LayerPalette>, o: &PaletteOverlay)
                 -> Result<Arc<LayerPalette>> {
            if o.is_empty() { Ok(Arc::clone(p)) } else { p.merge(o).map(Arc::new) }
        }
        Ok(LayerContext { regular: apply(&self.regular, regular)?,
                          inverse: apply(&self.inverse, inverse)?,
                          ..self.clone() })
    }

    /// Resolve the regular palette at the current elevation.
    pub fn resolved(&self) -> ResolvedPalette {
        self.regular.resolve(self.elevation)
    }

    /// Like [`LayerContext::resolved`], going through `cache`.
    pub fn resolved_with(&self, cache: &mut ResolveCache) -> Arc<ResolvedPalette> {
        cache.get_or_resolve(&self.regular, self.elevation)
    }
}
