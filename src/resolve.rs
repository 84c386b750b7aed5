//! Layer palettes and their resolution into prominence levels.
//!
//! A [`LayerPalette`] is a stack of surfaces, lowest first.  Resolving
//! it at elevation `e` looks at the [`WINDOW`] layers starting at `e`:
//! the first one gives the primary values, the next two the secondary
//! and tertiary ones.

use std::collections::BTreeMap;
use std::ops::Index;
use std::sync::Arc;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use crate::{Attributes, Color, Error, Result};

/// Number of layers looked at by a resolution.
pub const WINDOW: usize = 3;

/// Visual emphasis, from the strongest to the weakest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Prominence {
    Primary,
    Secondary,
    Tertiary,
}

impl Prominence {
    /// In window order: `ALL[p]` is fed by the `p`-th layer.
    pub const ALL: [Prominence; WINDOW] =
        [Prominence::Primary, Prominence::Secondary, Prominence::Tertiary];
}

/// One value per [`Prominence`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProminenceLevels<T = Color> {
    pub primary: T,
    pub secondary: T,
    pub tertiary: T,
}

impl<T: Clone> ProminenceLevels<T> {
    /// The same value at every level.
    pub fn splat(v: T) -> Self {
        ProminenceLevels { primary: v.clone(), secondary: v.clone(),
                           tertiary: v }
    }
}

impl<T> ProminenceLevels<T> {
    pub fn get(&self, p: Prominence) -> &T {
        match p {
            Prominence::Primary => &self.primary,
            Prominence::Secondary => &self.secondary,
            Prominence::Tertiary => &self.tertiary,
        }
    }

    pub fn set(&mut self, p: Prominence, v: T) {
        match p {
            Prominence::Primary => self.primary = v,
            Prominence::Secondary => self.secondary = v,
            Prominence::Tertiary => self.tertiary = v,
        }
    }
}

impl<T> Index<Prominence> for ProminenceLevels<T> {
    type Output = T;

    fn index(&self, p: Prominence) -> &T { self.get(p) }
}

/// A stack of surfaces plus attributes that do not vary with
/// elevation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde",
           derive(Serialize, Deserialize),
           serde(try_from = "RawLayerPalette", rename_all = "camelCase"))]
pub struct LayerPalette {
    layers: Vec<Attributes>, // Invariant: length ≥ WINDOW
    flat: Attributes,
    is_dark: bool,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLayerPalette {
    layers: Vec<Attributes>,
    #[serde(default)]
    flat: Attributes,
    #[serde(default)]
    is_dark: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLayerPalette> for LayerPalette {
    type Error = Error;

    fn try_from(raw: RawLayerPalette) -> Result<Self> {
        LayerPalette::new(raw.layers, raw.flat, raw.is_dark)
    }
}

impl Default for LayerPalette {
    /// [`WINDOW`] empty layers, light.
    fn default() -> Self {
        LayerPalette { layers: vec![Attributes::new(); WINDOW],
                       flat: Attributes::new(), is_dark: false }
    }
}

impl LayerPalette {
    /// # Errors
    ///
    /// [`Error::TooFewLayers`] if `layers` has fewer than [`WINDOW`]
    /// elements.
    pub fn new(layers: Vec<Attributes>, flat: Attributes, is_dark: bool)
               -> Result<Self> {
        if layers.len() < WINDOW {
            return Err(Error::TooFewLayers { len: layers.len() })
        }
        Ok(LayerPalette { layers, flat, is_dark })
    }

    /// Build a palette layer by layer.
    pub fn builder() -> LayerPaletteBuilder {
        LayerPaletteBuilder { layers: vec![], flat: Attributes::new(),
                              is_dark: false }
    }

    pub fn layers(&self) -> &[Attributes] { &self.layers }

    pub fn flat(&self) -> &Attributes { &self.flat }

    pub fn is_dark(&self) -> bool { self.is_dark }

    /// Highest elevation that does not saturate.
    pub fn max_elevation(&self) -> usize { self.layers.len() - WINDOW }

    /// See [`resolve`].
    pub fn resolve(&self, elevation: usize) -> ResolvedPalette {
        resolve(self, elevation)
    }

    /// Return a copy of the palette with `overlay` applied on top.
    ///
    /// Layer `i` of the overlay is merged into layer `i` of the
    /// palette (the overlay wins).  Overlay layers may extend the
    /// stack as long as they follow each other without a gap.  Flat
    /// attributes are merged the same way.
    ///
    /// # Errors
    ///
    /// [`Error::OverlayGap`] if an overlay layer is more than one past
    /// the top of the (extended) stack.
    pub fn merge(&self, overlay: &PaletteOverlay) -> Result<LayerPalette> {
        let mut layers = self.layers.clone();
        for (&i, attrs) in &overlay.layers {
            let attrs = attrs.iter().map(|(k, c)| (k.clone(), c.clone()));
            if i < layers.len() { layers[i].extend(attrs) }
            else if i == layers.len() { layers.push(attrs.collect()) }
            else { return Err(Error::OverlayGap { index: i, len: layers.len() }) }
        }
        let mut flat = self.flat.clone();
        flat.extend(overlay.flat.iter().map(|(k, c)| (k.clone(), c.clone())));
        Ok(LayerPalette { layers, flat,
                          is_dark: overlay.is_dark.unwrap_or(self.is_dark) })
    }
}

/// Incrementally build a [`LayerPalette`].
///
/// Created by [`LayerPalette::builder`].
#[derive(Clone, Debug)]
pub struct LayerPaletteBuilder {
    layers: Vec<Attributes>,
    flat: Attributes,
    is_dark: bool,
}

impl LayerPaletteBuilder {
    /// Push a layer on top of the previous ones.
    pub fn layer(mut self, attrs: Attributes) -> Self {
        self.layers.push(attrs);
        self
    }

    /// Set a flat attribute.
    pub fn flat(mut self, key: impl Into<String>, c: impl Into<Color>) -> Self {
        self.flat.insert(key.into(), c.into());
        self
    }

    pub fn dark(mut self, is_dark: bool) -> Self {
        self.is_dark = is_dark;
        self
    }

    /// # Errors
    ///
    /// [`Error::TooFewLayers`] if fewer than [`WINDOW`] layers were
    /// pushed.
    pub fn build(self) -> Result<LayerPalette> {
        LayerPalette::new(self.layers, self.flat, self.is_dark)
    }
}

/// A partial [`LayerPalette`] to apply with [`LayerPalette::merge`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PaletteOverlay {
    layers: BTreeMap<usize, Attributes>,
    flat: Attributes,
    is_dark: Option<bool>,
}

impl PaletteOverlay {
    pub fn new() -> Self { Self::default() }

    /// Attributes to set on layer `i`.  Several calls for the same
    /// layer accumulate.
    pub fn layer(mut self, i: usize, attrs: Attributes) -> Self {
        self.layers.entry(i).or_default().extend(attrs);
        self
    }

    pub fn flat(mut self, key: impl Into<String>, c: impl Into<Color>) -> Self {
        self.flat.insert(key.into(), c.into());
        self
    }

    pub fn dark(mut self, is_dark: bool) -> Self {
        self.is_dark = Some(is_dark);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty() && self.flat.is_empty() && self.is_dark.is_none()
    }
}

/// Value of an attribute in a [`ResolvedPalette`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum ResolvedValue {
    /// The attribute comes from the layers.
    Levels(ProminenceLevels),
    /// The attribute is flat.
    Flat(Color),
}

impl ResolvedValue {
    /// The color at prominence `p`; flat values are the same at every
    /// prominence.
    pub fn at(&self, p: Prominence) -> &Color {
        match self {
            ResolvedValue::Levels(l) => l.get(p),
            ResolvedValue::Flat(c) => c,
        }
    }
}

/// A [`LayerPalette`] flattened at some elevation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolvedPalette {
    values: BTreeMap<String, ResolvedValue>,
    elevation: usize,
    is_dark: bool,
}

impl ResolvedPalette {
    pub fn get(&self, key: &str) -> Option<&ResolvedValue> {
        self.values.get(key)
    }

    /// The levels of `key`, `None` if absent or flat.
    pub fn levels(&self, key: &str) -> Option<&ProminenceLevels> {
        match self.values.get(key)? {
            ResolvedValue::Levels(l) => Some(l),
            ResolvedValue::Flat(_) => None,
        }
    }

    /// The flat value of `key`, `None` if absent or layered.
    pub fn flat(&self, key: &str) -> Option<&Color> {
        match self.values.get(key)? {
            ResolvedValue::Flat(c) => Some(c),
            ResolvedValue::Levels(_) => None,
        }
    }

    /// The color of `key` at prominence `p`.
    pub fn color(&self, key: &str, p: Prominence) -> Option<&Color> {
        self.values.get(key).map(|v| v.at(p))
    }

    /// The elevation actually used, after clamping.
    pub fn elevation(&self) -> usize { self.elevation }

    pub fn is_dark(&self) -> bool { self.is_dark }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Resolve `palette` at `elevation`.
///
/// The layers `elevation .. elevation + WINDOW` feed the primary,
/// secondary and tertiary levels.  A key first met in some layer takes
/// that value at all levels, and the layers above override their own
/// level.  Flat attributes are added last and win over layered ones.
///
/// An `elevation` above [`LayerPalette::max_elevation`] is clamped to
/// it and a warning is logged.
///
/// ```
/// use palette_elevation::{attributes, LayerPalette, Prominence};
/// let p = LayerPalette::builder()
///     .layer(attributes([("bg", "#000")]))
///     .layer(attributes([("bg", "#111"), ("fg", "#eee")]))
///     .layer(attributes([("bg", "#222"), ("fg", "#fff")]))
///     .build().unwrap();
/// let r = palette_elevation::resolve(&p, 0);
/// assert_eq!(r.color("fg", Prominence::Primary).unwrap().as_str(), "#eee");
/// ```
pub fn resolve(palette: &LayerPalette, elevation: usize) -> ResolvedPalette {
    let start = elevation.min(palette.max_elevation());
    if start < elevation {
        tracing::warn!(requested = elevation, applied = start,
                       layers = palette.layers.len(),
                       "palette elevation saturated");
    }
    let mut levels: BTreeMap<String, ProminenceLevels> = BTreeMap::new();
    let window = &palette.layers[start .. start + WINDOW];
    for (layer, p) in window.iter().zip(Prominence::ALL) {
        for (key, c) in layer {
            levels.entry(key.clone())
                .or_insert_with(|| ProminenceLevels::splat(c.clone()))
                .set(p, c.clone());
        }
    }
    let mut values: BTreeMap<_, _> = levels.into_iter()
        .map(|(k, l)| (k, ResolvedValue::Levels(l)))
        .collect();
    values.extend(palette.flat.iter()
                  .map(|(k, c)| (k.clone(), ResolvedValue::Flat(c.clone()))));
    ResolvedPalette { values, elevation: start, is_dark: palette.is_dark }
}

/// Remembers the last resolution so that re-rendering with the same
/// palette and elevation costs nothing.
///
/// Palettes are identified by their [`Arc`], not by value: a palette
/// rebuilt with the same content is a miss.
#[derive(Clone, Debug, Default)]
pub struct ResolveCache {
    last: Option<(Arc<LayerPalette>, usize, Arc<ResolvedPalette>)>,
    hits: u64,
    misses: u64,
}

impl ResolveCache {
    pub fn new() -> Self { Self::default() }

    /// The resolution of `palette` at `elevation`, computed only if it
    /// differs from the previous request.
    pub fn get_or_resolve(&mut self, palette: &Arc<LayerPalette>,
                          elevation: usize) -> Arc<ResolvedPalette> {
        if let Some((p, e, resolved)) = &self.last {
            if Arc::ptr_eq(p, palette) && *e == elevation {
                self.hits += 1;
                tracing::trace!(elevation, "resolve cache hit");
                return Arc::clone(resolved)
            }
        }
        self.misses += 1;
        let resolved = Arc::new(resolve(palette, elevation));
        self.last = Some((Arc::clone(palette), elevation, Arc::clone(&resolved)));
        resolved
    }

    /// Forget the cached resolution.
    pub fn invalidate(&mut self) { self.last = None }

    pub fn hits(&self) -> u64 { self.hits }

    pub fn misses(&self) -> u64 { self.misses }
}
