//! Light and dark elevation chains stored side by side, every
//! relationship being an index into the shared storage.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use crate::elevation::{build_elevation_chain, ElevationEntry, Links, PaletteSource};
use crate::{Attributes, ColorScheme, Error, Result};

/// Which relationship of an [`ElevationEntry`] to follow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Light,
    Dark,
    Inverse,
    Elevated,
}

impl Links {
    /// The index stored for `kind`.
    pub fn get(&self, kind: LinkKind) -> usize {
        match kind {
            LinkKind::Light => self.light,
            LinkKind::Dark => self.dark,
            LinkKind::Inverse => self.inverse,
            LinkKind::Elevated => self.elevated,
        }
    }
}

/// All the elevations of a theme.
///
/// A themed container holds the light chain at `[0, L)` followed by
/// the dark chain at `[L, L+D)`.  Light entries have the dark base
/// (`L`) as `dark` and `inverse`, dark entries have the light base
/// (`0`) as `light` and `inverse`: inverting always goes back to
/// elevation zero.  An unthemed container has a single chain whose
/// entries are their own light, dark and inverse.
///
/// Containers are immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde",
           derive(Serialize, Deserialize),
           serde(try_from = "RawPaletteContainer<A>"))]
pub struct PaletteContainer<A = Attributes> {
    entries: Vec<ElevationEntry<A>>, // Invariant: not empty
    dark_base: Option<usize>, // `None` when unthemed, else < entries.len()
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawPaletteContainer<A> {
    entries: Vec<ElevationEntry<A>>,
    dark_base: Option<usize>,
}

#[cfg(feature = "serde")]
impl<A> TryFrom<RawPaletteContainer<A>> for PaletteContainer<A> {
    type Error = Error;

    fn try_from(raw: RawPaletteContainer<A>) -> Result<Self> {
        let c = PaletteContainer { entries: raw.entries,
                                   dark_base: raw.dark_base };
        c.check()?;
        Ok(c)
    }
}

impl<A> PaletteContainer<A>
where A: Clone {
    /// Combine the chains of `light` and `dark`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSource`] if either source has fewer than two
    /// background colors.
    pub fn themed(light: &PaletteSource<A>, dark: &PaletteSource<A>)
                  -> Result<Self> {
        let mut entries = build_elevation_chain(light)?;
        let dark = build_elevation_chain(dark)?;
        let l = entries.len();
        let d = dark.len();
        for e in entries.iter_mut() {
            let i = e.index();
            e.relink(0, i, l, l);
        }
        entries.extend(dark.into_iter().map(|mut e| {
            let i = e.index() + l;
            e.relink(l, 0, i, 0);
            e
        }));
        tracing::debug!(light = l, dark = d, "built themed palette container");
        let c = PaletteContainer { entries, dark_base: Some(l) };
        debug_assert_eq!(c.check(), Ok(()));
        Ok(c)
    }

    /// A container with a single color scheme: inverting is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSource`] if `source` has fewer than two
    /// background colors.
    pub fn unthemed(source: &PaletteSource<A>) -> Result<Self> {
        let entries = build_elevation_chain(source)?;
        tracing::debug!(len = entries.len(), "built unthemed palette container");
        let c = PaletteContainer { entries, dark_base: None };
        debug_assert_eq!(c.check(), Ok(()));
        Ok(c)
    }
}

impl<A> PaletteContainer<A> {
    /// Verify what the constructors guarantee: at least one entry,
    /// entries stored at their own index, every link and the dark
    /// base inside the container.
    fn check(&self) -> Result<()> {
        let len = self.entries.len();
        let in_range = |index: usize| {
            if index < len { Ok(()) }
            else { Err(Error::IndexOutOfRange { index, len }) }
        };
        in_range(0)?;
        if let Some(dark_base) = self.dark_base { in_range(dark_base)? }
        for (position, e) in self.entries.iter().enumerate() {
            if e.index() != position {
                return Err(Error::MisplacedEntry { index: e.index(), position })
            }
            let l = e.links();
            for index in [l.light, l.dark, l.inverse, l.elevated] {
                in_range(index)?;
            }
        }
        Ok(())
    }

    /// Number of entries, both schemes included.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Always `false`: a container has at least one entry.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn is_themed(&self) -> bool { self.dark_base.is_some() }

    pub fn entries(&self) -> &[ElevationEntry<A>] { &self.entries }

    pub fn iter(&self) -> std::slice::Iter<'_, ElevationEntry<A>> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ElevationEntry<A>> {
        self.entries.get(index)
    }

    /// Like [`PaletteContainer::get`] but reports a missing entry as
    /// [`Error::IndexOutOfRange`].
    pub fn entry(&self, index: usize) -> Result<&ElevationEntry<A>> {
        self.entries.get(index)
            .ok_or(Error::IndexOutOfRange { index, len: self.entries.len() })
    }

    /// The zero-elevation entry of `scheme`.  Both schemes share the
    /// same base in an unthemed container.
    pub fn base(&self, scheme: ColorScheme) -> &ElevationEntry<A> {
        let index = match scheme {
            ColorScheme::Light => 0,
            ColorScheme::Dark => self.dark_base.unwrap_or(0),
        };
        &self.entries[index]
    }

    /// The scheme the entry at `index` belongs to, `None` for an
    /// unthemed container or an index out of range.
    pub fn scheme_of(&self, index: usize) -> Option<ColorScheme> {
        let dark_base = self.dark_base?;
        if index >= self.entries.len() { None }
        else if index >= dark_base { Some(ColorScheme::Dark) }
        else { Some(ColorScheme::Light) }
    }

    /// Follow the `kind` link of `entry`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `entry` comes from another,
    /// larger, container.
    pub fn resolve_link(&self, entry: &ElevationEntry<A>, kind: LinkKind)
                        -> Result<&ElevationEntry<A>> {
        self.entry(entry.links().get(kind))
    }

    /// The counterpart of `entry` in `scheme`.
    ///
    /// # Errors
    ///
    /// See [`PaletteContainer::resolve_link`].
    pub fn resolve_by_color_scheme(&self, entry: &ElevationEntry<A>,
                                   scheme: ColorScheme)
                                   -> Result<&ElevationEntry<A>> {
        let kind = match scheme {
            ColorScheme::Light => LinkKind::Light,
            ColorScheme::Dark => LinkKind::Dark,
        };
        self.resolve_link(entry, kind)
    }

    /// Follow the `elevated` link `offset` times.  Stops at the top of
    /// the chain.
    ///
    /// # Errors
    ///
    /// See [`PaletteContainer::resolve_link`].
    pub fn elevate<'a>(&'a self, mut entry: &'a ElevationEntry<A>,
                       offset: usize) -> Result<&'a ElevationEntry<A>> {
        for _ in 0 .. offset {
            let next = self.resolve_link(entry, LinkKind::Elevated)?;
            if next.index() == entry.index() { break }
            entry = next;
        }
        Ok(entry)
    }
}

impl<'a, A> IntoIterator for &'a PaletteContainer<A> {
    type Item = &'a ElevationEntry<A>;
    type IntoIter = std::slice::Iter<'a, ElevationEntry<A>>;

    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes;

    fn source(bg: &[&str]) -> PaletteSource {
        PaletteSource::new(bg.iter().copied(), attributes([("fg", bg[0])]))
    }

    fn themed() -> PaletteContainer {
        PaletteContainer::themed(&source(&["l0", "l1", "l2", "l3"]),
                                 &source(&["d0", "d1", "d2"])).unwrap()
    }

    #[test]
    fn themed_layout() {
        let c = themed();
        assert_eq!(c.len(), 3 + 2);
        assert!(c.is_themed());
        let prim: Vec<_> = c.iter().map(|e| e.bg_primary().as_str()).collect();
        assert_eq!(prim, ["l0", "l1", "l2", "d0", "d1"]);
        assert_eq!(c.get(4).unwrap().attrs()["fg"].as_str(), "d0");
    }

    #[test]
    fn themed_links() {
        let c = themed();
        for (i, e) in c.iter().enumerate().take(3) {
            assert_eq!(e.links(), Links { light: i, dark: 3, inverse: 3,
                                          elevated: (i + 1).min(2) });
        }
        for (i, e) in c.iter().enumerate().skip(3) {
            assert_eq!(e.links(), Links { light: 0, dark: i, inverse: 0,
                                          elevated: (i + 1).min(4) });
        }
    }

    #[test]
    fn dark_elevation_is_relative() {
        let c = themed();
        let d0 = c.base(ColorScheme::Dark);
        assert_eq!(d0.index(), 3);
        assert_eq!(d0.elevation(), 0);
        let d1 = c.resolve_link(d0, LinkKind::Elevated).unwrap();
        assert_eq!(d1.bg_primary().as_str(), "d1");
        assert_eq!(d1.elevation(), 1);
        let top = c.resolve_link(d1, LinkKind::Elevated).unwrap();
        assert_eq!(top.index(), d1.index());
    }

    #[test]
    fn inversion_resets_elevation() {
        let c = themed();
        let l2 = c.get(2).unwrap();
        let d = c.resolve_link(l2, LinkKind::Inverse).unwrap();
        assert_eq!(d.index(), 3);
        let back = c.resolve_link(d, LinkKind::Inverse).unwrap();
        assert_eq!(back.index(), 0);
        assert_eq!(back, c.base(ColorScheme::Light));
    }

    #[test]
    fn by_color_scheme() {
        let c = themed();
        let l1 = c.get(1).unwrap();
        assert_eq!(c.resolve_by_color_scheme(l1, ColorScheme::Light).unwrap()
                   .index(), 1);
        assert_eq!(c.resolve_by_color_scheme(l1, ColorScheme::Dark).unwrap()
                   .index(), 3);
        let d1 = c.get(4).unwrap();
        assert_eq!(c.resolve_by_color_scheme(d1, ColorScheme::Dark).unwrap()
                   .index(), 4);
        assert_eq!(c.scheme_of(1), Some(ColorScheme::Light));
        assert_eq!(c.scheme_of(3), Some(ColorScheme::Dark));
        assert_eq!(c.scheme_of(5), None);
    }

    #[test]
    fn unthemed_links() {
        let c = PaletteContainer::unthemed(&source(&["a", "b", "c"])).unwrap();
        assert!(!c.is_themed());
        assert_eq!(c.len(), 2);
        for e in &c {
            for kind in [LinkKind::Light, LinkKind::Dark, LinkKind::Inverse] {
                assert_eq!(c.resolve_link(e, kind).unwrap(), e);
            }
        }
        assert_eq!(c.base(ColorScheme::Dark).index(), 0);
        assert_eq!(c.scheme_of(0), None);
    }

    #[test]
    fn elevate_saturates() {
        let c = themed();
        let l0 = c.base(ColorScheme::Light);
        assert_eq!(c.elevate(l0, 1).unwrap().index(), 1);
        assert_eq!(c.elevate(l0, 10).unwrap().index(), 2);
        let d0 = c.base(ColorScheme::Dark);
        assert_eq!(c.elevate(d0, 10).unwrap().index(), 4);
        assert_eq!(c.elevate(d0, 0).unwrap().index(), 3);
    }

    #[test]
    fn foreign_entry_out_of_range() {
        let small = PaletteContainer::unthemed(&source(&["a", "b"])).unwrap();
        let big = themed();
        let foreign = big.get(4).unwrap();
        assert_eq!(small.resolve_link(foreign, LinkKind::Dark),
                   Err(Error::IndexOutOfRange { index: 4, len: 1 }));
    }

    #[test]
    fn built_containers_pass_the_check() {
        assert_eq!(themed().check(), Ok(()));
        let c = PaletteContainer::unthemed(&source(&["a", "b", "c"])).unwrap();
        assert_eq!(c.check(), Ok(()));
    }

    #[test]
    fn check_rejects_broken_containers() {
        let empty: PaletteContainer = PaletteContainer { entries: vec![],
                                                         dark_base: None };
        assert_eq!(empty.check(), Err(Error::IndexOutOfRange { index: 0, len: 0 }));

        let mut c = themed();
        c.dark_base = Some(5);
        assert_eq!(c.check(), Err(Error::IndexOutOfRange { index: 5, len: 5 }));

        let mut c = themed();
        c.entries.swap(0, 1);
        assert_eq!(c.check(), Err(Error::MisplacedEntry { index: 1, position: 0 }));

        let mut c = themed();
        c.entries[4].relink(0, 0, 4, 7);
        assert_eq!(c.check(), Err(Error::IndexOutOfRange { index: 7, len: 5 }));
    }

    #[test]
    fn invalid_dark_source() {
        assert_eq!(PaletteContainer::themed(&source(&["a", "b"]),
                                            &source(&["x"])),
                   Err(Error::InvalidSource { len: 1 }));
    }
}
