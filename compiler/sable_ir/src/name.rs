//! Interned string identifiers.
//!
//! Binding and function names are interned once and referred to by a compact
//! 32-bit [`Name`]. The inference pipeline is single-threaded (functions are
//! processed strictly sequentially), so the interner is a plain map with no
//! synchronization.

use std::fmt;

use rustc_hash::FxHashMap;

/// Interned string identifier.
///
/// A `Name` is only meaningful together with the [`Interner`] that produced
/// it; comparing names from different interners is not supported.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Get the raw `u32` value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create from a raw `u32` value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Get the index as `usize` (for indexing into the interner's table).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// String interner mapping text to [`Name`] ids and back.
///
/// Slot 0 always holds the empty string, so [`Name::EMPTY`] resolves on
/// every interner.
#[derive(Debug)]
pub struct Interner {
    ids: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl Interner {
    pub fn new() -> Self {
        let mut interner = Interner {
            ids: FxHashMap::default(),
            strings: Vec::new(),
        };
        interner.intern("");
        interner
    }

    /// Intern a string, returning its id. Idempotent: interning the same
    /// text twice returns the same [`Name`].
    pub fn intern(&mut self, text: &str) -> Name {
        if let Some(&name) = self.ids.get(text) {
            return name;
        }
        #[expect(clippy::cast_possible_truncation, reason = "name counts fit in u32")]
        let name = Name(self.strings.len() as u32);
        self.strings.push(text.into());
        self.ids.insert(text.into(), name);
        name
    }

    /// Resolve an id back to its text. Panics on a name this interner did
    /// not produce.
    pub fn resolve(&self, name: Name) -> &str {
        &self.strings[name.index()]
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
