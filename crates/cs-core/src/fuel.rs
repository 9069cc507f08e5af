//! Fuel kinds and the per-kind lookup table.
//!
//! Every piece of kind-specific state (slot arrays, resource accounts,
//! configuration values) is stored in a [`PerKind<T>`] and indexed by
//! [`FuelKind`].  Adding a kind means adding a variant and a field; the
//! compiler then points at every `match` that must handle it.

use std::ops::{Index, IndexMut};

/// What a vehicle tanks and what a slot dispenses.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FuelKind {
    Gas,
    Electric,
}

impl FuelKind {
    /// Every kind, in the order stations process them within a tick.
    pub const ALL: [FuelKind; 2] = [FuelKind::Gas, FuelKind::Electric];

    /// Human-readable label, useful for CSV column values and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            FuelKind::Gas      => "gas",
            FuelKind::Electric => "electric",
        }
    }

    /// Parse the label produced by [`as_str`](Self::as_str) (case-insensitive).
    pub fn parse(s: &str) -> Option<FuelKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gas"      => Some(FuelKind::Gas),
            "electric" => Some(FuelKind::Electric),
            _          => None,
        }
    }
}

impl std::fmt::Display for FuelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── PerKind ───────────────────────────────────────────────────────────────────

/// One value of `T` per [`FuelKind`].
///
/// ```rust
/// use cs_core::{FuelKind, PerKind};
///
/// let mut slots = PerKind::new(2u32, 4u32);
/// slots[FuelKind::Electric] += 1;
/// assert_eq!(slots[FuelKind::Electric], 5);
/// assert_eq!(slots.iter().map(|(_, n)| *n).sum::<u32>(), 7);
/// ```
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerKind<T> {
    pub gas:      T,
    pub electric: T,
}

impl<T> PerKind<T> {
    #[inline]
    pub fn new(gas: T, electric: T) -> Self {
        Self { gas, electric }
    }

    /// Build a table by calling `f` once per kind.
    pub fn from_fn(mut f: impl FnMut(FuelKind) -> T) -> Self {
        Self {
            gas:      f(FuelKind::Gas),
            electric: f(FuelKind::Electric),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(FuelKind, T) -> U) -> PerKind<U> {
        PerKind {
            gas:      f(FuelKind::Gas, self.gas),
            electric: f(FuelKind::Electric, self.electric),
        }
    }

    /// Iterate `(kind, &value)` in [`FuelKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (FuelKind, &T)> + '_ {
        FuelKind::ALL.into_iter().map(move |k| (k, &self[k]))
    }
}

impl<T> Index<FuelKind> for PerKind<T> {
    type Output = T;

    #[inline]
    fn index(&self, kind: FuelKind) -> &T {
        match kind {
            FuelKind::Gas      => &self.gas,
            FuelKind::Electric => &self.electric,
        }
    }
}

impl<T> IndexMut<FuelKind> for PerKind<T> {
    #[inline]
    fn index_mut(&mut self, kind: FuelKind) -> &mut T {
        match kind {
            FuelKind::Gas      => &mut self.gas,
            FuelKind::Electric => &mut self.electric,
        }
    }
}
