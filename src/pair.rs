//! Pair and payload types shared by both queue tiers.
//!
//! A [`Pair`] identifies a digram `ab`; its [`Triple`] carries the frequency
//! `F_ab` together with two opaque cross-references (`P_ab`, `L_ab`) into the
//! driver's occurrence structures. The queues never interpret the
//! cross-references: they are stored on insert and handed back unchanged.
//!
//! ## Example Usage
//!
//! ```
//! use pairkit::pair::{Pair, Triple};
//!
//! let ab = Pair::new(b'a', b'b');
//! assert_ne!(ab, Pair::new(b'b', b'a'));
//!
//! let triple = Triple::new(17, 4, 9);
//! assert_eq!(triple.freq, 9);
//! assert_eq!(triple.with_freq(8).position, 17);
//! ```

use std::fmt;
use std::hash::Hash;

/// Bound for the symbols a pair is made of.
///
/// Symbols are small copyable ids: raw bytes or nonterminal ids assigned by
/// the grammar builder.
pub trait Symbol: Copy + Eq + Hash {}

impl<T: Copy + Eq + Hash> Symbol for T {}

/// Ordered pair of adjacent symbols.
///
/// Order matters: `(a, b)` and `(b, a)` are distinct pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair<S> {
    pub first: S,
    pub second: S,
}

impl<S> Pair<S> {
    #[inline]
    pub const fn new(first: S, second: S) -> Self {
        Self { first, second }
    }
}

impl<S> From<(S, S)> for Pair<S> {
    #[inline]
    fn from((first, second): (S, S)) -> Self {
        Self { first, second }
    }
}

impl<S> From<Pair<S>> for (S, S) {
    #[inline]
    fn from(pair: Pair<S>) -> Self {
        (pair.first, pair.second)
    }
}

impl<S: fmt::Display> fmt::Display for Pair<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Payload tracked for a pair: `<P_ab, L_ab, F_ab>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Triple {
    /// `P_ab`: opaque reference to the pair's first occurrence.
    pub position: usize,
    /// `L_ab`: opaque reference to the pair's occurrence list length.
    pub length: usize,
    /// `F_ab`: occurrence frequency, at least 1 while tracked.
    pub freq: usize,
}

impl Triple {
    #[inline]
    pub const fn new(position: usize, length: usize, freq: usize) -> Self {
        Self {
            position,
            length,
            freq,
        }
    }

    /// Returns a copy with the frequency replaced.
    #[inline]
    pub const fn with_freq(self, freq: usize) -> Self {
        Self { freq, ..self }
    }
}

/// One stored element: the pair plus its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairNode<S> {
    pub pair: Pair<S>,
    pub triple: Triple,
}

impl<S> PairNode<S> {
    #[inline]
    pub const fn new(pair: Pair<S>, triple: Triple) -> Self {
        Self { pair, triple }
    }

    #[inline]
    pub fn freq(&self) -> usize {
        self.triple.freq
    }
}

/// Outcome of a successful `decrease`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decrease {
    /// The pair is still tracked with the new frequency.
    Decremented { freq: usize },
    /// The new frequency fell below the queue's floor and the pair was
    /// removed. Carries the decremented triple so the caller can hand it to
    /// another tier.
    Evicted(Triple),
}

impl Decrease {
    /// The pair's frequency after the decrement.
    pub fn freq(&self) -> usize {
        match self {
            Decrease::Decremented { freq } => *freq,
            Decrease::Evicted(triple) => triple.freq,
        }
    }

    pub fn is_evicted(&self) -> bool {
        matches!(self, Decrease::Evicted(_))
    }
}
