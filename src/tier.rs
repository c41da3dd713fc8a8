//! Two-tier coordinator.
//!
//! Neither queue knows about the other. A driver that keeps both tiers must
//! route every pair by frequency and move it across when a decrement crosses
//! the boundary. [`TieredQueues`] does that bookkeeping for it.
//!
//! ```text
//!            freq:  1 ........ max_low_freq | max_low_freq + 1 ........ ∞
//!                   └──────── LfQueue ──────┘└──────────── HfQueue ──────┘
//!
//!   decrease at the boundary (freq == max_low_freq + 1):
//!
//!     HfQueue ── Evicted(triple @ max_low_freq) ──► LfQueue::insert(triple)
//! ```
//!
//! The destination's capacity is checked before the source is touched, so a
//! failing call leaves both tiers as they were.
//!
//! ## Example
//!
//! ```
//! use pairkit::builder::TierConfig;
//! use pairkit::pair::{Pair, Triple};
//! use pairkit::tier::{Tier, TierDecrease};
//!
//! let mut tiers = TierConfig::new(16, 4).build::<char>().unwrap();
//! let ab = Pair::new('a', 'b');
//! tiers.insert(ab, Triple::new(0, 0, 5)).unwrap();
//! assert_eq!(tiers.tier_of_pair(&ab), Some(Tier::High));
//!
//! assert_eq!(tiers.decrease(&ab), Ok(TierDecrease::Demoted { freq: 4 }));
//! assert_eq!(tiers.tier_of_pair(&ab), Some(Tier::Low));
//! ```

use tracing::debug;

use crate::builder::TierConfig;
use crate::error::{ConfigError, QueueError};
use crate::pair::{Decrease, Pair, Symbol, Triple};
use crate::queue::{HfQueue, LfQueue};

/// Which queue a frequency belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Low,
    High,
}

/// Outcome of [`TieredQueues::decrease`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierDecrease {
    /// Still in the same tier at `freq`.
    Decremented { freq: usize },
    /// Moved from the high tier into the low tier at `freq`.
    Demoted { freq: usize },
    /// Dropped out of both tiers.
    Evicted(Triple),
}

/// A high and a low queue with `high.min_freq == low.max_freq + 1`.
#[derive(Debug)]
pub struct TieredQueues<S> {
    high: HfQueue<S>,
    low: LfQueue<S>,
}

impl<S> TieredQueues<S>
where
    S: Symbol,
{
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    pub fn new(config: TierConfig) -> Self {
        match Self::try_new(config) {
            Ok(tiers) => tiers,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_new(config: TierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            high: HfQueue::try_new(config.high_capacity, config.high_min_freq())?,
            low: LfQueue::try_new(config.low_capacity, config.max_low_freq)?,
        })
    }

    pub fn high(&self) -> &HfQueue<S> {
        &self.high
    }

    pub fn low(&self) -> &LfQueue<S> {
        &self.low
    }

    /// Largest frequency routed to the low tier.
    #[inline]
    pub fn max_low_freq(&self) -> usize {
        self.low.max_freq()
    }

    /// Tier a pair with frequency `freq` belongs in.
    #[inline]
    pub fn tier_of(&self, freq: usize) -> Tier {
        if freq <= self.low.max_freq() {
            Tier::Low
        } else {
            Tier::High
        }
    }

    /// Tier currently tracking `pair`, if any.
    pub fn tier_of_pair(&self, pair: &Pair<S>) -> Option<Tier> {
        if self.high.contains(pair) {
            Some(Tier::High)
        } else if self.low.contains(pair) {
            Some(Tier::Low)
        } else {
            None
        }
    }

    pub fn contains(&self, pair: &Pair<S>) -> bool {
        self.tier_of_pair(pair).is_some()
    }

    pub fn len(&self) -> usize {
        self.high.len() + self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts `pair` into the tier its frequency selects.
    ///
    /// A pair already tracked by either tier is a `Duplicate`.
    pub fn insert(&mut self, pair: Pair<S>, triple: Triple) -> Result<(), QueueError> {
        if self.contains(&pair) {
            return Err(QueueError::Duplicate);
        }
        match self.tier_of(triple.freq) {
            Tier::Low => self.low.insert(pair, triple),
            Tier::High => self.high.insert(pair, triple),
        }
    }

    pub fn lookup(&self, pair: &Pair<S>) -> Result<Triple, QueueError> {
        match self.tier_of_pair(pair).ok_or(QueueError::Absent)? {
            Tier::Low => self.low.lookup(pair),
            Tier::High => self.high.lookup(pair),
        }
    }

    /// Decrements `pair`, demoting it to the low tier when it crosses the
    /// boundary.
    ///
    /// # Errors
    ///
    /// [`QueueError::CapacityExceeded`] if a demotion is due but the low tier
    /// is full; neither tier is modified in that case.
    pub fn decrease(&mut self, pair: &Pair<S>) -> Result<TierDecrease, QueueError> {
        match self.tier_of_pair(pair).ok_or(QueueError::Absent)? {
            Tier::Low => Ok(match self.low.decrease(pair)? {
                Decrease::Decremented { freq } => TierDecrease::Decremented { freq },
                Decrease::Evicted(triple) => TierDecrease::Evicted(triple),
            }),
            Tier::High => {
                let freq = self.high.lookup(pair)?.freq;
                if freq - 1 < self.high.min_freq() && self.low.len() >= self.low.max_size() {
                    return Err(QueueError::CapacityExceeded {
                        max_size: self.low.max_size(),
                    });
                }
                match self.high.decrease(pair)? {
                    Decrease::Decremented { freq } => Ok(TierDecrease::Decremented { freq }),
                    Decrease::Evicted(triple) => {
                        self.low.insert(*pair, triple)?;
                        debug!(
                            freq = triple.freq,
                            low_len = self.low.len(),
                            "demoted pair to low-frequency tier"
                        );
                        Ok(TierDecrease::Demoted { freq: triple.freq })
                    },
                }
            },
        }
    }

    pub fn remove(&mut self, pair: &Pair<S>) -> Result<Triple, QueueError> {
        match self.tier_of_pair(pair).ok_or(QueueError::Absent)? {
            Tier::Low => self.low.remove(pair),
            Tier::High => self.high.remove(pair),
        }
    }

    /// Most frequent pair across both tiers.
    pub fn max(&self) -> Result<Pair<S>, QueueError> {
        if self.high.is_empty() {
            self.low.max()
        } else {
            self.high.max()
        }
    }

    /// Least frequent pair across both tiers.
    pub fn min(&self) -> Result<Pair<S>, QueueError> {
        if self.low.is_empty() {
            self.high.min()
        } else {
            self.low.min()
        }
    }

    pub fn clear(&mut self) {
        self.high.clear();
        self.low.clear();
    }

    /// Validates both tiers and their disjointness (debug-only).
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), crate::error::InvariantError> {
        use crate::error::InvariantError;

        self.high.check_invariants()?;
        self.low.check_invariants()?;
        if self.high.min_freq() != self.low.max_freq() + 1 {
            return Err(InvariantError::new(format!(
                "tier boundary broken: high starts at {}, low ends at {}",
                self.high.min_freq(),
                self.low.max_freq()
            )));
        }
        if self.high.iter().any(|(pair, _)| self.low.contains(&pair)) {
            return Err(InvariantError::new("a pair is tracked by both tiers"));
        }
        Ok(())
    }
}
