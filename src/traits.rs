//! # Pair Queue Trait
//!
//! Both frequency tiers expose the same operation set so a driver can be
//! written once against [`PairQueue`]. The tiers differ in which frequencies
//! they accept and in how they keep extremal queries O(1):
//!
//! ```text
//!                 ┌─────────────────────────────────────────────┐
//!                 │               PairQueue<S>                  │
//!                 │                                             │
//!                 │  insert(&mut, Pair, Triple)  → Result<()>   │
//!                 │  lookup(&, &Pair)            → Result<Tri>  │
//!                 │  decrease(&mut, &Pair)       → Result<Dec>  │
//!                 │  remove(&mut, &Pair)         → Result<Tri>  │
//!                 │  contains(&, &Pair)          → bool         │
//!                 │  min() / max()               → Result<Pair> │
//!                 │  len() / max_size()          → usize        │
//!                 │  freq_range()                → (min, max)   │
//!                 └──────────────────────┬──────────────────────┘
//!                                        │
//!                 ┌──────────────────────┴──────────────────────┐
//!                 ▼                                             ▼
//!   ┌──────────────────────────────┐          ┌──────────────────────────────┐
//!   │  HfQueue: F >= min_freq      │          │  LfQueue: 1 <= F <= max_freq │
//!   │  frequency-ordered list,     │          │  bucket per frequency,       │
//!   │  compacts on removal         │          │  skip list over buckets      │
//!   └──────────────────────────────┘          └──────────────────────────────┘
//! ```
//!
//! Every `Err` is a [`QueueError`] contract violation; the queue is left
//! unchanged when one is returned.
//!
//! ## Example
//!
//! ```
//! use pairkit::pair::{Pair, Triple};
//! use pairkit::queue::{HfQueue, LfQueue};
//! use pairkit::traits::PairQueue;
//!
//! fn drain_max<Q: PairQueue<char>>(queue: &mut Q) -> Vec<Pair<char>> {
//!     let mut out = Vec::new();
//!     while let Ok(pair) = queue.max() {
//!         queue.remove(&pair).unwrap();
//!         out.push(pair);
//!     }
//!     out
//! }
//!
//! let mut high = HfQueue::new(8, 2);
//! high.insert(Pair::new('a', 'b'), Triple::new(0, 0, 3)).unwrap();
//! high.insert(Pair::new('c', 'd'), Triple::new(0, 0, 9)).unwrap();
//! assert_eq!(drain_max(&mut high), vec![Pair::new('c', 'd'), Pair::new('a', 'b')]);
//!
//! let mut low = LfQueue::new(8, 4);
//! low.insert(Pair::new('x', 'y'), Triple::new(0, 0, 1)).unwrap();
//! assert_eq!(drain_max(&mut low), vec![Pair::new('x', 'y')]);
//! ```

use crate::error::QueueError;
use crate::pair::{Decrease, Pair, Triple};

/// Common operations of a pair-frequency queue tier.
pub trait PairQueue<S> {
    /// Starts tracking `pair`.
    ///
    /// Fails with `Duplicate`, `FrequencyOutOfRange` or `CapacityExceeded`.
    fn insert(&mut self, pair: Pair<S>, triple: Triple) -> Result<(), QueueError>;

    /// Returns the stored triple for `pair`.
    fn lookup(&self, pair: &Pair<S>) -> Result<Triple, QueueError>;

    /// Decrements `pair`'s frequency by one, evicting it when it leaves the
    /// tier's range.
    fn decrease(&mut self, pair: &Pair<S>) -> Result<Decrease, QueueError>;

    /// Stops tracking `pair` and returns its last triple.
    fn remove(&mut self, pair: &Pair<S>) -> Result<Triple, QueueError>;

    /// Returns `true` if `pair` is tracked.
    fn contains(&self, pair: &Pair<S>) -> bool;

    /// A pair whose frequency is `<=` every other tracked pair's.
    fn min(&self) -> Result<Pair<S>, QueueError>;

    /// A pair whose frequency is `>=` every other tracked pair's.
    fn max(&self) -> Result<Pair<S>, QueueError>;

    /// Number of tracked pairs.
    fn len(&self) -> usize;

    /// Returns `true` if no pair is tracked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity.
    fn max_size(&self) -> usize;

    /// Inclusive range of frequencies this tier accepts.
    fn freq_range(&self) -> (usize, usize);
}
