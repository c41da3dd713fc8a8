//! Low-frequency pair queue.
//!
//! Tracks pairs whose frequency lies in `[1, max_freq]`. Frequencies are
//! bounded, so the queue indexes a bucket array directly by frequency and
//! threads the non-empty buckets together in a skip list. Finding a pair's
//! bucket is an array access; finding the extremes is reading the skip list's
//! ends.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          LfQueue<S> Layout                              │
//! │                                                                         │
//! │  index: FxHashMap<Pair, Location { freq, offset }>                      │
//! │                                                                         │
//! │  slots (indexed by frequency, slot 0 unused):                           │
//! │                                                                         │
//! │   freq:    1         2         3         4         5                    │
//! │         ┌──────┐  ┌──────┐  ┌──────┐  ┌──────┐  ┌──────┐                │
//! │         │[a,b] │  │      │  │      │  │[c,d] │  │      │                │
//! │         │[e,f] │  │empty │  │empty │  │      │  │empty │                │
//! │         └──┬───┘  └──────┘  └──────┘  └──┬───┘  └──────┘                │
//! │            │        next (skips gaps)    │                              │
//! │            └────────────────────────────►│                              │
//! │            ◄─────────────────────────────┘ prev                         │
//! │                                                                         │
//! │   lowest = Some(1)                     highest = Some(4)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decrease Flow
//! ─────────────
//!
//!   decrease((c,d)) with F = 4:
//!     1. below = slots[4].prev            (= 1)
//!     2. swap_remove from bucket 4, re-point the index of the moved node
//!     3. bucket 4 emptied: unsplice it    (1.next = None, highest = 1)
//!     4. bucket 3 empty: splice between below (1) and below.next (None)
//!     5. push into bucket 3, record the new location in the index
//!
//! Every step is an array access or a fixed number of link updates.
//!
//! ## Operations
//!
//! | Operation  | Time   | Notes                                          |
//! |------------|--------|------------------------------------------------|
//! | `lookup`   | O(1)   |                                                |
//! | `min/max`  | O(1)   | Skip list ends                                 |
//! | `head`     | O(1)   | First pair of the lowest bucket                |
//! | `decrease` | O(1)   | Evicts at frequency 0; never scans             |
//! | `remove`   | O(1)   | No compaction pass                             |
//! | `insert`   | O(1)*  | *A new extreme or a non-empty `freq - 1` links |
//! |            |        | directly; any other new bucket scans down to   |
//! |            |        | its neighbour, at most `max_freq` slots        |
//!
//! ## Example Usage
//!
//! ```
//! use pairkit::pair::{Decrease, Pair, Triple};
//! use pairkit::queue::LfQueue;
//!
//! let mut queue = LfQueue::new(10, 5);
//! let ab = Pair::new('a', 'b');
//! let cd = Pair::new('c', 'd');
//! queue.insert(ab, Triple::new(0, 0, 2)).unwrap();
//! queue.insert(cd, Triple::new(0, 0, 4)).unwrap();
//! assert_eq!(queue.min(), Ok(ab));
//! assert_eq!(queue.max(), Ok(cd));
//!
//! assert_eq!(queue.decrease(&cd), Ok(Decrease::Decremented { freq: 3 }));
//! assert_eq!(queue.max(), Ok(cd));
//! ```

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::{ConfigError, QueueError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::QueueMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::QueueMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsSnapshotProvider, QueueMetricsReadRecorder, QueueMetricsRecorder,
};
use crate::pair::{Decrease, Pair, PairNode, Symbol, Triple};
use crate::traits::PairQueue;

/// One entry of the frequency array.
///
/// `prev`/`next` are only meaningful while `nodes` is non-empty; an empty
/// slot is unlinked and both are `None`.
#[derive(Debug)]
struct FreqSlot<S> {
    prev: Option<usize>,
    next: Option<usize>,
    nodes: Vec<PairNode<S>>,
}

impl<S> FreqSlot<S> {
    fn new() -> Self {
        Self {
            prev: None,
            next: None,
            nodes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Location {
    freq: usize,
    offset: usize,
}

/// Queue of pairs with frequency in `[1, max_freq]`.
///
/// A `Default` queue is inert, with the same contract as
/// [`HfQueue::default`](crate::queue::HfQueue).
#[derive(Debug)]
pub struct LfQueue<S> {
    slots: Vec<FreqSlot<S>>,
    index: FxHashMap<Pair<S>, Location>,
    lowest: Option<usize>,
    highest: Option<usize>,
    len: usize,
    max_size: usize,
    max_freq: usize,
    #[cfg(feature = "metrics")]
    metrics: QueueMetrics,
}

impl<S> LfQueue<S>
where
    S: Symbol,
{
    /// Creates a queue holding at most `max_size` pairs with frequency in
    /// `[1, max_freq]`.
    ///
    /// # Panics
    ///
    /// Panics if `max_size == 0` or `max_freq == 0`.
    pub fn new(max_size: usize, max_freq: usize) -> Self {
        match Self::try_new(max_size, max_freq) {
            Ok(queue) => queue,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible constructor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_size == 0` or `max_freq == 0`.
    pub fn try_new(max_size: usize, max_freq: usize) -> Result<Self, ConfigError> {
        if max_size == 0 {
            return Err(ConfigError::new("max_size must be greater than zero"));
        }
        if max_freq == 0 {
            return Err(ConfigError::new("max_freq must be greater than zero"));
        }
        Ok(Self {
            slots: (0..=max_freq).map(|_| FreqSlot::new()).collect(),
            index: FxHashMap::with_capacity_and_hasher(max_size, Default::default()),
            lowest: None,
            highest: None,
            len: 0,
            max_size,
            max_freq,
            #[cfg(feature = "metrics")]
            metrics: QueueMetrics::default(),
        })
    }

    /// Returns `false` for a default-constructed queue.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.max_size > 0
    }

    #[inline]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Inclusive frequency ceiling.
    #[inline]
    pub fn max_freq(&self) -> usize {
        self.max_freq
    }

    /// # Panics
    ///
    /// Panics on a default-constructed queue.
    pub fn len(&self) -> usize {
        self.assert_usable();
        self.len
    }

    /// # Panics
    ///
    /// Panics on a default-constructed queue.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// # Panics
    ///
    /// Panics on a default-constructed queue.
    #[inline]
    pub fn contains(&self, pair: &Pair<S>) -> bool {
        self.assert_usable();
        self.index.contains_key(pair)
    }

    /// Number of pairs at exactly `freq`.
    pub fn bucket_len(&self, freq: usize) -> usize {
        self.slots.get(freq).map_or(0, |slot| slot.nodes.len())
    }

    #[inline]
    pub fn lookup(&self, pair: &Pair<S>) -> Result<Triple, QueueError> {
        self.ensure_usable()?;
        #[cfg(feature = "metrics")]
        (&self.metrics).record_lookup_call();
        let loc = *self.index.get(pair).ok_or(QueueError::Absent)?;
        self.slots
            .get(loc.freq)
            .and_then(|slot| slot.nodes.get(loc.offset))
            .map(|node| node.triple)
            .ok_or(QueueError::Absent)
    }

    /// First pair of the lowest non-empty bucket.
    pub fn head(&self) -> Result<Pair<S>, QueueError> {
        self.ensure_usable()?;
        #[cfg(feature = "metrics")]
        (&self.metrics).record_extremum_call();
        self.first_in(self.lowest)
    }

    /// Pair with the smallest frequency; the same pair as [`head`](Self::head).
    pub fn min(&self) -> Result<Pair<S>, QueueError> {
        self.head()
    }

    /// Pair with the largest frequency.
    pub fn max(&self) -> Result<Pair<S>, QueueError> {
        self.ensure_usable()?;
        #[cfg(feature = "metrics")]
        (&self.metrics).record_extremum_call();
        self.first_in(self.highest)
    }

    /// Iterates `(pair, triple)` from lowest to highest frequency.
    pub fn iter(&self) -> impl Iterator<Item = (Pair<S>, Triple)> + '_ {
        std::iter::successors(self.lowest, move |&freq| self.slots[freq].next).flat_map(
            move |freq| {
                self.slots[freq]
                    .nodes
                    .iter()
                    .map(|node| (node.pair, node.triple))
            },
        )
    }

    /// Starts tracking `pair`.
    ///
    /// # Errors
    ///
    /// - [`QueueError::FrequencyOutOfRange`] unless `1 <= triple.freq <= max_freq`
    /// - [`QueueError::Duplicate`] if `pair` is already tracked
    /// - [`QueueError::CapacityExceeded`] if the queue is full
    pub fn insert(&mut self, pair: Pair<S>, triple: Triple) -> Result<(), QueueError> {
        self.ensure_usable()?;
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();
        if let Err(err) = self.check_insert(&pair, triple.freq) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_rejected();
            return Err(err);
        }

        let freq = triple.freq;
        if self.slots[freq].nodes.is_empty() {
            self.splice(freq);
        }
        let loc = self.push_node(PairNode::new(pair, triple));
        self.index.insert(pair, loc);
        self.len += 1;
        trace!(freq, len = self.len, "inserted low-frequency pair");
        Ok(())
    }

    /// Decrements `pair`'s frequency by one, evicting it at zero.
    pub fn decrease(&mut self, pair: &Pair<S>) -> Result<Decrease, QueueError> {
        self.ensure_usable()?;
        let loc = *self.index.get(pair).ok_or(QueueError::Absent)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_decrease_call();

        let below = self.slots[loc.freq].prev;
        let mut node = self.take_node(loc).ok_or(QueueError::Absent)?;
        let new_freq = loc.freq - 1;
        node.triple.freq = new_freq;

        if new_freq == 0 {
            self.index.remove(pair);
            self.len -= 1;
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();
            trace!(len = self.len, "evicted pair at frequency 0");
            return Ok(Decrease::Evicted(node.triple));
        }

        if self.slots[new_freq].nodes.is_empty() {
            // Nothing lies strictly between `below` and `new_freq`, so the new
            // bucket goes right after `below`.
            let above = match below {
                Some(b) => self.slots[b].next,
                None => self.lowest,
            };
            self.link_between(below, above, new_freq);
        }
        let new_loc = self.push_node(node);
        if let Some(entry) = self.index.get_mut(pair) {
            *entry = new_loc;
        }
        Ok(Decrease::Decremented { freq: new_freq })
    }

    /// Stops tracking `pair` and returns its triple.
    pub fn remove(&mut self, pair: &Pair<S>) -> Result<Triple, QueueError> {
        self.ensure_usable()?;
        let loc = *self.index.get(pair).ok_or(QueueError::Absent)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();
        let node = self.take_node(loc).ok_or(QueueError::Absent)?;
        self.index.remove(pair);
        self.len -= 1;
        Ok(node.triple)
    }

    /// Drops every pair, keeping the configuration.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.prev = None;
            slot.next = None;
            slot.nodes.clear();
        }
        self.index.clear();
        self.lowest = None;
        self.highest = None;
        self.len = 0;
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> QueueMetricsSnapshot {
        QueueMetricsSnapshot {
            insert_calls: self.metrics.insert_calls,
            insert_rejected: self.metrics.insert_rejected,
            lookup_calls: self.metrics.lookup_calls.get(),
            extremum_calls: self.metrics.extremum_calls.get(),
            decrease_calls: self.metrics.decrease_calls,
            evictions: self.metrics.evictions,
            remove_calls: self.metrics.remove_calls,
            compactions: self.metrics.compactions,
            relocated_nodes: self.metrics.relocated_nodes,
            len: self.len,
            max_size: self.max_size,
        }
    }

    /// Validates internal invariants (debug-only).
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), crate::error::InvariantError> {
        use crate::error::InvariantError;

        if self.max_size == 0 {
            return Ok(());
        }
        if self.index.len() != self.len {
            return Err(InvariantError::new(format!(
                "index holds {} pairs but len is {}",
                self.index.len(),
                self.len
            )));
        }
        if self.len > self.max_size {
            return Err(InvariantError::new(format!(
                "len {} exceeds max_size {}",
                self.len, self.max_size
            )));
        }
        if !self.slots[0].nodes.is_empty() {
            return Err(InvariantError::new("bucket 0 is not empty"));
        }

        let mut linked = 0usize;
        let mut stored = 0usize;
        let mut prev: Option<usize> = None;
        let mut cursor = self.lowest;
        while let Some(freq) = cursor {
            let slot = self.slots.get(freq).ok_or_else(|| {
                InvariantError::new(format!("skip list points at missing slot {}", freq))
            })?;
            if slot.nodes.is_empty() {
                return Err(InvariantError::new(format!(
                    "empty bucket {} is linked",
                    freq
                )));
            }
            if slot.prev != prev {
                return Err(InvariantError::new(format!(
                    "bucket {} prev is {:?}, expected {:?}",
                    freq, slot.prev, prev
                )));
            }
            if prev.is_some_and(|p| p >= freq) {
                return Err(InvariantError::new(format!(
                    "skip list not ascending at {}",
                    freq
                )));
            }
            for (offset, node) in slot.nodes.iter().enumerate() {
                if node.freq() != freq {
                    return Err(InvariantError::new(format!(
                        "pair at frequency {} stored in bucket {}",
                        node.freq(),
                        freq
                    )));
                }
                if self.index.get(&node.pair) != Some(&Location { freq, offset }) {
                    return Err(InvariantError::new(format!(
                        "index does not point at bucket {} offset {}",
                        freq, offset
                    )));
                }
            }
            linked += 1;
            stored += slot.nodes.len();
            prev = Some(freq);
            cursor = slot.next;
            if linked > self.max_freq {
                return Err(InvariantError::new("skip list has a cycle"));
            }
        }
        if prev != self.highest {
            return Err(InvariantError::new(format!(
                "skip list ends at {:?} but highest is {:?}",
                prev, self.highest
            )));
        }
        let non_empty = self.slots.iter().filter(|s| !s.nodes.is_empty()).count();
        if non_empty != linked {
            return Err(InvariantError::new(format!(
                "{} non-empty buckets but {} linked",
                non_empty, linked
            )));
        }
        if stored != self.len {
            return Err(InvariantError::new(format!(
                "buckets hold {} pairs but len is {}",
                stored, self.len
            )));
        }
        Ok(())
    }

    fn check_insert(&self, pair: &Pair<S>, freq: usize) -> Result<(), QueueError> {
        if freq == 0 || freq > self.max_freq {
            return Err(QueueError::FrequencyOutOfRange {
                freq,
                min: 1,
                max: self.max_freq,
            });
        }
        if self.index.contains_key(pair) {
            return Err(QueueError::Duplicate);
        }
        if self.len >= self.max_size {
            return Err(QueueError::CapacityExceeded {
                max_size: self.max_size,
            });
        }
        Ok(())
    }

    fn first_in(&self, freq: Option<usize>) -> Result<Pair<S>, QueueError> {
        freq.and_then(|f| self.slots[f].nodes.first())
            .map(|node| node.pair)
            .ok_or(QueueError::Empty)
    }

    fn push_node(&mut self, node: PairNode<S>) -> Location {
        let freq = node.freq();
        let bucket = &mut self.slots[freq].nodes;
        bucket.push(node);
        Location {
            freq,
            offset: bucket.len() - 1,
        }
    }

    /// Takes the node at `loc` out of its bucket. The bucket's tail fills the
    /// hole and its index entry is re-pointed; an emptied bucket is unlinked.
    fn take_node(&mut self, loc: Location) -> Option<PairNode<S>> {
        let bucket = &mut self.slots.get_mut(loc.freq)?.nodes;
        if loc.offset >= bucket.len() {
            return None;
        }
        let node = bucket.swap_remove(loc.offset);
        if let Some(moved) = bucket.get(loc.offset) {
            if let Some(entry) = self.index.get_mut(&moved.pair) {
                entry.offset = loc.offset;
            }
        }
        if bucket.is_empty() {
            self.unsplice(loc.freq);
        }
        Some(node)
    }

    /// Links the empty bucket `freq` into the skip list.
    fn splice(&mut self, freq: usize) {
        match (self.lowest, self.highest) {
            (Some(lowest), Some(highest)) => {
                if freq > highest {
                    self.link_between(Some(highest), None, freq);
                } else if freq < lowest {
                    self.link_between(None, Some(lowest), freq);
                } else {
                    let below = (lowest..freq)
                        .rev()
                        .find(|&f| !self.slots[f].nodes.is_empty());
                    let above = below.and_then(|b| self.slots[b].next);
                    self.link_between(below, above, freq);
                }
            },
            _ => self.link_between(None, None, freq),
        }
    }

    fn link_between(&mut self, below: Option<usize>, above: Option<usize>, freq: usize) {
        self.slots[freq].prev = below;
        self.slots[freq].next = above;
        match below {
            Some(b) => self.slots[b].next = Some(freq),
            None => self.lowest = Some(freq),
        }
        match above {
            Some(a) => self.slots[a].prev = Some(freq),
            None => self.highest = Some(freq),
        }
    }

    fn unsplice(&mut self, freq: usize) {
        let prev = self.slots[freq].prev.take();
        let next = self.slots[freq].next.take();
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.lowest = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.highest = prev,
        }
    }

    #[inline]
    fn ensure_usable(&self) -> Result<(), QueueError> {
        if self.max_size == 0 {
            return Err(QueueError::Uninitialized);
        }
        Ok(())
    }

    #[inline]
    fn assert_usable(&self) {
        assert!(
            self.max_size > 0,
            "LfQueue used before construction with a capacity"
        );
    }
}

impl<S> Default for LfQueue<S> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: FxHashMap::default(),
            lowest: None,
            highest: None,
            len: 0,
            max_size: 0,
            max_freq: 0,
            #[cfg(feature = "metrics")]
            metrics: QueueMetrics::default(),
        }
    }
}

impl<S> PairQueue<S> for LfQueue<S>
where
    S: Symbol,
{
    fn insert(&mut self, pair: Pair<S>, triple: Triple) -> Result<(), QueueError> {
        LfQueue::insert(self, pair, triple)
    }

    fn lookup(&self, pair: &Pair<S>) -> Result<Triple, QueueError> {
        LfQueue::lookup(self, pair)
    }

    fn decrease(&mut self, pair: &Pair<S>) -> Result<Decrease, QueueError> {
        LfQueue::decrease(self, pair)
    }

    fn remove(&mut self, pair: &Pair<S>) -> Result<Triple, QueueError> {
        LfQueue::remove(self, pair)
    }

    fn contains(&self, pair: &Pair<S>) -> bool {
        LfQueue::contains(self, pair)
    }

    fn min(&self) -> Result<Pair<S>, QueueError> {
        LfQueue::min(self)
    }

    fn max(&self) -> Result<Pair<S>, QueueError> {
        LfQueue::max(self)
    }

    fn len(&self) -> usize {
        LfQueue::len(self)
    }

    fn max_size(&self) -> usize {
        self.max_size
    }

    fn freq_range(&self) -> (usize, usize) {
        (1, self.max_freq)
    }
}

#[cfg(feature = "metrics")]
impl<S> MetricsSnapshotProvider<QueueMetricsSnapshot> for LfQueue<S>
where
    S: Symbol,
{
    fn snapshot(&self) -> QueueMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(a: u8, b: u8) -> Pair<u8> {
        Pair::new(a, b)
    }

    fn t(freq: usize) -> Triple {
        Triple::new(freq + 1, freq + 2, freq)
    }

    fn freqs(queue: &LfQueue<u8>) -> Vec<usize> {
        queue.iter().map(|(_, triple)| triple.freq).collect()
    }

    #[test]
    fn lf_queue_min_max_follow_decrease() {
        let mut queue = LfQueue::new(10, 5);
        let ab = p(b'a', b'b');
        let cd = p(b'c', b'd');
        queue.insert(ab, t(2)).unwrap();
        queue.insert(cd, t(4)).unwrap();
        assert_eq!(queue.min(), Ok(ab));
        assert_eq!(queue.max(), Ok(cd));

        assert_eq!(queue.decrease(&cd), Ok(Decrease::Decremented { freq: 3 }));
        assert_eq!(queue.min(), Ok(ab));
        assert_eq!(queue.max(), Ok(cd));
        assert_eq!(queue.lookup(&cd), Ok(t(4).with_freq(3)));
        queue.check_invariants().unwrap();
    }

    #[test]
    fn lf_queue_splices_buckets_in_order() {
        let mut queue = LfQueue::new(10, 8);
        queue.insert(p(1, 0), t(5)).unwrap();
        queue.insert(p(2, 0), t(2)).unwrap();
        queue.insert(p(3, 0), t(8)).unwrap();
        queue.insert(p(4, 0), t(3)).unwrap();
        queue.insert(p(5, 0), t(6)).unwrap();
        queue.insert(p(6, 0), t(1)).unwrap();
        assert_eq!(freqs(&queue), vec![1, 2, 3, 5, 6, 8]);
        assert_eq!(queue.head(), Ok(p(6, 0)));
        assert_eq!(queue.max(), Ok(p(3, 0)));
        queue.check_invariants().unwrap();
    }

    #[test]
    fn lf_queue_decrease_into_gap() {
        let mut queue = LfQueue::new(10, 8);
        queue.insert(p(1, 0), t(2)).unwrap();
        queue.insert(p(2, 0), t(7)).unwrap();
        queue.insert(p(3, 0), t(7)).unwrap();

        queue.decrease(&p(2, 0)).unwrap();
        assert_eq!(freqs(&queue), vec![2, 6, 7]);
        queue.check_invariants().unwrap();

        queue.decrease(&p(3, 0)).unwrap();
        assert_eq!(freqs(&queue), vec![2, 6, 6]);
        assert_eq!(queue.bucket_len(7), 0);
        queue.check_invariants().unwrap();
    }

    #[test]
    fn lf_queue_decrease_below_lowest() {
        let mut queue = LfQueue::new(10, 8);
        queue.insert(p(1, 0), t(4)).unwrap();
        queue.insert(p(2, 0), t(6)).unwrap();
        queue.decrease(&p(1, 0)).unwrap();
        assert_eq!(queue.head(), Ok(p(1, 0)));
        assert_eq!(freqs(&queue), vec![3, 6]);
        queue.check_invariants().unwrap();
    }

    #[test]
    fn lf_queue_evicts_at_zero() {
        let mut queue = LfQueue::new(4, 3);
        queue.insert(p(1, 1), Triple::new(9, 8, 1)).unwrap();
        assert_eq!(
            queue.decrease(&p(1, 1)),
            Ok(Decrease::Evicted(Triple::new(9, 8, 0)))
        );
        assert!(!queue.contains(&p(1, 1)));
        assert!(queue.is_empty());
        assert_eq!(queue.min(), Err(QueueError::Empty));
        queue.check_invariants().unwrap();
    }

    #[test]
    fn lf_queue_remove_repoints_moved_node() {
        let mut queue = LfQueue::new(10, 4);
        queue.insert(p(1, 0), t(2)).unwrap();
        queue.insert(p(2, 0), t(2)).unwrap();
        queue.insert(p(3, 0), t(2)).unwrap();

        assert_eq!(queue.remove(&p(1, 0)), Ok(t(2)));
        assert_eq!(queue.lookup(&p(3, 0)), Ok(t(2)));
        assert_eq!(queue.lookup(&p(2, 0)), Ok(t(2)));
        assert_eq!(queue.bucket_len(2), 2);
        queue.check_invariants().unwrap();

        queue.decrease(&p(3, 0)).unwrap();
        assert_eq!(queue.lookup(&p(2, 0)), Ok(t(2)));
        queue.check_invariants().unwrap();
    }

    #[test]
    fn lf_queue_remove_unsplices_middle_bucket() {
        let mut queue = LfQueue::new(10, 6);
        queue.insert(p(1, 0), t(1)).unwrap();
        queue.insert(p(2, 0), t(3)).unwrap();
        queue.insert(p(3, 0), t(6)).unwrap();
        queue.remove(&p(2, 0)).unwrap();
        assert_eq!(freqs(&queue), vec![1, 6]);
        queue.check_invariants().unwrap();

        queue.remove(&p(3, 0)).unwrap();
        assert_eq!(queue.max(), Ok(p(1, 0)));
        queue.remove(&p(1, 0)).unwrap();
        assert_eq!(queue.max(), Err(QueueError::Empty));
        queue.check_invariants().unwrap();
    }

    #[test]
    fn lf_queue_rejects_invalid_inserts_without_mutation() {
        let mut queue = LfQueue::new(2, 5);
        assert_eq!(
            queue.insert(p(1, 1), t(0)),
            Err(QueueError::FrequencyOutOfRange {
                freq: 0,
                min: 1,
                max: 5
            })
        );
        assert_eq!(
            queue.insert(p(1, 1), t(6)),
            Err(QueueError::FrequencyOutOfRange {
                freq: 6,
                min: 1,
                max: 5
            })
        );
        queue.insert(p(1, 1), t(3)).unwrap();
        assert_eq!(queue.insert(p(1, 1), t(2)), Err(QueueError::Duplicate));
        queue.insert(p(2, 2), t(1)).unwrap();
        assert_eq!(
            queue.insert(p(3, 3), t(1)),
            Err(QueueError::CapacityExceeded { max_size: 2 })
        );
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.lookup(&p(1, 1)), Ok(t(3)));
        assert!(!queue.contains(&p(3, 3)));
        queue.check_invariants().unwrap();
    }

    #[test]
    fn lf_queue_default_is_inert() {
        let mut queue: LfQueue<u8> = LfQueue::default();
        assert!(!queue.is_usable());
        assert_eq!(queue.insert(p(0, 0), t(1)), Err(QueueError::Uninitialized));
        assert_eq!(queue.lookup(&p(0, 0)), Err(QueueError::Uninitialized));
        assert_eq!(queue.head(), Err(QueueError::Uninitialized));
        assert_eq!(queue.min(), Err(QueueError::Uninitialized));
        assert_eq!(queue.max(), Err(QueueError::Uninitialized));
        assert_eq!(queue.decrease(&p(0, 0)), Err(QueueError::Uninitialized));
        assert_eq!(queue.remove(&p(0, 0)), Err(QueueError::Uninitialized));
    }

    #[test]
    #[should_panic(expected = "LfQueue used before construction")]
    fn lf_queue_default_contains_panics() {
        let queue: LfQueue<u8> = LfQueue::default();
        queue.contains(&p(0, 0));
    }

    #[test]
    #[should_panic(expected = "LfQueue used before construction")]
    fn lf_queue_default_len_panics() {
        let queue: LfQueue<u8> = LfQueue::default();
        let _ = queue.len();
    }

    #[test]
    fn lf_queue_try_new_validates() {
        assert!(LfQueue::<u8>::try_new(0, 4).is_err());
        let err = LfQueue::<u8>::try_new(4, 0).unwrap_err();
        assert!(err.message().contains("max_freq"));
        let queue = LfQueue::<u8>::try_new(4, 1).unwrap();
        assert_eq!(queue.max_freq(), 1);
    }

    #[test]
    fn lf_queue_clear_keeps_configuration() {
        let mut queue = LfQueue::new(4, 3);
        queue.insert(p(1, 1), t(3)).unwrap();
        queue.insert(p(2, 1), t(1)).unwrap();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.head(), Err(QueueError::Empty));
        queue.insert(p(1, 1), t(2)).unwrap();
        assert_eq!(queue.max(), Ok(p(1, 1)));
        queue.check_invariants().unwrap();
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn lf_queue_metrics_snapshot() {
        let mut queue = LfQueue::new(4, 3);
        queue.insert(p(1, 1), t(1)).unwrap();
        let _ = queue.insert(p(2, 2), t(9));
        let _ = queue.head();
        queue.decrease(&p(1, 1)).unwrap();

        let snapshot = queue.metrics_snapshot();
        assert_eq!(snapshot.insert_calls, 2);
        assert_eq!(snapshot.insert_rejected, 1);
        assert_eq!(snapshot.extremum_calls, 1);
        assert_eq!(snapshot.evictions, 1);
        assert_eq!(snapshot.compactions, 0);
        assert_eq!(snapshot.len, 0);
    }
}
