//! High-frequency pair queue.
//!
//! Tracks pairs whose frequency is at least `min_freq`, with no upper bound.
//! Few distinct pairs live here, so a hash index over a compacting
//! array-backed list is enough: no per-frequency bucket array is needed.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                           HfQueue<S> Layout                              │
//! │                                                                          │
//! │  index: FxHashMap<Pair, SlotId>     list: IntrusiveList<PairNode>        │
//! │  ┌────────┬────────┐                (non-increasing frequency)           │
//! │  │ (a,b)  │ id_0   │──────►  front                                 back  │
//! │  │ (c,d)  │ id_3   │──────►  [id_0:9] ◄► [id_3:7] ◄► [id_1:7] ◄► [id_2:4]│
//! │  │ (e,f)  │ id_1   │           max                                 min   │
//! │  │ (g,h)  │ id_2   │                                                     │
//! │  └────────┴────────┘                                                     │
//! │                                                                          │
//! │  runs: FxHashMap<freq, Run { first, last }>                              │
//! │    9 → (id_0, id_0)    7 → (id_3, id_1)    4 → (id_2, id_2)              │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decrease Flow
//! ─────────────
//!
//!   decrease((c,d)) with F = 7:
//!     1. Detach id_3 from run 7 (run becomes (id_1, id_1))
//!     2. Move id_3 after run 7's old last (id_1)
//!     3. F = 6: id_3 now opens run 6 (created, or prepended to)
//!     4. If F < min_freq instead, unlink and evict
//!
//! Compaction Flow
//! ───────────────
//!
//!   After a removal, if live nodes < allocated slots / 2:
//!     1. The list squeezes its arena and rewrites its own links
//!     2. Run boundaries are translated through the relocation table
//!     3. The index is rewritten last, one entry per surviving pair
//!
//! ## Operations
//!
//! | Operation  | Time            | Notes                                    |
//! |------------|-----------------|------------------------------------------|
//! | `lookup`   | O(1)            |                                          |
//! | `min/max`  | O(1)            | Back/front of the ordered list           |
//! | `decrease` | O(1) amortized  | Evicts below `min_freq`                  |
//! | `remove`   | O(1) amortized  | May trigger compaction                   |
//! | `insert`   | O(1) / O(runs)  | O(1) for an existing frequency or a new  |
//! |            |                 | extreme, else walks the runs above it    |
//!
//! ## Example Usage
//!
//! ```
//! use pairkit::pair::{Decrease, Pair, Triple};
//! use pairkit::queue::HfQueue;
//!
//! let mut queue = HfQueue::new(10, 3);
//! let xy = Pair::new('x', 'y');
//! queue.insert(xy, Triple::new(0, 0, 5)).unwrap();
//! assert_eq!(queue.max(), Ok(xy));
//!
//! assert_eq!(queue.decrease(&xy), Ok(Decrease::Decremented { freq: 4 }));
//! assert_eq!(queue.decrease(&xy), Ok(Decrease::Decremented { freq: 3 }));
//! assert!(queue.decrease(&xy).unwrap().is_evicted());
//! assert!(!queue.contains(&xy));
//! ```

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
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

/// Contiguous stretch of the list holding one frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    first: SlotId,
    last: SlotId,
}

/// Queue of pairs with frequency `>= min_freq`.
///
/// A `Default` queue is inert: it has no capacity, every fallible operation
/// returns [`QueueError::Uninitialized`] and [`contains`](Self::contains) /
/// [`len`](Self::len) panic.
#[derive(Debug)]
pub struct HfQueue<S> {
    list: IntrusiveList<PairNode<S>>,
    runs: FxHashMap<usize, Run>,
    index: FxHashMap<Pair<S>, SlotId>,
    max_size: usize,
    min_freq: usize,
    #[cfg(feature = "metrics")]
    metrics: QueueMetrics,
}

impl<S> HfQueue<S>
where
    S: Symbol,
{
    /// Creates a queue holding at most `max_size` pairs with frequency at
    /// least `min_freq`.
    ///
    /// # Panics
    ///
    /// Panics if `max_size == 0` or `min_freq <= 1`.
    pub fn new(max_size: usize, min_freq: usize) -> Self {
        match Self::try_new(max_size, min_freq) {
            Ok(queue) => queue,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible constructor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_size == 0` or `min_freq <= 1`.
    pub fn try_new(max_size: usize, min_freq: usize) -> Result<Self, ConfigError> {
        if max_size == 0 {
            return Err(ConfigError::new("max_size must be greater than zero"));
        }
        if min_freq <= 1 {
            return Err(ConfigError::new(format!(
                "min_freq must be greater than 1, got {}",
                min_freq
            )));
        }
        Ok(Self {
            list: IntrusiveList::with_capacity(max_size),
            runs: FxHashMap::default(),
            index: FxHashMap::with_capacity_and_hasher(max_size, Default::default()),
            max_size,
            min_freq,
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

    /// Inclusive frequency floor.
    #[inline]
    pub fn min_freq(&self) -> usize {
        self.min_freq
    }

    /// Number of tracked pairs.
    ///
    /// # Panics
    ///
    /// Panics on a default-constructed queue.
    pub fn len(&self) -> usize {
        self.assert_usable();
        self.list.len()
    }

    /// # Panics
    ///
    /// Panics on a default-constructed queue.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `pair` is tracked.
    ///
    /// # Panics
    ///
    /// Panics on a default-constructed queue.
    #[inline]
    pub fn contains(&self, pair: &Pair<S>) -> bool {
        self.assert_usable();
        self.index.contains_key(pair)
    }

    /// Allocated node slots, live or hole.
    pub fn allocated_slots(&self) -> usize {
        self.list.allocated()
    }

    /// Returns the triple stored for `pair`.
    #[inline]
    pub fn lookup(&self, pair: &Pair<S>) -> Result<Triple, QueueError> {
        self.ensure_usable()?;
        #[cfg(feature = "metrics")]
        (&self.metrics).record_lookup_call();
        let id = *self.index.get(pair).ok_or(QueueError::Absent)?;
        self.list
            .get(id)
            .map(|node| node.triple)
            .ok_or(QueueError::Absent)
    }

    /// Pair with the smallest frequency.
    pub fn min(&self) -> Result<Pair<S>, QueueError> {
        self.ensure_usable()?;
        #[cfg(feature = "metrics")]
        (&self.metrics).record_extremum_call();
        self.list.back().map(|node| node.pair).ok_or(QueueError::Empty)
    }

    /// Pair with the largest frequency.
    pub fn max(&self) -> Result<Pair<S>, QueueError> {
        self.ensure_usable()?;
        #[cfg(feature = "metrics")]
        (&self.metrics).record_extremum_call();
        self.list.front().map(|node| node.pair).ok_or(QueueError::Empty)
    }

    /// Iterates `(pair, triple)` from highest to lowest frequency.
    pub fn iter(&self) -> impl Iterator<Item = (Pair<S>, Triple)> + '_ {
        self.list.iter().map(|node| (node.pair, node.triple))
    }

    /// Starts tracking `pair`.
    ///
    /// # Errors
    ///
    /// - [`QueueError::FrequencyOutOfRange`] if `triple.freq < min_freq`
    /// - [`QueueError::Duplicate`] if `pair` is already tracked
    /// - [`QueueError::CapacityExceeded`] if the queue is full
    ///
    /// The queue is unchanged when an error is returned.
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
        let node = PairNode::new(pair, triple);
        let id = match self.runs.get(&freq).copied() {
            Some(run) => {
                let id = self
                    .list
                    .insert_after(run.last, node)
                    .expect("run boundary missing from list");
                if let Some(run) = self.runs.get_mut(&freq) {
                    run.last = id;
                }
                id
            },
            None => {
                let id = match self.anchor_above(freq) {
                    Some(anchor) => self
                        .list
                        .insert_after(anchor, node)
                        .expect("run boundary missing from list"),
                    None => self.list.push_front(node),
                };
                self.runs.insert(freq, Run { first: id, last: id });
                id
            },
        };
        self.index.insert(pair, id);
        trace!(freq, len = self.list.len(), "inserted high-frequency pair");
        Ok(())
    }

    /// Decrements `pair`'s frequency by one.
    ///
    /// If the result drops below `min_freq`, the pair is removed in the same
    /// call and [`Decrease::Evicted`] carries its decremented triple.
    pub fn decrease(&mut self, pair: &Pair<S>) -> Result<Decrease, QueueError> {
        self.ensure_usable()?;
        let id = *self.index.get(pair).ok_or(QueueError::Absent)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_decrease_call();
        let freq = self
            .list
            .get(id)
            .map(PairNode::freq)
            .ok_or(QueueError::Absent)?;
        debug_assert!(freq > 0, "tracked pair with zero frequency");
        let new_freq = freq - 1;

        if new_freq < self.min_freq {
            let triple = self.remove_node(pair, id)?;
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();
            trace!(freq = new_freq, "evicted pair below min_freq");
            return Ok(Decrease::Evicted(triple.with_freq(new_freq)));
        }

        let boundary = self.detach_from_run(id, freq).ok_or(QueueError::Absent)?;
        if boundary != id {
            self.list.move_after(id, boundary);
        }
        if let Some(node) = self.list.get_mut(id) {
            node.triple.freq = new_freq;
        }
        // `id` now sits directly before the first node of any run below `freq`.
        match self.runs.get_mut(&new_freq) {
            Some(run) => run.first = id,
            None => {
                self.runs.insert(new_freq, Run { first: id, last: id });
            },
        }
        Ok(Decrease::Decremented { freq: new_freq })
    }

    /// Stops tracking `pair` and returns its triple.
    ///
    /// Compacts the node storage when fewer than half of its slots are live.
    pub fn remove(&mut self, pair: &Pair<S>) -> Result<Triple, QueueError> {
        self.ensure_usable()?;
        let id = *self.index.get(pair).ok_or(QueueError::Absent)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();
        self.remove_node(pair, id)
    }

    /// Squeezes holes out of the node storage and re-derives every handle.
    pub fn compact(&mut self) {
        let before = self.list.allocated();
        let relocation = self.list.compact();
        for run in self.runs.values_mut() {
            if let (Some(first), Some(last)) =
                (relocation.get(run.first), relocation.get(run.last))
            {
                *run = Run { first, last };
            }
        }
        // Commit: the index is rewritten only once the nodes have settled.
        for slot in self.index.values_mut() {
            if let Some(new) = relocation.get(*slot) {
                *slot = new;
            }
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_compaction(relocation.moved());
        debug!(
            live = self.list.len(),
            reclaimed = before - self.list.allocated(),
            moved = relocation.moved(),
            "compacted high-frequency queue"
        );
    }

    /// Drops every pair, keeping the configuration.
    pub fn clear(&mut self) {
        self.list.clear();
        self.runs.clear();
        self.index.clear();
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
            len: self.list.len(),
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
        self.list.debug_validate_invariants();
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} pairs but list holds {}",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.list.len() > self.max_size {
            return Err(InvariantError::new(format!(
                "len {} exceeds max_size {}",
                self.list.len(),
                self.max_size
            )));
        }

        let mut seen_runs = 0usize;
        let mut prev: Option<(SlotId, usize)> = None;
        for (id, node) in self.list.iter_entries() {
            let freq = node.freq();
            if freq < self.min_freq {
                return Err(InvariantError::new(format!(
                    "pair at frequency {} below min_freq {}",
                    freq, self.min_freq
                )));
            }
            if self.index.get(&node.pair) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "index entry for slot {} does not point back at it",
                    id.index()
                )));
            }
            let run = self.runs.get(&freq).ok_or_else(|| {
                InvariantError::new(format!("no run recorded for frequency {}", freq))
            })?;
            match prev {
                Some((_, prev_freq)) if prev_freq < freq => {
                    return Err(InvariantError::new(format!(
                        "list order broken: {} before {}",
                        prev_freq, freq
                    )));
                },
                Some((prev_id, prev_freq)) if prev_freq > freq => {
                    if self.runs.get(&prev_freq).map(|r| r.last) != Some(prev_id) {
                        return Err(InvariantError::new(format!(
                            "run {} does not end at its last node",
                            prev_freq
                        )));
                    }
                    if run.first != id {
                        return Err(InvariantError::new(format!(
                            "run {} does not start at its first node",
                            freq
                        )));
                    }
                    seen_runs += 1;
                },
                Some(_) => {},
                None => {
                    if run.first != id {
                        return Err(InvariantError::new(format!(
                            "run {} does not start at the list front",
                            freq
                        )));
                    }
                    seen_runs += 1;
                },
            }
            prev = Some((id, freq));
        }
        if let Some((last_id, last_freq)) = prev {
            if self.runs.get(&last_freq).map(|r| r.last) != Some(last_id) {
                return Err(InvariantError::new(format!(
                    "run {} does not end at the list back",
                    last_freq
                )));
            }
        }
        if seen_runs != self.runs.len() {
            return Err(InvariantError::new(format!(
                "{} runs recorded but {} present in the list",
                self.runs.len(),
                seen_runs
            )));
        }
        Ok(())
    }

    fn check_insert(&self, pair: &Pair<S>, freq: usize) -> Result<(), QueueError> {
        if freq < self.min_freq {
            return Err(QueueError::FrequencyOutOfRange {
                freq,
                min: self.min_freq,
                max: usize::MAX,
            });
        }
        if self.index.contains_key(pair) {
            return Err(QueueError::Duplicate);
        }
        if self.list.len() >= self.max_size {
            return Err(QueueError::CapacityExceeded {
                max_size: self.max_size,
            });
        }
        Ok(())
    }

    /// Last node of the lowest run whose frequency exceeds `freq`, or `None`
    /// if `freq` becomes the new maximum.
    fn anchor_above(&self, freq: usize) -> Option<SlotId> {
        let back = self.list.back()?;
        if back.freq() > freq {
            return self.list.back_id();
        }
        let mut anchor = None;
        let mut cursor = self.list.front_id();
        while let Some(id) = cursor {
            let run_freq = self.list.get(id)?.freq();
            if run_freq < freq {
                break;
            }
            let run = self.runs.get(&run_freq)?;
            anchor = Some(run.last);
            cursor = self.list.next_id(run.last);
        }
        anchor
    }

    /// Takes `id` out of its run and returns the run's last node as it was
    /// before the detach.
    fn detach_from_run(&mut self, id: SlotId, freq: usize) -> Option<SlotId> {
        let run = *self.runs.get(&freq)?;
        if run.first == id && run.last == id {
            self.runs.remove(&freq);
        } else if run.first == id {
            let next = self.list.next_id(id)?;
            self.runs.get_mut(&freq)?.first = next;
        } else if run.last == id {
            let prev = self.list.prev_id(id)?;
            self.runs.get_mut(&freq)?.last = prev;
        }
        Some(run.last)
    }

    fn remove_node(&mut self, pair: &Pair<S>, id: SlotId) -> Result<Triple, QueueError> {
        let freq = self
            .list
            .get(id)
            .map(PairNode::freq)
            .ok_or(QueueError::Absent)?;
        self.detach_from_run(id, freq).ok_or(QueueError::Absent)?;
        let node = self.list.remove(id).ok_or(QueueError::Absent)?;
        self.index.remove(pair);
        if self.list.len() < self.list.allocated() / 2 {
            self.compact();
        }
        Ok(node.triple)
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
            "HfQueue used before construction with a capacity"
        );
    }
}

impl<S> Default for HfQueue<S> {
    fn default() -> Self {
        Self {
            list: IntrusiveList::new(),
            runs: FxHashMap::default(),
            index: FxHashMap::default(),
            max_size: 0,
            min_freq: 0,
            #[cfg(feature = "metrics")]
            metrics: QueueMetrics::default(),
        }
    }
}

impl<S> PairQueue<S> for HfQueue<S>
where
    S: Symbol,
{
    fn insert(&mut self, pair: Pair<S>, triple: Triple) -> Result<(), QueueError> {
        HfQueue::insert(self, pair, triple)
    }

    fn lookup(&self, pair: &Pair<S>) -> Result<Triple, QueueError> {
        HfQueue::lookup(self, pair)
    }

    fn decrease(&mut self, pair: &Pair<S>) -> Result<Decrease, QueueError> {
        HfQueue::decrease(self, pair)
    }

    fn remove(&mut self, pair: &Pair<S>) -> Result<Triple, QueueError> {
        HfQueue::remove(self, pair)
    }

    fn contains(&self, pair: &Pair<S>) -> bool {
        HfQueue::contains(self, pair)
    }

    fn min(&self) -> Result<Pair<S>, QueueError> {
        HfQueue::min(self)
    }

    fn max(&self) -> Result<Pair<S>, QueueError> {
        HfQueue::max(self)
    }

    fn len(&self) -> usize {
        HfQueue::len(self)
    }

    fn max_size(&self) -> usize {
        self.max_size
    }

    fn freq_range(&self) -> (usize, usize) {
        (self.min_freq, usize::MAX)
    }
}

#[cfg(feature = "metrics")]
impl<S> MetricsSnapshotProvider<QueueMetricsSnapshot> for HfQueue<S>
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
        Triple::new(freq * 10, freq * 100, freq)
    }

    fn freqs(queue: &HfQueue<u8>) -> Vec<usize> {
        queue.iter().map(|(_, triple)| triple.freq).collect()
    }

    #[test]
    fn hf_queue_decrement_then_evict() {
        let mut queue = HfQueue::new(10, 3);
        let xy = p(b'x', b'y');
        queue.insert(xy, Triple::new(7, 11, 5)).unwrap();
        assert_eq!(queue.max(), Ok(xy));

        assert_eq!(queue.decrease(&xy), Ok(Decrease::Decremented { freq: 4 }));
        assert_eq!(queue.decrease(&xy), Ok(Decrease::Decremented { freq: 3 }));
        assert!(queue.contains(&xy));
        assert_eq!(queue.lookup(&xy), Ok(Triple::new(7, 11, 3)));

        assert_eq!(
            queue.decrease(&xy),
            Ok(Decrease::Evicted(Triple::new(7, 11, 2)))
        );
        assert!(!queue.contains(&xy));
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.max(), Err(QueueError::Empty));
        queue.check_invariants().unwrap();
    }

    #[test]
    fn hf_queue_lookup_returns_stored_triple() {
        let mut queue = HfQueue::new(4, 2);
        queue.insert(p(1, 2), Triple::new(42, 7, 9)).unwrap();
        assert_eq!(queue.lookup(&p(1, 2)), Ok(Triple::new(42, 7, 9)));
        assert_eq!(queue.lookup(&p(2, 1)), Err(QueueError::Absent));
    }

    #[test]
    fn hf_queue_orders_by_frequency() {
        let mut queue = HfQueue::new(10, 2);
        queue.insert(p(0, 1), t(5)).unwrap();
        queue.insert(p(0, 2), t(9)).unwrap();
        queue.insert(p(0, 3), t(2)).unwrap();
        queue.insert(p(0, 4), t(5)).unwrap();
        queue.insert(p(0, 5), t(7)).unwrap();
        queue.insert(p(0, 6), t(3)).unwrap();

        assert_eq!(freqs(&queue), vec![9, 7, 5, 5, 3, 2]);
        assert_eq!(queue.max(), Ok(p(0, 2)));
        assert_eq!(queue.min(), Ok(p(0, 3)));
        queue.check_invariants().unwrap();
    }

    #[test]
    fn hf_queue_decrease_moves_across_runs() {
        let mut queue = HfQueue::new(10, 2);
        queue.insert(p(1, 1), t(6)).unwrap();
        queue.insert(p(2, 2), t(6)).unwrap();
        queue.insert(p(3, 3), t(6)).unwrap();
        queue.insert(p(4, 4), t(5)).unwrap();

        // Head of the 6-run drops into the 5-run.
        queue.decrease(&p(1, 1)).unwrap();
        assert_eq!(freqs(&queue), vec![6, 6, 5, 5]);
        queue.check_invariants().unwrap();

        // Tail of the 6-run drops into the 5-run.
        queue.decrease(&p(3, 3)).unwrap();
        assert_eq!(freqs(&queue), vec![6, 5, 5, 5]);
        assert_eq!(queue.max(), Ok(p(2, 2)));
        queue.check_invariants().unwrap();

        // Creating a fresh run below everything.
        queue.decrease(&p(4, 4)).unwrap();
        assert_eq!(queue.min(), Ok(p(4, 4)));
        assert_eq!(freqs(&queue), vec![6, 5, 5, 4]);
        queue.check_invariants().unwrap();
    }

    #[test]
    fn hf_queue_decrease_into_gap_creates_run() {
        let mut queue = HfQueue::new(10, 2);
        queue.insert(p(1, 0), t(10)).unwrap();
        queue.insert(p(2, 0), t(4)).unwrap();
        queue.decrease(&p(1, 0)).unwrap();
        assert_eq!(freqs(&queue), vec![9, 4]);
        queue.check_invariants().unwrap();
    }

    #[test]
    fn hf_queue_insert_between_existing_runs() {
        let mut queue = HfQueue::new(10, 2);
        queue.insert(p(1, 0), t(20)).unwrap();
        queue.insert(p(2, 0), t(10)).unwrap();
        queue.insert(p(3, 0), t(3)).unwrap();
        queue.insert(p(4, 0), t(15)).unwrap();
        queue.insert(p(5, 0), t(4)).unwrap();
        queue.insert(p(6, 0), t(25)).unwrap();
        assert_eq!(freqs(&queue), vec![25, 20, 15, 10, 4, 3]);
        queue.check_invariants().unwrap();
    }

    #[test]
    fn hf_queue_rejects_invalid_inserts_without_mutation() {
        let mut queue = HfQueue::new(2, 3);
        queue.insert(p(1, 1), t(3)).unwrap();

        assert_eq!(
            queue.insert(p(2, 2), t(2)),
            Err(QueueError::FrequencyOutOfRange {
                freq: 2,
                min: 3,
                max: usize::MAX
            })
        );
        assert_eq!(queue.insert(p(1, 1), t(8)), Err(QueueError::Duplicate));
        assert_eq!(queue.lookup(&p(1, 1)), Ok(t(3)));

        queue.insert(p(2, 2), t(4)).unwrap();
        assert_eq!(
            queue.insert(p(3, 3), t(4)),
            Err(QueueError::CapacityExceeded { max_size: 2 })
        );
        assert_eq!(queue.len(), 2);
        assert!(!queue.contains(&p(3, 3)));
        queue.check_invariants().unwrap();
    }

    #[test]
    fn hf_queue_absent_pair_is_contract_violation() {
        let mut queue: HfQueue<u8> = HfQueue::new(4, 2);
        assert_eq!(queue.decrease(&p(1, 2)), Err(QueueError::Absent));
        assert_eq!(queue.remove(&p(1, 2)), Err(QueueError::Absent));
        assert_eq!(queue.min(), Err(QueueError::Empty));
        assert!(!queue.contains(&p(1, 2)));
    }

    #[test]
    fn hf_queue_default_is_inert() {
        let mut queue: HfQueue<u8> = HfQueue::default();
        assert!(!queue.is_usable());
        assert_eq!(queue.insert(p(1, 2), t(5)), Err(QueueError::Uninitialized));
        assert_eq!(queue.lookup(&p(1, 2)), Err(QueueError::Uninitialized));
        assert_eq!(queue.max(), Err(QueueError::Uninitialized));
        assert_eq!(queue.decrease(&p(1, 2)), Err(QueueError::Uninitialized));
        assert_eq!(queue.remove(&p(1, 2)), Err(QueueError::Uninitialized));
    }

    #[test]
    #[should_panic(expected = "HfQueue used before construction")]
    fn hf_queue_default_contains_panics() {
        let queue: HfQueue<u8> = HfQueue::default();
        queue.contains(&p(0, 0));
    }

    #[test]
    #[should_panic(expected = "HfQueue used before construction")]
    fn hf_queue_default_len_panics() {
        let queue: HfQueue<u8> = HfQueue::default();
        let _ = queue.len();
    }

    #[test]
    fn hf_queue_try_new_validates() {
        assert!(HfQueue::<u8>::try_new(0, 3).is_err());
        let err = HfQueue::<u8>::try_new(4, 1).unwrap_err();
        assert!(err.message().contains("min_freq"));
        assert!(HfQueue::<u8>::try_new(4, 2).is_ok());
    }

    #[test]
    #[should_panic(expected = "min_freq must be greater than 1")]
    fn hf_queue_new_panics_on_bad_floor() {
        let _ = HfQueue::<u8>::new(4, 0);
    }

    #[test]
    fn hf_queue_removal_triggers_compaction() {
        let mut queue = HfQueue::new(16, 2);
        for i in 0..10u8 {
            queue.insert(p(i, i), t(2 + i as usize)).unwrap();
        }
        assert_eq!(queue.allocated_slots(), 10);

        for i in 0..5u8 {
            queue.remove(&p(i, i)).unwrap();
        }
        // 5 live of 10 slots: not yet below half.
        assert_eq!(queue.allocated_slots(), 10);

        queue.remove(&p(5, 5)).unwrap();
        assert_eq!(queue.allocated_slots(), 4);
        assert_eq!(queue.len(), 4);
        queue.check_invariants().unwrap();

        for i in 6..10u8 {
            assert_eq!(queue.lookup(&p(i, i)), Ok(t(2 + i as usize)));
        }
        assert_eq!(queue.max(), Ok(p(9, 9)));
        assert_eq!(queue.min(), Ok(p(6, 6)));
    }

    #[test]
    fn hf_queue_eviction_triggers_compaction() {
        let mut queue = HfQueue::new(8, 3);
        for i in 0..4u8 {
            queue.insert(p(i, 0), t(3)).unwrap();
        }
        queue.insert(p(9, 9), t(50)).unwrap();
        for i in 0..4u8 {
            assert!(queue.decrease(&p(i, 0)).unwrap().is_evicted());
        }
        assert_eq!(queue.len(), 1);
        assert!(queue.allocated_slots() < 5);
        assert_eq!(queue.lookup(&p(9, 9)), Ok(t(50)));
        queue.check_invariants().unwrap();
    }

    #[test]
    fn hf_queue_operations_after_compaction() {
        let mut queue = HfQueue::new(32, 2);
        for i in 0..20u8 {
            queue.insert(p(i, 1), t(2 + (i as usize % 5))).unwrap();
        }
        for i in 0..15u8 {
            queue.remove(&p(i, 1)).unwrap();
        }
        queue.check_invariants().unwrap();

        queue.insert(p(100, 1), t(4)).unwrap();
        queue.decrease(&p(19, 1)).unwrap();
        queue.insert(p(101, 1), t(40)).unwrap();
        assert_eq!(queue.max(), Ok(p(101, 1)));
        queue.check_invariants().unwrap();
    }

    #[test]
    fn hf_queue_explicit_compact_is_transparent() {
        let mut queue = HfQueue::new(8, 2);
        for i in 0..6u8 {
            queue.insert(p(i, 2), t(3 + i as usize)).unwrap();
        }
        queue.remove(&p(2, 2)).unwrap();
        let before: Vec<_> = queue.iter().collect();
        queue.compact();
        let after: Vec<_> = queue.iter().collect();
        assert_eq!(before, after);
        assert_eq!(queue.allocated_slots(), queue.len());
        queue.check_invariants().unwrap();
    }

    #[test]
    fn hf_queue_clear_keeps_configuration() {
        let mut queue = HfQueue::new(4, 2);
        queue.insert(p(1, 1), t(3)).unwrap();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.max_size(), 4);
        assert_eq!(queue.min_freq(), 2);
        queue.insert(p(1, 1), t(3)).unwrap();
        queue.check_invariants().unwrap();
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn hf_queue_metrics_snapshot() {
        let mut queue = HfQueue::new(4, 2);
        queue.insert(p(1, 1), t(2)).unwrap();
        let _ = queue.insert(p(1, 1), t(2));
        let _ = queue.lookup(&p(1, 1));
        let _ = queue.max();
        queue.decrease(&p(1, 1)).unwrap();

        let snapshot = queue.metrics_snapshot();
        assert_eq!(snapshot.insert_calls, 2);
        assert_eq!(snapshot.insert_rejected, 1);
        assert_eq!(snapshot.lookup_calls, 1);
        assert_eq!(snapshot.extremum_calls, 1);
        assert_eq!(snapshot.decrease_calls, 1);
        assert_eq!(snapshot.evictions, 1);
        assert_eq!(snapshot.len, 0);
        assert_eq!(snapshot.max_size, 4);
    }
}
