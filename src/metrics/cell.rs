use std::cell::Cell;

/// A metrics-only cell.
///
/// Lets `&self` read paths (`lookup`, `min`, `max`) bump counters. Queues are
/// single-owner, so the cell is never shared across threads while mutated.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}
