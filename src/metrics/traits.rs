//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are separate responsibilities:
//!
//! ```text
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │    QueueMetricsRecorder      │    │  QueueMetricsReadRecorder    │
//!   │  insert/decrease/evict/      │    │  lookup/extremum (&self)     │
//!   │  remove/compaction (&mut)    │    │                              │
//!   └──────────────┬───────────────┘    └──────────────┬───────────────┘
//!                  └─────────────┬─────────────────────┘
//!                                ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters written by mutating queue operations.
pub trait QueueMetricsRecorder {
    fn record_insert_call(&mut self);
    fn record_insert_rejected(&mut self);
    fn record_decrease_call(&mut self);
    fn record_eviction(&mut self);
    fn record_remove_call(&mut self);
    fn record_compaction(&mut self, relocated: usize);
    fn record_clear(&mut self);
}

/// Counters written by `&self` queries (uses interior mutability).
pub trait QueueMetricsReadRecorder {
    fn record_lookup_call(&self);
    fn record_extremum_call(&self);
}

/// Produces a point-in-time snapshot of a component's metrics.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes snapshots to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
