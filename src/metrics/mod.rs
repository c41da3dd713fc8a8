//! Optional counters for queue operations (`metrics` feature).
//!
//! Recording, snapshotting and export are split into small traits (see
//! [`traits`]). Each queue owns a [`QueueMetrics`](metrics_impl::QueueMetrics)
//! and exposes `metrics_snapshot()`.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
