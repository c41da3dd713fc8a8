use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{QueueMetricsReadRecorder, QueueMetricsRecorder};

#[derive(Debug, Default)]
pub struct QueueMetrics {
    pub insert_calls: u64,
    pub insert_rejected: u64,
    pub lookup_calls: MetricsCell,
    pub extremum_calls: MetricsCell,
    pub decrease_calls: u64,
    pub evictions: u64,
    pub remove_calls: u64,
    pub compactions: u64,
    pub relocated_nodes: u64,
}

impl QueueMetricsRecorder for QueueMetrics {
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_rejected(&mut self) {
        self.insert_rejected += 1;
    }

    fn record_decrease_call(&mut self) {
        self.decrease_calls += 1;
    }

    fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_compaction(&mut self, relocated: usize) {
        self.compactions += 1;
        self.relocated_nodes += relocated as u64;
    }

    fn record_clear(&mut self) {}
}

impl QueueMetricsReadRecorder for &QueueMetrics {
    fn record_lookup_call(&self) {
        self.lookup_calls.incr();
    }

    fn record_extremum_call(&self) {
        self.extremum_calls.incr();
    }
}
