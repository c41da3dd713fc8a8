/// Point-in-time copy of a queue's counters and gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueueMetricsSnapshot {
    pub insert_calls: u64,
    pub insert_rejected: u64,
    pub lookup_calls: u64,
    pub extremum_calls: u64,
    pub decrease_calls: u64,
    pub evictions: u64,
    pub remove_calls: u64,
    pub compactions: u64,
    pub relocated_nodes: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub max_size: usize,
}
