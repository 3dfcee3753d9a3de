#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SlabLruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,

    pub remove_calls: u64,
    pub remove_found: u64,
    pub purge_calls: u64,
    pub purged_entries: u64,

    pub slab_grows: u64, // reservation doublings
    pub free_list_reuses: u64, // inserts served by a vacated slot

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,

    pub peek_calls: u64,
    pub peek_found: u64,
    pub contains_calls: u64,
    pub contains_found: u64,
    pub peek_lru_calls: u64,
    pub peek_lru_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub slab_len: usize,
    pub reserved: usize,
    pub free_slots: usize,
    pub capacity: usize,
}

impl SlabLruMetricsSnapshot {
    /// Fraction of `get` calls that hit, or `0.0` before any call.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
