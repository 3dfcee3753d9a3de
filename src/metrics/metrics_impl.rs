use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    CoreMetricsRecorder, SlabLruMetricsReadRecorder, SlabLruMetricsRecorder,
};

#[derive(Debug, Default)]
pub struct SlabLruMetrics {
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
    pub slab_grows: u64,
    pub free_list_reuses: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
    pub contains_calls: MetricsCell,
    pub contains_found: MetricsCell,
    pub peek_lru_calls: MetricsCell,
    pub peek_lru_found: MetricsCell,
}

impl CoreMetricsRecorder for SlabLruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.purge_calls += 1;
    }
}

impl SlabLruMetricsRecorder for SlabLruMetrics {
    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }

    fn record_purged_entry(&mut self) {
        self.purged_entries += 1;
    }

    fn record_slab_grow(&mut self) {
        self.slab_grows += 1;
    }

    fn record_free_list_reuse(&mut self) {
        self.free_list_reuses += 1;
    }

    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }
}

impl SlabLruMetricsReadRecorder for &SlabLruMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }

    fn record_contains_call(&self) {
        self.contains_calls.incr();
    }

    fn record_contains_found(&self) {
        self.contains_found.incr();
    }

    fn record_peek_lru_call(&self) {
        self.peek_lru_calls.incr();
    }

    fn record_peek_lru_found(&self) {
        self.peek_lru_found.incr();
    }
}
