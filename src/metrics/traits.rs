//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are separate responsibilities:
//!
//! ```text
//!                 ┌─────────────────────────────┐
//!                 │     CoreMetricsRecorder     │
//!                 │  get_hit/get_miss/insert    │
//!                 │  evict/clear                │
//!                 └──────────────┬──────────────┘
//!                                │
//!                                ▼
//!                 ┌─────────────────────────────┐      ┌──────────────────────────────┐
//!                 │   SlabLruMetricsRecorder    │      │  SlabLruMetricsReadRecorder  │
//!                 │  remove/purge/pop/touch     │      │  peek/contains/peek_lru      │
//!                 │  slab growth/free reuse     │      │  (&self, interior mutable)   │
//!                 └─────────────────────────────┘      └──────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters shared by any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Counters specific to the slab-indexed LRU cache.
pub trait SlabLruMetricsRecorder: CoreMetricsRecorder {
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_purged_entry(&mut self);
    fn record_slab_grow(&mut self);
    fn record_free_list_reuse(&mut self);
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Read-path counters for `&self` methods (uses interior mutability).
pub trait SlabLruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_contains_call(&self);
    fn record_contains_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
}

/// Produce a point-in-time snapshot for tests and benchmarks.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
