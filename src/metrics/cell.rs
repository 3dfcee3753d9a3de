use std::cell::Cell;

/// A counter bumped from `&self` read paths (`peek`, `contains`, `peek_lru`).
///
/// # Safety
/// Only sound when every access is externally synchronized. The cache itself
/// is single-threaded; callers sharing it across threads hold a lock around
/// every call.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}

// SAFETY:
// A shared SlabLruCache is only reachable through an external lock, which
// serializes every access to these cells. Metrics are observational and do
// not affect correctness.
unsafe impl Sync for MetricsCell {}
unsafe impl Send for MetricsCell {}
