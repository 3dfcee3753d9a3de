//! DHAT heap profiler for slablru.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>
//!
//! The interesting numbers are the allocation counts: slab growth should show
//! up as O(log max_capacity) reallocations, and steady-state churn as none.

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use slablru::SlabLruCache;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

/// Hotset workload: 90% of accesses hit 10% of keys.
fn hotset_workload(cache: &mut SlabLruCache<u64, u64>, operations: usize, universe: u64, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let hot_size = (universe as f64 * 0.1) as u64;

    for _ in 0..operations {
        let key = if rng.next_f64() < 0.9 {
            rng.next_u64() % hot_size
        } else {
            hot_size + (rng.next_u64() % (universe - hot_size))
        };

        if cache.get(&key).is_none() {
            cache.add(key, key);
        }
    }
}

/// Scan workload: sequential access pattern.
fn scan_workload(cache: &mut SlabLruCache<u64, u64>, operations: usize, universe: u64) {
    for i in 0..operations {
        let key = (i as u64) % universe;
        if cache.get(&key).is_none() {
            cache.add(key, key);
        }
    }
}

/// Eviction churn: insert more distinct keys than capacity.
fn eviction_churn(cache: &mut SlabLruCache<u64, u64>, operations: usize) {
    for i in 0..operations {
        cache.add(i as u64, i as u64);
    }
}

/// Remove/re-add churn: every insert should land on a recycled slot.
fn free_list_churn(cache: &mut SlabLruCache<u64, u64>, operations: usize, universe: u64, seed: u64) {
    let mut rng = XorShift64::new(seed);
    for _ in 0..operations {
        let key = rng.next_u64() % universe;
        if !cache.remove(&key) {
            cache.add(key, key);
        }
    }
}

fn profile_full_preallocation() {
    println!("=== Profiling slab LRU (initial = max) ===");
    let capacity = 4096;
    let operations = 100_000;
    let universe = 16_384;

    let mut cache = SlabLruCache::new(capacity, capacity);

    for i in 0..capacity as u64 {
        cache.add(i, i);
    }

    hotset_workload(&mut cache, operations, universe, 42);
    scan_workload(&mut cache, operations / 2, universe);
    eviction_churn(&mut cache, operations / 4);

    println!("  Final size: {} (slab {})", cache.len(), cache.slab_len());
}

fn profile_incremental_growth() {
    println!("=== Profiling slab LRU (initial = 16) ===");
    let capacity = 4096;
    let operations = 100_000;
    let universe = 16_384;

    let mut cache = SlabLruCache::new(16, capacity);

    hotset_workload(&mut cache, operations, universe, 42);
    scan_workload(&mut cache, operations / 2, universe);
    eviction_churn(&mut cache, operations / 4);

    println!(
        "  Final size: {} (slab {}, reserved {})",
        cache.len(),
        cache.slab_len(),
        cache.reserved()
    );
}

fn profile_sparse_use() {
    println!("=== Profiling slab LRU (max 1M, lightly used) ===");
    let mut cache = SlabLruCache::new(16, 1_000_000);

    eviction_churn(&mut cache, 1_000);
    free_list_churn(&mut cache, 50_000, 2_000, 7);

    println!(
        "  Final size: {} (slab {}, reserved {}, free {})",
        cache.len(),
        cache.slab_len(),
        cache.reserved(),
        cache.free_slots()
    );
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("slablru DHAT Heap Profiling");
    println!("===========================\n");

    profile_full_preallocation();
    profile_incremental_growth();
    profile_sparse_use();

    println!("\n===========================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
