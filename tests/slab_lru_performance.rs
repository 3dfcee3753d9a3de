// ==============================================
// SLAB LRU PERFORMANCE TESTS (integration)
// ==============================================

use slablru::SlabLruCache;
use std::time::{Duration, Instant};

/// Helper function to measure execution time of a closure
fn measure_time<F, R>(operation: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = operation();
    let duration = start.elapsed();
    (result, duration)
}

mod lookup_performance {
    use super::*;

    #[test]
    fn test_get_operation_latency() {
        let mut cache = SlabLruCache::new(1000, 1000);
        for i in 0..1000 {
            cache.add(i, i * 10);
        }

        let iterations = 10000u32;
        let (_, duration) = measure_time(|| {
            for i in 0..iterations {
                let key = i % 1000;
                cache.get(&key);
            }
        });

        let avg_latency = duration / iterations;
        println!("Average get latency: {:?}", avg_latency);

        assert!(
            avg_latency < Duration::from_micros(10),
            "Get operation too slow: {:?}",
            avg_latency
        );
    }

    #[test]
    fn test_peek_operation_latency() {
        let mut cache = SlabLruCache::new(1000, 1000);
        for i in 0..1000 {
            cache.add(i, i * 10);
        }

        let iterations = 10000u32;
        let (_, duration) = measure_time(|| {
            for i in 0..iterations {
                let key = i % 1000;
                cache.peek(&key);
            }
        });

        let avg_latency = duration / iterations;
        println!("Average peek latency: {:?}", avg_latency);

        assert!(
            avg_latency < Duration::from_micros(5),
            "Peek operation too slow: {:?}",
            avg_latency
        );
    }
}

mod insertion_performance {
    use super::*;

    #[test]
    fn test_add_with_eviction_latency() {
        let mut cache = SlabLruCache::new(100, 100);

        let iterations = 10000u32;
        let (_, duration) = measure_time(|| {
            for i in 0..iterations {
                cache.add(i, i);
            }
        });

        let avg_latency = duration / iterations;
        println!("Average add (evicting) latency: {:?}", avg_latency);

        // Includes per-op invariant checks in debug builds.
        assert!(
            avg_latency < Duration::from_micros(200),
            "Add with eviction too slow: {:?}",
            avg_latency
        );
        assert_eq!(cache.len(), 100);
    }

    #[test]
    fn test_growth_from_small_hint() {
        let mut cache = SlabLruCache::new(1, 1 << 12);

        let (_, duration) = measure_time(|| {
            for i in 0..(1u32 << 12) {
                cache.add(i, i);
            }
        });

        println!("Filled 4K entries from hint 1 in {:?}", duration);
        assert_eq!(cache.slab_len(), 1 << 12);
        assert!(
            duration < Duration::from_secs(30),
            "Incremental growth too slow: {:?}",
            duration
        );
    }
}
