#![no_main]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use slablru::SlabLruCache;

// Fuzz arbitrary operation sequences on SlabLruCache
//
// The first byte picks the initial hint, the second the max capacity. Every
// following byte pair is (op, key). Invariants are checked after each op.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let initial = usize::from(data[0] % 16);
    let capacity = usize::from(data[1] % 32) + 1;
    let departures = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&departures);
    let mut cache = SlabLruCache::with_on_evict(initial, capacity, move |_: &u8, _: &u16| {
        counter.fetch_add(1, Ordering::Relaxed);
    });
    let mut expected_departures = 0usize;

    for pair in data[2..].chunks_exact(2) {
        let op = pair[0] % 9;
        let key = pair[1];
        let value = u16::from(pair[0]) << 8 | u16::from(pair[1]);

        match op {
            0 | 1 => {
                let was_present = cache.contains(&key);
                let was_full = cache.len() == capacity;
                let evicted = cache.add(key, value);
                assert_eq!(evicted, !was_present && was_full);
                if evicted {
                    expected_departures += 1;
                }
                assert_eq!(cache.peek(&key), Some(&value));
            }
            2 => {
                if cache.get(&key).is_some() {
                    assert_eq!(cache.keys().last(), Some(&key));
                }
            }
            3 => {
                let before: Vec<u8> = cache.keys().copied().collect();
                let _ = cache.peek(&key);
                let _ = cache.contains(&key);
                let after: Vec<u8> = cache.keys().copied().collect();
                assert_eq!(before, after);
            }
            4 => {
                let old_len = cache.len();
                if cache.remove(&key) {
                    expected_departures += 1;
                    assert_eq!(cache.len(), old_len - 1);
                    assert!(!cache.contains(&key));
                } else {
                    assert_eq!(cache.len(), old_len);
                }
            }
            5 => {
                let candidate = cache.peek_lru().map(|(k, v)| (*k, *v));
                assert_eq!(cache.pop_lru(), candidate);
                if candidate.is_some() {
                    expected_departures += 1;
                }
            }
            6 => {
                let present = cache.contains(&key);
                assert_eq!(cache.touch(&key), present);
            }
            7 => {
                if let Some(v) = cache.get_mut(&key) {
                    *v = v.wrapping_add(1);
                }
            }
            _ => {
                // purge, kept rare
                if key % 8 == 0 {
                    expected_departures += cache.len();
                    cache.purge();
                    assert!(cache.is_empty());
                    assert_eq!(cache.slab_len(), 0);
                }
            }
        }

        assert!(cache.len() <= capacity);
        assert!(cache.slab_len() <= capacity);
        assert_eq!(cache.iter().count(), cache.len());
        assert!(cache.check_invariants().is_ok());
        assert_eq!(departures.load(Ordering::Relaxed), expected_departures);
    }
});
