// ==============================================
// SLAB LRU REFERENCE MODEL TESTS (integration)
// ==============================================
//
// Drives the cache and a VecDeque-backed LRU model with the same random
// operation stream and compares them after every step.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use slablru::SlabLruCache;

/// Straightforward LRU: front of the deque is least recently used.
struct ModelLru {
    capacity: usize,
    entries: VecDeque<(u8, u32)>,
    departed: Vec<(u8, u32)>,
}

impl ModelLru {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
            departed: Vec::new(),
        }
    }

    fn position(&self, key: u8) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    fn add(&mut self, key: u8, value: u32) -> bool {
        if let Some(pos) = self.position(key) {
            self.entries.remove(pos);
            self.entries.push_back((key, value));
            return false;
        }
        let mut evicted = false;
        if self.entries.len() == self.capacity {
            if let Some(old) = self.entries.pop_front() {
                self.departed.push(old);
            }
            evicted = true;
        }
        self.entries.push_back((key, value));
        evicted
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos)?;
        self.entries.push_back(entry);
        Some(entry.1)
    }

    fn peek(&self, key: u8) -> Option<u32> {
        self.position(key).map(|pos| self.entries[pos].1)
    }

    fn remove(&mut self, key: u8) -> bool {
        match self.position(key).and_then(|pos| self.entries.remove(pos)) {
            Some(entry) => {
                self.departed.push(entry);
                true
            },
            None => false,
        }
    }

    fn pop_lru(&mut self) -> Option<(u8, u32)> {
        let entry = self.entries.pop_front()?;
        self.departed.push(entry);
        Some(entry)
    }

    fn purge(&mut self) {
        self.departed.extend(self.entries.drain(..));
    }
}

#[derive(Debug, Clone)]
enum Op {
    Add(u8, u32),
    Get(u8),
    Peek(u8),
    Contains(u8),
    Remove(u8),
    Touch(u8),
    PopLru,
    Purge,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        60 => (0u8..24, any::<u32>()).prop_map(|(k, v)| Op::Add(k, v)),
        30 => (0u8..24).prop_map(Op::Get),
        10 => (0u8..24).prop_map(Op::Peek),
        10 => (0u8..24).prop_map(Op::Contains),
        20 => (0u8..24).prop_map(Op::Remove),
        10 => (0u8..24).prop_map(Op::Touch),
        10 => Just(Op::PopLru),
        1 => Just(Op::Purge),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The cache behaves exactly like the model, including callback order.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_matches_reference_model(
        initial in 0usize..8,
        capacity in 1usize..16,
        ops in prop::collection::vec(op_strategy(), 0..400)
    ) {
        let departed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&departed);
        let mut cache = SlabLruCache::with_on_evict(initial, capacity, move |k: &u8, v: &u32| {
            sink.lock().unwrap().push((*k, *v));
        });
        let mut model = ModelLru::new(capacity);

        for op in ops {
            match op {
                Op::Add(k, v) => {
                    prop_assert_eq!(cache.add(k, v), model.add(k, v));
                },
                Op::Get(k) => {
                    prop_assert_eq!(cache.get(&k).copied(), model.get(k));
                },
                Op::Peek(k) => {
                    prop_assert_eq!(cache.peek(&k).copied(), model.peek(k));
                },
                Op::Contains(k) => {
                    prop_assert_eq!(cache.contains(&k), model.peek(k).is_some());
                },
                Op::Remove(k) => {
                    prop_assert_eq!(cache.remove(&k), model.remove(k));
                },
                Op::Touch(k) => {
                    prop_assert_eq!(cache.touch(&k), model.get(k).is_some());
                },
                Op::PopLru => {
                    prop_assert_eq!(cache.pop_lru(), model.pop_lru());
                },
                Op::Purge => {
                    cache.purge();
                    model.purge();
                },
            }

            prop_assert!(cache.check_invariants().is_ok());
            let actual: Vec<(u8, u32)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            let expected: Vec<(u8, u32)> = model.entries.iter().copied().collect();
            prop_assert_eq!(actual, expected);
            prop_assert_eq!(cache.len(), model.entries.len());
            prop_assert_eq!(&*departed.lock().unwrap(), &model.departed);
            prop_assert!(cache.slab_len() <= capacity);
        }
    }

    /// Slot 0 keeps cycling through allocation, removal, free-list reuse and
    /// reordering while every invariant holds.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_slot_zero_recycling(
        capacity in 1usize..6,
        rounds in prop::collection::vec((any::<bool>(), 0u8..6), 1..120)
    ) {
        let mut cache = SlabLruCache::new(1, capacity);
        let mut next_key = 0u32;
        cache.add(next_key, 0);

        for (reorder, pick) in rounds {
            // Free the back slot and refill it; slot 0 rotates through the back.
            if let Some((&back, _)) = cache.peek_lru() {
                prop_assert!(cache.remove(&back));
            }
            prop_assert!(cache.check_invariants().is_ok());

            next_key += 1;
            prop_assert!(!cache.add(next_key, next_key));
            prop_assert_eq!(cache.free_slots(), 0);
            prop_assert!(cache.check_invariants().is_ok());

            if reorder {
                let keys: Vec<u32> = cache.keys().copied().collect();
                let target = keys[usize::from(pick) % keys.len()];
                cache.get(&target);
                prop_assert_eq!(cache.keys().last().copied(), Some(target));
            }

            if cache.len() < capacity {
                next_key += 1;
                cache.add(next_key, next_key);
            }
            prop_assert!(cache.check_invariants().is_ok());
            prop_assert_eq!(cache.iter().count(), cache.len());
        }
    }
}
