use slablru::SlabLruCache;

fn main() {
    let mut cache: SlabLruCache<u32, String> = SlabLruCache::new(1, 2);

    cache.add(1, "alpha".to_string());
    cache.add(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value);
    }

    let evicted = cache.add(3, "gamma".to_string());

    println!("evicted on add 3? {}", evicted);
    println!("contains 2? {}", cache.contains(&2));
    println!(
        "order (lru -> mru): {:?}",
        cache.keys().copied().collect::<Vec<_>>()
    );
}

// Expected output:
// hit 1: alpha
// evicted on add 3? true
// contains 2? false
// order (lru -> mru): [1, 3]
//
// Explanation: capacity=2; after get(&1), key 1 is MRU and key 2 is LRU.
// Adding key 3 reuses key 2's slot, so contains(2) is false.
