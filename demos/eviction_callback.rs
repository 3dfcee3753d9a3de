use std::sync::mpsc;

use slablru::builder::SlabLruBuilder;

fn main() {
    let (tx, rx) = mpsc::channel();

    let mut cache = SlabLruBuilder::new(3)
        .initial_capacity(1)
        .on_evict(move |key: &&str, value: &u32| {
            let _ = tx.send(format!("{}={}", key, value));
        })
        .build();

    cache.add("a", 1);
    cache.add("b", 2);
    cache.add("c", 3);
    cache.get(&"a");
    cache.add("d", 4); // evicts b
    cache.remove(&"c");
    println!("slab_len={} free_slots={}", cache.slab_len(), cache.free_slots());

    cache.add("e", 5); // reuses c's slot
    println!("slab_len={} free_slots={}", cache.slab_len(), cache.free_slots());

    cache.purge();

    let departed: Vec<String> = rx.try_iter().collect();
    println!("departed: {}", departed.join(", "));
}

// Expected output:
// slab_len=3 free_slots=1
// slab_len=3 free_slots=0
// departed: b=2, c=3, a=1, d=4, e=5
//
// Explanation: the callback fires for the overflow eviction of b, the
// explicit removal of c, and then for every remaining entry, oldest first,
// when the cache is purged.
