#![no_main]

use libfuzzer_sys::fuzz_target;
use slablru::ds::SlotArena;

// Fuzz arbitrary operation sequences on a bounded SlotArena
//
// Tests random sequences of insert, remove, get_mut and clear, checking that
// the slab never exceeds its bound and vacated indices are reused first.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let max = usize::from(data[0] % 64) + 1;
    let initial = usize::from(data[1] % 8);
    let mut arena: SlotArena<u32> = SlotArena::bounded(initial, max);
    let mut live = Vec::new();

    for pair in data[2..].chunks_exact(2) {
        let op = pair[0] % 4;
        let value = u32::from(pair[1]);

        match op {
            0 | 1 => {
                if arena.has_vacancy() {
                    let reuse = arena.free_slots() > 0;
                    let slab_before = arena.slab_len();
                    let id = arena.insert(value);
                    if reuse {
                        assert_eq!(arena.slab_len(), slab_before);
                        assert!(id.index() < slab_before);
                    } else {
                        assert_eq!(id.index(), slab_before);
                    }
                    assert_eq!(arena.get(id), Some(&value));
                    live.push(id);
                } else {
                    assert_eq!(arena.len(), max);
                }
            }
            2 => {
                if !live.is_empty() {
                    let id = live.swap_remove(value as usize % live.len());
                    assert!(arena.remove(id).is_some());
                    assert!(!arena.contains(id));
                }
            }
            _ => {
                if value % 16 == 0 {
                    arena.clear();
                    live.clear();
                    assert_eq!(arena.slab_len(), 0);
                } else if let Some(&id) = live.first() {
                    if let Some(v) = arena.get_mut(id) {
                        *v = value;
                    }
                    assert_eq!(arena.get(id), Some(&value));
                }
            }
        }

        assert!(arena.slab_len() <= max);
        assert!(arena.reserved() <= max);
        assert_eq!(arena.len(), live.len());
        assert!(arena.check_invariants().is_ok());
    }
});
