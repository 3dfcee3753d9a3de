//! Doubly linked recency list threaded through a bounded [`SlotArena`].
//!
//! Each slot carries its value plus `prev`/`next` links expressed as
//! `Option<SlotId>`. `prev` points toward the back (older), `next` toward the
//! front (newer). The list is anchored at `back` (least recently used) and
//! `front` (most recently used).
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                   │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │ 0      │ { value: A, prev: None,    next: Some(2) }   │
//!   │ 1      │ (free)                                       │
//!   │ 2      │ { value: B, prev: Some(0), next: Some(3) }   │
//!   │ 3      │ { value: C, prev: Some(2), next: None }      │
//!   └────────┴──────────────────────────────────────────────┘
//!
//!   back ─► [0] ◄──► [2] ◄──► [3] ◄── front
//!   (LRU)                            (MRU)
//! ```
//!
//! ## Operations
//! - `push_front(value)`: allocate a slot and link it at the front
//! - `recycle_back(value)`: overwrite the back slot in place and move it to the front
//! - `move_to_front(id)`: detach + attach at the front
//! - `remove(id)` / `pop_back()`: detach + free the slot
//!
//! All of the above are O(1); `iter` is O(n) and walks back to front.
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

impl<T> Node<T> {
    fn detached(value: T) -> Self {
        Self {
            value,
            prev: None,
            next: None,
        }
    }
}

/// Recency list whose nodes live in a bounded `SlotArena` and link by `SlotId`.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    front: Option<SlotId>,
    back: Option<SlotId>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list over a slab pre-sized to `initial_capacity` and
    /// bounded by `max_capacity` slots.
    pub fn bounded(initial_capacity: usize, max_capacity: usize) -> Self {
        Self {
            arena: SlotArena::bounded(initial_capacity, max_capacity),
            front: None,
            back: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    pub fn max_capacity(&self) -> usize {
        self.arena.max_capacity()
    }

    pub fn slab_len(&self) -> usize {
        self.arena.slab_len()
    }

    pub fn reserved(&self) -> usize {
        self.arena.reserved()
    }

    pub fn free_slots(&self) -> usize {
        self.arena.free_slots()
    }

    /// Returns `true` if `push_front` can run without recycling a live slot.
    pub fn has_vacancy(&self) -> bool {
        self.arena.has_vacancy()
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.front
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.back
    }

    /// Returns the value at the back (LRU) of the list.
    pub fn back(&self) -> Option<&T> {
        self.back.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Stores `value` in a free or newly grown slot and links it at the front.
    ///
    /// Requires [`has_vacancy`](Self::has_vacancy).
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node::detached(value));
        self.attach_front(id);
        id
    }

    /// Reuses the back slot for `value`: the old value is swapped out, and the
    /// slot, keeping its index, becomes the front.
    ///
    /// Returns `Err(value)` when the list is empty.
    pub fn recycle_back(&mut self, value: T) -> Result<(SlotId, T), T> {
        let Some(id) = self.back else {
            return Err(value);
        };
        self.detach(id);
        match self.arena.replace(id, Node::detached(value)) {
            Ok(old) => {
                self.attach_front(id);
                Ok((id, old.value))
            },
            Err(node) => Err(node.value),
        }
    }

    /// Moves a live node to the front; returns `false` if `id` is not live.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if Some(id) == self.front {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    /// Unlinks the node `id`, frees its slot and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes and returns the back (LRU) value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.back?;
        self.remove(id)
    }

    /// Drops every node, the free list and both anchors.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.front = None;
        self.back = None;
    }

    /// Iterates values from back (LRU) to front (MRU).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            back: self.back,
            front: self.front,
            remaining: self.len(),
        }
    }

    /// Iterates `(SlotId, &T)` pairs from back to front.
    pub fn iter_entries(&self) -> impl Iterator<Item = (SlotId, &T)> + '_ {
        let mut current = self.back;
        std::iter::from_fn(move || {
            let id = current?;
            let node = self.arena.get(id)?;
            current = node.next;
            Some((id, &node.value))
        })
    }

    #[cfg(test)]
    fn snapshot_ids(&self) -> Vec<SlotId> {
        self.iter_entries().map(|(id, _)| id).collect()
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.arena.get_mut(prev_id) {
                prev_node.next = next;
            }
        } else {
            self.back = next;
        }

        if let Some(next_id) = next {
            if let Some(next_node) = self.arena.get_mut(next_id) {
                next_node.prev = prev;
            }
        } else {
            self.front = prev;
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }

        Some(())
    }

    fn attach_front(&mut self, id: SlotId) -> Option<()> {
        let old_front = self.front;
        let node = self.arena.get_mut(id)?;
        node.prev = old_front;
        node.next = None;

        if let Some(old_front) = old_front {
            if let Some(front_node) = self.arena.get_mut(old_front) {
                front_node.next = Some(id);
            }
        } else {
            self.back = Some(id);
        }
        self.front = Some(id);
        Some(())
    }

    /// Verifies anchors, link symmetry, acyclicity and slab bookkeeping.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.arena.check_invariants()?;

        match (self.front, self.back) {
            (None, None) => {
                if !self.is_empty() {
                    return Err(InvariantError::new(format!(
                        "anchors are empty but {} slots are live",
                        self.len()
                    )));
                }
                return Ok(());
            },
            (Some(_), Some(_)) => {},
            _ => {
                return Err(InvariantError::new(
                    "exactly one of front/back is set".to_string(),
                ));
            },
        }

        let mut steps = 0usize;
        let mut prev = None;
        let mut current = self.back;
        while let Some(id) = current {
            let node = self.arena.get(id).ok_or_else(|| {
                InvariantError::new(format!("link reaches free slot {}", id.index()))
            })?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has prev {:?}, expected {:?}",
                    id.index(),
                    node.prev,
                    prev
                )));
            }
            steps += 1;
            if steps > self.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
            prev = Some(id);
            current = node.next;
        }

        if prev != self.front {
            return Err(InvariantError::new(format!(
                "walk from back ended at {:?}, front is {:?}",
                prev, self.front
            )));
        }
        if steps != self.len() {
            return Err(InvariantError::new(format!(
                "walk visited {} slots but {} are live",
                steps,
                self.len()
            )));
        }
        Ok(())
    }
}

/// Iterator over values from back (LRU) to front (MRU).
///
/// Double-ended: `rev()` walks front to back.
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    back: Option<SlotId>,
    front: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        let node = self.list.arena.get(id)?;
        self.back = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        let node = self.list.arena.get(id)?;
        self.front = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &RecencyList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_front_orders_back_to_front() {
        let mut list = RecencyList::bounded(1, 8);
        let a = list.push_front("a");
        list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(values(&list), vec!["a", "b", "c"]);
        assert_eq!(list.back_id(), Some(a));
        assert_eq!(list.front_id(), Some(c));
        assert_eq!(list.back(), Some(&"a"));
        list.check_invariants().unwrap();
    }

    #[test]
    fn move_to_front_from_back_middle_and_front() {
        let mut list = RecencyList::bounded(4, 4);
        let a = list.push_front(1);
        let b = list.push_front(2);
        let c = list.push_front(3);

        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec![1, 2, 3]);

        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec![2, 3, 1]);
        assert_eq!(list.back_id(), Some(b));

        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec![2, 1, 3]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn remove_repairs_anchors() {
        let mut list = RecencyList::bounded(4, 4);
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(values(&list), vec!["a", "c"]);

        assert_eq!(list.remove(c), Some("c"));
        assert_eq!(list.front_id(), Some(a));
        assert_eq!(list.back_id(), Some(a));

        assert_eq!(list.remove(a), Some("a"));
        assert!(list.is_empty());
        assert_eq!(list.front_id(), None);
        assert_eq!(list.back_id(), None);
        assert_eq!(list.remove(a), None);
        list.check_invariants().unwrap();
    }

    #[test]
    fn recycle_back_reuses_slot_index() {
        let mut list = RecencyList::bounded(2, 2);
        let a = list.push_front(10);
        let b = list.push_front(20);
        assert!(!list.has_vacancy());

        let (id, old) = list.recycle_back(30).unwrap();
        assert_eq!(id, a);
        assert_eq!(old, 10);
        assert_eq!(values(&list), vec![20, 30]);
        assert_eq!(list.back_id(), Some(b));
        assert_eq!(list.front_id(), Some(a));
        assert_eq!(list.slab_len(), 2);
        list.check_invariants().unwrap();
    }

    #[test]
    fn recycle_back_on_single_slot_and_empty_list() {
        let mut list = RecencyList::bounded(1, 1);
        assert_eq!(list.recycle_back(1), Err(1));

        let a = list.push_front(1);
        let (id, old) = list.recycle_back(2).unwrap();
        assert_eq!((id, old), (a, 1));
        assert_eq!(values(&list), vec![2]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn slot_zero_is_an_ordinary_link_target() {
        let mut list = RecencyList::bounded(1, 3);
        let zero = list.push_front('x');
        assert_eq!(zero.index(), 0);
        list.push_front('y');
        list.push_front('z');

        // Free slot 0, recycle it, and move it around the middle of the list.
        list.remove(zero);
        let again = list.push_front('w');
        assert_eq!(again.index(), 0);
        list.move_to_front(list.back_id().unwrap());
        assert_eq!(values(&list), vec!['z', 'w', 'y']);
        assert_eq!(list.snapshot_ids()[1].index(), 0);
        list.check_invariants().unwrap();
    }

    #[test]
    fn pop_back_and_clear() {
        let mut list = RecencyList::bounded(2, 8);
        list.push_front(1);
        list.push_front(2);
        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.free_slots(), 1);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.pop_back(), None);
        assert_eq!(list.free_slots(), 0);
        assert_eq!(list.slab_len(), 0);
        list.check_invariants().unwrap();
    }

    #[test]
    fn iter_is_double_ended_and_exact() {
        let mut list = RecencyList::bounded(4, 4);
        for i in 0..4 {
            list.push_front(i);
        }
        let rev: Vec<_> = list.iter().rev().copied().collect();
        assert_eq!(rev, vec![3, 2, 1, 0]);

        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn get_mut_updates_value_in_place() {
        let mut list = RecencyList::bounded(1, 1);
        let id = list.push_front(5);
        if let Some(value) = list.get_mut(id) {
            *value = 6;
        }
        assert_eq!(list.get(id), Some(&6));
        assert!(list.contains(id));
    }
}
