//! Bounded slab of fixed-size slots with a free list.
//!
//! `SlotArena` is the contiguous storage behind the recency list. Every record
//! lives in one `Vec`, and callers address it by [`SlotId`], a plain slot index
//! that stays valid while the record is live. Growth reallocates the backing
//! vector and moves the records, but never renumbers a slot.
//!
//! ## Allocation order
//!
//! ```text
//!   insert(value)
//!     1. free_list non-empty   -> pop an index vacated by remove()
//!     2. slots.len() < max     -> append (doubling the reservation when needed)
//!     3. otherwise             -> caller must recycle a live slot instead
//! ```
//!
//! ## Growth policy
//!
//! The reservation starts at the initial hint (at least 1, at most `max`) and
//! doubles each time the slab fills it, capped at `max`. Once the slab reaches
//! `max` slots it never grows again.
//!
//! ```text
//!   hint = 3, max = 20:   3 -> 6 -> 12 -> 20
//! ```

use crate::error::InvariantError;

/// Stable index of a slot in a [`SlotArena`].
///
/// Index `0` is an ordinary slot. Absence of a link is expressed as
/// `Option<SlotId>::None`, never as a reserved index value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    len: usize,
    reserved: usize,
    initial: usize,
    max_capacity: usize,
}

impl<T> SlotArena<T> {
    /// Creates an empty arena that will hold at most `max_capacity` slots.
    ///
    /// `initial_capacity` pre-sizes the slab; zero is treated as 1 and values
    /// above `max_capacity` are clamped to it. A `max_capacity` of zero is
    /// treated as 1.
    pub fn bounded(initial_capacity: usize, max_capacity: usize) -> Self {
        let max_capacity = max_capacity.max(1);
        let initial = initial_capacity.clamp(1, max_capacity);
        Self {
            slots: Vec::with_capacity(initial),
            free_list: Vec::new(),
            len: 0,
            reserved: initial,
            initial,
            max_capacity,
        }
    }

    /// Stores `value` in a free slot, growing the slab if no slot is free.
    ///
    /// Callers must check [`has_vacancy`](Self::has_vacancy) first; inserting
    /// into a full arena would push the slab past `max_capacity`.
    pub fn insert(&mut self, value: T) -> SlotId {
        debug_assert!(self.has_vacancy(), "insert into a full SlotArena");
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(value);
            idx
        } else {
            if self.slots.len() == self.reserved {
                self.grow();
            }
            self.slots.push(Some(value));
            self.slots.len() - 1
        };
        self.len += 1;
        SlotId(idx)
    }

    /// Swaps the record in a live slot for `value`, returning the old record.
    ///
    /// The slot stays live and keeps its index. Returns `Err(value)` if `id`
    /// is not live.
    pub fn replace(&mut self, id: SlotId, value: T) -> Result<T, T> {
        match self.slots.get_mut(id.0) {
            Some(Some(current)) => Ok(std::mem::replace(current, value)),
            _ => Err(value),
        }
    }

    /// Vacates a slot and pushes its index onto the free list.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        let value = slot.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.slots
            .get(id.0)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots materialized in the slab, live or free.
    pub fn slab_len(&self) -> usize {
        self.slots.len()
    }

    /// Current reservation under the doubling growth policy.
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Number of vacated slots waiting on the free list.
    pub fn free_slots(&self) -> usize {
        self.free_list.len()
    }

    /// Returns `true` if `insert` can place a value without recycling a live slot.
    pub fn has_vacancy(&self) -> bool {
        !self.free_list.is_empty() || self.slots.len() < self.max_capacity
    }

    /// Drops every record and the free list; the reservation restarts at the
    /// initial hint while the existing allocation is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
        self.reserved = self.initial;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (SlotId(idx), value)))
    }

    /// Verifies slab bounds and free-list consistency.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.slots.len() > self.max_capacity {
            return Err(InvariantError::new(format!(
                "slab length {} exceeds max capacity {}",
                self.slots.len(),
                self.max_capacity
            )));
        }
        let mut on_free_list = vec![false; self.slots.len()];
        for &idx in &self.free_list {
            match self.slots.get(idx) {
                None => {
                    return Err(InvariantError::new(format!(
                        "free list index {} is outside the slab (len {})",
                        idx,
                        self.slots.len()
                    )));
                },
                Some(Some(_)) => {
                    return Err(InvariantError::new(format!(
                        "slot {} is both live and on the free list",
                        idx
                    )));
                },
                Some(None) => {},
            }
            if std::mem::replace(&mut on_free_list[idx], true) {
                return Err(InvariantError::new(format!(
                    "slot {} appears on the free list twice",
                    idx
                )));
            }
        }
        let live = self.slots.iter().filter(|slot| slot.is_some()).count();
        if live != self.len {
            return Err(InvariantError::new(format!(
                "arena len {} but {} live slots",
                self.len, live
            )));
        }
        if live + self.free_list.len() != self.slots.len() {
            return Err(InvariantError::new(format!(
                "{} live + {} free slots do not cover slab length {}",
                live,
                self.free_list.len(),
                self.slots.len()
            )));
        }
        Ok(())
    }

    fn grow(&mut self) {
        let target = self.reserved.saturating_mul(2).min(self.max_capacity);
        if target > self.reserved {
            self.slots.reserve_exact(target - self.slots.len());
            self.reserved = target;
        }
    }
}
