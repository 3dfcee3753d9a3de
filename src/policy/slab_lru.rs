//! # Slab-Indexed LRU Cache
//!
//! A fixed-capacity LRU cache whose recency list lives in one contiguous,
//! growable slab of slots. Links between entries are slot indices, not
//! pointers, and indices vacated by removal are recycled through a free list
//! before the slab grows.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                         SlabLruCache<K, V>                           │
//!   │                                                                      │
//!   │   ┌──────────────────────────────┐                                   │
//!   │   │ FxHashMap<K, SlotId>         │  key index                        │
//!   │   │   "a" -> 2, "b" -> 0, ...    │                                   │
//!   │   └──────────────┬───────────────┘                                   │
//!   │                  │                                                   │
//!   │   ┌──────────────▼───────────────────────────────────────────────┐   │
//!   │   │ RecencyList<Entry<K, V>>                                     │   │
//!   │   │                                                              │   │
//!   │   │   slab: [ {b,..} | free | {a,..} | {c,..} ]   free_list: [1] │   │
//!   │   │                                                              │   │
//!   │   │   back ─► [0] ◄──► [2] ◄──► [3] ◄── front                    │   │
//!   │   │   (LRU)                          (MRU)                       │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   │                                                                      │
//!   │   on_evict: Option<Box<dyn FnMut(&K, &V) + Send>>                    │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Slot acquisition on `add` of a new key
//!
//! ```text
//!   1. free list non-empty      -> reuse vacated slot           (returns false)
//!   2. slab below max_capacity  -> append, doubling reservation (returns false)
//!   3. slab full                -> evict back, reuse its slot   (returns true)
//! ```
//!
//! ## Departure notifications
//!
//! The eviction callback runs synchronously, once per departing entry, for
//! overflow eviction, [`remove`](SlabLruCache::remove),
//! [`pop_lru`](SlabLruCache::pop_lru) and [`purge`](SlabLruCache::purge).
//! It cannot reach the cache it is attached to: every departing operation
//! holds `&mut self`.
//!
//! ## Method Summary
//!
//! | Method              | Complexity | Recency change | Notes                         |
//! |---------------------|------------|----------------|-------------------------------|
//! | `add(k, v)`         | O(1)*      | to front       | returns `true` on eviction    |
//! | `get(&k)`           | O(1)       | to front       |                               |
//! | `peek(&k)`          | O(1)       | none           |                               |
//! | `contains(&k)`      | O(1)       | none           |                               |
//! | `remove(&k)`        | O(1)       | unlinked       | notifies                      |
//! | `pop_lru()`         | O(1)       | unlinked       | notifies                      |
//! | `touch(&k)`         | O(1)       | to front       |                               |
//! | `purge()`           | O(n)       | all unlinked   | notifies back to front        |
//! | `iter()`            | O(n)       | none           | back (LRU) to front (MRU)     |
//!
//! *amortized: slab growth is O(len) and happens O(log max_capacity) times.
//!
//! ## Thread Safety
//!
//! Not internally synchronized. Wrap in a lock (e.g. `parking_lot::Mutex`)
//! to share across threads; the cache is `Send` when `K` and `V` are.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use rustc_hash::FxHashMap;

use crate::builder::SlabLruConfig;
use crate::ds::recency_list::{self, RecencyList};
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::SlabLruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::SlabLruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, MetricsSnapshotProvider, SlabLruMetricsReadRecorder,
    SlabLruMetricsRecorder,
};

/// Callback invoked with the key and value of every entry leaving the cache.
pub type EvictCallback<K, V> = Box<dyn FnMut(&K, &V) + Send>;

/// Slot payload: the key is kept next to the value so eviction can clear the
/// index without a reverse lookup.
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity LRU cache backed by a slot slab.
///
/// # Example
///
/// ```
/// use slablru::SlabLruCache;
///
/// let mut cache = SlabLruCache::new(2, 2);
/// cache.add("a", 1);
/// cache.add("b", 2);
///
/// // Touch "a" so "b" becomes the eviction candidate.
/// assert_eq!(cache.get(&"a"), Some(&1));
///
/// assert!(cache.add("c", 3));
/// assert!(!cache.contains(&"b"));
/// assert_eq!(cache.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec!["a", "c"]);
/// ```
pub struct SlabLruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    list: RecencyList<Entry<K, V>>,
    on_evict: Option<EvictCallback<K, V>>,
    #[cfg(feature = "metrics")]
    metrics: SlabLruMetrics,
}

impl<K, V> SlabLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `max_capacity` entries.
    ///
    /// `initial_capacity` pre-sizes the slab and index; zero means 1 and
    /// values above `max_capacity` are clamped.
    ///
    /// # Panics
    ///
    /// Panics if `max_capacity` is zero. Use [`try_new`](Self::try_new) for
    /// user-supplied capacities.
    ///
    /// # Example
    ///
    /// ```
    /// use slablru::SlabLruCache;
    ///
    /// let cache: SlabLruCache<u64, String> = SlabLruCache::new(16, 1024);
    /// assert_eq!(cache.capacity(), 1024);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(initial_capacity: usize, max_capacity: usize) -> Self {
        assert!(max_capacity > 0, "SlabLruCache max_capacity must be > 0");
        Self::from_parts(
            SlabLruConfig {
                initial_capacity,
                max_capacity,
            },
            None,
        )
    }

    /// Creates an empty cache that reports every departing entry to `on_evict`.
    ///
    /// # Panics
    ///
    /// Panics if `max_capacity` is zero.
    pub fn with_on_evict<F>(initial_capacity: usize, max_capacity: usize, on_evict: F) -> Self
    where
        F: FnMut(&K, &V) + Send + 'static,
    {
        let mut cache = Self::new(initial_capacity, max_capacity);
        cache.on_evict = Some(Box::new(on_evict));
        cache
    }

    /// Fallible constructor for configuration that comes from outside the
    /// program.
    pub fn try_new(initial_capacity: usize, max_capacity: usize) -> Result<Self, ConfigError> {
        let config = SlabLruConfig {
            initial_capacity,
            max_capacity,
        };
        Self::from_config(config)
    }

    /// Builds a cache from a [`SlabLruConfig`], validating it first.
    pub fn from_config(config: SlabLruConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, None))
    }

    pub(crate) fn from_parts(config: SlabLruConfig, on_evict: Option<EvictCallback<K, V>>) -> Self {
        let initial = config.initial_capacity.clamp(1, config.max_capacity.max(1));
        Self {
            index: FxHashMap::with_capacity_and_hasher(initial, Default::default()),
            list: RecencyList::bounded(initial, config.max_capacity),
            on_evict,
            #[cfg(feature = "metrics")]
            metrics: SlabLruMetrics::default(),
        }
    }

    /// Replaces the eviction callback.
    pub fn set_on_evict<F>(&mut self, on_evict: F)
    where
        F: FnMut(&K, &V) + Send + 'static,
    {
        self.on_evict = Some(Box::new(on_evict));
    }

    /// Drops the eviction callback; later departures are silent.
    pub fn clear_on_evict(&mut self) {
        self.on_evict = None;
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of entries (the slab never grows past this).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.list.max_capacity()
    }

    /// Slots materialized in the slab, live or on the free list.
    #[inline]
    pub fn slab_len(&self) -> usize {
        self.list.slab_len()
    }

    /// Current slab reservation under the doubling growth policy.
    #[inline]
    pub fn reserved(&self) -> usize {
        self.list.reserved()
    }

    /// Vacated slots waiting to be reused.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.list.free_slots()
    }

    /// Inserts or updates `key`, returning `true` if another entry was
    /// evicted to make room.
    ///
    /// An existing key has its value replaced in place and moves to the
    /// front; no eviction runs. A new key takes a free slot, a newly grown
    /// slot, or, when the slab is full, the slot of the least recently used
    /// entry, which is reported to the eviction callback first.
    ///
    /// # Example
    ///
    /// ```
    /// use slablru::SlabLruCache;
    ///
    /// let mut cache = SlabLruCache::new(1, 2);
    /// assert!(!cache.add(1, "a"));
    /// assert!(!cache.add(2, "b"));
    /// assert!(!cache.add(1, "A")); // update, moves 1 to front
    /// assert!(cache.add(3, "c"));  // evicts 2
    /// assert!(!cache.contains(&2));
    /// ```
    pub fn add(&mut self, key: K, value: V) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            if let Some(entry) = self.list.get_mut(id) {
                entry.value = value;
            }
            self.list.move_to_front(id);
            return false;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let entry = Entry {
            key: key.clone(),
            value,
        };

        let mut evicted = false;
        let id = if self.list.has_vacancy() {
            #[cfg(feature = "metrics")]
            let (reused, reserved_before) = (self.list.free_slots() > 0, self.list.reserved());

            let id = self.list.push_front(entry);

            #[cfg(feature = "metrics")]
            {
                if reused {
                    self.metrics.record_free_list_reuse();
                } else if self.list.reserved() > reserved_before {
                    self.metrics.record_slab_grow();
                }
            }
            id
        } else {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();

            match self.list.recycle_back(entry) {
                Ok((id, old)) => {
                    self.index.remove(&old.key);
                    self.notify(&old);
                    evicted = true;

                    #[cfg(feature = "metrics")]
                    self.metrics.record_evicted_entry();
                    id
                },
                // Full slab with an empty list cannot happen for max_capacity >= 1.
                Err(entry) => self.list.push_front(entry),
            }
        };

        self.index.insert(key, id);

        #[cfg(debug_assertions)]
        self.debug_validate();

        evicted
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss performs no mutation.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Mutable counterpart of [`get`](Self::get); also marks `key` most
    /// recently used.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        self.list.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Returns the value for `key` without changing eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use slablru::SlabLruCache;
    ///
    /// let mut cache = SlabLruCache::new(2, 2);
    /// cache.add(1, "one");
    /// cache.add(2, "two");
    ///
    /// assert_eq!(cache.peek(&1), Some(&"one"));
    ///
    /// // 1 is still the least recently used entry.
    /// cache.add(3, "three");
    /// assert!(!cache.contains(&1));
    /// ```
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let id = *self.index.get(key)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_found();

        self.list.get(id).map(|entry| &entry.value)
    }

    /// Membership test; never changes eviction order.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let found = self.index.contains_key(key);

        #[cfg(feature = "metrics")]
        {
            (&self.metrics).record_contains_call();
            if found {
                (&self.metrics).record_contains_found();
            }
        }

        found
    }

    /// Marks `key` most recently used without reading it.
    ///
    /// Returns `true` if the key was present.
    pub fn touch<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        match self.index.get(key) {
            Some(&id) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_touch_found();

                self.list.move_to_front(id)
            },
            None => false,
        }
    }

    /// Removes `key`, reporting it to the eviction callback.
    ///
    /// Returns whether the key had been present. Removing an absent key
    /// changes nothing.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let Some(id) = self.index.remove(key) else {
            return false;
        };

        if let Some(entry) = self.list.remove(id) {
            self.notify(&entry);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        #[cfg(debug_assertions)]
        self.debug_validate();

        true
    }

    /// Returns the least recently used entry, the next eviction candidate,
    /// without changing order.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_call();

        let entry = self.list.back()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_found();

        Some((&entry.key, &entry.value))
    }

    /// Removes and returns the least recently used entry.
    ///
    /// The entry is reported to the eviction callback before it is returned.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        self.notify(&entry);

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some((entry.key, entry.value))
    }

    /// Removes every entry, reporting each to the eviction callback from
    /// least to most recently used.
    ///
    /// Afterwards the cache behaves like a freshly constructed one: the slab
    /// is empty, the free list is dropped and the growth reservation restarts
    /// from the initial hint. The slab's allocation is kept.
    pub fn purge(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        if let Some(on_evict) = self.on_evict.as_mut() {
            for entry in self.list.iter() {
                on_evict(&entry.key, &entry.value);
            }
        }

        #[cfg(feature = "metrics")]
        for _ in 0..self.list.len() {
            self.metrics.record_purged_entry();
        }

        self.index.clear();
        self.list.clear();
    }

    /// Walks entries from least to most recently used, calling `f` on each.
    ///
    /// Equivalent to `for (k, v) in cache.iter()`.
    pub fn iterate<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }

    /// Iterates `(key, value)` pairs from least to most recently used.
    ///
    /// Reading never changes recency. Use `.rev()` for most recent first.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Values from least to most recently used.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Checks that the key index, slab, free list and recency links agree.
    ///
    /// Runs in O(n + slab_len); meant for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;

        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but {} slots are live",
                self.index.len(),
                self.list.len()
            )));
        }

        for (id, entry) in self.list.iter_entries() {
            match self.index.get(&entry.key) {
                Some(&indexed) if indexed == id => {},
                Some(&indexed) => {
                    return Err(InvariantError::new(format!(
                        "slot {} holds a key indexed at slot {}",
                        id.index(),
                        indexed.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "slot {} holds a key missing from the index",
                        id.index()
                    )));
                },
            }
        }
        Ok(())
    }

    fn notify(&mut self, entry: &Entry<K, V>) {
        if let Some(on_evict) = self.on_evict.as_mut() {
            on_evict(&entry.key, &entry.value);
        }
    }

    /// Validate internal invariants (debug builds only).
    #[cfg(debug_assertions)]
    fn debug_validate(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("SlabLruCache invariant violated: {}", err);
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> SlabLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> SlabLruMetricsSnapshot {
        SlabLruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            purge_calls: self.metrics.purge_calls,
            purged_entries: self.metrics.purged_entries,
            slab_grows: self.metrics.slab_grows,
            free_list_reuses: self.metrics.free_list_reuses,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            contains_calls: self.metrics.contains_calls.get(),
            contains_found: self.metrics.contains_found.get(),
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            cache_len: self.index.len(),
            slab_len: self.list.slab_len(),
            reserved: self.list.reserved(),
            free_slots: self.list.free_slots(),
            capacity: self.list.max_capacity(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<SlabLruMetricsSnapshot> for SlabLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> SlabLruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for SlabLruCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<_> = self
            .list
            .iter()
            .map(|entry| (&entry.key, &entry.value))
            .collect();
        f.debug_struct("SlabLruCache")
            .field("len", &self.index.len())
            .field("capacity", &self.list.max_capacity())
            .field("slab_len", &self.list.slab_len())
            .field("free_slots", &self.list.free_slots())
            .field("lru_to_mru", &entries)
            .field("on_evict", &self.on_evict.is_some())
            .finish()
    }
}

/// Iterator over `(&K, &V)` from least to most recently used.
pub struct Iter<'a, K, V> {
    inner: recency_list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| (&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a SlabLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
