//! slablru: a fixed-capacity LRU cache backed by a slot slab.
//!
//! Entries live in one contiguous, growable slab and are linked into a
//! recency list by slot index. Vacated slots are recycled through a free list
//! and the slab grows by doubling up to the configured maximum, so a cache
//! that is sized generously but used lightly stays small.
//!
//! ```
//! use slablru::SlabLruCache;
//!
//! let mut cache = SlabLruCache::with_on_evict(2, 2, |k: &&str, v: &i32| {
//!     println!("evicted {k} -> {v}");
//! });
//! cache.add("a", 1);
//! cache.add("b", 2);
//! assert!(cache.add("c", 3)); // evicts "a"
//! assert_eq!(cache.len(), 2);
//! ```
//!
//! See `DESIGN.md` for internal layout and invariants.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;

pub use crate::builder::{SlabLruBuilder, SlabLruConfig};
pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::SlabLruMetricsSnapshot;
pub use crate::policy::slab_lru::{EvictCallback, SlabLruCache};
