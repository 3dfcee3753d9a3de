//! Configuration and builder for [`SlabLruCache`].
//!
//! Hides the two-capacity constructor behind named setters and gives a
//! fallible path for capacities that come from outside the program.
//!
//! ## Example
//!
//! ```rust
//! use slablru::builder::SlabLruBuilder;
//!
//! let mut cache = SlabLruBuilder::new(100)
//!     .initial_capacity(8)
//!     .on_evict(|key: &u64, value: &String| println!("evicted {key}: {value}"))
//!     .build();
//! cache.add(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::slab_lru::{EvictCallback, SlabLruCache};

/// Capacities for a [`SlabLruCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlabLruConfig {
    /// Slots reserved up front. Zero means 1; values above `max_capacity`
    /// are clamped.
    pub initial_capacity: usize,
    /// Hard bound on live entries and on slab slots. Must be non-zero.
    pub max_capacity: usize,
}

impl Default for SlabLruConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            max_capacity: 1024,
        }
    }
}

impl SlabLruConfig {
    /// Rejects configurations no cache can be built from.
    ///
    /// An initial capacity above the maximum is accepted and clamped at
    /// construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_capacity == 0 {
            return Err(ConfigError::new("max_capacity must be greater than zero"));
        }
        Ok(())
    }
}

/// Builder for [`SlabLruCache`] instances.
pub struct SlabLruBuilder<K, V> {
    config: SlabLruConfig,
    on_evict: Option<EvictCallback<K, V>>,
}

impl<K, V> SlabLruBuilder<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Starts a builder for a cache bounded at `max_capacity` entries, with
    /// the default initial capacity.
    pub fn new(max_capacity: usize) -> Self {
        Self {
            config: SlabLruConfig {
                max_capacity,
                ..SlabLruConfig::default()
            },
            on_evict: None,
        }
    }

    pub fn from_config(config: SlabLruConfig) -> Self {
        Self {
            config,
            on_evict: None,
        }
    }

    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.config.initial_capacity = initial_capacity;
        self
    }

    pub fn max_capacity(mut self, max_capacity: usize) -> Self {
        self.config.max_capacity = max_capacity;
        self
    }

    /// Sets the callback told about every entry that leaves the cache.
    pub fn on_evict<F>(mut self, on_evict: F) -> Self
    where
        F: FnMut(&K, &V) + Send + 'static,
    {
        self.on_evict = Some(Box::new(on_evict));
        self
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if `max_capacity` is zero.
    pub fn build(self) -> SlabLruCache<K, V> {
        match self.try_build() {
            Ok(cache) => cache,
            Err(err) => panic!("invalid SlabLruCache config: {}", err),
        }
    }

    /// Builds the cache, reporting an invalid configuration instead of
    /// panicking.
    ///
    /// ```rust
    /// use slablru::builder::SlabLruBuilder;
    ///
    /// let result = SlabLruBuilder::<u32, u32>::new(0).try_build();
    /// assert!(result.is_err());
    /// ```
    pub fn try_build(self) -> Result<SlabLruCache<K, V>, ConfigError> {
        self.config.validate()?;
        Ok(SlabLruCache::from_parts(self.config, self.on_evict))
    }
}
