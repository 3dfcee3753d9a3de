//! Error types for the slablru library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned by [`SlabLruCache::check_invariants`] when the
//!   slab, index, free list or recency links disagree with each other.
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (e.g. a zero maximum capacity).
//!
//! Core cache operations never fail; these types only surface from fallible
//! constructors and on-demand invariant checks.
//!
//! ## Example Usage
//!
//! ```
//! use slablru::error::ConfigError;
//! use slablru::SlabLruCache;
//!
//! let cache: Result<SlabLruCache<String, i32>, ConfigError> = SlabLruCache::try_new(4, 100);
//! assert!(cache.is_ok());
//!
//! // Zero max capacity is caught without panicking
//! let bad = SlabLruCache::<String, i32>::try_new(4, 0);
//! assert!(bad.is_err());
//! ```
//!
//! [`SlabLruCache::check_invariants`]: crate::SlabLruCache::check_invariants

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`SlabLruCache::check_invariants`](crate::SlabLruCache::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`SlabLruCache::try_new`](crate::SlabLruCache::try_new),
/// [`SlabLruConfig::validate`](crate::builder::SlabLruConfig::validate) and
/// [`SlabLruBuilder::try_build`](crate::builder::SlabLruBuilder::try_build).
///
/// # Example
///
/// ```
/// use slablru::SlabLruCache;
///
/// let err = SlabLruCache::<u64, u64>::try_new(0, 0).unwrap_err();
/// assert!(err.to_string().contains("max_capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
