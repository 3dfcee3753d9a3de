//! Optional operation counters for [`SlabLruCache`](crate::SlabLruCache).
//!
//! Compiled only with the `metrics` feature. Recording, snapshotting and
//! export are split across small traits so the cache only ever writes
//! counters:
//!
//! - [`traits`]: recorder, snapshot-provider and exporter traits
//! - [`metrics_impl`]: [`SlabLruMetrics`](metrics_impl::SlabLruMetrics), the counter block held by the cache
//! - [`snapshot`]: plain-data copies of the counters plus gauges
//! - [`exporter`]: Prometheus text exposition

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
