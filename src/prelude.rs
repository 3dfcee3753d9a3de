pub use crate::builder::{SlabLruBuilder, SlabLruConfig};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::exporter::PrometheusTextExporter;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::SlabLruMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
pub use crate::policy::slab_lru::{EvictCallback, SlabLruCache};
