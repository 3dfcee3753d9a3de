use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::SlabLruMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", &self.metric_name(suffix), value);
    }

    fn write_gauge(&self, suffix: &str, value: usize) {
        self.write_metric("gauge", &self.metric_name(suffix), value as u64);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<SlabLruMetricsSnapshot>
    for PrometheusTextExporter<W>
{
    fn export(&self, snapshot: &SlabLruMetricsSnapshot) {
        let counters = [
            ("get_calls_total", snapshot.get_calls),
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("insert_calls_total", snapshot.insert_calls),
            ("insert_updates_total", snapshot.insert_updates),
            ("insert_new_total", snapshot.insert_new),
            ("evict_calls_total", snapshot.evict_calls),
            ("evicted_entries_total", snapshot.evicted_entries),
            ("remove_calls_total", snapshot.remove_calls),
            ("remove_found_total", snapshot.remove_found),
            ("purge_calls_total", snapshot.purge_calls),
            ("purged_entries_total", snapshot.purged_entries),
            ("slab_grows_total", snapshot.slab_grows),
            ("free_list_reuses_total", snapshot.free_list_reuses),
            ("pop_lru_calls_total", snapshot.pop_lru_calls),
            ("pop_lru_found_total", snapshot.pop_lru_found),
            ("touch_calls_total", snapshot.touch_calls),
            ("touch_found_total", snapshot.touch_found),
            ("peek_calls_total", snapshot.peek_calls),
            ("peek_found_total", snapshot.peek_found),
            ("contains_calls_total", snapshot.contains_calls),
            ("contains_found_total", snapshot.contains_found),
            ("peek_lru_calls_total", snapshot.peek_lru_calls),
            ("peek_lru_found_total", snapshot.peek_lru_found),
        ];
        for (suffix, value) in counters {
            self.write_counter(suffix, value);
        }

        self.write_gauge("cache_len", snapshot.cache_len);
        self.write_gauge("slab_len", snapshot.slab_len);
        self.write_gauge("slab_reserved", snapshot.reserved);
        self.write_gauge("free_slots", snapshot.free_slots);
        self.write_gauge("capacity", snapshot.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("slablru", Vec::new());
        let snapshot = SlabLruMetricsSnapshot {
            get_hits: 7,
            evicted_entries: 2,
            cache_len: 5,
            capacity: 8,
            ..Default::default()
        };
        exporter.export(&snapshot);

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE slablru_get_hits_total counter\nslablru_get_hits_total 7\n"));
        assert!(text.contains("slablru_evicted_entries_total 2\n"));
        assert!(text.contains("# TYPE slablru_cache_len gauge\nslablru_cache_len 5\n"));
        assert!(text.contains("slablru_capacity 8\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&SlabLruMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("\nget_calls_total 0\n"));
    }
}
