use skyingest_core::config::Config;
use skyingest_core::error::{IngestError, Result};
use skyingest_core::model::batch::{Category, LogBatch};
use skyingest_store::Store;

/// Sink adapter: routes each batch to the logstore for its category.
#[derive(Clone)]
pub struct Exporter {
    store: Store,
    trace_logstore: String,
    metric_logstore: String,
}

impl Exporter {
    pub fn new(store: Store, cfg: &Config) -> Self {
        Self {
            store,
            trace_logstore: cfg.trace_logstore(),
            metric_logstore: cfg.metric_logstore(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn logstore_for(&self, category: Category) -> Option<&str> {
        match category {
            Category::Trace => Some(self.trace_logstore.as_str()),
            Category::Metric => Some(self.metric_logstore.as_str()),
            Category::Logging | Category::None => None,
        }
    }

    /// Writes `batch` and returns how many records landed.
    pub fn export(&self, batch: &LogBatch) -> Result<usize> {
        if batch.is_empty() {
            return Ok(0);
        }
        let Some(logstore) = self.logstore_for(batch.category) else {
            tracing::debug!(
                category = batch.category.as_str(),
                records = batch.len(),
                "no logstore for category; batch skipped"
            );
            return Ok(0);
        };
        self.store
            .insert_records(logstore, &batch.records)
            .map_err(|err| export_failed(logstore, err))?;
        Ok(batch.len())
    }
}

fn export_failed(logstore: &str, err: IngestError) -> IngestError {
    IngestError::Ingest(format!("export to {logstore} failed: {err}"))
}

#[cfg(test)]
mod tests {
    use skyingest_core::model::record::LogRecord;

    use super::*;

    fn exporter() -> Exporter {
        let cfg = Config {
            trace_instance: "apm".to_string(),
            ..Config::default()
        };
        Exporter::new(Store::open_in_memory().unwrap(), &cfg)
    }

    fn batch(category: Category, n: u32) -> LogBatch {
        LogBatch::new(category, (0..n).map(LogRecord::new).collect())
    }

    #[test]
    fn routes_by_category() {
        let exporter = exporter();
        assert_eq!(exporter.export(&batch(Category::Trace, 2)).unwrap(), 2);
        assert_eq!(exporter.export(&batch(Category::Metric, 3)).unwrap(), 3);

        let status = exporter.store().status().unwrap();
        assert_eq!(status.count_for("apm-traces"), 2);
        assert_eq!(status.count_for("apm-metrics"), 3);
    }

    #[test]
    fn store_failures_surface_as_ingest_errors() {
        let err = export_failed("apm-traces", IngestError::Store("disk full".to_string()));
        match err {
            IngestError::Ingest(msg) => {
                assert!(msg.contains("apm-traces"));
                assert!(msg.contains("storage error: disk full"));
            }
            other => panic!("expected ingest error, got {other:?}"),
        }
    }

    #[test]
    fn logging_none_and_empty_batches_are_noops() {
        let exporter = exporter();
        assert_eq!(exporter.export(&batch(Category::Logging, 2)).unwrap(), 0);
        assert_eq!(exporter.export(&batch(Category::None, 1)).unwrap(), 0);
        assert_eq!(exporter.export(&LogBatch::empty(Category::Trace)).unwrap(), 0);
        assert_eq!(exporter.store().status().unwrap().total_records, 0);
    }
}
