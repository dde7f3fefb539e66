use chrono::DateTime;
use duckdb::params;
use skyingest_core::error::{IngestError, Result};
use skyingest_core::model::record::LogRecord;

use crate::Store;

impl Store {
    /// Appends `records` to `logstore` in a single transaction.
    pub fn insert_records(&self, logstore: &str, records: &[LogRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| IngestError::Store(format!("begin tx failed: {e}")))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO log_records (id, logstore, ts, contents_json)
                     VALUES (nextval('log_records_id_seq'), ?, ?, ?)",
                )
                .map_err(|e| IngestError::Store(format!("prepare insert records failed: {e}")))?;

            for record in records {
                let ts = DateTime::from_timestamp(i64::from(record.timestamp), 0)
                    .ok_or_else(|| {
                        IngestError::Internal(format!("bad record timestamp {}", record.timestamp))
                    })?;
                let contents = serde_json::to_string(&record.fields)
                    .map_err(|e| IngestError::Internal(format!("encode record failed: {e}")))?;
                stmt.execute(params![logstore, ts.to_rfc3339(), contents])
                    .map_err(|e| IngestError::Store(format!("insert record failed: {e}")))?;
            }
        }

        tx.commit()
            .map_err(|e| IngestError::Store(format!("commit records failed: {e}")))?;
        tracing::debug!(logstore, count = records.len(), "records written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use skyingest_core::model::record::LogRecord;

    use crate::Store;

    fn record(ts: u32, value: &str) -> LogRecord {
        let mut record = LogRecord::new(ts);
        record.push("k", value);
        record
    }

    #[test]
    fn insert_counts_per_logstore() {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_records("apm-traces", &[record(1, "a"), record(2, "b")])
            .unwrap();
        store
            .insert_records("apm-metrics", &[record(3, "c")])
            .unwrap();
        store.insert_records("apm-metrics", &[]).unwrap();

        let status = store.status().unwrap();
        assert_eq!(status.total_records, 3);
        assert_eq!(status.count_for("apm-traces"), 2);
        assert_eq!(status.count_for("apm-metrics"), 1);
        assert_eq!(status.count_for("other"), 0);
    }
}
