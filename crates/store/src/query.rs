use chrono::NaiveDateTime;
use duckdb::params;
use skyingest_core::error::{IngestError, Result};
use skyingest_core::model::record::{LogField, LogRecord};

use crate::Store;

impl Store {
    /// Records of `logstore` in insertion order, at most `limit` of them.
    pub fn fetch_records(&self, logstore: &str, limit: usize) -> Result<Vec<LogRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT ts, contents_json FROM log_records
                 WHERE logstore = ?
                 ORDER BY id ASC
                 LIMIT ?",
            )
            .map_err(|e| IngestError::Store(format!("prepare fetch records failed: {e}")))?;

        let rows = stmt
            .query_map(params![logstore, limit as i64], |row| {
                Ok((row.get::<_, NaiveDateTime>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| IngestError::Store(format!("fetch records failed: {e}")))?;

        let mut out = Vec::new();
        for row in rows {
            let (ts, contents) =
                row.map_err(|e| IngestError::Store(format!("read record row failed: {e}")))?;
            out.push(decode_row(ts, &contents)?);
        }
        Ok(out)
    }
}

fn decode_row(ts: NaiveDateTime, contents: &str) -> Result<LogRecord> {
    let fields: Vec<LogField> = serde_json::from_str(contents)
        .map_err(|e| IngestError::Store(format!("corrupt record contents: {e}")))?;
    let timestamp = u32::try_from(ts.and_utc().timestamp())
        .map_err(|e| IngestError::Store(format!("record timestamp out of range: {e}")))?;
    Ok(LogRecord { timestamp, fields })
}
