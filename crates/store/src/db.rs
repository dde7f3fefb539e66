use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use duckdb::Connection;
use skyingest_core::error::{IngestError, Result};
use skyingest_core::status::{LogstoreCount, StatusResponse};

use crate::schema::SCHEMA_SQL;

#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
    db_path: String,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| IngestError::Io(format!("failed to create db dir: {e}")))?;
        }

        let conn = Connection::open(path)
            .map_err(|e| IngestError::Store(format!("failed to open duckdb: {e}")))?;
        conn.execute_batch("PRAGMA threads=4;")
            .map_err(|e| IngestError::Store(format!("failed to set pragmas: {e}")))?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| IngestError::Store(format!("failed to initialize schema: {e}")))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: path.display().to_string(),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| IngestError::Store(format!("failed to open in-memory db: {e}")))?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| IngestError::Store(format!("failed to initialize schema: {e}")))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: ":memory:".to_string(),
        })
    }

    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| IngestError::Store("store mutex poisoned".to_string()))
    }

    pub fn status(&self) -> Result<StatusResponse> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare(
                "SELECT logstore, COUNT(*) FROM log_records GROUP BY logstore ORDER BY logstore",
            )
            .map_err(|e| IngestError::Store(format!("prepare status failed: {e}")))?;
        let logstores = stmt
            .query_map([], |row| {
                Ok(LogstoreCount {
                    logstore: row.get(0)?,
                    records: row.get::<_, i64>(1)? as usize,
                })
            })
            .map_err(|e| IngestError::Store(format!("status query failed: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| IngestError::Store(format!("status row failed: {e}")))?;

        let db_size_bytes = if self.db_path == ":memory:" {
            0
        } else {
            fs::metadata(&self.db_path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StatusResponse {
            db_path: self.db_path.clone(),
            db_size_bytes,
            total_records: logstores.iter().map(|c| c.records).sum(),
            logstores,
        })
    }
}
