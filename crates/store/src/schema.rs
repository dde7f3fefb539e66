pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS log_records (
  id BIGINT PRIMARY KEY,
  logstore TEXT NOT NULL,
  ts TIMESTAMP NOT NULL,
  contents_json TEXT NOT NULL
);

CREATE SEQUENCE IF NOT EXISTS log_records_id_seq;

CREATE INDEX IF NOT EXISTS idx_log_records_store_ts ON log_records(logstore, ts);
"#;
