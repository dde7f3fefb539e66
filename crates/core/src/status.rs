use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogstoreCount {
    pub logstore: String,
    pub records: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub db_path: String,
    pub db_size_bytes: u64,
    pub total_records: usize,
    pub logstores: Vec<LogstoreCount>,
}

impl StatusResponse {
    pub fn count_for(&self, logstore: &str) -> usize {
        self.logstores
            .iter()
            .find(|c| c.logstore == logstore)
            .map(|c| c.records)
            .unwrap_or(0)
    }
}
