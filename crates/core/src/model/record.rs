use serde::{Deserialize, Serialize};

/// One key/value pair of a flat log record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogField {
    pub key: String,
    pub value: String,
}

/// A schema-less log record: a unix-second timestamp plus fields in
/// canonical insertion order. Keys are unique within one record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: u32,
    pub fields: Vec<LogField>,
}

impl LogRecord {
    pub fn new(timestamp: u32) -> Self {
        Self {
            timestamp,
            fields: Vec::new(),
        }
    }

    pub fn with_capacity(timestamp: u32, capacity: usize) -> Self {
        Self {
            timestamp,
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        debug_assert!(
            self.get(&key).is_none(),
            "duplicate log field key: {key}"
        );
        self.fields.push(LogField {
            key,
            value: value.into(),
        });
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }
}

/// Clamp a millisecond epoch into unix seconds, flooring toward negative
/// infinity and saturating into the `u32` range.
pub fn millis_to_unix_secs(millis: i64) -> u32 {
    let secs = millis.div_euclid(1000);
    u32::try_from(secs.max(0)).unwrap_or(u32::MAX)
}
