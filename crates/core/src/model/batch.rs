use crate::model::record::LogRecord;

/// Output category of a converted message; the sink routes on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Trace,
    Metric,
    Logging,
    None,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Metric => "metric",
            Self::Logging => "logging",
            Self::None => "none",
        }
    }
}

/// Records produced from one input message. Built fresh per message and
/// handed to the sink as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogBatch {
    pub category: Category,
    pub records: Vec<LogRecord>,
}

impl LogBatch {
    pub fn new(category: Category, records: Vec<LogRecord>) -> Self {
        Self { category, records }
    }

    pub fn empty(category: Category) -> Self {
        Self::new(category, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
