pub const SEGMENTS_TOPIC: &str = "skywalking-segments";
pub const METRICS_TOPIC: &str = "skywalking-metrics";
pub const LOGGING_TOPIC: &str = "skywalking-logging";

/// Payload classification assigned by the message source from the topic
/// a message arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicKind {
    Segment,
    Metric,
    Logging,
    Unclassified,
}

impl TopicKind {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "segment" | "segments" | "trace" => Self::Segment,
            "metric" | "metrics" | "jvm" => Self::Metric,
            "logging" | "log" | "logs" => Self::Logging,
            _ => Self::Unclassified,
        }
    }
}

/// The three configured topic names, optionally namespace-prefixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topics {
    pub segment: String,
    pub metric: String,
    pub logging: String,
}

impl Topics {
    pub fn new(namespace: Option<&str>) -> Self {
        let name = |topic: &str| match namespace.filter(|ns| !ns.is_empty()) {
            Some(ns) => format!("{ns}-{topic}"),
            None => topic.to_string(),
        };
        Self {
            segment: name(SEGMENTS_TOPIC),
            metric: name(METRICS_TOPIC),
            logging: name(LOGGING_TOPIC),
        }
    }

    pub fn classify(&self, topic: &str) -> TopicKind {
        if topic == self.segment {
            TopicKind::Segment
        } else if topic == self.metric {
            TopicKind::Metric
        } else if topic == self.logging {
            TopicKind::Logging
        } else {
            TopicKind::Unclassified
        }
    }

    pub fn all(&self) -> [&str; 3] {
        [&self.segment, &self.metric, &self.logging]
    }
}

impl Default for Topics {
    fn default() -> Self {
        Self::new(None)
    }
}
