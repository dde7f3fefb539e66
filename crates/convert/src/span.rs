use serde_json::{Map, Value, json};
use skyingest_core::model::batch::{Category, LogBatch};
use skyingest_core::model::record::{LogRecord, millis_to_unix_secs};

use crate::proto::common::KeyStringValuePair;
use crate::proto::segment::{
    Log, SegmentObject, SegmentReference, SpanLayer, SpanObject, SpanType,
};

pub const TRACE_ID: &str = "traceid";
pub const SPAN_ID: &str = "spanID";
pub const PARENT_SPAN_ID: &str = "parentSpanID";
pub const OPERATION_NAME: &str = "name";
pub const START_TIME: &str = "start";
pub const END_TIME: &str = "end";
pub const DURATION: &str = "duration";
pub const SERVICE_NAME: &str = "service";
pub const ATTRIBUTE: &str = "attribute";
pub const RESOURCE: &str = "resource";
pub const LINKS: &str = "links";
pub const LOGS: &str = "logs";
pub const STATUS_MESSAGE: &str = "statusmessage";
pub const STATUS_CODE: &str = "statuscode";
pub const SPAN_KIND: &str = "kind";

const SPAN_FIELD_COUNT: usize = 15;

/// Maps every span of `segment`, in order, to one trace log record.
pub fn map_segment(segment: &SegmentObject) -> LogBatch {
    let records = segment
        .spans
        .iter()
        .map(|span| span_to_record(segment, span))
        .collect();
    LogBatch::new(Category::Trace, records)
}

pub fn span_to_record(segment: &SegmentObject, span: &SpanObject) -> LogRecord {
    let start = to_micros(span.start_time);
    let end = to_micros(span.end_time);

    let mut record =
        LogRecord::with_capacity(millis_to_unix_secs(span.start_time), SPAN_FIELD_COUNT);
    record.push(TRACE_ID, segment.trace_id.as_str());
    record.push(
        SPAN_ID,
        synthesize_id(&segment.trace_segment_id, span.span_id),
    );
    record.push(PARENT_SPAN_ID, resolve_parent(segment, span));
    record.push(OPERATION_NAME, span.operation_name.as_str());
    record.push(START_TIME, start.to_string());
    record.push(END_TIME, end.to_string());
    record.push(DURATION, end.saturating_sub(start).to_string());
    record.push(SERVICE_NAME, segment.service.as_str());
    record.push(ATTRIBUTE, attribute_json(&span.tags));
    record.push(RESOURCE, resource_json(segment));
    record.push(LINKS, links_json(&span.refs));
    record.push(LOGS, logs_json(&span.logs));
    record.push(STATUS_MESSAGE, "");
    record.push(STATUS_CODE, status_code(span));
    record.push(SPAN_KIND, span_kind(span));
    record
}

/// Globally unique span identifier: `<segment id>.<span id>`.
pub fn synthesize_id(segment_id: &str, span_id: i32) -> String {
    format!("{segment_id}.{span_id}")
}

/// The first cross-segment reference wins over the local parent; a span
/// with neither is a root and gets an empty parent.
pub fn resolve_parent(segment: &SegmentObject, span: &SpanObject) -> String {
    match span.refs.first() {
        Some(parent) => synthesize_id(&parent.parent_trace_segment_id, parent.parent_span_id),
        None if span.parent_span_id == -1 => String::new(),
        None => synthesize_id(&segment.trace_segment_id, span.parent_span_id),
    }
}

pub fn span_kind(span: &SpanObject) -> &'static str {
    let layer = SpanLayer::try_from(span.span_layer).ok();
    let span_type = SpanType::try_from(span.span_type).ok();
    match (layer, span_type) {
        (Some(SpanLayer::Mq), Some(SpanType::Entry)) => "consumer",
        (Some(SpanLayer::Mq), _) => "producer",
        (_, Some(SpanType::Entry)) => "server",
        (_, Some(SpanType::Exit)) => "client",
        (_, Some(SpanType::Local)) => "internal",
        _ => "",
    }
}

fn status_code(span: &SpanObject) -> &'static str {
    if span.is_error { "ERROR" } else { "SUCCESS" }
}

fn to_micros(millis: i64) -> i64 {
    millis.saturating_mul(1000)
}

fn attribute_json(tags: &[KeyStringValuePair]) -> String {
    if tags.is_empty() {
        return "{}".to_string();
    }
    let attrs = pairs_to_map(tags, Map::new());
    encoded_or(serde_json::to_string(&attrs), "{}")
}

fn resource_json(segment: &SegmentObject) -> String {
    let resource = json!({
        "service.name": segment.service,
        "service.instance.id": segment.service_instance,
    });
    encoded_or(serde_json::to_string(&resource), "")
}

fn links_json(refs: &[SegmentReference]) -> String {
    if refs.is_empty() {
        return "[]".to_string();
    }
    let links = refs
        .iter()
        .map(|r| {
            json!({
                "traceId": r.trace_id,
                "spanID": synthesize_id(&r.parent_trace_segment_id, r.parent_span_id),
                "traceState": "",
            })
        })
        .collect::<Vec<_>>();
    encoded_or(serde_json::to_string(&links), "[]")
}

fn logs_json(logs: &[Log]) -> String {
    if logs.is_empty() {
        return "[]".to_string();
    }
    let entries = logs
        .iter()
        .map(|log| {
            let mut entry = Map::new();
            entry.insert("time".to_string(), Value::String(log.time.to_string()));
            Value::Object(pairs_to_map(&log.data, entry))
        })
        .collect::<Vec<_>>();
    encoded_or(serde_json::to_string(&entries), "[]")
}

/// A field that fails to encode is written as `fallback`; the span is kept.
fn encoded_or(encoded: serde_json::Result<String>, fallback: &str) -> String {
    encoded.unwrap_or_else(|err| {
        tracing::debug!(error = %err, fallback, "span field encoding failed");
        fallback.to_string()
    })
}

/// Later pairs overwrite earlier keys, including keys already in `map`.
fn pairs_to_map(pairs: &[KeyStringValuePair], mut map: Map<String, Value>) -> Map<String, Value> {
    for pair in pairs {
        map.insert(pair.key.clone(), Value::String(pair.value.clone()));
    }
    map
}
