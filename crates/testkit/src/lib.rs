use prost::Message;
use skyingest_convert::proto::common::{Cpu, KeyStringValuePair};
use skyingest_convert::proto::jvm::{
    Gc, GcPhase, JvmMetric, JvmMetricCollection, Memory, MemoryPool, PoolType, Thread,
};
use skyingest_convert::proto::segment::{
    Log, SegmentObject, SegmentReference, SpanLayer, SpanObject, SpanType,
};

fn kv(key: &str, value: &str) -> KeyStringValuePair {
    KeyStringValuePair {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// A three-span segment: an HTTP entry called from another segment, a
/// local child and an MQ exit with an error.
pub fn sample_segment(trace_id: &str, segment_id: &str) -> SegmentObject {
    let base = 1_767_225_600_000;
    SegmentObject {
        trace_id: trace_id.to_string(),
        trace_segment_id: segment_id.to_string(),
        service: "orders".to_string(),
        service_instance: "orders-1@10.0.0.7".to_string(),
        spans: vec![
            SpanObject {
                span_id: 0,
                parent_span_id: -1,
                start_time: base,
                end_time: base + 180,
                refs: vec![SegmentReference {
                    trace_id: trace_id.to_string(),
                    parent_trace_segment_id: "gateway-seg".to_string(),
                    parent_span_id: 2,
                    parent_service: "gateway".to_string(),
                    ..Default::default()
                }],
                operation_name: "POST /v1/orders".to_string(),
                span_type: SpanType::Entry as i32,
                span_layer: SpanLayer::Http as i32,
                tags: vec![kv("http.method", "POST"), kv("status_code", "201")],
                ..Default::default()
            },
            SpanObject {
                span_id: 1,
                parent_span_id: 0,
                start_time: base + 10,
                end_time: base + 60,
                operation_name: "validate".to_string(),
                span_type: SpanType::Local as i32,
                ..Default::default()
            },
            SpanObject {
                span_id: 2,
                parent_span_id: 0,
                start_time: base + 70,
                end_time: base + 170,
                operation_name: "kafka/orders-created/Producer".to_string(),
                span_type: SpanType::Exit as i32,
                span_layer: SpanLayer::Mq as i32,
                is_error: true,
                logs: vec![Log {
                    time: base + 169,
                    data: vec![kv("event", "error"), kv("message", "broker unavailable")],
                }],
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}

pub fn sample_segment_bytes(trace_id: &str, segment_id: &str) -> Vec<u8> {
    sample_segment(trace_id, segment_id).encode_to_vec()
}

/// One fully populated JVM sample with heap and non-heap memory, a
/// metaspace pool and both young and old GC.
pub fn sample_jvm_collection(time: i64) -> JvmMetricCollection {
    JvmMetricCollection {
        service: "orders".to_string(),
        service_instance: "orders-1@10.0.0.7".to_string(),
        metrics: vec![JvmMetric {
            time,
            cpu: Some(Cpu {
                usage_percent: 37.25,
            }),
            memory: vec![
                Memory {
                    is_heap: true,
                    init: 268_435_456,
                    max: 4_294_967_296,
                    used: 1_073_741_824,
                    committed: 2_147_483_648,
                },
                Memory {
                    is_heap: false,
                    init: 2_555_904,
                    max: -1,
                    used: 98_566_144,
                    committed: 104_857_600,
                },
            ],
            memory_pool: vec![MemoryPool {
                r#type: PoolType::MetaspaceUsage as i32,
                init: 0,
                max: -1,
                used: 70_000_000,
                committed: 72_000_000,
            }],
            gc: vec![
                Gc {
                    phase: GcPhase::New as i32,
                    count: 12,
                    time: 340,
                },
                Gc {
                    phase: GcPhase::Old as i32,
                    count: 1,
                    time: 95,
                },
            ],
            thread: Some(Thread {
                live_count: 64,
                daemon_count: 48,
                peak_count: 70,
            }),
        }],
    }
}

/// Number of records `sample_jvm_collection` maps to.
pub const SAMPLE_JVM_RECORDS: usize = 1 + 2 * 4 + 4 + 2 * 2 + 3;

pub fn sample_jvm_bytes(time: i64) -> Vec<u8> {
    sample_jvm_collection(time).encode_to_vec()
}
