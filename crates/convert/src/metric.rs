use skyingest_core::model::batch::{Category, LogBatch};
use skyingest_core::model::record::{LogRecord, millis_to_unix_secs};

use crate::proto::common::Cpu;
use crate::proto::jvm::{
    Gc, GcPhase, JvmMetric, JvmMetricCollection, Memory, MemoryPool, PoolType, Thread,
};

pub const NAME: &str = "__name__";
/// Carries the sample's millisecond timestamp despite the name; the
/// downstream metric store reads it verbatim.
pub const TIME_NANO: &str = "__time_nano__";
pub const LABELS: &str = "__labels__";
pub const VALUE: &str = "__value__";

const LABEL_KV_SEPARATOR: &str = "#$#";
const LABEL_SEPARATOR: &str = "|";

const SERVICE_LABEL: &str = "service";
const INSTANCE_LABEL: &str = "serviceInstance";
const TYPE_LABEL: &str = "type";
// Spelled "phrase" on the wire; existing dashboards query this key.
const GC_PHASE_LABEL: &str = "phrase";

type Label<'a> = (&'a str, &'a str);

/// Fans every JVM sample of `collection` out into named time-series records.
pub fn map_metrics(collection: &JvmMetricCollection) -> LogBatch {
    let records = collection
        .metrics
        .iter()
        .flat_map(|metric| sample_to_records(collection, metric))
        .collect();
    LogBatch::new(Category::Metric, records)
}

/// Records for one sample, in the order cpu, memory, memory pool, gc, threads.
pub fn sample_to_records(collection: &JvmMetricCollection, metric: &JvmMetric) -> Vec<LogRecord> {
    let mut sample = Sample {
        time: metric.time,
        service: &collection.service,
        instance: &collection.service_instance,
        records: Vec::new(),
    };

    if let Some(cpu) = &metric.cpu {
        sample.cpu(cpu);
    }
    for memory in &metric.memory {
        sample.memory(memory);
    }
    for pool in &metric.memory_pool {
        sample.memory_pool(pool);
    }
    for gc in &metric.gc {
        sample.gc(gc);
    }
    if let Some(thread) = &metric.thread {
        sample.threads(thread);
    }
    sample.records
}

/// `key#$#value` pairs joined by `|`, in the given order.
pub fn encode_labels(labels: &[Label<'_>]) -> String {
    labels
        .iter()
        .map(|(key, value)| format!("{key}{LABEL_KV_SEPARATOR}{value}"))
        .collect::<Vec<_>>()
        .join(LABEL_SEPARATOR)
}

pub fn metric_record(name: &str, time: i64, value: String, labels: &[Label<'_>]) -> LogRecord {
    let mut record = LogRecord::with_capacity(millis_to_unix_secs(time), 4);
    record.push(NAME, name);
    record.push(TIME_NANO, time.to_string());
    record.push(LABELS, encode_labels(labels));
    record.push(VALUE, value);
    record
}

pub fn pool_type_name(value: i32) -> String {
    PoolType::try_from(value)
        .map(|t| t.as_str_name().to_string())
        .unwrap_or_else(|_| value.to_string())
}

pub fn gc_phase_name(value: i32) -> String {
    GcPhase::try_from(value)
        .map(|p| p.as_str_name().to_string())
        .unwrap_or_else(|_| value.to_string())
}

struct Sample<'a> {
    time: i64,
    service: &'a str,
    instance: &'a str,
    records: Vec<LogRecord>,
}

impl Sample<'_> {
    fn emit(&mut self, name: &str, value: String, labels: &[Label<'_>]) {
        self.records.push(metric_record(name, self.time, value, labels));
    }

    fn cpu(&mut self, cpu: &Cpu) {
        let labels = [(SERVICE_LABEL, self.service), (INSTANCE_LABEL, self.instance)];
        self.emit(
            "skywalking_jvm_cpu_usage",
            format!("{:.6}", cpu.usage_percent),
            &labels,
        );
    }

    fn memory(&mut self, memory: &Memory) {
        let kind = if memory.is_heap { "heap" } else { "nonheap" };
        let labels = [
            (SERVICE_LABEL, self.service),
            (INSTANCE_LABEL, self.instance),
            (TYPE_LABEL, kind),
        ];
        for (name, value) in [
            ("skywalking_jvm_memory_committed", memory.committed),
            ("skywalking_jvm_memory_init", memory.init),
            ("skywalking_jvm_memory_max", memory.max),
            ("skywalking_jvm_memory_used", memory.used),
        ] {
            self.emit(name, value.to_string(), &labels);
        }
    }

    fn memory_pool(&mut self, pool: &MemoryPool) {
        let kind = pool_type_name(pool.r#type);
        let labels = [
            (SERVICE_LABEL, self.service),
            (INSTANCE_LABEL, self.instance),
            (TYPE_LABEL, kind.as_str()),
        ];
        for (name, value) in [
            ("skywalking_jvm_memory_pool_committed", pool.committed),
            ("skywalking_jvm_memory_pool_init", pool.init),
            ("skywalking_jvm_memory_pool_max", pool.max),
            ("skywalking_jvm_memory_pool_used", pool.used),
        ] {
            self.emit(name, value.to_string(), &labels);
        }
    }

    fn gc(&mut self, gc: &Gc) {
        let phase = gc_phase_name(gc.phase);
        let labels = [
            (GC_PHASE_LABEL, phase.as_str()),
            (SERVICE_LABEL, self.service),
            (INSTANCE_LABEL, self.instance),
        ];
        self.emit("skywalking_jvm_gc_time", gc.time.to_string(), &labels);
        self.emit("skywalking_jvm_gc_count", gc.count.to_string(), &labels);
    }

    fn threads(&mut self, thread: &Thread) {
        let labels = [(SERVICE_LABEL, self.service), (INSTANCE_LABEL, self.instance)];
        for (name, value) in [
            ("skywalking_jvm_threads_live", thread.live_count),
            ("skywalking_jvm_threads_daemon", thread.daemon_count),
            ("skywalking_jvm_threads_peak", thread.peak_count),
        ] {
            self.emit(name, value.to_string(), &labels);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(metrics: Vec<JvmMetric>) -> JvmMetricCollection {
        JvmMetricCollection {
            metrics,
            service: "svc".into(),
            service_instance: "i1".into(),
        }
    }

    fn names(batch: &LogBatch) -> Vec<&str> {
        batch
            .records
            .iter()
            .map(|r| r.get(NAME).unwrap())
            .collect()
    }

    #[test]
    fn maps_cpu_sample() {
        let batch = map_metrics(&collection(vec![JvmMetric {
            time: 5000,
            cpu: Some(Cpu {
                usage_percent: 12.5,
            }),
            ..Default::default()
        }]));

        assert_eq!(batch.category, Category::Metric);
        assert_eq!(batch.len(), 1);
        let record = &batch.records[0];
        assert_eq!(record.timestamp, 5);
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec![NAME, TIME_NANO, LABELS, VALUE]
        );
        assert_eq!(record.get(NAME), Some("skywalking_jvm_cpu_usage"));
        assert_eq!(record.get(TIME_NANO), Some("5000"));
        assert_eq!(
            record.get(LABELS),
            Some("service#$#svc|serviceInstance#$#i1")
        );
        assert_eq!(record.get(VALUE), Some("12.500000"));
    }

    #[test]
    fn empty_collection_yields_empty_metric_batch() {
        let batch = map_metrics(&collection(vec![]));
        assert_eq!(batch.category, Category::Metric);
        assert!(batch.is_empty());
    }

    #[test]
    fn memory_fans_out_per_entry() {
        let batch = map_metrics(&collection(vec![JvmMetric {
            time: 1500,
            memory: vec![
                Memory {
                    is_heap: true,
                    init: 1,
                    max: 2,
                    used: 3,
                    committed: 4,
                },
                Memory {
                    is_heap: false,
                    ..Default::default()
                },
            ],
            ..Default::default()
        }]));

        assert_eq!(batch.len(), 8);
        assert_eq!(
            names(&batch)[..4],
            [
                "skywalking_jvm_memory_committed",
                "skywalking_jvm_memory_init",
                "skywalking_jvm_memory_max",
                "skywalking_jvm_memory_used",
            ]
        );
        let values = batch.records[..4]
            .iter()
            .map(|r| r.get(VALUE).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(values, vec!["4", "1", "2", "3"]);
        assert_eq!(
            batch.records[0].get(LABELS),
            Some("service#$#svc|serviceInstance#$#i1|type#$#heap")
        );
        assert_eq!(
            batch.records[4].get(LABELS),
            Some("service#$#svc|serviceInstance#$#i1|type#$#nonheap")
        );
        assert!(batch.records.iter().all(|r| r.timestamp == 1));
    }

    #[test]
    fn memory_pool_labels_use_protocol_names() {
        let batch = map_metrics(&collection(vec![JvmMetric {
            memory_pool: vec![
                MemoryPool {
                    r#type: PoolType::MetaspaceUsage as i32,
                    used: 77,
                    ..Default::default()
                },
                MemoryPool {
                    r#type: 99,
                    ..Default::default()
                },
            ],
            ..Default::default()
        }]));

        assert_eq!(batch.len(), 8);
        assert_eq!(
            batch.records[3].get(NAME),
            Some("skywalking_jvm_memory_pool_used")
        );
        assert_eq!(batch.records[3].get(VALUE), Some("77"));
        assert_eq!(
            batch.records[3].get(LABELS),
            Some("service#$#svc|serviceInstance#$#i1|type#$#METASPACE_USAGE")
        );
        assert_eq!(
            batch.records[4].get(LABELS),
            Some("service#$#svc|serviceInstance#$#i1|type#$#99")
        );
    }

    #[test]
    fn gc_labels_lead_with_phrase() {
        let batch = map_metrics(&collection(vec![JvmMetric {
            time: 9000,
            gc: vec![Gc {
                phase: GcPhase::Old as i32,
                count: 3,
                time: 120,
            }],
            ..Default::default()
        }]));

        assert_eq!(
            names(&batch),
            vec!["skywalking_jvm_gc_time", "skywalking_jvm_gc_count"]
        );
        assert_eq!(batch.records[0].get(VALUE), Some("120"));
        assert_eq!(batch.records[1].get(VALUE), Some("3"));
        assert_eq!(
            batch.records[0].get(LABELS),
            Some("phrase#$#OLD|service#$#svc|serviceInstance#$#i1")
        );
    }

    #[test]
    fn unknown_gc_phase_renders_as_number() {
        let batch = map_metrics(&collection(vec![JvmMetric {
            time: 9000,
            gc: vec![Gc {
                phase: 42,
                count: 1,
                time: 5,
            }],
            ..Default::default()
        }]));

        assert_eq!(batch.len(), 2);
        assert_eq!(
            batch.records[1].get(LABELS),
            Some("phrase#$#42|service#$#svc|serviceInstance#$#i1")
        );
        assert_eq!(gc_phase_name(GcPhase::Normal as i32), "NORMAL");
    }

    #[test]
    fn threads_emit_three_series() {
        let batch = map_metrics(&collection(vec![JvmMetric {
            thread: Some(Thread {
                live_count: 40,
                daemon_count: 30,
                peak_count: 50,
            }),
            ..Default::default()
        }]));

        assert_eq!(
            names(&batch),
            vec![
                "skywalking_jvm_threads_live",
                "skywalking_jvm_threads_daemon",
                "skywalking_jvm_threads_peak",
            ]
        );
        let values = batch
            .records
            .iter()
            .map(|r| r.get(VALUE).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(values, vec!["40", "30", "50"]);
    }

    #[test]
    fn full_sample_keeps_group_order() {
        let batch = map_metrics(&collection(vec![JvmMetric {
            time: 1000,
            cpu: Some(Cpu { usage_percent: 1.0 }),
            memory: vec![Memory::default()],
            memory_pool: vec![MemoryPool::default()],
            gc: vec![Gc::default()],
            thread: Some(Thread::default()),
        }]));

        assert_eq!(batch.len(), 1 + 4 + 4 + 2 + 3);
        let names = names(&batch);
        assert_eq!(names[0], "skywalking_jvm_cpu_usage");
        assert_eq!(names[1], "skywalking_jvm_memory_committed");
        assert_eq!(names[5], "skywalking_jvm_memory_pool_committed");
        assert_eq!(names[9], "skywalking_jvm_gc_time");
        assert_eq!(names[11], "skywalking_jvm_threads_live");
    }

    #[test]
    fn samples_keep_their_own_timestamps() {
        let batch = map_metrics(&collection(vec![
            JvmMetric {
                time: 2_000,
                cpu: Some(Cpu::default()),
                ..Default::default()
            },
            JvmMetric {
                time: 61_999,
                cpu: Some(Cpu::default()),
                ..Default::default()
            },
        ]));
        assert_eq!(batch.records[0].timestamp, 2);
        assert_eq!(batch.records[1].timestamp, 61);
        assert_eq!(batch.records[1].get(TIME_NANO), Some("61999"));
        assert_eq!(batch.records[0].get(VALUE), Some("0.000000"));
    }

    #[test]
    fn label_encoding() {
        assert_eq!(encode_labels(&[]), "");
        assert_eq!(encode_labels(&[("a", "1")]), "a#$#1");
        assert_eq!(encode_labels(&[("a", "1"), ("b", "")]), "a#$#1|b#$#");
    }

    #[test]
    fn mapping_is_idempotent() {
        let input = collection(vec![JvmMetric {
            time: 3000,
            cpu: Some(Cpu { usage_percent: 3.25 }),
            gc: vec![Gc::default()],
            ..Default::default()
        }]);
        assert_eq!(map_metrics(&input), map_metrics(&input));
    }
}
