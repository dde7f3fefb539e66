use super::common::Cpu;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JvmMetricCollection {
    #[prost(message, repeated, tag = "1")]
    pub metrics: ::prost::alloc::vec::Vec<JvmMetric>,
    #[prost(string, tag = "2")]
    pub service: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub service_instance: ::prost::alloc::string::String,
}

/// One JVM runtime sample.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JvmMetric {
    /// Epoch milliseconds.
    #[prost(int64, tag = "1")]
    pub time: i64,
    #[prost(message, optional, tag = "2")]
    pub cpu: ::core::option::Option<Cpu>,
    #[prost(message, repeated, tag = "3")]
    pub memory: ::prost::alloc::vec::Vec<Memory>,
    #[prost(message, repeated, tag = "4")]
    pub memory_pool: ::prost::alloc::vec::Vec<MemoryPool>,
    #[prost(message, repeated, tag = "5")]
    pub gc: ::prost::alloc::vec::Vec<Gc>,
    #[prost(message, optional, tag = "6")]
    pub thread: ::core::option::Option<Thread>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Memory {
    #[prost(bool, tag = "1")]
    pub is_heap: bool,
    #[prost(int64, tag = "2")]
    pub init: i64,
    #[prost(int64, tag = "3")]
    pub max: i64,
    #[prost(int64, tag = "4")]
    pub used: i64,
    #[prost(int64, tag = "5")]
    pub committed: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MemoryPool {
    #[prost(enumeration = "PoolType", tag = "1")]
    pub r#type: i32,
    #[prost(int64, tag = "2")]
    pub init: i64,
    #[prost(int64, tag = "3")]
    pub max: i64,
    #[prost(int64, tag = "4")]
    pub used: i64,
    #[prost(int64, tag = "5")]
    pub committed: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Gc {
    #[prost(enumeration = "GcPhase", tag = "1")]
    pub phase: i32,
    #[prost(int64, tag = "2")]
    pub count: i64,
    #[prost(int64, tag = "3")]
    pub time: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Thread {
    #[prost(int64, tag = "1")]
    pub live_count: i64,
    #[prost(int64, tag = "2")]
    pub daemon_count: i64,
    #[prost(int64, tag = "3")]
    pub peak_count: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum PoolType {
    CodeCacheUsage = 0,
    NewgenUsage = 1,
    OldgenUsage = 2,
    SurvivorUsage = 3,
    PermgenUsage = 4,
    MetaspaceUsage = 5,
    ZheapUsage = 6,
    CompressedClassSpaceUsage = 7,
    CodeheapNonNmethodsUsage = 8,
    CodeheapProfiledNmethodsUsage = 9,
    CodeheapNonProfiledNmethodsUsage = 10,
}

impl PoolType {
    /// Protocol-level name, e.g. `CODE_CACHE_USAGE`.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::CodeCacheUsage => "CODE_CACHE_USAGE",
            Self::NewgenUsage => "NEWGEN_USAGE",
            Self::OldgenUsage => "OLDGEN_USAGE",
            Self::SurvivorUsage => "SURVIVOR_USAGE",
            Self::PermgenUsage => "PERMGEN_USAGE",
            Self::MetaspaceUsage => "METASPACE_USAGE",
            Self::ZheapUsage => "ZHEAP_USAGE",
            Self::CompressedClassSpaceUsage => "COMPRESSED_CLASS_SPACE_USAGE",
            Self::CodeheapNonNmethodsUsage => "CODEHEAP_NON_NMETHODS_USAGE",
            Self::CodeheapProfiledNmethodsUsage => "CODEHEAP_PROFILED_NMETHODS_USAGE",
            Self::CodeheapNonProfiledNmethodsUsage => "CODEHEAP_NON_PROFILED_NMETHODS_USAGE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum GcPhase {
    New = 0,
    Old = 1,
    Normal = 2,
}

impl GcPhase {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Old => "OLD",
            Self::Normal => "NORMAL",
        }
    }
}
