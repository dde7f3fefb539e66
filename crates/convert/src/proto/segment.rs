use super::common::KeyStringValuePair;

/// Spans recorded by one process/thread context for one trace.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SegmentObject {
    #[prost(string, tag = "1")]
    pub trace_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub trace_segment_id: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub spans: ::prost::alloc::vec::Vec<SpanObject>,
    #[prost(string, tag = "4")]
    pub service: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub service_instance: ::prost::alloc::string::String,
    #[prost(bool, tag = "6")]
    pub is_size_limited: bool,
}

/// Cross-segment causal parent of a span.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SegmentReference {
    #[prost(enumeration = "RefType", tag = "1")]
    pub ref_type: i32,
    #[prost(string, tag = "2")]
    pub trace_id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub parent_trace_segment_id: ::prost::alloc::string::String,
    #[prost(int32, tag = "4")]
    pub parent_span_id: i32,
    #[prost(string, tag = "5")]
    pub parent_service: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub parent_service_instance: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub parent_endpoint: ::prost::alloc::string::String,
    #[prost(string, tag = "8")]
    pub network_address_used_at_peer: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SpanObject {
    #[prost(int32, tag = "1")]
    pub span_id: i32,
    /// `-1` when the span has no parent inside its segment.
    #[prost(int32, tag = "2")]
    pub parent_span_id: i32,
    /// Epoch milliseconds.
    #[prost(int64, tag = "3")]
    pub start_time: i64,
    #[prost(int64, tag = "4")]
    pub end_time: i64,
    #[prost(message, repeated, tag = "5")]
    pub refs: ::prost::alloc::vec::Vec<SegmentReference>,
    #[prost(string, tag = "6")]
    pub operation_name: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub peer: ::prost::alloc::string::String,
    #[prost(enumeration = "SpanType", tag = "8")]
    pub span_type: i32,
    #[prost(enumeration = "SpanLayer", tag = "9")]
    pub span_layer: i32,
    #[prost(int32, tag = "10")]
    pub component_id: i32,
    #[prost(bool, tag = "11")]
    pub is_error: bool,
    #[prost(message, repeated, tag = "12")]
    pub tags: ::prost::alloc::vec::Vec<KeyStringValuePair>,
    #[prost(message, repeated, tag = "13")]
    pub logs: ::prost::alloc::vec::Vec<Log>,
    #[prost(bool, tag = "14")]
    pub skip_analysis: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Log {
    #[prost(int64, tag = "1")]
    pub time: i64,
    #[prost(message, repeated, tag = "2")]
    pub data: ::prost::alloc::vec::Vec<KeyStringValuePair>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SpanType {
    Entry = 0,
    Exit = 1,
    Local = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum RefType {
    CrossProcess = 0,
    CrossThread = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SpanLayer {
    Unknown = 0,
    Database = 1,
    RpcFramework = 2,
    Http = 3,
    Mq = 4,
    Cache = 5,
    Faas = 6,
}
