//! SkyWalking v3 agent protocol messages.
//!
//! Declared by hand with prost derives; tags follow the upstream
//! `Common.proto`, `Tracing.proto` and `JVMMetric.proto` definitions.
//! Fields the converter never reads are left out and skipped on decode.

pub mod common;
pub mod jvm;
pub mod segment;
