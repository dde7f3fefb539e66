pub mod decode;
pub mod dispatch;
pub mod metric;
pub mod proto;
pub mod span;

pub use dispatch::convert;
