pub mod config;
pub mod error;
pub mod model;
pub mod status;
pub mod topic;

pub use error::{IngestError, Result};
