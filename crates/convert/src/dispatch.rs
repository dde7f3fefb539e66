use skyingest_core::error::Result;
use skyingest_core::model::batch::{Category, LogBatch};
use skyingest_core::topic::TopicKind;

use crate::decode::{decode_metrics, decode_segment};
use crate::metric::map_metrics;
use crate::span::map_segment;

/// Converts one classified bus message into the batch handed to the sink.
///
/// Only a payload that fails to decode is an error. Logging payloads and
/// unclassified or missing input convert to empty batches.
pub fn convert(kind: TopicKind, payload: Option<&[u8]>) -> Result<LogBatch> {
    let Some(payload) = payload else {
        return Ok(LogBatch::empty(Category::None));
    };

    let batch = match kind {
        TopicKind::Segment => map_segment(&decode_segment(payload)?),
        TopicKind::Metric => map_metrics(&decode_metrics(payload)?),
        TopicKind::Logging => convert_logging(payload),
        TopicKind::Unclassified => LogBatch::empty(Category::None),
    };
    tracing::debug!(
        kind = ?kind,
        category = batch.category.as_str(),
        records = batch.len(),
        "converted payload"
    );
    Ok(batch)
}

// Log-line ingestion is not wired up yet; the payload is accepted and
// produces nothing.
fn convert_logging(_payload: &[u8]) -> LogBatch {
    LogBatch::empty(Category::Logging)
}
