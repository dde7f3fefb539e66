use std::panic::{self, AssertUnwindSafe};

use prost::Message;
use skyingest_core::error::{IngestError, Result};

use crate::proto::jvm::JvmMetricCollection;
use crate::proto::segment::SegmentObject;

pub fn decode_segment(payload: &[u8]) -> Result<SegmentObject> {
    decode_guarded("segment object", payload)
}

pub fn decode_metrics(payload: &[u8]) -> Result<JvmMetricCollection> {
    decode_guarded("jvm metric collection", payload)
}

/// Decodes `payload`, folding both wire errors and decoder panics into
/// `IngestError::Decode` so callers handle a single failure shape.
fn decode_guarded<M>(what: &str, payload: &[u8]) -> Result<M>
where
    M: Message + Default,
{
    match panic::catch_unwind(AssertUnwindSafe(|| M::decode(payload))) {
        Ok(Ok(message)) => Ok(message),
        Ok(Err(e)) => Err(IngestError::Decode(format!("parse {what} failed: {e}"))),
        Err(_) => Err(IngestError::Decode(format!(
            "parse {what} failed: decoder panicked"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::*;
    use crate::proto::segment::SpanObject;

    #[test]
    fn decodes_encoded_segment() {
        let segment = SegmentObject {
            trace_id: "T1".into(),
            trace_segment_id: "S1".into(),
            service: "svc".into(),
            spans: vec![SpanObject {
                span_id: 3,
                parent_span_id: -1,
                operation_name: "GET /".into(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let out = decode_segment(&segment.encode_to_vec()).unwrap();
        assert_eq!(out, segment);
        assert_eq!(out.spans[0].parent_span_id, -1);
    }

    #[test]
    fn empty_payload_is_an_empty_message() {
        let out = decode_metrics(&[]).unwrap();
        assert!(out.metrics.is_empty());
        assert!(out.service.is_empty());
    }

    #[test]
    fn truncated_payload_is_a_decode_error() {
        // field 1, length-delimited, claims 5 bytes but carries 1
        let payload = [0x0a, 0x05, b'a'];
        let err = decode_segment(&payload).unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));
        assert!(err.to_string().contains("segment object"));

        let err = decode_metrics(&payload).unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));
    }

    #[test]
    fn wrong_wire_type_is_a_decode_error() {
        // field 3 (spans) sent as a varint instead of a message
        let payload = [0x18, 0x01];
        assert!(matches!(
            decode_segment(&payload),
            Err(IngestError::Decode(_))
        ));
    }
}
