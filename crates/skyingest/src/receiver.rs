use std::io::Read;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header::CONTENT_ENCODING;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use flate2::read::GzDecoder;
use skyingest_core::error::{IngestError, Result};
use skyingest_core::status::StatusResponse;
use skyingest_core::topic::{TopicKind, Topics};
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::exporter::Exporter;

/// Upper bound on a message body after gzip inflation.
pub const MAX_INFLATED_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Clone)]
pub struct ReceiverState {
    pub topics: Arc<Topics>,
    pub exporter: Exporter,
}

/// HTTP bridge for the message bus: one request carries one message for
/// the topic named in the path.
pub fn router(topics: Topics, exporter: Exporter) -> Router {
    let state = ReceiverState {
        topics: Arc::new(topics),
        exporter,
    };
    Router::new()
        .route("/v1/topics/{topic}", post(receive_message))
        .route("/v1/status", get(status))
        .layer(
            TraceLayer::new_for_http()
                .on_request(tower_http::trace::DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(tower_http::trace::DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .with_state(state)
}

async fn receive_message(
    State(state): State<ReceiverState>,
    Path(topic): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let payload = match inflate_body(&headers, body) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(topic = %topic, error = %err, "failed to inflate message body");
            return StatusCode::BAD_REQUEST;
        }
    };

    let kind = state.topics.classify(&topic);
    match handle_message(&state.exporter, kind, &payload) {
        Ok(written) => {
            tracing::debug!(topic = %topic, kind = ?kind, written, "message accepted");
            StatusCode::OK
        }
        Err(IngestError::Decode(reason)) => {
            tracing::warn!(
                topic = %topic,
                error = %reason,
                payload = %BASE64.encode(&payload),
                "failed to convert message; dropped"
            );
            StatusCode::BAD_REQUEST
        }
        Err(err) => {
            tracing::warn!(topic = %topic, error = ?err, "failed to export message");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn status(
    State(state): State<ReceiverState>,
) -> std::result::Result<Json<StatusResponse>, StatusCode> {
    state.exporter.store().status().map(Json).map_err(|err| {
        tracing::warn!(error = ?err, "status query failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Converts one classified message and hands the batch to the sink.
pub fn handle_message(exporter: &Exporter, kind: TopicKind, payload: &[u8]) -> Result<usize> {
    let batch = skyingest_convert::convert(kind, Some(payload))?;
    exporter.export(&batch)
}

fn inflate_body(headers: &HeaderMap, body: Bytes) -> std::io::Result<Bytes> {
    let gzip = headers
        .get(CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("gzip"));
    if !gzip {
        return Ok(body);
    }

    let mut out = Vec::new();
    GzDecoder::new(body.as_ref())
        .take(MAX_INFLATED_BYTES + 1)
        .read_to_end(&mut out)?;
    if out.len() as u64 > MAX_INFLATED_BYTES {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("inflated body exceeds {MAX_INFLATED_BYTES} bytes"),
        ));
    }
    Ok(Bytes::from(out))
}
