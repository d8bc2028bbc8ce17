use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use common::types::{DeleteAck, KeyList};
use tracing::{debug, info};

use crate::errors::ApiError;
use crate::observability;
use crate::state::ServerState;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const OCTET_STREAM: &str = "application/octet-stream";

/// Raw value body: text when the bytes are UTF-8, opaque bytes otherwise.
fn raw_value(value: Bytes) -> Response {
    let content_type = if std::str::from_utf8(&value).is_ok() { TEXT_PLAIN } else { OCTET_STREAM };
    ([(header::CONTENT_TYPE, content_type)], value).into_response()
}

pub async fn get_value(
    State(state): State<ServerState>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    match state.store.get(&key).await {
        Ok(value) => {
            observability::record_op("get", "hit");
            debug!(%key, bytes = value.len(), "kv get hit");
            Ok(raw_value(value))
        }
        Err(e) => {
            observability::record_op("get", "miss");
            debug!(%key, "kv get miss");
            Err(e.into())
        }
    }
}

pub async fn put_value(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Response {
    let size = body.len();
    let stored = state.store.put(key.clone(), body).await;
    observability::record_op("put", "ok");
    observability::observe_value_size(size);
    observability::set_keys(state.store.len().await);
    info!(%key, bytes = size, "kv put");
    raw_value(stored)
}

pub async fn delete_value(
    State(state): State<ServerState>,
    Path(key): Path<String>,
) -> Json<DeleteAck> {
    let outcome = state.store.delete(&key).await;
    observability::record_op("delete", if outcome.existed { "hit" } else { "miss" });
    observability::set_keys(state.store.len().await);
    info!(key = %outcome.key, existed = outcome.existed, "kv delete");
    Json(DeleteAck::key(outcome.key))
}

pub async fn delete_all(State(state): State<ServerState>) -> Json<DeleteAck> {
    let removed = state.store.delete_all().await;
    observability::record_op("delete_all", "ok");
    observability::set_keys(state.store.len().await);
    info!(removed, "kv delete all");
    Json(DeleteAck::all())
}

pub async fn list_keys(State(state): State<ServerState>) -> Json<KeyList> {
    let keys = state.store.keys().await;
    observability::record_op("list", "ok");
    debug!(count = keys.len(), "kv list keys");
    Json(KeyList { keys })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_values_are_served_as_text() {
        let res = raw_value(Bytes::from_static(b"active"));
        assert_eq!(res.headers()[header::CONTENT_TYPE], TEXT_PLAIN);
    }

    #[test]
    fn binary_values_are_served_as_octet_stream() {
        let res = raw_value(Bytes::from_static(&[0xff, 0x00, 0xfe]));
        assert_eq!(res.headers()[header::CONTENT_TYPE], OCTET_STREAM);
    }
}
