use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::kv;
use crate::state::ServerState;

/// Build the application router.
///
/// `/` lists keys (GET) or clears the store (DELETE); `/:key` reads, writes
/// or deletes a single entry. PUT bodies larger than `max_body_bytes` are
/// rejected with 413 before they reach the store.
pub fn build_router(state: ServerState, cors: CorsLayer, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(kv::list_keys).delete(kv::delete_all))
        .route(
            "/:key",
            get(kv::get_value).put(kv::put_value).delete(kv::delete_value),
        )
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
