use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::decompression::RequestDecompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with every peer-protocol endpoint.
///
/// Request bodies may arrive gzip-encoded (pack uploads do); responses are
/// compressed when the client advertises support.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/repo/manifest", get(handler::manifest_handler))
        .route("/repo/batchobjects", post(handler::batch_objects_handler))
        .route("/repo/sendobject", post(handler::send_object_handler))
        .route("/repo/exists", post(handler::exists_handler))
        .route("/repo/beginpush", get(handler::begin_push_handler))
        .route("/repo/endpush", get(handler::end_push_handler))
        .route("/refparse", get(handler::ref_parse_handler))
        .route("/updateref", get(handler::update_ref_handler))
        .layer(RequestDecompressionLayer::new())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
