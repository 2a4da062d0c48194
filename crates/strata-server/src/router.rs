use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use strata_store::ContentStore;

use crate::config::ServerConfig;
use crate::handler;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub config: ServerConfig,
}

/// Build the axum router exposing `store` under `/v1`.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_blob_size;
    Router::new()
        .route("/v1/health", get(handler::health))
        .route(
            "/v1/blobs",
            post(handler::store_blob).get(handler::list_blobs),
        )
        .route(
            "/v1/blobs/:id",
            get(handler::fetch_blob).delete(handler::delete_blob),
        )
        .route("/v1/blobs/:id/properties", get(handler::blob_properties))
        .route("/v1/blobs/:id/exists", get(handler::blob_exists))
        .route("/v1/blobs/:id/url", get(handler::blob_url))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
