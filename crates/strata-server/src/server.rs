use std::sync::Arc;

use tokio::net::TcpListener;

use strata_store::ContentStore;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, AppState};

/// HTTP server exposing one blob store backend.
///
/// The backend can be anything implementing the store contract — a plain
/// in-memory store or a whole tiered composition.
pub struct BlobServer {
    config: ServerConfig,
    store: Arc<dyn ContentStore>,
}

impl BlobServer {
    pub fn new(config: ServerConfig, store: Arc<dyn ContentStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState {
            store: self.store.clone(),
            config: self.config.clone(),
        })
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("blob server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use strata_store::InMemoryBlobStore;

    use super::*;

    #[test]
    fn server_construction() {
        let server = BlobServer::new(
            ServerConfig::default(),
            Arc::new(InMemoryBlobStore::new()),
        );
        assert_eq!(server.config().bind_addr, "127.0.0.1:9460".parse().unwrap());
    }

    #[test]
    fn router_builds() {
        let server = BlobServer::new(
            ServerConfig::default(),
            Arc::new(InMemoryBlobStore::new()),
        );
        let _router = server.router();
    }
}
