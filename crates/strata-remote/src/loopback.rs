use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use strata_store::{ContentStore, ListOptions, ListPage, StoreError};
use strata_types::{BlobId, BlobProperties, Permission};

use crate::error::{TransportError, TransportResult};
use crate::transport::BlobTransport;

/// In-process [`BlobTransport`] over any [`ContentStore`].
///
/// Useful in tests and wherever a "remote" path to a local store is
/// wanted, e.g. binding the same backend twice under different tier ids.
pub struct LoopbackTransport {
    store: Arc<dyn ContentStore>,
}

impl LoopbackTransport {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    fn map_err(err: StoreError) -> TransportError {
        match err {
            StoreError::NotFound(id) => TransportError::NotFound(id),
            StoreError::InvalidToken(token) => {
                TransportError::Protocol(format!("invalid continuation token: {token}"))
            }
            other => TransportError::Unavailable(other.to_string()),
        }
    }
}

#[async_trait]
impl BlobTransport for LoopbackTransport {
    async fn store_blob(&self, content: Bytes) -> TransportResult<BlobProperties> {
        self.store.store(content).await.map_err(Self::map_err)
    }

    async fn fetch_blob(&self, id: &BlobId) -> TransportResult<(Bytes, BlobProperties)> {
        self.store.fetch(id, None).await.map_err(Self::map_err)
    }

    async fn blob_exists(&self, id: &BlobId) -> TransportResult<bool> {
        self.store.exists(id).await.map_err(Self::map_err)
    }

    async fn blob_properties(&self, id: &BlobId) -> TransportResult<BlobProperties> {
        self.store.properties(id).await.map_err(Self::map_err)
    }

    async fn delete_blob(&self, id: &BlobId) -> TransportResult<()> {
        self.store.delete(id).await.map_err(Self::map_err)
    }

    async fn list_blobs(&self, opts: ListOptions) -> TransportResult<ListPage> {
        self.store.list(opts).await.map_err(Self::map_err)
    }

    async fn signed_url(
        &self,
        id: &BlobId,
        expires_in: Duration,
        permission: Permission,
    ) -> TransportResult<String> {
        self.store
            .signed_url(id, expires_in, permission)
            .await
            .map_err(Self::map_err)
    }
}
