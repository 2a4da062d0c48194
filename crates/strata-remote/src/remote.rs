use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use strata_store::{
    chunk_stream, BlobStream, ByteRange, ContentStore, ListOptions, ListPage, StoreError,
    StoreResult, DEFAULT_CHUNK_SIZE,
};
use strata_types::{BlobId, BlobProperties, Permission};

use crate::error::TransportError;
use crate::transport::BlobTransport;

/// A [`ContentStore`] backed by a remote store reached over a
/// [`BlobTransport`].
///
/// The transport moves whole blobs, so ranged reads are sliced and streams
/// are chunked on the client side after a full fetch. Everything else is
/// straight delegation with error mapping.
pub struct RemoteBlobStore {
    transport: Arc<dyn BlobTransport>,
    endpoint: String,
}

impl RemoteBlobStore {
    /// Wrap a transport. `endpoint` names the remote side in diagnostics.
    pub fn new(transport: Arc<dyn BlobTransport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    /// The remote endpoint label.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_err(&self, err: TransportError) -> StoreError {
        match err {
            TransportError::NotFound(id) => StoreError::NotFound(id),
            other => StoreError::Transport(format!("{}: {}", self.endpoint, other)),
        }
    }
}

#[async_trait]
impl ContentStore for RemoteBlobStore {
    async fn store(&self, content: Bytes) -> StoreResult<BlobProperties> {
        self.transport
            .store_blob(content)
            .await
            .map_err(|err| self.map_err(err))
    }

    async fn fetch(
        &self,
        id: &BlobId,
        range: Option<ByteRange>,
    ) -> StoreResult<(Bytes, BlobProperties)> {
        let (content, properties) = self
            .transport
            .fetch_blob(id)
            .await
            .map_err(|err| self.map_err(err))?;
        let content = match range {
            Some(range) => range.slice(&content)?,
            None => content,
        };
        Ok((content, properties))
    }

    async fn fetch_stream(&self, id: &BlobId) -> StoreResult<BlobStream> {
        let (content, _) = self
            .transport
            .fetch_blob(id)
            .await
            .map_err(|err| self.map_err(err))?;
        Ok(chunk_stream(content, DEFAULT_CHUNK_SIZE))
    }

    async fn exists(&self, id: &BlobId) -> StoreResult<bool> {
        self.transport
            .blob_exists(id)
            .await
            .map_err(|err| self.map_err(err))
    }

    async fn properties(&self, id: &BlobId) -> StoreResult<BlobProperties> {
        self.transport
            .blob_properties(id)
            .await
            .map_err(|err| self.map_err(err))
    }

    async fn delete(&self, id: &BlobId) -> StoreResult<()> {
        self.transport
            .delete_blob(id)
            .await
            .map_err(|err| self.map_err(err))
    }

    async fn list(&self, opts: ListOptions) -> StoreResult<ListPage> {
        self.transport
            .list_blobs(opts)
            .await
            .map_err(|err| self.map_err(err))
    }

    async fn signed_url(
        &self,
        id: &BlobId,
        expires_in: Duration,
        permission: Permission,
    ) -> StoreResult<String> {
        self.transport
            .signed_url(id, expires_in, permission)
            .await
            .map_err(|err| self.map_err(err))
    }
}

impl std::fmt::Debug for RemoteBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteBlobStore")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;

    use strata_store::InMemoryBlobStore;

    use crate::loopback::LoopbackTransport;

    use super::*;

    fn remote_over_memory() -> (Arc<InMemoryBlobStore>, RemoteBlobStore) {
        let backing = Arc::new(InMemoryBlobStore::with_label("far-side"));
        let transport = Arc::new(LoopbackTransport::new(backing.clone()));
        (backing, RemoteBlobStore::new(transport, "loopback"))
    }

    #[tokio::test]
    async fn store_and_fetch_through_transport() {
        let (backing, remote) = remote_over_memory();
        let props = remote.store(Bytes::from_static(b"over the wire")).await.unwrap();
        assert!(backing.exists(&props.blob_id).await.unwrap());

        let (content, fetched) = remote.fetch(&props.blob_id, None).await.unwrap();
        assert_eq!(content, Bytes::from_static(b"over the wire"));
        assert_eq!(fetched, props);
    }

    #[tokio::test]
    async fn ranged_fetch_is_sliced_client_side() {
        let (_backing, remote) = remote_over_memory();
        let props = remote.store(Bytes::from_static(b"hello world")).await.unwrap();

        let (content, _) = remote
            .fetch(&props.blob_id, Some(ByteRange::new(6, 5)))
            .await
            .unwrap();
        assert_eq!(content, Bytes::from_static(b"world"));

        assert!(matches!(
            remote
                .fetch(&props.blob_id, Some(ByteRange::new(6, 100)))
                .await,
            Err(StoreError::InvalidRange { .. })
        ));
    }

    #[tokio::test]
    async fn stream_is_chunked_client_side() {
        let (_backing, remote) = remote_over_memory();
        let big = vec![3u8; 100_000];
        let props = remote.store(Bytes::from(big.clone())).await.unwrap();

        let chunks: Vec<Bytes> = remote
            .fetch_stream(&props.blob_id)
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert!(chunks.len() > 1);
        assert_eq!(chunks.concat(), big);
    }

    #[tokio::test]
    async fn not_found_maps_through() {
        let (_backing, remote) = remote_over_memory();
        let id = BlobId::from_content(b"never stored");
        assert!(matches!(
            remote.fetch(&id, None).await,
            Err(StoreError::NotFound(found)) if found == id
        ));
        assert!(!remote.exists(&id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_and_list_delegate() {
        let (_backing, remote) = remote_over_memory();
        let keep = remote.store(Bytes::from_static(b"keep")).await.unwrap();
        let gone = remote.store(Bytes::from_static(b"gone")).await.unwrap();

        remote.delete(&gone.blob_id).await.unwrap();
        let page = remote.list(ListOptions::default()).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].blob_id, keep.blob_id);
    }

    #[tokio::test]
    async fn signed_url_delegates() {
        let (_backing, remote) = remote_over_memory();
        let props = remote.store(Bytes::from_static(b"signed")).await.unwrap();
        let url = remote
            .signed_url(&props.blob_id, Duration::from_secs(120), Permission::Write)
            .await
            .unwrap();
        assert!(url.contains("far-side"));
        assert!(url.contains("permission=write"));
    }
}
