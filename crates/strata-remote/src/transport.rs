use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use strata_store::{ListOptions, ListPage};
use strata_types::{BlobId, BlobProperties, Permission};

use crate::error::TransportResult;

/// Transport interface to a remote blob store.
///
/// This is a callback-style RPC convenience, not a wire protocol: each
/// method is one remote round trip carrying whole values. How the call
/// crosses the network — HTTP, a socket, an in-process channel — is the
/// implementation's business. [`RemoteBlobStore`] adapts any transport
/// into a full [`ContentStore`].
///
/// [`RemoteBlobStore`]: crate::RemoteBlobStore
/// [`ContentStore`]: strata_store::ContentStore
#[async_trait]
pub trait BlobTransport: Send + Sync {
    async fn store_blob(&self, content: Bytes) -> TransportResult<BlobProperties>;
    async fn fetch_blob(&self, id: &BlobId) -> TransportResult<(Bytes, BlobProperties)>;
    async fn blob_exists(&self, id: &BlobId) -> TransportResult<bool>;
    async fn blob_properties(&self, id: &BlobId) -> TransportResult<BlobProperties>;
    async fn delete_blob(&self, id: &BlobId) -> TransportResult<()>;
    async fn list_blobs(&self, opts: ListOptions) -> TransportResult<ListPage>;
    async fn signed_url(
        &self,
        id: &BlobId,
        expires_in: Duration,
        permission: Permission,
    ) -> TransportResult<String>;
}
