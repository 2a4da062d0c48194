use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use strata_types::{BlobId, BlobProperties, Permission};

use crate::error::StoreResult;
use crate::options::{ByteRange, ListOptions, ListPage};
use crate::stream::BlobStream;

/// Content-addressed blob store.
///
/// All implementations must satisfy these invariants:
/// - Blobs are immutable once written. Content-addressing guarantees this:
///   the same bytes always produce the same [`BlobId`].
/// - `store` is idempotent: re-storing identical content returns the
///   original properties without creating a second copy.
/// - At most one [`BlobProperties`] exists per blob id per store.
/// - Concurrent reads are always safe (blobs are immutable).
/// - Listings are ordered ascending by blob id and paginate with opaque
///   continuation tokens.
/// - The store never interprets blob contents — it is a pure key-value
///   store keyed by content hash.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store content and return its properties.
    ///
    /// Idempotent: storing the same bytes twice returns the properties
    /// recorded on first storage, `created_at` included.
    async fn store(&self, content: Bytes) -> StoreResult<BlobProperties>;

    /// Fetch a blob's content, optionally restricted to a byte range.
    ///
    /// Fails with `NotFound` if the blob is absent. A range outside the
    /// content length is a caller error (`InvalidRange`).
    async fn fetch(
        &self,
        id: &BlobId,
        range: Option<ByteRange>,
    ) -> StoreResult<(Bytes, BlobProperties)>;

    /// Fetch a blob's content as a chunk stream.
    ///
    /// Same `NotFound` semantics as [`fetch`](ContentStore::fetch), but
    /// content is delivered incrementally.
    async fn fetch_stream(&self, id: &BlobId) -> StoreResult<BlobStream>;

    /// Check whether a blob exists. Fails only on transport errors.
    async fn exists(&self, id: &BlobId) -> StoreResult<bool>;

    /// Fetch a blob's properties. Fails with `NotFound` if absent.
    async fn properties(&self, id: &BlobId) -> StoreResult<BlobProperties>;

    /// Delete a blob. Fails with `NotFound` if absent.
    async fn delete(&self, id: &BlobId) -> StoreResult<()>;

    /// List blobs ascending by id, with optional hex-prefix filter and
    /// token pagination.
    async fn list(&self, opts: ListOptions) -> StoreResult<ListPage>;

    /// Issue a URL granting `permission` on the blob until `expires_in`
    /// elapses. Fails with `NotFound` if absent.
    async fn signed_url(
        &self,
        id: &BlobId,
        expires_in: Duration,
        permission: Permission,
    ) -> StoreResult<String>;
}
