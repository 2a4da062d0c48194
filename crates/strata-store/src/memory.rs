use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;

use strata_types::{BlobId, BlobProperties, Permission};

use crate::error::{StoreError, StoreResult};
use crate::options::{ByteRange, ContinuationToken, ListOptions, ListPage};
use crate::stream::{chunk_stream, BlobStream, DEFAULT_CHUNK_SIZE};
use crate::traits::ContentStore;

#[derive(Clone)]
struct StoredBlob {
    properties: BlobProperties,
    content: Bytes,
}

/// In-memory, `BTreeMap`-based blob store.
///
/// Intended for tests, embedding, and as the cache tier in a tiered
/// configuration. Blobs are held in memory behind a `RwLock`; the ordered
/// map gives id-sorted listings for free. First write wins: re-storing
/// identical content keeps the original `created_at`.
pub struct InMemoryBlobStore {
    label: String,
    blobs: RwLock<BTreeMap<BlobId, StoredBlob>>,
}

impl InMemoryBlobStore {
    /// Create a new empty store labelled `"memory"`.
    pub fn new() -> Self {
        Self::with_label("memory")
    }

    /// Create a new empty store with a label used in signed URLs and
    /// diagnostics.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            blobs: RwLock::new(BTreeMap::new()),
        }
    }

    /// The store's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored blobs.
    pub fn total_bytes(&self) -> u64 {
        self.blobs
            .read()
            .expect("lock poisoned")
            .values()
            .map(|blob| blob.properties.size)
            .sum()
    }

    /// Remove all blobs from the store.
    pub fn clear(&self) {
        self.blobs.write().expect("lock poisoned").clear();
    }

    /// Return all blob ids, ascending.
    pub fn all_ids(&self) -> Vec<BlobId> {
        self.blobs
            .read()
            .expect("lock poisoned")
            .keys()
            .copied()
            .collect()
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for InMemoryBlobStore {
    async fn store(&self, content: Bytes) -> StoreResult<BlobProperties> {
        let id = BlobId::from_content(&content);
        let mut map = self.blobs.write().expect("lock poisoned");
        // Idempotent: an existing entry keeps its original created_at.
        let blob = map.entry(id).or_insert_with(|| StoredBlob {
            properties: BlobProperties::new(id, content.len() as u64, Utc::now()),
            content,
        });
        Ok(blob.properties)
    }

    async fn fetch(
        &self,
        id: &BlobId,
        range: Option<ByteRange>,
    ) -> StoreResult<(Bytes, BlobProperties)> {
        let map = self.blobs.read().expect("lock poisoned");
        let blob = map.get(id).ok_or(StoreError::NotFound(*id))?;
        let content = match range {
            Some(range) => range.slice(&blob.content)?,
            None => blob.content.clone(),
        };
        Ok((content, blob.properties))
    }

    async fn fetch_stream(&self, id: &BlobId) -> StoreResult<BlobStream> {
        let content = {
            let map = self.blobs.read().expect("lock poisoned");
            map.get(id).ok_or(StoreError::NotFound(*id))?.content.clone()
        };
        Ok(chunk_stream(content, DEFAULT_CHUNK_SIZE))
    }

    async fn exists(&self, id: &BlobId) -> StoreResult<bool> {
        Ok(self.blobs.read().expect("lock poisoned").contains_key(id))
    }

    async fn properties(&self, id: &BlobId) -> StoreResult<BlobProperties> {
        self.blobs
            .read()
            .expect("lock poisoned")
            .get(id)
            .map(|blob| blob.properties)
            .ok_or(StoreError::NotFound(*id))
    }

    async fn delete(&self, id: &BlobId) -> StoreResult<()> {
        match self.blobs.write().expect("lock poisoned").remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(*id)),
        }
    }

    async fn list(&self, opts: ListOptions) -> StoreResult<ListPage> {
        // Decode the cursor before taking the lock; a garbage token is a
        // caller error, not an empty listing.
        let after = match &opts.continuation {
            Some(token) => Some(token.blob_id()?),
            None => None,
        };

        let map = self.blobs.read().expect("lock poisoned");
        let lower = match after {
            Some(after) => Bound::Excluded(after),
            None => Bound::Unbounded,
        };

        let mut items = Vec::new();
        let mut truncated = false;
        for (id, blob) in map.range((lower, Bound::Unbounded)) {
            if let Some(prefix) = opts.prefix.as_deref() {
                if !id.to_hex().starts_with(prefix) {
                    continue;
                }
            }
            if let Some(max) = opts.max_results {
                if items.len() == max {
                    truncated = true;
                    break;
                }
            }
            items.push(blob.properties);
        }

        let next = if truncated {
            items
                .last()
                .map(|props| ContinuationToken::from_blob_id(&props.blob_id))
        } else {
            None
        };
        Ok(ListPage { items, next })
    }

    async fn signed_url(
        &self,
        id: &BlobId,
        expires_in: Duration,
        permission: Permission,
    ) -> StoreResult<String> {
        let map = self.blobs.read().expect("lock poisoned");
        if !map.contains_key(id) {
            return Err(StoreError::NotFound(*id));
        }
        // Pseudo-URL: memory stores have no real endpoint to sign for.
        Ok(format!(
            "mem://{}/{}?expires_in={}&permission={}",
            self.label,
            id.to_hex(),
            expires_in.as_secs(),
            permission
        ))
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlobStore")
            .field("label", &self.label)
            .field("blob_count", &self.len())
            .finish()
    }
}
