use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::future::{join_all, try_join_all};
use tracing::{debug, warn};

use strata_store::{
    BlobStream, ByteRange, ContentStore, ContinuationToken, ListOptions, ListPage, StoreError,
    StoreResult,
};
use strata_types::{BlobId, BlobProperties, Permission};

use crate::binding::{Binding, TierBinding};

/// Page size used while draining a tier's full listing during a merged
/// list. Independent of the caller's `max_results`.
const DRAIN_PAGE_SIZE: usize = 256;

/// A single logical blob store composed from prioritized backends.
///
/// A `TieredStore` owns an ordered set of [`TierBinding`]s and re-exposes
/// the [`ContentStore`] contract by fanning out to them:
///
/// - Reads (`fetch`, `fetch_stream`, `properties`, `signed_url`, `exists`)
///   walk readable tiers sequentially in ascending priority and stop at
///   the first success. Higher-priority tiers are assumed cheaper, so no
///   parallel racing.
/// - Writes (`store`, `delete`) go to every writable tier concurrently and
///   succeed only if every tier succeeds. No cross-tier atomicity: a
///   partial failure leaves tiers inconsistent, and the caller retries —
///   content addressing makes retries idempotent.
/// - A successful full-content `fetch` warms every other writable tier
///   with the blob (hot-swap). These cache writes are awaited but their
///   failures are logged and dropped, never surfaced.
/// - `list` merges and deduplicates the full listings of all readable
///   tiers, then paginates over the merged, id-sorted set.
///
/// The store holds no blobs of its own and no mutable state; tier ids are
/// assigned at construction and the binding set is fixed for the object's
/// lifetime.
pub struct TieredStore {
    tiers: Vec<TierBinding>,
}

impl TieredStore {
    /// Build a tiered store from an ordered list of bindings.
    ///
    /// Bindings without an explicit id are assigned `tier-<index>` from
    /// their position in `bindings`. Construction touches no backend.
    pub fn new(bindings: Vec<Binding>) -> Self {
        let tiers = bindings
            .into_iter()
            .enumerate()
            .map(|(index, binding)| TierBinding::resolve(binding, index))
            .collect();
        Self { tiers }
    }

    /// All tiers, in declaration order.
    pub fn tiers(&self) -> &[TierBinding] {
        &self.tiers
    }

    /// Readable tiers, ascending by priority. Ties keep declaration order.
    ///
    /// Recomputed on every call so the view always reflects the bindings.
    pub fn readables(&self) -> Vec<&TierBinding> {
        self.view(TierBinding::readable)
    }

    /// Writable tiers, ascending by priority. Ties keep declaration order.
    pub fn writables(&self) -> Vec<&TierBinding> {
        self.view(TierBinding::writable)
    }

    fn view(&self, include: impl Fn(&TierBinding) -> bool) -> Vec<&TierBinding> {
        let mut tiers: Vec<&TierBinding> =
            self.tiers.iter().filter(|&tier| include(tier)).collect();
        // Stable sort: equal priorities keep declaration order.
        tiers.sort_by_key(|tier| tier.priority());
        tiers
    }

    /// Warm every writable tier except the one that served the read.
    ///
    /// Best-effort: outcomes are awaited so the enclosing fetch does not
    /// return mid-write, but errors are logged and dropped.
    async fn populate_caches(&self, content: &Bytes, served_by: &str) {
        let writes: Vec<_> = self
            .writables()
            .into_iter()
            .filter(|tier| tier.id() != served_by)
            .map(|tier| {
                let store = Arc::clone(tier.store());
                let content = content.clone();
                let tier_id = tier.id().to_string();
                async move {
                    if let Err(err) = store.store(content).await {
                        warn!(tier = %tier_id, error = %err, "cache population failed");
                    }
                }
            })
            .collect();
        if !writes.is_empty() {
            join_all(writes).await;
        }
    }

    /// Drain a tier's complete listing through its own pagination.
    async fn drain_tier(
        tier: &TierBinding,
        prefix: Option<&str>,
    ) -> StoreResult<Vec<BlobProperties>> {
        let mut items = Vec::new();
        let mut continuation = None;
        loop {
            let mut opts = ListOptions::default().with_max_results(DRAIN_PAGE_SIZE);
            if let Some(prefix) = prefix {
                opts = opts.with_prefix(prefix);
            }
            if let Some(token) = continuation.take() {
                opts = opts.with_continuation(token);
            }
            let page = tier.store().list(opts).await?;
            items.extend(page.items);
            match page.next {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }
        Ok(items)
    }
}

#[async_trait]
impl ContentStore for TieredStore {
    /// Store to every writable tier concurrently.
    ///
    /// Fails with the first observed tier error; some tiers may already
    /// hold the blob at that point. On success returns the first writable
    /// tier's properties — every writer necessarily agrees on id and size.
    async fn store(&self, content: Bytes) -> StoreResult<BlobProperties> {
        let writables = self.writables();
        if writables.is_empty() {
            return Err(StoreError::NoWritableStore);
        }
        let writes = writables
            .iter()
            .map(|tier| tier.store().store(content.clone()));
        let mut results = try_join_all(writes).await?;
        Ok(results.swap_remove(0))
    }

    /// Fetch from readable tiers in priority order, first success wins.
    ///
    /// A tier's `NotFound` falls through to the next tier; any other tier
    /// error surfaces immediately, even when a lower tier holds the blob.
    /// A successful full-content fetch hot-swaps the blob into the other
    /// writable tiers before returning. Ranged fetches skip the hot-swap:
    /// a partial slice hashes to a different id and must not be stored.
    async fn fetch(
        &self,
        id: &BlobId,
        range: Option<ByteRange>,
    ) -> StoreResult<(Bytes, BlobProperties)> {
        let readables = self.readables();
        if readables.is_empty() {
            return Err(StoreError::NoReadableStore);
        }
        for tier in readables {
            match tier.store().fetch(id, range).await {
                Ok((content, properties)) => {
                    if range.is_none() {
                        self.populate_caches(&content, tier.id()).await;
                    }
                    return Ok((content, properties));
                }
                Err(err) if err.is_not_found() => continue,
                Err(err) => return Err(err),
            }
        }
        Err(StoreError::NotFound(*id))
    }

    /// Same fallback rules as [`fetch`](ContentStore::fetch), returning
    /// the serving tier's stream directly. No hot-swap: caching a stream
    /// would mean buffering it whole.
    async fn fetch_stream(&self, id: &BlobId) -> StoreResult<BlobStream> {
        let readables = self.readables();
        if readables.is_empty() {
            return Err(StoreError::NoReadableStore);
        }
        for tier in readables {
            match tier.store().fetch_stream(id).await {
                Ok(stream) => return Ok(stream),
                Err(err) if err.is_not_found() => continue,
                Err(err) => return Err(err),
            }
        }
        Err(StoreError::NotFound(*id))
    }

    /// True on the first tier reporting existence. Per-tier errors are
    /// treated as "absent in this tier" and do not fail the call.
    async fn exists(&self, id: &BlobId) -> StoreResult<bool> {
        let readables = self.readables();
        if readables.is_empty() {
            return Err(StoreError::NoReadableStore);
        }
        for tier in readables {
            match tier.store().exists(id).await {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(err) => {
                    debug!(tier = %tier.id(), error = %err, "existence check failed, treating as absent");
                }
            }
        }
        Ok(false)
    }

    /// Same fallback and error reconciliation as
    /// [`fetch`](ContentStore::fetch), without the hot-swap.
    async fn properties(&self, id: &BlobId) -> StoreResult<BlobProperties> {
        let readables = self.readables();
        if readables.is_empty() {
            return Err(StoreError::NoReadableStore);
        }
        for tier in readables {
            match tier.store().properties(id).await {
                Ok(properties) => return Ok(properties),
                Err(err) if err.is_not_found() => continue,
                Err(err) => return Err(err),
            }
        }
        Err(StoreError::NotFound(*id))
    }

    /// Delete from every writable tier concurrently.
    ///
    /// Any tier failure propagates, including `NotFound` from a tier that
    /// never held the blob — the caller learns the tiers were inconsistent
    /// instead of the store guessing.
    async fn delete(&self, id: &BlobId) -> StoreResult<()> {
        let writables = self.writables();
        if writables.is_empty() {
            return Err(StoreError::NoWritableStore);
        }
        let deletes = writables.iter().map(|tier| tier.store().delete(id));
        try_join_all(deletes).await?;
        Ok(())
    }

    /// Merge the complete listings of all readable tiers, deduplicate by
    /// id, and paginate over the merged sorted set.
    ///
    /// Each tier is drained through its own pagination first; a tier that
    /// errors mid-drain is skipped entirely for this call. Duplicate ids
    /// keep the occurrence from the higher-priority tier. The caller's
    /// continuation token is resolved by exact id match in the merged set;
    /// an unknown token restarts from the beginning rather than failing.
    async fn list(&self, opts: ListOptions) -> StoreResult<ListPage> {
        let readables = self.readables();
        if readables.is_empty() {
            return Err(StoreError::NoReadableStore);
        }

        let mut merged: BTreeMap<BlobId, BlobProperties> = BTreeMap::new();
        for tier in readables {
            match Self::drain_tier(tier, opts.prefix.as_deref()).await {
                Ok(items) => {
                    for properties in items {
                        merged.entry(properties.blob_id).or_insert(properties);
                    }
                }
                Err(err) => {
                    warn!(tier = %tier.id(), error = %err, "listing failed, skipping tier");
                }
            }
        }

        let resume_after = opts
            .continuation
            .as_ref()
            .and_then(|token| token.blob_id().ok())
            .filter(|id| merged.contains_key(id));

        let entries: Vec<BlobProperties> = merged.into_values().collect();
        let start = match resume_after {
            Some(after) => entries
                .iter()
                .position(|props| props.blob_id == after)
                .map(|index| index + 1)
                .unwrap_or(0),
            None => 0,
        };

        let remaining = &entries[start..];
        let (page, truncated) = match opts.max_results {
            Some(max) if remaining.len() > max => (&remaining[..max], true),
            _ => (remaining, false),
        };
        let next = if truncated {
            page.last()
                .map(|props| ContinuationToken::from_blob_id(&props.blob_id))
        } else {
            None
        };
        Ok(ListPage {
            items: page.to_vec(),
            next,
        })
    }

    /// Same fallback and error reconciliation as
    /// [`fetch`](ContentStore::fetch); the URL is signed by the serving
    /// tier.
    async fn signed_url(
        &self,
        id: &BlobId,
        expires_in: Duration,
        permission: Permission,
    ) -> StoreResult<String> {
        let readables = self.readables();
        if readables.is_empty() {
            return Err(StoreError::NoReadableStore);
        }
        for tier in readables {
            match tier.store().signed_url(id, expires_in, permission).await {
                Ok(url) => return Ok(url),
                Err(err) if err.is_not_found() => continue,
                Err(err) => return Err(err),
            }
        }
        Err(StoreError::NotFound(*id))
    }
}

impl std::fmt::Debug for TieredStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TieredStore")
            .field("tiers", &self.tiers)
            .finish()
    }
}
