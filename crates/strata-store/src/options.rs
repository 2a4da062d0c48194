use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use strata_types::{BlobId, BlobProperties};

use crate::error::{StoreError, StoreResult};

/// A byte range within a blob's content.
///
/// The range must lie entirely inside the content; a range that reaches
/// past the end is a caller error (`InvalidRange`), not a truncated read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRange {
    pub offset: u64,
    pub length: u64,
}

impl ByteRange {
    pub fn new(offset: u64, length: u64) -> Self {
        Self { offset, length }
    }

    /// Slice `content` to this range, validating bounds.
    pub fn slice(&self, content: &Bytes) -> StoreResult<Bytes> {
        let size = content.len() as u64;
        let end = self
            .offset
            .checked_add(self.length)
            .filter(|end| *end <= size)
            .ok_or(StoreError::InvalidRange {
                offset: self.offset,
                length: self.length,
                size,
            })?;
        Ok(content.slice(self.offset as usize..end as usize))
    }
}

/// Opaque pagination cursor returned by `list`.
///
/// Callers must treat the token as a black box: obtain it from a
/// [`ListPage`] and hand it back unchanged to resume listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn from_blob_id(id: &BlobId) -> Self {
        Self(id.to_hex())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back into the blob id it was minted from.
    pub fn blob_id(&self) -> StoreResult<BlobId> {
        BlobId::from_hex(&self.0).map_err(|_| StoreError::InvalidToken(self.0.clone()))
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ContinuationToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Options for a `list` call.
#[derive(Clone, Debug, Default)]
pub struct ListOptions {
    /// Hex prefix filter on blob ids.
    pub prefix: Option<String>,
    /// Upper bound on the number of returned items. `None` means unbounded.
    pub max_results: Option<usize>,
    /// Resume listing after this cursor.
    pub continuation: Option<ContinuationToken>,
}

impl ListOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    pub fn with_continuation(mut self, token: ContinuationToken) -> Self {
        self.continuation = Some(token);
        self
    }
}

/// One page of an id-ordered listing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ListPage {
    /// Items, ascending by blob id.
    pub items: Vec<BlobProperties>,
    /// Cursor for the next page, absent on the last page.
    pub next: Option<ContinuationToken>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_within_bounds() {
        let content = Bytes::from_static(b"hello world");
        let range = ByteRange::new(6, 5);
        assert_eq!(range.slice(&content).unwrap(), Bytes::from_static(b"world"));
    }

    #[test]
    fn slice_full_content() {
        let content = Bytes::from_static(b"abc");
        let range = ByteRange::new(0, 3);
        assert_eq!(range.slice(&content).unwrap(), content);
    }

    #[test]
    fn slice_past_end_is_invalid() {
        let content = Bytes::from_static(b"abc");
        let range = ByteRange::new(1, 3);
        assert!(matches!(
            range.slice(&content),
            Err(StoreError::InvalidRange { size: 3, .. })
        ));
    }

    #[test]
    fn slice_overflow_is_invalid() {
        let content = Bytes::from_static(b"abc");
        let range = ByteRange::new(u64::MAX, 2);
        assert!(matches!(
            range.slice(&content),
            Err(StoreError::InvalidRange { .. })
        ));
    }

    #[test]
    fn token_roundtrip() {
        let id = BlobId::from_content(b"token");
        let token = ContinuationToken::from_blob_id(&id);
        assert_eq!(token.blob_id().unwrap(), id);
    }

    #[test]
    fn garbage_token_fails_to_decode() {
        let token = ContinuationToken::from("not-a-blob-id".to_string());
        assert!(matches!(token.blob_id(), Err(StoreError::InvalidToken(_))));
    }

    #[test]
    fn list_options_builder() {
        let token = ContinuationToken::from_blob_id(&BlobId::from_content(b"x"));
        let opts = ListOptions::default()
            .with_prefix("ab")
            .with_max_results(10)
            .with_continuation(token.clone());
        assert_eq!(opts.prefix.as_deref(), Some("ab"));
        assert_eq!(opts.max_results, Some(10));
        assert_eq!(opts.continuation, Some(token));
    }
}
