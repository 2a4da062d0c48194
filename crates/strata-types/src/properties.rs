use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blob::BlobId;

/// Metadata attached 1:1 to a stored blob.
///
/// `created_at` is the time the blob was first observed in the store that
/// answered the request. Two stores holding the same blob may report
/// different `created_at` values; the identity of the blob is `blob_id`
/// alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobProperties {
    pub blob_id: BlobId,
    pub size: u64,
    pub created_at: DateTime<Utc>,
}

impl BlobProperties {
    pub fn new(blob_id: BlobId, size: u64, created_at: DateTime<Utc>) -> Self {
        Self {
            blob_id,
            size,
            created_at,
        }
    }

    /// Properties for freshly stored content, stamped with the current time.
    pub fn for_content(content: &[u8]) -> Self {
        Self {
            blob_id: BlobId::from_content(content),
            size: content.len() as u64,
            created_at: Utc::now(),
        }
    }
}
