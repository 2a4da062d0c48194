use strata_types::BlobId;

/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested blob was not found.
    #[error("blob not found: {0}")]
    NotFound(BlobId),

    /// No binding in the configuration accepts reads.
    #[error("no readable store configured")]
    NoReadableStore,

    /// No binding in the configuration accepts writes.
    #[error("no writable store configured")]
    NoWritableStore,

    /// A requested byte range falls outside the blob's content.
    #[error("invalid range: offset {offset} + length {length} exceeds blob size {size}")]
    InvalidRange { offset: u64, length: u64, size: u64 },

    /// A continuation token could not be decoded.
    #[error("invalid continuation token: {0}")]
    InvalidToken(String),

    /// A remote backend could not be reached or answered incorrectly.
    #[error("transport error: {0}")]
    Transport(String),

    /// I/O error from an underlying backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Opaque backend failure, propagated verbatim.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether this error means "the blob is absent", as opposed to a
    /// failure of the store itself. The tiered layer reconciles errors
    /// across tiers based on this distinction.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
