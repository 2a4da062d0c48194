use thiserror::Error;

use strata_types::BlobId;

/// Errors from a blob transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The remote store does not hold the blob.
    #[error("blob not found: {0}")]
    NotFound(BlobId),

    /// The remote endpoint could not be reached or did not answer.
    #[error("remote unavailable: {0}")]
    Unavailable(String),

    /// The remote answered with something the caller could not use.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Result alias for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
