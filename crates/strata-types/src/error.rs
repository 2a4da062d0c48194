use thiserror::Error;

/// Errors from type construction and parsing.
#[derive(Debug, Error)]
pub enum TypeError {
    /// A hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A byte slice had the wrong length for the target type.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A permission string was not recognized.
    #[error("invalid permission: {0}")]
    InvalidPermission(String),
}
