//! Foundation types for Strata.
//!
//! This crate provides the identity and metadata types shared by every
//! Strata backend and by the tiered composition layer. Every other Strata
//! crate depends on `strata-types`.
//!
//! # Key Types
//!
//! - [`BlobId`] — Content-addressed blob identifier (BLAKE3 hash)
//! - [`BlobProperties`] — Size and first-observed-storage timestamp of a blob
//! - [`Permission`] — Access level carried by a signed URL

pub mod blob;
pub mod error;
pub mod permission;
pub mod properties;

pub use blob::BlobId;
pub use error::TypeError;
pub use permission::Permission;
pub use properties::BlobProperties;
