//! Content-addressed blob storage contract for Strata.
//!
//! Every blob is identified by the BLAKE3 hash of its bytes, giving
//! automatic deduplication and location-independent verification. This
//! crate defines the [`ContentStore`] contract that all backends satisfy,
//! together with the option and pagination types of that contract, and
//! ships the reference [`InMemoryBlobStore`] backend.
//!
//! # The contract
//!
//! Eight operations: `store`, `fetch` (optionally ranged), `fetch_stream`,
//! `exists`, `properties`, `delete`, `list` (id-ordered, token-paginated),
//! and `signed_url`. See [`ContentStore`] for the invariants backends must
//! uphold.
//!
//! # Backends
//!
//! - [`InMemoryBlobStore`] — `BTreeMap`-based store for tests, embedding,
//!   and cache tiers
//! - `strata-remote` — proxy to a store reached over a transport
//! - `strata-tier` — composition of several backends into one logical store

pub mod error;
pub mod memory;
pub mod options;
pub mod stream;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryBlobStore;
pub use options::{ByteRange, ContinuationToken, ListOptions, ListPage};
pub use stream::{chunk_stream, BlobStream, DEFAULT_CHUNK_SIZE};
pub use traits::ContentStore;
