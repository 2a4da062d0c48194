//! Remote blob store access for Strata.
//!
//! Defines [`BlobTransport`], the callback-style RPC contract for reaching
//! a blob store across a process or network boundary, and
//! [`RemoteBlobStore`], which adapts any transport into a full
//! [`ContentStore`] usable as a tier. [`LoopbackTransport`] provides the
//! trivial in-process implementation.
//!
//! No wire format lives here; a transport implementation owns whatever
//! encoding its channel needs.
//!
//! [`ContentStore`]: strata_store::ContentStore

pub mod error;
pub mod loopback;
pub mod remote;
pub mod transport;

pub use error::{TransportError, TransportResult};
pub use loopback::LoopbackTransport;
pub use remote::RemoteBlobStore;
pub use transport::BlobTransport;
