//! HTTP exposure for Strata blob stores.
//!
//! Serves any [`ContentStore`] — a single backend or a full tiered
//! composition — over a small REST surface under `/v1`. This crate is
//! plumbing around the store contract: every policy decision (tier
//! ordering, caching, pagination) lives behind the `ContentStore` handed
//! to the server.
//!
//! [`ContentStore`]: strata_store::ContentStore

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::BlobServer;
