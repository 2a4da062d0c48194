//! Tiered composition layer for Strata blob stores.
//!
//! A [`TieredStore`] combines any number of [`ContentStore`] backends into
//! one logical store. Each backend is wrapped in a [`Binding`] carrying a
//! priority and read/write flags; the tiered store synthesizes the whole
//! blob-store contract from the bindings:
//!
//! - reads walk readable tiers in priority order and stop at the first hit
//! - writes and deletes fan out to every writable tier concurrently
//! - a blob served by a lower tier is opportunistically written back into
//!   the other writable tiers (hot-swap caching)
//! - listings are merged, deduplicated by content id, and re-paginated
//!   stably across heterogeneous backends
//!
//! The tiered store implements [`ContentStore`] itself, so tiered stores
//! nest and callers never need to know they are talking to a composite.
//!
//! [`ContentStore`]: strata_store::ContentStore

pub mod binding;
pub mod tiered;

pub use binding::{Binding, TierBinding};
pub use tiered::TieredStore;
