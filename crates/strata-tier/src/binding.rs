use std::sync::Arc;

use strata_store::ContentStore;

/// Declaration of one tier handed to [`TieredStore::new`].
///
/// A binding wraps a backend with a priority (lower is preferred) and
/// read/write flags. The tier id is optional; a missing id is assigned
/// deterministically from the binding's position during construction.
/// Bindings are read-write by default.
///
/// Wrapping the same backend in several bindings is allowed — the tiered
/// store never assumes store identity beyond the declared id, so replicated
/// access through different paths behaves as distinct tiers.
///
/// [`TieredStore::new`]: crate::TieredStore::new
pub struct Binding {
    pub(crate) store: Arc<dyn ContentStore>,
    pub(crate) id: Option<String>,
    pub(crate) priority: i32,
    pub(crate) readable: bool,
    pub(crate) writable: bool,
}

impl Binding {
    /// A read-write binding at the given priority.
    pub fn new(store: Arc<dyn ContentStore>, priority: i32) -> Self {
        Self {
            store,
            id: None,
            priority,
            readable: true,
            writable: true,
        }
    }

    /// Use an explicit tier id instead of a generated one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Exclude this tier from write fan-out.
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self.readable = true;
        self
    }

    /// Exclude this tier from read fan-out.
    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self.writable = true;
        self
    }
}

/// A resolved tier inside a [`TieredStore`]: a [`Binding`] with its id
/// assigned. Exposed through the store's readable/writable views for
/// diagnostics and tests.
///
/// [`TieredStore`]: crate::TieredStore
pub struct TierBinding {
    store: Arc<dyn ContentStore>,
    id: String,
    priority: i32,
    readable: bool,
    writable: bool,
}

impl TierBinding {
    pub(crate) fn resolve(binding: Binding, index: usize) -> Self {
        Self {
            id: binding.id.unwrap_or_else(|| format!("tier-{index}")),
            store: binding.store,
            priority: binding.priority,
            readable: binding.readable,
            writable: binding.writable,
        }
    }

    /// The tier's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The tier's priority; lower numbers are consulted first.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Whether this tier participates in read fan-out.
    pub fn readable(&self) -> bool {
        self.readable
    }

    /// Whether this tier participates in write fan-out.
    pub fn writable(&self) -> bool {
        self.writable
    }

    /// The wrapped backend.
    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }
}

impl std::fmt::Debug for TierBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TierBinding")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("readable", &self.readable)
            .field("writable", &self.writable)
            .finish()
    }
}
