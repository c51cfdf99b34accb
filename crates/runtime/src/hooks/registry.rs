//! Registry resolving hook identifiers to shared, lazily-created handles.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use progression_core::HookId;
use tracing::{debug, warn};

use super::StatHook;

type HookFactory = Box<dyn Fn() -> Option<Arc<dyn StatHook>> + Send + Sync>;

/// One lookup namespace: factories registered at startup, handles created on demand.
#[derive(Default)]
struct Namespace {
    factories: HashMap<HookId, HookFactory>,
    resolved: RwLock<HashMap<HookId, Arc<dyn StatHook>>>,
}

impl Namespace {
    fn resolve(&self, id: HookId, label: &'static str) -> Option<Arc<dyn StatHook>> {
        if let Some(handle) = self.resolved.read().ok()?.get(&id) {
            return Some(Arc::clone(handle));
        }

        let Some(factory) = self.factories.get(&id) else {
            debug!(target: "progression::hooks", hook = %id, namespace = label, "No provider registered");
            return None;
        };

        let Some(created) = factory() else {
            debug!(target: "progression::hooks", hook = %id, namespace = label, "Provider declined to initialize");
            return None;
        };

        // A concurrent caller may have initialized the same id; keep the first handle.
        let mut resolved = self.resolved.write().ok()?;
        let handle = resolved.entry(id).or_insert(created);
        debug!(target: "progression::hooks", hook = %id, namespace = label, "Hook resolved");
        Some(Arc::clone(handle))
    }

    fn clear(&self) {
        match self.resolved.write() {
            Ok(mut resolved) => resolved.clear(),
            Err(_) => warn!(target: "progression::hooks", "Hook cache lock poisoned during shutdown"),
        }
    }

    fn resolved_count(&self) -> usize {
        self.resolved.read().map(|r| r.len()).unwrap_or(0)
    }
}

/// Process-scoped source of truth for external stat providers.
///
/// Two namespaces exist: *library hooks*, probed explicitly for availability
/// by their callers, and *dependency handlers*, looked up by capability. Both
/// are idempotent: every resolution of an id returns the same `Arc` until
/// [`shutdown`](Self::shutdown) is called.
///
/// The registry is built at host startup and injected where it is needed; it
/// is never reached through global state.
#[derive(Default)]
pub struct DependencyRegistry {
    libraries: Namespace,
    handlers: Namespace,
    dependencies: RwLock<BTreeSet<HookId>>,
}

impl DependencyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a lazily-invoked factory for a library hook.
    ///
    /// The factory runs on first resolution; returning `None` means the
    /// provider is not present and the feature stays disabled.
    pub fn register_library<F>(&mut self, id: HookId, factory: F)
    where
        F: Fn() -> Option<Arc<dyn StatHook>> + Send + Sync + 'static,
    {
        self.libraries.factories.insert(id, Box::new(factory));
    }

    /// Registers a lazily-invoked factory for a dependency handler.
    pub fn register_handler<F>(&mut self, id: HookId, factory: F)
    where
        F: Fn() -> Option<Arc<dyn StatHook>> + Send + Sync + 'static,
    {
        self.handlers.factories.insert(id, Box::new(factory));
    }

    /// Registers an already-constructed hook in both namespaces under its own id.
    pub fn register_hook(&mut self, hook: Arc<dyn StatHook>) {
        let id = hook.id();
        let library = Arc::clone(&hook);
        self.register_library(id, move || Some(Arc::clone(&library)));
        self.register_handler(id, move || Some(Arc::clone(&hook)));
    }

    /// Resolves a library hook, or `None` if the provider is missing.
    pub fn library_hook(&self, id: HookId) -> Option<Arc<dyn StatHook>> {
        self.libraries.resolve(id, "library")
    }

    /// Resolves a dependency handler, or `None` if the provider is missing.
    pub fn dependency_handler(&self, id: HookId) -> Option<Arc<dyn StatHook>> {
        self.handlers.resolve(id, "handler")
    }

    /// Records that loaded configuration depends on `id`.
    pub fn add_dependency(&self, id: HookId) {
        match self.dependencies.write() {
            Ok(mut deps) => {
                if deps.insert(id) {
                    debug!(target: "progression::hooks", hook = %id, "Dependency registered");
                }
            }
            Err(_) => warn!(target: "progression::hooks", hook = %id, "Dependency set lock poisoned"),
        }
    }

    /// Hooks the loaded configuration depends on, in id order.
    pub fn dependencies(&self) -> Vec<HookId> {
        self.dependencies
            .read()
            .map(|deps| deps.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of handles created so far, across both namespaces.
    pub fn resolved_count(&self) -> usize {
        self.libraries.resolved_count() + self.handlers.resolved_count()
    }

    /// Drops every resolved handle and recorded dependency.
    ///
    /// Requirements that still hold a handle keep it alive until they are dropped.
    pub fn shutdown(&self) {
        self.libraries.clear();
        self.handlers.clear();
        if let Ok(mut deps) = self.dependencies.write() {
            deps.clear();
        }
        debug!(target: "progression::hooks", "Dependency registry shut down");
    }
}
