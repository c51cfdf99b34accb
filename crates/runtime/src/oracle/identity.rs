//! Identity oracle implementing [`progression_core::IdentityOracle`].

use std::collections::HashMap;
use std::sync::RwLock;

use progression_core::{ActorId, IdentityOracle};

/// Name-to-identity index maintained by the host.
///
/// Lookups are case-insensitive. Renames are handled by registering the new
/// name; the stable id never changes.
#[derive(Default)]
pub struct IdentityOracleImpl {
    names: RwLock<HashMap<String, ActorId>>,
}

impl IdentityOracleImpl {
    /// Create an empty oracle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `name` with `id`, replacing any previous association for that name.
    pub fn register(&self, name: &str, id: ActorId) {
        if let Ok(mut names) = self.names.write() {
            names.insert(name.to_lowercase(), id);
        }
    }

    /// Forget `name`. Returns the id it pointed to.
    pub fn forget(&self, name: &str) -> Option<ActorId> {
        self.names.write().ok()?.remove(&name.to_lowercase())
    }

    /// Get number of known names.
    pub fn len(&self) -> usize {
        self.names.read().map(|n| n.len()).unwrap_or(0)
    }

    /// Check if no names are known.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IdentityOracle for IdentityOracleImpl {
    fn resolve(&self, display_name: &str) -> Option<ActorId> {
        self.names
            .read()
            .ok()?
            .get(&display_name.to_lowercase())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_case_insensitively() {
        let oracle = IdentityOracleImpl::new();
        let id = ActorId::new_random();
        oracle.register("Steve", id);

        assert_eq!(oracle.resolve("steve"), Some(id));
        assert_eq!(oracle.resolve("STEVE"), Some(id));
        assert_eq!(oracle.resolve("alex"), None);
    }

    #[test]
    fn renamed_actor_keeps_its_id() {
        let oracle = IdentityOracleImpl::new();
        let id = ActorId::new_random();
        oracle.register("Steve", id);
        oracle.register("Steven", id);
        assert_eq!(oracle.forget("Steve"), Some(id));

        assert_eq!(oracle.resolve("Steven"), Some(id));
        assert_eq!(oracle.resolve("Steve"), None);
        assert_eq!(oracle.len(), 1);
    }
}
