//! World scoping shared by every requirement kind.

/// Optional world a requirement is restricted to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldScope(Option<String>);

impl WorldScope {
    pub const fn global() -> Self {
        Self(None)
    }

    /// Creates a scope; blank names are treated as unscoped.
    pub fn new(world: Option<String>) -> Self {
        Self(world.filter(|w| !w.trim().is_empty()))
    }

    pub fn world(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_world_specific(&self) -> bool {
        self.0.is_some()
    }

    /// Returns true when an actor standing in `actor_world` may satisfy the requirement.
    pub fn admits(&self, actor_world: &str) -> bool {
        match &self.0 {
            Some(world) => world == actor_world,
            None => true,
        }
    }

    /// Appends the scope annotation to a description.
    pub fn annotate(&self, description: String) -> String {
        match &self.0 {
            Some(world) => format!("{} (in world '{}')", description, world),
            None => description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_requirement_only_admits_its_world() {
        let scope = WorldScope::new(Some("nether".into()));
        assert!(scope.admits("nether"));
        assert!(!scope.admits("world"));
        assert!(!scope.admits("Nether"));
    }

    #[test]
    fn global_scope_admits_everything() {
        let scope = WorldScope::global();
        assert!(scope.admits("anything"));
        assert!(!scope.is_world_specific());
    }

    #[test]
    fn blank_world_is_unscoped() {
        assert_eq!(WorldScope::new(Some("  ".into())), WorldScope::global());
    }

    #[test]
    fn annotation_quotes_world_name() {
        let scope = WorldScope::new(Some("nether".into()));
        assert_eq!(
            scope.annotate("Have 10 power".into()),
            "Have 10 power (in world 'nether')"
        );
        assert_eq!(
            WorldScope::global().annotate("Have 10 power".into()),
            "Have 10 power"
        );
    }
}
