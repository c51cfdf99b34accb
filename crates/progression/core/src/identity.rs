//! Actor identities and the live actor snapshot used during evaluation.

use core::fmt;

use uuid::Uuid;

/// Stable, durable identity of an actor.
///
/// Display names are mutable and must never key persistent state; every
/// hook query and completion record uses this identifier instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Generates a fresh random identity.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ActorId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Live view of an actor at check time.
///
/// `world` is read when the check runs, never cached from configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub name: String,
    pub world: String,
}

impl Actor {
    pub fn new(name: impl Into<String>, world: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            world: world.into(),
        }
    }
}

/// Resolves display names to stable identities.
///
/// Implementations are provided by the session layer; the runtime ships an
/// in-memory index.
pub trait IdentityOracle: Send + Sync {
    /// Returns the stable id for `display_name`, or `None` if the actor is unknown.
    fn resolve(&self, display_name: &str) -> Option<ActorId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_id_displays_as_hyphenated_uuid() {
        let uuid = Uuid::from_u128(0x1234);
        let id = ActorId::from(uuid);
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000001234");
        assert_eq!(id.as_uuid(), &uuid);
    }
}
