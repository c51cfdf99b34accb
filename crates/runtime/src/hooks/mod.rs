//! External stat providers and the registry that hands them out.
//!
//! A hook is a handle to a third-party system that answers numeric questions
//! about an actor (island level, faction power, balance). Hooks are resolved
//! once, at configuration time, through the [`DependencyRegistry`]; the
//! resulting `Arc` is shared by every requirement that needs it.
//!
//! # Failure model
//!
//! - Missing or unavailable hooks are a configuration-time concern: the
//!   registry returns `None` and the requirement rejects its options.
//! - Query failures are a runtime concern: they surface as [`HookError`] and
//!   the requirement counts as "not currently satisfiable".

mod memory;
mod registry;

pub use memory::MemoryStatHook;
pub use registry::DependencyRegistry;

use async_trait::async_trait;
use progression_core::{ActorId, HookId};
use thiserror::Error;

/// Errors surfaced by hook queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HookError {
    #[error("{hook} is not available")]
    Unavailable { hook: HookId },

    #[error("{hook} has no data for actor {actor}")]
    UnknownActor { hook: HookId, actor: ActorId },

    #[error("{hook} query failed: {message}")]
    Query { hook: HookId, message: String },

    #[error("{hook} query timed out after {timeout_ms} ms")]
    Timeout { hook: HookId, timeout_ms: u64 },
}

/// Handle to an external provider of per-actor numeric facts.
///
/// Queries may block on network or disk I/O on the provider's side; callers
/// always bound them with a timeout.
#[async_trait]
pub trait StatHook: Send + Sync {
    /// Identifier of the provider behind this handle.
    fn id(&self) -> HookId;

    /// Whether the provider is loaded and answering.
    fn is_available(&self) -> bool;

    /// Returns the fact for `actor`, keyed by stable identity.
    async fn query(&self, actor: ActorId) -> Result<f64, HookError>;
}
