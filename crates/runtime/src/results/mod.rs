//! Actions executed when a requirement or a whole path is completed.
//!
//! Results are opaque to the engine: it runs them in order and stops at the
//! first failure. The host supplies a [`HostBridge`] through which results
//! reach the game (console commands, chat, permission groups).

mod actions;
mod factory;
mod host;

pub use actions::{CommandResult, MessageResult, RankChangeResult};
pub use factory::ResultFactory;
pub use host::{HostBridge, HostCall, RecordingHost};

use progression_core::{Actor, ActorId, ResultKind};
use thiserror::Error;

/// Failure reported by the host while applying a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultError {
    #[error("host rejected {kind} result: {message}")]
    Rejected { kind: ResultKind, message: String },
}

/// An executable unit owned by a requirement or a path.
pub trait ResultAction: Send + Sync {
    fn kind(&self) -> ResultKind;

    /// Applies the result to `actor`.
    fn apply(&self, actor: &Actor, actor_id: ActorId) -> Result<(), ResultError>;
}
