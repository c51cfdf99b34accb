//! Event payloads published by the path engine.

use progression_core::ActorId;
use serde::{Deserialize, Serialize};

/// Requirement-level progression changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementEvent {
    /// A requirement was recorded as completed for an actor.
    Completed {
        path: String,
        requirement_id: u32,
        actor: ActorId,
    },

    /// A met requirement could not be completed because one of its results failed.
    ResultFailed {
        path: String,
        requirement_id: u32,
        actor: ActorId,
        message: String,
    },
}

/// Path-level progression changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathEvent {
    /// Every non-optional requirement of the path is completed and the path
    /// results ran.
    Completed { path: String, actor: ActorId },
}
