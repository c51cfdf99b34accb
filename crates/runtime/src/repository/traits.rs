//! Repository contract for completion state.

use progression_core::ActorId;

use super::Result;

/// Persistent mapping from (requirement id, actor id) to "completed".
///
/// Reads vastly outnumber writes and happen from several execution contexts
/// at once, so implementations must be `Send + Sync` and read-friendly.
/// Requirements only read; the path engine owns the write path. Nothing in
/// the engine ever clears a record.
pub trait CompletionStore: Send + Sync {
    /// Whether `actor` has completed `requirement_id`. Absent records read as false.
    fn has_completed(&self, requirement_id: u32, actor: ActorId) -> Result<bool>;

    /// Records completion. Returns true if the record was newly created.
    fn mark_completed(&self, requirement_id: u32, actor: ActorId) -> Result<bool>;

    /// Requirement ids completed by `actor`, ascending.
    fn completed_for(&self, actor: ActorId) -> Result<Vec<u32>>;

    /// Whether `actor` has completed the path named `path`.
    fn has_completed_path(&self, path: &str, actor: ActorId) -> Result<bool>;

    /// Records path completion. Returns true if the record was newly created.
    fn mark_path_completed(&self, path: &str, actor: ActorId) -> Result<bool>;
}
