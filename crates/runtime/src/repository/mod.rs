//! Repository layer for completion state.
//!
//! Completion records change during play and must survive restarts:
//! - Requirement completions keyed by (requirement id, actor id)
//! - Path completions keyed by (path name, actor id)
//!
//! Records only ever transition from absent to completed. Static
//! configuration (paths, language) is handled by loaders, not repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileCompletionStore;
pub use memory::InMemoryCompletionStore;
pub use traits::CompletionStore;
