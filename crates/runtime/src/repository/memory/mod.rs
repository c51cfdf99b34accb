//! In-memory repository implementations for testing and development.

mod completion;

pub use completion::InMemoryCompletionStore;
