//! File-based repository implementations.

mod completion;

pub use completion::FileCompletionStore;
