//! Content loaders for reading progression data from files.
//!
//! Every loader returns core definitions; building requirements from them is
//! the runtime's job.

pub mod config;
pub mod factory;
pub mod lang;
pub mod paths;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use lang::{LangFile, LangLoader};
pub use paths::{PathCatalog, PathLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
