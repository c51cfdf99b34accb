//! Progression path catalog loader.

use std::collections::HashSet;
use std::path::Path;

use progression_core::PathDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Path catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathCatalog {
    pub paths: Vec<PathDefinition>,
}

/// Loader for progression paths from RON files.
///
/// Only the file's shape is validated here. Requirement options are checked
/// when the runtime configures each requirement, so one bad entry does not
/// reject the whole file.
pub struct PathLoader;

impl PathLoader {
    /// Load path definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<PathDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse a RON path catalog.
    pub fn parse(content: &str) -> LoadResult<Vec<PathDefinition>> {
        let catalog: PathCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse path catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for path in &catalog.paths {
            let name = path.name.trim();
            if name.is_empty() {
                anyhow::bail!("path names must not be empty");
            }
            if !seen.insert(name.to_lowercase()) {
                anyhow::bail!("duplicate path '{}'", name);
            }
        }

        Ok(catalog.paths)
    }
}
