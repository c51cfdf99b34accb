//! Content factory for loading progression content from a data directory.

use std::path::{Path, PathBuf};

use progression_core::{EngineConfig, PathDefinition};

use crate::loaders::{ConfigLoader, LangFile, LangLoader, LoadResult, PathLoader};

/// Content factory that loads all progression content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml   (optional)
/// ├── lang.toml     (optional)
/// └── paths.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const PATHS_FILE: &'static str = "paths.ron";
    pub const LANG_FILE: &'static str = "lang.toml";
    pub const CONFIG_FILE: &'static str = "config.toml";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load path definitions from `paths.ron`.
    pub fn load_paths(&self) -> LoadResult<Vec<PathDefinition>> {
        PathLoader::load(&self.data_dir.join(Self::PATHS_FILE))
    }

    /// Load language overrides from `lang.toml`, or built-in templates if absent.
    pub fn load_lang(&self) -> LoadResult<LangFile> {
        let path = self.data_dir.join(Self::LANG_FILE);
        if !path.exists() {
            return Ok(LangFile::default());
        }
        LangLoader::load(&path)
    }

    /// Load engine configuration from `config.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            return Ok(EngineConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
