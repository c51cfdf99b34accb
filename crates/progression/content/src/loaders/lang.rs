//! Language override loader.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use progression_core::{LangKey, LangTable};

use crate::loaders::{LoadResult, read_file};

/// A loaded language file.
#[derive(Debug, Clone, Default)]
pub struct LangFile {
    pub table: LangTable,
    /// Keys present in the file that no requirement uses.
    pub unknown_keys: Vec<String>,
}

/// Loader for description templates from TOML files.
///
/// The file is a flat table of `key = "template"` pairs, for example
/// `uskyblock-level-requirement = "Reach island level {0}"`. Keys not present
/// keep the built-in English template.
pub struct LangLoader;

impl LangLoader {
    pub fn load(path: &Path) -> LoadResult<LangFile> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<LangFile> {
        let entries: BTreeMap<String, String> = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse language TOML: {}", e))?;

        let mut file = LangFile::default();
        for (key, template) in entries {
            match LangKey::from_str(&key) {
                Ok(lang_key) => file.table.set(lang_key, template),
                Err(_) => file.unknown_keys.push(key),
            }
        }

        Ok(file)
    }
}
