//! File-based CompletionStore implementation.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use progression_core::ActorId;
use serde::{Deserialize, Serialize};

use crate::repository::{CompletionStore, RepositoryError, Result};

/// On-disk layout of the completion file.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct CompletionDocument {
    version: u32,
    #[serde(default)]
    requirements: BTreeMap<ActorId, BTreeSet<u32>>,
    #[serde(default)]
    paths: BTreeMap<ActorId, BTreeSet<String>>,
}

impl CompletionDocument {
    const VERSION: u32 = 1;

    fn empty() -> Self {
        Self {
            version: Self::VERSION,
            ..Self::default()
        }
    }
}

/// File-based implementation of CompletionStore.
///
/// The whole document is cached in memory; reads never touch the disk.
/// Every new record rewrites the file.
///
/// # File Format
///
/// A single pretty-printed JSON document:
/// ```text
/// { "version": 1,
///   "requirements": { "<uuid>": [0, 2] },
///   "paths": { "<uuid>": ["member"] } }
/// ```
///
/// Writes go to `<file>.tmp` first and are renamed over the target, so a
/// crash mid-write never leaves a truncated document behind.
pub struct FileCompletionStore {
    path: PathBuf,
    document: RwLock<CompletionDocument>,
}

impl FileCompletionStore {
    /// Open the store at `path`, creating parent directories if needed.
    ///
    /// A missing file starts an empty store; it is created on the first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let document = if path.exists() {
            let bytes = fs::read(&path)?;
            let document: CompletionDocument = serde_json::from_slice(&bytes)?;
            if document.version != CompletionDocument::VERSION {
                return Err(RepositoryError::UnsupportedVersion {
                    found: document.version,
                    expected: CompletionDocument::VERSION,
                });
            }
            tracing::debug!("Loaded completion records from {}", path.display());
            document
        } else {
            CompletionDocument::empty()
        };

        Ok(Self {
            path,
            document: RwLock::new(document),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, document: &CompletionDocument) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(document)?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved completion records to {}", self.path.display());
        Ok(())
    }
}

impl CompletionStore for FileCompletionStore {
    fn has_completed(&self, requirement_id: u32, actor: ActorId) -> Result<bool> {
        let document = self
            .document
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(document
            .requirements
            .get(&actor)
            .is_some_and(|ids| ids.contains(&requirement_id)))
    }

    fn mark_completed(&self, requirement_id: u32, actor: ActorId) -> Result<bool> {
        let mut document = self
            .document
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let inserted = document
            .requirements
            .entry(actor)
            .or_default()
            .insert(requirement_id);

        if inserted && let Err(err) = self.persist(&document) {
            // Keep memory and disk in agreement.
            if let Some(ids) = document.requirements.get_mut(&actor) {
                ids.remove(&requirement_id);
            }
            return Err(err);
        }

        Ok(inserted)
    }

    fn completed_for(&self, actor: ActorId) -> Result<Vec<u32>> {
        let document = self
            .document
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(document
            .requirements
            .get(&actor)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default())
    }

    fn has_completed_path(&self, path: &str, actor: ActorId) -> Result<bool> {
        let document = self
            .document
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(document
            .paths
            .get(&actor)
            .is_some_and(|paths| paths.contains(path)))
    }

    fn mark_path_completed(&self, path: &str, actor: ActorId) -> Result<bool> {
        let mut document = self
            .document
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let inserted = document
            .paths
            .entry(actor)
            .or_default()
            .insert(path.to_string());

        if inserted && let Err(err) = self.persist(&document) {
            if let Some(paths) = document.paths.get_mut(&actor) {
                paths.remove(path);
            }
            return Err(err);
        }

        Ok(inserted)
    }
}
