//! In-memory CompletionStore implementation for tests and local runs.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use progression_core::ActorId;

use crate::repository::{CompletionStore, RepositoryError, Result};

#[derive(Default)]
struct Records {
    requirements: HashMap<ActorId, BTreeSet<u32>>,
    paths: HashMap<ActorId, BTreeSet<String>>,
}

/// In-memory implementation of CompletionStore.
///
/// State is lost when the process exits.
#[derive(Default)]
pub struct InMemoryCompletionStore {
    records: RwLock<Records>,
}

impl InMemoryCompletionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CompletionStore for InMemoryCompletionStore {
    fn has_completed(&self, requirement_id: u32, actor: ActorId) -> Result<bool> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records
            .requirements
            .get(&actor)
            .is_some_and(|ids| ids.contains(&requirement_id)))
    }

    fn mark_completed(&self, requirement_id: u32, actor: ActorId) -> Result<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records
            .requirements
            .entry(actor)
            .or_default()
            .insert(requirement_id))
    }

    fn completed_for(&self, actor: ActorId) -> Result<Vec<u32>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records
            .requirements
            .get(&actor)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default())
    }

    fn has_completed_path(&self, path: &str, actor: ActorId) -> Result<bool> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records
            .paths
            .get(&actor)
            .is_some_and(|paths| paths.contains(path)))
    }

    fn mark_path_completed(&self, path: &str, actor: ActorId) -> Result<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records
            .paths
            .entry(actor)
            .or_default()
            .insert(path.to_string()))
    }
}
