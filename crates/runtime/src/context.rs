//! Collaborators a requirement consults while it is evaluated.

use std::sync::Arc;
use std::time::Duration;

use progression_core::{ActorId, EngineConfig, IdentityOracle, LangTable, Localization};

use crate::oracle::IdentityOracleImpl;
use crate::repository::{CompletionStore, InMemoryCompletionStore};

/// Context object bundling identity resolution, completion state,
/// localization and the hook query bound.
///
/// Cloning is cheap; every collaborator is shared.
#[derive(Clone)]
pub struct EvaluationContext {
    pub identities: Arc<dyn IdentityOracle>,
    pub completions: Arc<dyn CompletionStore>,
    pub lang: Arc<dyn Localization>,
    pub query_timeout: Duration,
}

impl EvaluationContext {
    pub fn new(
        identities: Arc<dyn IdentityOracle>,
        completions: Arc<dyn CompletionStore>,
        lang: Arc<dyn Localization>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            identities,
            completions,
            lang,
            query_timeout: Duration::from_millis(config.query_timeout_ms),
        }
    }

    /// Context with in-memory collaborators and default configuration.
    pub fn in_memory(identities: Arc<IdentityOracleImpl>) -> Self {
        Self::new(
            identities,
            Arc::new(InMemoryCompletionStore::new()),
            Arc::new(LangTable::new()),
            &EngineConfig::default(),
        )
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Resolves a display name to its stable id.
    pub fn resolve(&self, display_name: &str) -> Option<ActorId> {
        self.identities.resolve(display_name)
    }
}
