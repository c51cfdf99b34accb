//! In-process stat provider for embedding and tests.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use progression_core::{ActorId, HookId};

use super::{HookError, StatHook};

/// Stat hook backed by a map of per-actor values.
///
/// Counts queries so callers can verify that short-circuited checks never
/// reached the provider. An optional delay simulates a slow backend.
pub struct MemoryStatHook {
    id: HookId,
    available: AtomicBool,
    facts: RwLock<HashMap<ActorId, f64>>,
    queries: AtomicUsize,
    delay: Option<Duration>,
}

impl MemoryStatHook {
    /// Create an available hook with no data.
    pub fn new(id: HookId) -> Self {
        Self {
            id,
            available: AtomicBool::new(true),
            facts: RwLock::new(HashMap::new()),
            queries: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Delay every query by `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the value reported for `actor`.
    pub fn set(&self, actor: ActorId, value: f64) {
        if let Ok(mut facts) = self.facts.write() {
            facts.insert(actor, value);
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of queries answered or attempted so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatHook for MemoryStatHook {
    fn id(&self) -> HookId {
        self.id
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn query(&self, actor: ActorId) -> Result<f64, HookError> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if !self.is_available() {
            return Err(HookError::Unavailable { hook: self.id });
        }

        let facts = self.facts.read().map_err(|_| HookError::Query {
            hook: self.id,
            message: "fact table lock poisoned".into(),
        })?;

        facts.get(&actor).copied().ok_or(HookError::UnknownActor {
            hook: self.id,
            actor,
        })
    }
}
