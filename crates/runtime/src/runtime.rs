//! High-level runtime orchestrator.
//!
//! The runtime configures paths against the hook registry, owns the
//! evaluation worker, wires up command/event channels, and exposes a
//! builder-based API for hosts.

use std::sync::Arc;

use progression_core::{EngineConfig, IdentityOracle, LangTable, Localization, PathDefinition};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::{ProgressionHandle, Result, RuntimeError};
use crate::context::EvaluationContext;
use crate::events::EventBus;
use crate::hooks::DependencyRegistry;
use crate::path::{BuildReport, PathBuilder, PathEngine};
use crate::repository::{CompletionStore, InMemoryCompletionStore};
use crate::results::{HostBridge, ResultFactory};
use crate::workers::{Command, EvaluationWorker};

/// Main runtime that evaluates progression paths
///
/// Design: Runtime owns the worker and the hook registry.
/// [`ProgressionHandle`] provides a cloneable façade for hosts.
pub struct Runtime {
    handle: ProgressionHandle,
    engine: Arc<PathEngine>,
    registry: Arc<DependencyRegistry>,
    report: BuildReport,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> ProgressionHandle {
        self.handle.clone()
    }

    /// Direct access to the engine, for hosts that evaluate on their own tasks.
    pub fn engine(&self) -> Arc<PathEngine> {
        Arc::clone(&self.engine)
    }

    pub fn registry(&self) -> &DependencyRegistry {
        &self.registry
    }

    /// What the configuration load accepted and rejected.
    pub fn build_report(&self) -> &BuildReport {
        &self.report
    }

    /// Shutdown the runtime gracefully
    ///
    /// In-flight requests finish; resolved hook handles are released.
    pub async fn shutdown(self) -> Result<()> {
        if self.handle.shutdown().await.is_err() {
            warn!(target: "progression::engine", "Evaluation worker already stopped");
        }
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;
        self.registry.shutdown();

        info!(target: "progression::engine", "Runtime stopped");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: EngineConfig,
    registry: DependencyRegistry,
    definitions: Vec<PathDefinition>,
    identities: Option<Arc<dyn IdentityOracle>>,
    completions: Option<Arc<dyn CompletionStore>>,
    lang: Option<Arc<dyn Localization>>,
    host: Option<Arc<dyn HostBridge>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            registry: DependencyRegistry::new(),
            definitions: Vec::new(),
            identities: None,
            completions: None,
            lang: None,
            host: None,
        }
    }

    /// Override engine configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the hook registry paths are configured against
    pub fn registry(mut self, registry: DependencyRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Add path definitions, typically from `progression-content`
    pub fn paths(mut self, definitions: impl IntoIterator<Item = PathDefinition>) -> Self {
        self.definitions.extend(definitions);
        self
    }

    /// Set required identity oracle
    pub fn identities(mut self, identities: Arc<dyn IdentityOracle>) -> Self {
        self.identities = Some(identities);
        self
    }

    /// Set completion store (default: in-memory)
    pub fn completions(mut self, completions: Arc<dyn CompletionStore>) -> Self {
        self.completions = Some(completions);
        self
    }

    /// Set localization (default: built-in English templates)
    pub fn lang(mut self, lang: Arc<dyn Localization>) -> Self {
        self.lang = Some(lang);
        self
    }

    /// Set required host bridge results act through
    pub fn host(mut self, host: Arc<dyn HostBridge>) -> Self {
        self.host = Some(host);
        self
    }

    /// Build the runtime
    ///
    /// Configures every path before the worker starts; invalid requirements
    /// are excluded and listed in [`Runtime::build_report`].
    pub async fn build(self) -> Result<Runtime> {
        let identities = self
            .identities
            .ok_or(RuntimeError::MissingComponent("an identity oracle"))?;
        let host = self
            .host
            .ok_or(RuntimeError::MissingComponent("a host bridge"))?;
        let completions = self
            .completions
            .unwrap_or_else(|| Arc::new(InMemoryCompletionStore::new()) as Arc<dyn CompletionStore>);
        let lang = self
            .lang
            .unwrap_or_else(|| Arc::new(LangTable::new()) as Arc<dyn Localization>);

        let (paths, report) =
            PathBuilder::new(&self.registry, ResultFactory::new(host)).build_all(&self.definitions);
        info!(
            target: "progression::engine",
            paths = report.paths,
            requirements = report.requirements,
            rejected = report.rejected.len(),
            unguarded = report.unguarded_paths.len(),
            dependencies = ?self.registry.dependencies(),
            "Progression configuration loaded"
        );

        let ctx = EvaluationContext::new(identities, completions, lang, &self.config);
        let events = EventBus::with_capacity(self.config.event_buffer_size);
        let engine = Arc::new(PathEngine::new(paths, ctx, events.clone()));

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let handle = ProgressionHandle::new(command_tx, events);

        let worker = EvaluationWorker::new(Arc::clone(&engine), command_rx);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            engine,
            registry: Arc::new(self.registry),
            report,
            worker_handle,
        })
    }
}
