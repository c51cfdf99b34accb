//! Builds the runtime from a data directory for hosts.
use std::sync::Arc;

use anyhow::{Context, Result};
use progression_content::ContentFactory;
use progression_core::IdentityOracle;
use progression_runtime::{DependencyRegistry, FileCompletionStore, HostBridge, Runtime};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::config::BootstrapConfig;
use crate::logging::init_logging;

/// Builder that assembles content, completion storage and the runtime.
///
/// The host supplies what only it can know: which stat providers are
/// installed, how names map to identities, and how results reach the game.
pub struct ProgressionBuilder {
    config: BootstrapConfig,
    registry: DependencyRegistry,
    identities: Arc<dyn IdentityOracle>,
    host: Arc<dyn HostBridge>,
    logging: bool,
}

impl ProgressionBuilder {
    pub fn new(
        config: BootstrapConfig,
        identities: Arc<dyn IdentityOracle>,
        host: Arc<dyn HostBridge>,
    ) -> Self {
        Self {
            config,
            registry: DependencyRegistry::new(),
            identities,
            host,
            logging: false,
        }
    }

    /// Provide the registry with the host's stat providers.
    pub fn registry(mut self, registry: DependencyRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Install the global tracing subscriber during [`build`](Self::build),
    /// writing to [`BootstrapConfig::log_path`]. Fails the build if a
    /// subscriber is already installed.
    pub fn with_logging(mut self) -> Self {
        self.logging = true;
        self
    }

    pub async fn build(self) -> Result<ProgressionSetup> {
        let log_guard = if self.logging {
            init_logging(Some(&self.config.log_path()))?
        } else {
            None
        };

        let content = ContentFactory::new(&self.config.data_dir);

        let mut engine_config = content.load_config()?;
        if let Some(timeout_ms) = self.config.query_timeout_ms {
            engine_config.query_timeout_ms = timeout_ms;
        }

        let lang = content.load_lang()?;
        for key in &lang.unknown_keys {
            warn!("Ignoring unknown language key '{}'", key);
        }

        let paths = content.load_paths()?;

        let completions_path = self.config.completions_path();
        let completions = FileCompletionStore::open(&completions_path).with_context(|| {
            format!("Failed to open completion records {}", completions_path.display())
        })?;

        let runtime = Runtime::builder()
            .config(engine_config)
            .registry(self.registry)
            .paths(paths)
            .identities(self.identities)
            .completions(Arc::new(completions))
            .lang(Arc::new(lang.table))
            .host(self.host)
            .build()
            .await?;

        for path in &runtime.build_report().unguarded_paths {
            warn!("Path '{}' has no enabled required requirement", path);
        }
        for rejected in &runtime.build_report().rejected {
            warn!(
                "Requirement {} ({}) of path '{}' disabled: {}",
                rejected.id,
                rejected.kind,
                rejected.path,
                rejected.warnings.join("; ")
            );
        }
        info!(
            "Progression ready: {} paths from {}",
            runtime.build_report().paths,
            self.config.data_dir.display()
        );

        Ok(ProgressionSetup {
            config: self.config,
            runtime,
            log_guard,
        })
    }
}

pub struct ProgressionSetup {
    pub config: BootstrapConfig,
    pub runtime: Runtime,
    /// Flushes the log file when dropped. `None` without file logging.
    pub log_guard: Option<WorkerGuard>,
}
