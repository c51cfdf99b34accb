//! Runs in its own process: the tracing subscriber is global.
use std::sync::Arc;

use progression_bootstrap::logging::LOG_FILE;
use progression_bootstrap::{BootstrapConfig, ProgressionBuilder};
use progression_runtime::{DependencyRegistry, IdentityOracleImpl, RecordingHost};

const PATHS: &str = r#"(paths: [(name: "member", requirements: [])])"#;

#[tokio::test]
async fn with_logging_writes_the_log_file() {
    let data = tempfile::tempdir().unwrap();
    std::fs::write(data.path().join("paths.ron"), PATHS).unwrap();
    let logs = tempfile::tempdir().unwrap();

    let mut config = BootstrapConfig::new(data.path());
    config.log_dir = Some(logs.path().join("progression"));

    let setup = ProgressionBuilder::new(
        config,
        Arc::new(IdentityOracleImpl::new()),
        Arc::new(RecordingHost::new()),
    )
    .registry(DependencyRegistry::new())
    .with_logging()
    .build()
    .await
    .unwrap();
    assert!(setup.log_guard.is_some());

    let log_file = setup.config.log_path().join(LOG_FILE);
    setup.runtime.shutdown().await.unwrap();
    drop(setup.log_guard);

    let contents = std::fs::read_to_string(&log_file).unwrap();
    assert!(contents.contains("Progression ready"));
}
