//! Shared bootstrap utilities for hosts embedding the progression runtime.
//!
//! Provides environment configuration, tracing setup, and assembly of a
//! [`progression_runtime::Runtime`] from a data directory.
pub mod builder;
pub mod config;
pub mod dirs;
pub mod logging;

pub use builder::{ProgressionBuilder, ProgressionSetup};
pub use config::BootstrapConfig;
pub use logging::init_logging;
