//! Pure requirement model for rank progression.
//!
//! `progression-core` defines what a requirement *is*: the identities it is
//! evaluated against, the external hooks it reads from, how its options are
//! parsed and validated, how a fetched fact is compared against a threshold,
//! and how progress and descriptions are rendered. It performs no I/O; the
//! runtime crate supplies hooks, completion state and scheduling.
pub mod config;
pub mod definition;
pub mod error;
pub mod hooks;
pub mod identity;
pub mod lang;
pub mod progress;
pub mod requirement;
pub mod scope;

pub use config::EngineConfig;
pub use definition::{PathDefinition, RequirementDefinition, ResultDefinition, ResultKind};
pub use error::ConfigError;
pub use hooks::{HookAccess, HookId};
pub use identity::{Actor, ActorId, IdentityOracle};
pub use lang::{LangKey, LangTable, Localization};
pub use progress::{NumericUnit, format_fractional, format_threshold};
pub use requirement::{
    Checker, Fact, FactSource, InWorldChecker, RequirementKind, ThresholdChecker, ThresholdProfile,
};
pub use scope::WorldScope;
