//! Runtime orchestration for rank progression.
//!
//! This crate wires together the hook registry, completion repositories,
//! configured requirements and results, and the evaluation worker into a
//! cohesive runtime API. Hosts embed [`Runtime`] to check paths, subscribe to
//! completion events, and complete requirements through [`ProgressionHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream hosts interact with
//! - [`events`] provides a topic-based event bus for completions
//! - [`hooks`] resolves external stat providers
//! - [`requirement`] and [`results`] are the evaluable units of a path
//! - [`path`] builds paths from definitions and evaluates them
//! - [`oracle`] and [`repository`] provide data adapters reused by hosts
pub mod api;
pub mod context;
pub mod events;
pub mod hooks;
pub mod oracle;
pub mod path;
pub mod repository;
pub mod requirement;
pub mod results;
pub mod runtime;

mod workers;

pub use api::{ProgressionHandle, Result, RuntimeError};
pub use context::EvaluationContext;
pub use events::{Event, EventBus, PathEvent, RequirementEvent, Topic};
pub use hooks::{DependencyRegistry, HookError, MemoryStatHook, StatHook};
pub use oracle::IdentityOracleImpl;
pub use path::{
    BuildReport, CompletionOutcome, Path, PathBuilder, PathEngine, PathReport,
    RejectedRequirement, RequirementStatus,
};
pub use repository::{
    CompletionStore, FileCompletionStore, InMemoryCompletionStore, RepositoryError,
};
pub use requirement::{Requirement, RequirementState};
pub use results::{
    CommandResult, HostBridge, HostCall, MessageResult, RankChangeResult, RecordingHost,
    ResultAction, ResultError, ResultFactory,
};
pub use runtime::{Runtime, RuntimeBuilder};
