//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories and results so
//! hosts can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;
use crate::results::ResultError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("unknown path '{0}'")]
    UnknownPath(String),

    #[error("path '{path}' has no requirement with id {id}")]
    UnknownRequirement { path: String, id: u32 },

    #[error("no identity known for actor '{0}'")]
    UnknownActor(String),

    #[error("runtime requires {0} to be configured before building")]
    MissingComponent(&'static str),

    #[error("evaluation worker command channel closed")]
    CommandChannelClosed,

    #[error("evaluation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("evaluation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Result(#[from] ResultError),
}
