//! Worker tasks that back the runtime orchestration.
//!
//! The evaluation worker owns the path engine off the caller's thread and
//! answers requests sent through [`crate::ProgressionHandle`].

mod evaluation;

pub use evaluation::{Command, EvaluationWorker};
