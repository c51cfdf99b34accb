//! Progression paths: ordered requirements gating one rank step.
//!
//! [`PathBuilder`] turns loaded [`PathDefinition`](progression_core::PathDefinition)s
//! into configured [`Path`]s. [`PathEngine`] evaluates them for actors,
//! completes requirements and runs results.

mod builder;
mod engine;

pub use builder::{BuildReport, PathBuilder, RejectedRequirement};
pub use engine::{CompletionOutcome, PathEngine, PathReport, RequirementStatus};

use crate::requirement::Requirement;
use crate::results::ResultAction;

/// A configured path. Only requirements whose options were accepted are kept.
pub struct Path {
    name: String,
    display_name: String,
    requirements: Vec<Requirement>,
    results: Vec<Box<dyn ResultAction>>,
}

impl Path {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        requirements: Vec<Requirement>,
        results: Vec<Box<dyn ResultAction>>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            requirements,
            results,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn requirement(&self, id: u32) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.id() == id)
    }

    /// Requirements that block completion of the path.
    pub fn required(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.iter().filter(|r| !r.is_optional())
    }

    pub fn results(&self) -> &[Box<dyn ResultAction>] {
        &self.results
    }
}

impl std::fmt::Debug for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Path")
            .field("name", &self.name)
            .field("requirements", &self.requirements)
            .field("results", &self.results.len())
            .finish()
    }
}
