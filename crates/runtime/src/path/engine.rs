//! Evaluates paths for actors and owns the completion write path.

use std::collections::HashMap;

use progression_core::{Actor, ActorId, RequirementKind};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::Path;
use crate::api::{Result, RuntimeError};
use crate::context::EvaluationContext;
use crate::events::{Event, EventBus, PathEvent, RequirementEvent};
use crate::requirement::Requirement;
use crate::results::ResultAction;

/// Status of one requirement as seen by a check.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementStatus {
    pub id: u32,
    pub kind: RequirementKind,
    pub optional: bool,
    pub description: String,
    pub progress: String,
    /// Whether the requirement is currently met (completed requirements always are).
    pub met: bool,
    pub completed: bool,
}

/// Outcome of checking one path for one actor.
#[derive(Debug, Clone, PartialEq)]
pub struct PathReport {
    pub path: String,
    pub display_name: String,
    pub actor: ActorId,
    pub requirements: Vec<RequirementStatus>,
    /// Requirements completed by this check.
    pub newly_completed: Vec<u32>,
    pub path_completed: bool,
}

/// Outcome of an explicit completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    AlreadyCompleted,
    Completed,
    NotMet,
}

/// Evaluates configured paths.
///
/// Reads run concurrently. Completing a requirement or a path (run results,
/// then record) is serialized by one lock and re-checks the store inside it,
/// so results of a completion never run twice.
pub struct PathEngine {
    paths: Vec<Path>,
    index: HashMap<String, usize>,
    ctx: EvaluationContext,
    events: EventBus,
    completion_lock: Mutex<()>,
}

impl PathEngine {
    pub fn new(paths: Vec<Path>, ctx: EvaluationContext, events: EventBus) -> Self {
        let index = paths
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name().to_lowercase(), i))
            .collect();
        Self {
            paths,
            index,
            ctx,
            events,
            completion_lock: Mutex::new(()),
        }
    }

    /// Looks a path up by name, case-insensitively.
    pub fn path(&self, name: &str) -> Result<&Path> {
        self.index
            .get(&name.to_lowercase())
            .map(|&i| &self.paths[i])
            .ok_or_else(|| RuntimeError::UnknownPath(name.to_string()))
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn context(&self) -> &EvaluationContext {
        &self.ctx
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    fn resolve(&self, actor: &Actor) -> Result<ActorId> {
        self.ctx
            .resolve(&actor.name)
            .ok_or_else(|| RuntimeError::UnknownActor(actor.name.clone()))
    }

    /// Evaluates every requirement of `path_name` for `actor`.
    ///
    /// Met auto-complete requirements are completed on the way. When every
    /// non-optional requirement is completed, the path results run and the
    /// path is recorded as completed.
    pub async fn check(&self, path_name: &str, actor: &Actor) -> Result<PathReport> {
        let path = self.path(path_name)?;
        let actor_id = self.resolve(actor)?;

        let mut statuses = Vec::with_capacity(path.requirements().len());
        let mut newly_completed = Vec::new();

        for requirement in path.requirements() {
            let mut completed = requirement.is_completed(requirement.id(), actor_id, &self.ctx);
            let assessment = requirement.assess(actor, actor_id, &self.ctx).await;
            let met = completed || assessment.met;

            if met && !completed && requirement.auto_completes() {
                match self.record_completion(path, requirement, actor, actor_id).await {
                    Ok(CompletionOutcome::Completed) => {
                        newly_completed.push(requirement.id());
                        completed = true;
                    }
                    Ok(_) => completed = true,
                    Err(err) => warn!(
                        target: "progression::engine",
                        path = %path.name(),
                        requirement = requirement.id(),
                        actor = %actor_id,
                        error = %err,
                        "Auto-completion failed"
                    ),
                }
            }

            statuses.push(RequirementStatus {
                id: requirement.id(),
                kind: requirement.kind(),
                optional: requirement.is_optional(),
                description: requirement.description(self.ctx.lang.as_ref()),
                progress: assessment.progress,
                met,
                completed,
            });
        }

        let path_completed = self.complete_path_if_done(path, actor, actor_id).await?;

        debug!(
            target: "progression::engine",
            path = %path.name(),
            actor = %actor_id,
            completed = newly_completed.len(),
            path_completed,
            "Path checked"
        );

        Ok(PathReport {
            path: path.name().to_string(),
            display_name: path.display_name().to_string(),
            actor: actor_id,
            requirements: statuses,
            newly_completed,
            path_completed,
        })
    }

    /// Completes one requirement on request, if it is currently met.
    ///
    /// # Errors
    ///
    /// Unknown path, requirement or actor; a failing result
    /// ([`RuntimeError::Result`]) leaves the requirement uncompleted.
    pub async fn complete_requirement(
        &self,
        path_name: &str,
        requirement_id: u32,
        actor: &Actor,
    ) -> Result<CompletionOutcome> {
        let path = self.path(path_name)?;
        let actor_id = self.resolve(actor)?;
        let requirement = path.requirement(requirement_id).ok_or_else(|| {
            RuntimeError::UnknownRequirement {
                path: path.name().to_string(),
                id: requirement_id,
            }
        })?;

        if requirement.is_completed(requirement_id, actor_id, &self.ctx) {
            return Ok(CompletionOutcome::AlreadyCompleted);
        }
        if !requirement.evaluate(actor, actor_id, &self.ctx).await {
            return Ok(CompletionOutcome::NotMet);
        }

        let outcome = self.record_completion(path, requirement, actor, actor_id).await?;
        self.complete_path_if_done(path, actor, actor_id).await?;
        Ok(outcome)
    }

    /// Description and progress of every requirement, without completing anything.
    pub async fn progress(&self, path_name: &str, actor: &Actor) -> Result<Vec<RequirementStatus>> {
        let path = self.path(path_name)?;
        let actor_id = self.resolve(actor)?;

        let mut statuses = Vec::with_capacity(path.requirements().len());
        for requirement in path.requirements() {
            let completed = requirement.is_completed(requirement.id(), actor_id, &self.ctx);
            let assessment = requirement.assess(actor, actor_id, &self.ctx).await;
            statuses.push(RequirementStatus {
                id: requirement.id(),
                kind: requirement.kind(),
                optional: requirement.is_optional(),
                description: requirement.description(self.ctx.lang.as_ref()),
                progress: assessment.progress,
                met: completed || assessment.met,
                completed,
            });
        }
        Ok(statuses)
    }

    pub fn has_completed_path(&self, path_name: &str, actor: &Actor) -> Result<bool> {
        let path = self.path(path_name)?;
        let actor_id = self.resolve(actor)?;
        Ok(self.ctx.completions.has_completed_path(path.name(), actor_id)?)
    }

    /// Runs the requirement's results and records completion.
    async fn record_completion(
        &self,
        path: &Path,
        requirement: &Requirement,
        actor: &Actor,
        actor_id: ActorId,
    ) -> Result<CompletionOutcome> {
        let _guard = self.completion_lock.lock().await;

        if self.ctx.completions.has_completed(requirement.id(), actor_id)? {
            return Ok(CompletionOutcome::AlreadyCompleted);
        }

        if let Err(err) = apply_all(requirement.results(), actor, actor_id) {
            self.events.publish(Event::Requirement(RequirementEvent::ResultFailed {
                path: path.name().to_string(),
                requirement_id: requirement.id(),
                actor: actor_id,
                message: err.to_string(),
            }));
            return Err(err.into());
        }

        self.ctx.completions.mark_completed(requirement.id(), actor_id)?;
        info!(
            target: "progression::engine",
            path = %path.name(),
            requirement = requirement.id(),
            actor = %actor_id,
            "Requirement completed"
        );
        self.events.publish(Event::Requirement(RequirementEvent::Completed {
            path: path.name().to_string(),
            requirement_id: requirement.id(),
            actor: actor_id,
        }));

        Ok(CompletionOutcome::Completed)
    }

    /// Completes the path once every non-optional requirement is completed.
    /// Returns whether the path is completed for `actor`.
    async fn complete_path_if_done(
        &self,
        path: &Path,
        actor: &Actor,
        actor_id: ActorId,
    ) -> Result<bool> {
        if self.ctx.completions.has_completed_path(path.name(), actor_id)? {
            return Ok(true);
        }

        for requirement in path.required() {
            if !self.ctx.completions.has_completed(requirement.id(), actor_id)? {
                return Ok(false);
            }
        }

        let _guard = self.completion_lock.lock().await;
        if self.ctx.completions.has_completed_path(path.name(), actor_id)? {
            return Ok(true);
        }

        if let Err(err) = apply_all(path.results(), actor, actor_id) {
            warn!(
                target: "progression::engine",
                path = %path.name(),
                actor = %actor_id,
                error = %err,
                "Path results failed; path stays open"
            );
            return Ok(false);
        }

        self.ctx.completions.mark_path_completed(path.name(), actor_id)?;
        info!(
            target: "progression::engine",
            path = %path.name(),
            actor = %actor_id,
            "Path completed"
        );
        self.events.publish(Event::Path(PathEvent::Completed {
            path: path.name().to_string(),
            actor: actor_id,
        }));

        Ok(true)
    }
}

fn apply_all(
    results: &[Box<dyn ResultAction>],
    actor: &Actor,
    actor_id: ActorId,
) -> std::result::Result<(), crate::results::ResultError> {
    results.iter().try_for_each(|r| r.apply(actor, actor_id))
}
