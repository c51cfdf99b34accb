//! Cloneable façade for issuing commands to the runtime.
//!
//! [`ProgressionHandle`] hides channel plumbing and offers async helpers for
//! checking paths or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use progression_core::Actor;

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::path::{CompletionOutcome, PathReport, RequirementStatus};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct ProgressionHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl ProgressionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<Result<T>>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Evaluate a path for an actor, completing met auto-complete requirements
    pub async fn check(&self, path: &str, actor: Actor) -> Result<PathReport> {
        let path = path.to_string();
        self.request(|reply| Command::Check { path, actor, reply })
            .await
    }

    /// Complete one requirement if the actor currently meets it
    pub async fn complete_requirement(
        &self,
        path: &str,
        requirement_id: u32,
        actor: Actor,
    ) -> Result<CompletionOutcome> {
        let path = path.to_string();
        self.request(|reply| Command::Complete {
            path,
            requirement_id,
            actor,
            reply,
        })
        .await
    }

    /// Description and progress of each requirement
    pub async fn progress(&self, path: &str, actor: Actor) -> Result<Vec<RequirementStatus>> {
        let path = path.to_string();
        self.request(|reply| Command::Progress { path, actor, reply })
            .await
    }

    pub async fn has_completed_path(&self, path: &str, actor: Actor) -> Result<bool> {
        let path = path.to_string();
        self.request(|reply| Command::HasCompletedPath { path, actor, reply })
            .await
    }

    /// Ask the worker to stop after in-flight requests finish
    pub async fn shutdown(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Requirement` - Requirement completions and result failures
    /// - `Topic::Path` - Path completions
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use progression_runtime::Topic;
    ///
    /// let mut paths = handle.subscribe(Topic::Path);
    /// while let Ok(event) = paths.recv().await {
    ///     // Announce the rank-up
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
