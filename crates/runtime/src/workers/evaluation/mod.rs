//! Evaluation worker that owns the [`PathEngine`].
//!
//! Receives commands from [`ProgressionHandle`](crate::ProgressionHandle) and
//! answers over oneshot channels. Each request runs as its own task, so a slow
//! hook never delays unrelated actors; completion stays serialized inside the
//! engine.

use std::sync::Arc;

use progression_core::Actor;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::api::Result;
use crate::path::{CompletionOutcome, PathEngine, PathReport, RequirementStatus};

/// Commands that can be sent to the evaluation worker
pub enum Command {
    /// Evaluate a path, completing met auto-complete requirements.
    Check {
        path: String,
        actor: Actor,
        reply: oneshot::Sender<Result<PathReport>>,
    },
    /// Complete one requirement on request.
    Complete {
        path: String,
        requirement_id: u32,
        actor: Actor,
        reply: oneshot::Sender<Result<CompletionOutcome>>,
    },
    /// Read progress without completing anything.
    Progress {
        path: String,
        actor: Actor,
        reply: oneshot::Sender<Result<Vec<RequirementStatus>>>,
    },
    /// Query whether the path is completed.
    HasCompletedPath {
        path: String,
        actor: Actor,
        reply: oneshot::Sender<Result<bool>>,
    },
    /// Stop accepting commands and finish in-flight ones.
    Shutdown,
}

/// Background task that processes evaluation commands.
pub struct EvaluationWorker {
    engine: Arc<PathEngine>,
    command_rx: mpsc::Receiver<Command>,
    in_flight: JoinSet<()>,
}

impl EvaluationWorker {
    pub fn new(engine: Arc<PathEngine>, command_rx: mpsc::Receiver<Command>) -> Self {
        Self {
            engine,
            command_rx,
            in_flight: JoinSet::new(),
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    if matches!(cmd, Command::Shutdown) {
                        debug!(target: "progression::engine", "Evaluation worker shutting down");
                        break;
                    }
                    self.dispatch(cmd);
                }
                Some(joined) = self.in_flight.join_next(), if !self.in_flight.is_empty() => {
                    if let Err(err) = joined {
                        error!(target: "progression::engine", error = %err, "Evaluation task failed");
                    }
                }
                else => break,
            }
        }

        self.command_rx.close();
        while let Some(joined) = self.in_flight.join_next().await {
            if let Err(err) = joined {
                error!(target: "progression::engine", error = %err, "Evaluation task failed");
            }
        }
    }

    fn dispatch(&mut self, cmd: Command) {
        let engine = Arc::clone(&self.engine);
        self.in_flight.spawn(async move {
            match cmd {
                Command::Check { path, actor, reply } => {
                    let _ = reply.send(engine.check(&path, &actor).await);
                }
                Command::Complete {
                    path,
                    requirement_id,
                    actor,
                    reply,
                } => {
                    let result = engine
                        .complete_requirement(&path, requirement_id, &actor)
                        .await;
                    let _ = reply.send(result);
                }
                Command::Progress { path, actor, reply } => {
                    let _ = reply.send(engine.progress(&path, &actor).await);
                }
                Command::HasCompletedPath { path, actor, reply } => {
                    let _ = reply.send(engine.has_completed_path(&path, &actor));
                }
                Command::Shutdown => {}
            }
        });
    }
}
