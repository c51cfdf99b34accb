//! Bridge from results to the host game.

use std::sync::Mutex;

use progression_core::{Actor, ActorId, ResultKind};

use super::ResultError;

/// Operations results perform against the host.
pub trait HostBridge: Send + Sync {
    /// Runs a console command.
    fn dispatch_command(&self, command: &str) -> Result<(), ResultError>;

    /// Sends a chat message to `actor`.
    fn send_message(&self, actor: &Actor, message: &str) -> Result<(), ResultError>;

    /// Moves `actor` into group `to`, optionally leaving `from`.
    fn change_group(&self, actor: ActorId, from: Option<&str>, to: &str)
    -> Result<(), ResultError>;
}

/// A call received by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Command(String),
    Message {
        actor: String,
        text: String,
    },
    GroupChange {
        actor: ActorId,
        from: Option<String>,
        to: String,
    },
}

/// Host bridge that records every call. Useful for embedding and tests.
#[derive(Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
    reject_commands: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host that rejects every console command.
    pub fn rejecting_commands() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reject_commands: true,
        }
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: HostCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl HostBridge for RecordingHost {
    fn dispatch_command(&self, command: &str) -> Result<(), ResultError> {
        if self.reject_commands {
            return Err(ResultError::Rejected {
                kind: ResultKind::Command,
                message: format!("command '{}' refused", command),
            });
        }
        self.record(HostCall::Command(command.to_string()));
        Ok(())
    }

    fn send_message(&self, actor: &Actor, message: &str) -> Result<(), ResultError> {
        self.record(HostCall::Message {
            actor: actor.name.clone(),
            text: message.to_string(),
        });
        Ok(())
    }

    fn change_group(
        &self,
        actor: ActorId,
        from: Option<&str>,
        to: &str,
    ) -> Result<(), ResultError> {
        self.record(HostCall::GroupChange {
            actor,
            from: from.map(str::to_string),
            to: to.to_string(),
        });
        Ok(())
    }
}
