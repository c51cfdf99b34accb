//! Built-in result kinds.

use std::sync::Arc;

use progression_core::{Actor, ActorId, ResultKind};

use super::{HostBridge, ResultAction, ResultError};

/// Replaces actor placeholders (`&p`, `{player}`) in configured text.
fn fill_placeholders(template: &str, actor: &Actor) -> String {
    template
        .replace("&p", &actor.name)
        .replace("{player}", &actor.name)
}

/// Dispatches one or more console commands.
pub struct CommandResult {
    host: Arc<dyn HostBridge>,
    commands: Vec<String>,
}

impl CommandResult {
    pub fn new(host: Arc<dyn HostBridge>, commands: Vec<String>) -> Self {
        Self { host, commands }
    }
}

impl ResultAction for CommandResult {
    fn kind(&self) -> ResultKind {
        ResultKind::Command
    }

    fn apply(&self, actor: &Actor, _actor_id: ActorId) -> Result<(), ResultError> {
        for command in &self.commands {
            self.host.dispatch_command(&fill_placeholders(command, actor))?;
        }
        Ok(())
    }
}

/// Sends a message to the actor.
pub struct MessageResult {
    host: Arc<dyn HostBridge>,
    message: String,
}

impl MessageResult {
    pub fn new(host: Arc<dyn HostBridge>, message: String) -> Self {
        Self { host, message }
    }
}

impl ResultAction for MessageResult {
    fn kind(&self) -> ResultKind {
        ResultKind::Message
    }

    fn apply(&self, actor: &Actor, _actor_id: ActorId) -> Result<(), ResultError> {
        self.host
            .send_message(actor, &fill_placeholders(&self.message, actor))
    }
}

/// Moves the actor between rank groups.
pub struct RankChangeResult {
    host: Arc<dyn HostBridge>,
    from: Option<String>,
    to: String,
}

impl RankChangeResult {
    pub fn new(host: Arc<dyn HostBridge>, from: Option<String>, to: String) -> Self {
        Self { host, from, to }
    }
}

impl ResultAction for RankChangeResult {
    fn kind(&self) -> ResultKind {
        ResultKind::RankChange
    }

    fn apply(&self, _actor: &Actor, actor_id: ActorId) -> Result<(), ResultError> {
        self.host
            .change_group(actor_id, self.from.as_deref(), &self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{HostCall, RecordingHost};

    #[test]
    fn commands_substitute_the_actor_name() {
        let host = Arc::new(RecordingHost::new());
        let result = CommandResult::new(
            host.clone(),
            vec!["give &p diamond 1".into(), "say {player} ranked up".into()],
        );

        result
            .apply(&Actor::new("Steve", "world"), ActorId::new_random())
            .unwrap();

        assert_eq!(
            host.calls(),
            vec![
                HostCall::Command("give Steve diamond 1".into()),
                HostCall::Command("say Steve ranked up".into()),
            ]
        );
    }

    #[test]
    fn rejected_command_stops_the_sequence() {
        let host = Arc::new(RecordingHost::rejecting_commands());
        let result = CommandResult::new(host.clone(), vec!["a".into(), "b".into()]);

        let err = result
            .apply(&Actor::new("Steve", "world"), ActorId::new_random())
            .unwrap_err();

        assert!(matches!(err, ResultError::Rejected { kind: ResultKind::Command, .. }));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn rank_change_uses_the_stable_id() {
        let host = Arc::new(RecordingHost::new());
        let id = ActorId::new_random();
        RankChangeResult::new(host.clone(), Some("guest".into()), "member".into())
            .apply(&Actor::new("Steve", "world"), id)
            .unwrap();

        assert_eq!(
            host.calls(),
            vec![HostCall::GroupChange {
                actor: id,
                from: Some("guest".into()),
                to: "member".into(),
            }]
        );
    }
}
