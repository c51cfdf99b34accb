//! Builds results from configuration.

use std::sync::Arc;

use progression_core::{ConfigError, ResultDefinition, ResultKind};

use super::{CommandResult, HostBridge, MessageResult, RankChangeResult, ResultAction};

/// Turns [`ResultDefinition`]s into executable results bound to a host.
#[derive(Clone)]
pub struct ResultFactory {
    host: Arc<dyn HostBridge>,
}

impl ResultFactory {
    pub fn new(host: Arc<dyn HostBridge>) -> Self {
        Self { host }
    }

    /// Builds one result.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when required options are missing or blank.
    pub fn build(&self, definition: &ResultDefinition) -> Result<Box<dyn ResultAction>, ConfigError> {
        let options: Vec<&str> = definition
            .options
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        let host = Arc::clone(&self.host);
        match definition.kind {
            ResultKind::Command => {
                if options.is_empty() {
                    return Err(ConfigError::MissingOption { index: 0 });
                }
                let commands = options.iter().map(|s| s.to_string()).collect();
                Ok(Box::new(CommandResult::new(host, commands)))
            }
            ResultKind::Message => {
                let message = options
                    .first()
                    .ok_or(ConfigError::MissingOption { index: 0 })?;
                Ok(Box::new(MessageResult::new(host, message.to_string())))
            }
            ResultKind::RankChange => match options.as_slice() {
                [to] => Ok(Box::new(RankChangeResult::new(host, None, to.to_string()))),
                [from, to, ..] => Ok(Box::new(RankChangeResult::new(
                    host,
                    Some(from.to_string()),
                    to.to_string(),
                ))),
                [] => Err(ConfigError::MissingOption { index: 0 }),
            },
        }
    }

    /// Builds every result in order, failing on the first invalid one.
    pub fn build_all(
        &self,
        definitions: &[ResultDefinition],
    ) -> Result<Vec<Box<dyn ResultAction>>, ConfigError> {
        definitions.iter().map(|d| self.build(d)).collect()
    }
}
