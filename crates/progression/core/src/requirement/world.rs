//! Requirement satisfied by standing in a given world.

use crate::error::{ConfigError, option_at};
use crate::lang::{LangKey, Localization};

use super::{Checker, Fact, FactSource, RequirementKind};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InWorldChecker {
    world: Option<String>,
}

impl InWorldChecker {
    pub fn world(&self) -> Option<&str> {
        self.world.as_deref()
    }
}

impl Checker for InWorldChecker {
    fn kind(&self) -> RequirementKind {
        RequirementKind::InWorld
    }

    fn parse_options(&mut self, options: &[String]) -> Result<(), ConfigError> {
        let world = option_at(options, 0)?;
        if world.is_empty() {
            return Err(ConfigError::EmptyOption { index: 0 });
        }
        self.world = Some(world.to_string());
        Ok(())
    }

    fn source(&self) -> FactSource {
        FactSource::ActorWorld
    }

    fn check(&self, fact: &Fact) -> bool {
        match (fact, &self.world) {
            (Fact::Text(current), Some(world)) => current == world,
            _ => false,
        }
    }

    fn format_progress(&self, current: Option<&Fact>) -> String {
        let current = match current {
            Some(Fact::Text(world)) => world.as_str(),
            _ => "?",
        };
        format!("{}/{}", current, self.world().unwrap_or("?"))
    }

    fn describe(&self, lang: &dyn Localization) -> String {
        lang.get(LangKey::WorldRequirement, &[self.world().unwrap_or("?")])
    }
}
