//! Polymorphic requirement conditions.
//!
//! A [`Checker`] holds the variant-specific half of a requirement: it parses
//! its own options, declares where its fact comes from, compares a fetched
//! fact and renders progress and descriptions. Everything shared between
//! variants (ids, world scope, completion short-circuit, hook resolution)
//! lives in the runtime's `Requirement`, so no variant can skip it.

mod threshold;
mod world;

use core::fmt;

pub use threshold::{ThresholdChecker, ThresholdProfile};
pub use world::InWorldChecker;

use crate::error::ConfigError;
use crate::hooks::{HookAccess, HookId};
use crate::lang::Localization;

/// A fetched per-actor fact.
#[derive(Clone, Debug, PartialEq)]
pub enum Fact {
    Number(f64),
    Text(String),
}

/// Where a checker's fact is read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FactSource {
    /// Query an external hook with the actor's stable id.
    Hook { hook: HookId, access: HookAccess },
    /// Read the actor's live world from the session.
    ActorWorld,
}

/// Requirement kinds known to the loader, by configuration name.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RequirementKind {
    IslandLevel,
    FactionPower,
    Money,
    McmmoPowerLevel,
    InWorld,
}

impl RequirementKind {
    /// Creates an unconfigured checker for this kind.
    pub fn checker(self) -> Box<dyn Checker> {
        match self {
            Self::IslandLevel => Box::new(ThresholdChecker::new(ThresholdProfile::ISLAND_LEVEL)),
            Self::FactionPower => Box::new(ThresholdChecker::new(ThresholdProfile::FACTION_POWER)),
            Self::Money => Box::new(ThresholdChecker::new(ThresholdProfile::MONEY)),
            Self::McmmoPowerLevel => {
                Box::new(ThresholdChecker::new(ThresholdProfile::MCMMO_POWER_LEVEL))
            }
            Self::InWorld => Box::new(InWorldChecker::default()),
        }
    }
}

/// Variant-specific behaviour of a requirement.
pub trait Checker: Send + Sync + fmt::Debug {
    fn kind(&self) -> RequirementKind;

    /// Parses and validates configuration tokens. Position 0 is the primary value.
    fn parse_options(&mut self, options: &[String]) -> Result<(), ConfigError>;

    fn source(&self) -> FactSource;

    /// Returns true when `fact` satisfies the condition.
    fn check(&self, fact: &Fact) -> bool;

    /// Renders `"<current>/<target>"`; `None` means the fact could not be fetched.
    fn format_progress(&self, current: Option<&Fact>) -> String;

    /// Localized description without world annotation.
    fn describe(&self, lang: &dyn Localization) -> String;
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_kind_builds_a_matching_checker() {
        for kind in RequirementKind::iter() {
            assert_eq!(kind.checker().kind(), kind);
        }
    }

    #[test]
    fn kinds_parse_from_config_names() {
        assert_eq!(
            RequirementKind::from_str("island_level"),
            Ok(RequirementKind::IslandLevel)
        );
        assert_eq!(
            RequirementKind::from_str("Faction_Power"),
            Ok(RequirementKind::FactionPower)
        );
        assert!(RequirementKind::from_str("time").is_err());
    }
}
