//! Numeric threshold requirements backed by an external hook.

use crate::error::{ConfigError, option_at};
use crate::hooks::{HookAccess, HookId};
use crate::lang::{LangKey, Localization};
use crate::progress::NumericUnit;

use super::{Checker, Fact, FactSource, RequirementKind};

/// Static description of one threshold variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdProfile {
    pub kind: RequirementKind,
    pub hook: HookId,
    pub access: HookAccess,
    pub unit: NumericUnit,
    pub lang_key: LangKey,
}

impl ThresholdProfile {
    pub const ISLAND_LEVEL: Self = Self {
        kind: RequirementKind::IslandLevel,
        hook: HookId::USkyBlock,
        access: HookAccess::Library,
        unit: NumericUnit::Integral,
        lang_key: LangKey::UskyblockLevelRequirement,
    };

    pub const FACTION_POWER: Self = Self {
        kind: RequirementKind::FactionPower,
        hook: HookId::Factions,
        access: HookAccess::Handler,
        unit: NumericUnit::Fractional,
        lang_key: LangKey::FactionsPowerRequirement,
    };

    pub const MONEY: Self = Self {
        kind: RequirementKind::Money,
        hook: HookId::Vault,
        access: HookAccess::Handler,
        unit: NumericUnit::Fractional,
        lang_key: LangKey::MoneyRequirement,
    };

    pub const MCMMO_POWER_LEVEL: Self = Self {
        kind: RequirementKind::McmmoPowerLevel,
        hook: HookId::McMmo,
        access: HookAccess::Library,
        unit: NumericUnit::Integral,
        lang_key: LangKey::McmmoPowerLevelRequirement,
    };
}

/// `fact >= threshold`, inclusive.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdChecker {
    profile: ThresholdProfile,
    threshold: Option<f64>,
}

impl ThresholdChecker {
    pub const fn new(profile: ThresholdProfile) -> Self {
        Self {
            profile,
            threshold: None,
        }
    }

    pub const fn profile(&self) -> &ThresholdProfile {
        &self.profile
    }

    /// The parsed threshold, once options have been accepted.
    pub const fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    fn rendered_threshold(&self) -> String {
        self.threshold
            .map(|t| self.profile.unit.render_threshold(t))
            .unwrap_or_else(|| "?".to_string())
    }
}

impl Checker for ThresholdChecker {
    fn kind(&self) -> RequirementKind {
        self.profile.kind
    }

    fn parse_options(&mut self, options: &[String]) -> Result<(), ConfigError> {
        let raw = option_at(options, 0)?;
        let value = self.profile.unit.parse(raw)?;

        if value < 0.0 {
            return Err(ConfigError::NegativeThreshold {
                value: raw.to_string(),
            });
        }

        self.threshold = Some(value);
        Ok(())
    }

    fn source(&self) -> FactSource {
        FactSource::Hook {
            hook: self.profile.hook,
            access: self.profile.access,
        }
    }

    fn check(&self, fact: &Fact) -> bool {
        match (fact, self.threshold) {
            (Fact::Number(value), Some(threshold)) => *value >= threshold,
            _ => false,
        }
    }

    fn format_progress(&self, current: Option<&Fact>) -> String {
        let current = match current {
            Some(Fact::Number(value)) => self.profile.unit.render_value(*value),
            _ => "?".to_string(),
        };
        format!("{}/{}", current, self.rendered_threshold())
    }

    fn describe(&self, lang: &dyn Localization) -> String {
        lang.get(self.profile.lang_key, &[&self.rendered_threshold()])
    }
}
