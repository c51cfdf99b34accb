//! Localized requirement descriptions.
//!
//! Keys are stable strings (one per requirement kind). Templates carry
//! positional placeholders `{0}`, `{1}`, ... substituted from the arguments.

use std::collections::HashMap;

/// Stable message keys.
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
#[strum(serialize_all = "kebab-case")]
pub enum LangKey {
    #[strum(serialize = "uskyblock-level-requirement")]
    UskyblockLevelRequirement,
    FactionsPowerRequirement,
    MoneyRequirement,
    #[strum(serialize = "mcmmo-power-level-requirement")]
    McmmoPowerLevelRequirement,
    WorldRequirement,
}

impl LangKey {
    /// Built-in English template for this key.
    pub const fn default_template(self) -> &'static str {
        match self {
            Self::UskyblockLevelRequirement => "Have an island level of at least {0}",
            Self::FactionsPowerRequirement => "Have at least {0} faction power",
            Self::MoneyRequirement => "Have a balance of at least {0}",
            Self::McmmoPowerLevelRequirement => "Have a mcMMO power level of at least {0}",
            Self::WorldRequirement => "Be in world '{0}'",
        }
    }
}

/// Formats localized messages.
pub trait Localization: Send + Sync {
    fn get(&self, key: LangKey, args: &[&str]) -> String;
}

/// Template table with built-in defaults and operator overrides.
#[derive(Clone, Debug, Default)]
pub struct LangTable {
    overrides: HashMap<LangKey, String>,
}

impl LangTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the template for `key`.
    pub fn set(&mut self, key: LangKey, template: impl Into<String>) {
        self.overrides.insert(key, template.into());
    }

    pub fn template(&self, key: LangKey) -> &str {
        self.overrides
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_template())
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl Localization for LangTable {
    fn get(&self, key: LangKey, args: &[&str]) -> String {
        substitute(self.template(key), args)
    }
}

/// Replaces `{n}` placeholders with `args[n]`; unknown indices are left as-is.
pub fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (index, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{}}}", index), arg);
    }
    out
}
