//! Identifiers for external stat providers ("dependency hooks").

/// External plugin a requirement can read per-actor facts from.
///
/// `Display` yields the provider's plugin name as operators know it;
/// parsing accepts it case-insensitively.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(ascii_case_insensitive)]
pub enum HookId {
    /// Skyblock island levels.
    #[strum(to_string = "uSkyBlock")]
    USkyBlock,
    /// Faction membership and power.
    #[strum(to_string = "Factions")]
    Factions,
    /// Economy balances.
    #[strum(to_string = "Vault")]
    Vault,
    /// Skill power levels.
    #[strum(to_string = "mcMMO")]
    McMmo,
}

/// How a requirement obtains its hook handle.
///
/// Library hooks are probed explicitly for availability before use; dependency
/// handlers come from a capability registry and are trusted once present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum HookAccess {
    Library,
    Handler,
}
