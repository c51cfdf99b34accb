//! Declarative path definitions produced by configuration loaders.
//!
//! Definitions are plain data. The runtime's path builder turns them into
//! configured requirements and results, assigning requirement ids.

/// Kind of action a result performs.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResultKind {
    /// Dispatch a console command.
    Command,
    /// Send a message to the actor.
    Message,
    /// Move the actor to another rank group.
    RankChange,
}

/// A result as written in configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultDefinition {
    pub kind: ResultKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<String>,
}

/// A requirement as written in configuration.
///
/// `kind` stays a string so unknown kinds surface as configuration warnings
/// instead of failing the whole file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequirementDefinition {
    pub kind: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub optional: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub auto_complete: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub world: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub results: Vec<ResultDefinition>,
}

impl RequirementDefinition {
    pub fn new(kind: impl Into<String>, options: &[&str]) -> Self {
        Self {
            kind: kind.into(),
            options: options.iter().map(|s| s.to_string()).collect(),
            optional: false,
            auto_complete: false,
            world: None,
            results: Vec::new(),
        }
    }
}

/// A progression path: the requirements gating one rank step and the
/// results executed once it is completed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathDefinition {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_name: Option<String>,
    pub requirements: Vec<RequirementDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub results: Vec<ResultDefinition>,
}

impl PathDefinition {
    /// Name shown to players; falls back to the internal name.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}
