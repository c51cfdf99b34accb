//! Configuration errors raised while parsing requirement and result options.
//!
//! Malformed configuration is an expected, recoverable condition: every
//! variant here is reported to the operator and the offending requirement is
//! left out of its path. None of them abort the host.

use crate::hooks::HookId;

/// Reasons a requirement or result rejected its configuration tokens.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing option at position {index}")]
    MissingOption { index: usize },

    #[error("option at position {index} is empty")]
    EmptyOption { index: usize },

    #[error("an invalid number is provided: '{value}'")]
    InvalidNumber { value: String },

    #[error("no number is provided or smaller than 0: '{value}'")]
    NegativeThreshold { value: String },

    #[error("{hook} is not available")]
    HookUnavailable { hook: HookId },

    #[error("unknown requirement type '{0}'")]
    UnknownRequirement(String),

    #[error("unknown result type '{0}'")]
    UnknownResult(String),
}

impl ConfigError {
    /// Returns a static identifier for this error variant (used in logs and tests).
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingOption { .. } => "missing_option",
            Self::EmptyOption { .. } => "empty_option",
            Self::InvalidNumber { .. } => "invalid_number",
            Self::NegativeThreshold { .. } => "negative_threshold",
            Self::HookUnavailable { .. } => "hook_unavailable",
            Self::UnknownRequirement(_) => "unknown_requirement",
            Self::UnknownResult(_) => "unknown_result",
        }
    }
}

/// Returns the option at `index`, or [`ConfigError::MissingOption`].
pub fn option_at(options: &[String], index: usize) -> Result<&str, ConfigError> {
    options
        .get(index)
        .map(|s| s.trim())
        .ok_or(ConfigError::MissingOption { index })
}
