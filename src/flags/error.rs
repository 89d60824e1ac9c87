use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by the `flags` host functions.
#[derive(Debug, Error)]
pub enum FlagsError {
    // === Definition errors ===
    #[error("flag name must not be empty")]
    EmptyFlagName,

    #[error("{name} defined multiple times")]
    DuplicateFlag { name: String },

    /// Names are stored in lexicographic order.
    #[error("both {first} and {second} are defined as positional args")]
    ConflictingPositional { first: String, second: String },

    #[error("cannot define flag {name} after flags have been parsed")]
    RegistryFrozen { name: String },

    // === Command-line errors ===
    #[error("flag provided but not defined: -{name}")]
    UnknownFlag { name: String },

    #[error("flag needs an argument: -{name}")]
    MissingValue { name: String },

    #[error("bad flag syntax: {token}")]
    BadFlagSyntax { token: String },

    #[error("positional args were specified, but none were expected (no arg defined with args=True)")]
    UnexpectedPositional,

    // === Config file errors ===
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl FlagsError {
    /// Build a positional conflict, ordering the two names.
    pub fn conflicting_positional(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        FlagsError::ConflictingPositional {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    /// Whether this error came from the command line, in which case the
    /// usage text is shown alongside it.
    pub fn shows_usage(&self) -> bool {
        matches!(
            self,
            FlagsError::UnknownFlag { .. }
                | FlagsError::MissingValue { .. }
                | FlagsError::BadFlagSyntax { .. }
                | FlagsError::UnexpectedPositional
        )
    }
}
