//! Flag registry — the flags a Tiltfile has defined so far.

use crate::flags::error::FlagsError;

/// A single flag definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDef {
    /// Name without the leading dash (e.g. "resources").
    pub name: String,
    /// Absorbs bare (non `-name`) command-line tokens.
    pub positional: bool,
    /// Human-readable description for the usage text.
    pub usage: String,
}

impl FlagDef {
    /// Check if this definition is named by `name` (dashes already stripped).
    pub fn matches(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Flags defined by one Tiltfile execution, in definition order.
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    defs: Vec<FlagDef>,
    frozen: bool,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flag.
    ///
    /// # Errors
    /// Fails if the name is empty or taken, if a second positional flag is
    /// defined, or if the registry was frozen by a parse.
    pub fn define(
        &mut self,
        name: &str,
        positional: bool,
        usage: &str,
    ) -> Result<(), FlagsError> {
        if self.frozen {
            return Err(FlagsError::RegistryFrozen {
                name: name.to_string(),
            });
        }
        if name.is_empty() {
            return Err(FlagsError::EmptyFlagName);
        }
        if self.lookup(name).is_some() {
            return Err(FlagsError::DuplicateFlag {
                name: name.to_string(),
            });
        }
        if positional {
            if let Some(existing) = self.positional() {
                return Err(FlagsError::conflicting_positional(&existing.name, name));
            }
        }

        tracing::debug!(flag = %name, positional, "Defined flag");
        self.defs.push(FlagDef {
            name: name.to_string(),
            positional,
            usage: usage.to_string(),
        });
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&FlagDef> {
        self.defs.iter().find(|d| d.matches(name))
    }

    /// The flag absorbing positional args, if any.
    pub fn positional(&self) -> Option<&FlagDef> {
        self.defs.iter().find(|d| d.positional)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlagDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Stop accepting definitions. Called when parsing begins.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Usage text: a `Usage:` header and one line per flag.
    pub fn usage_text(&self) -> String {
        let mut out = String::from("Usage:\n");
        for def in &self.defs {
            let mut line = format!("  -{}", def.name);
            if !def.usage.is_empty() {
                line.push(' ');
                line.push_str(&def.usage);
            }
            if def.positional {
                line.push_str(" (also takes positional args)");
            }
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}
