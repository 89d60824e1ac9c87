//! Argument classifier — raw args → flag values.

use std::collections::BTreeMap;

use crate::flags::error::FlagsError;
use crate::flags::registry::FlagRegistry;

/// A classified argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedArg {
    /// A defined flag and the value it took.
    Keyword { flag: String, value: String },
    /// Bare token (not a flag, or anything after `--`).
    Positional(String),
}

/// Classify raw args against the registry.
///
/// Flags are `-name value`, `--name value`, or `-name=value`. The token after
/// a flag is always its value, even if it starts with a dash. `--` ends flag
/// processing and a lone `-` is a bare token.
pub fn classify(raw_args: &[String], registry: &FlagRegistry) -> Result<Vec<ClassifiedArg>, FlagsError> {
    let mut args = Vec::new();
    let mut iter = raw_args.iter();

    while let Some(arg) = iter.next() {
        if arg == "--" {
            args.extend(iter.by_ref().map(|a| ClassifiedArg::Positional(a.clone())));
            break;
        }

        let Some(body) = flag_body(arg) else {
            args.push(ClassifiedArg::Positional(arg.clone()));
            continue;
        };

        if body.is_empty() || body.starts_with('-') || body.starts_with('=') {
            return Err(FlagsError::BadFlagSyntax { token: arg.clone() });
        }

        let (name, inline_value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (body, None),
        };

        let def = registry
            .lookup(name)
            .ok_or_else(|| FlagsError::UnknownFlag {
                name: name.to_string(),
            })?;

        let value = match inline_value {
            Some(value) => value,
            None => iter.next().cloned().ok_or_else(|| FlagsError::MissingValue {
                name: def.name.clone(),
            })?,
        };

        args.push(ClassifiedArg::Keyword {
            flag: def.name.clone(),
            value,
        });
    }

    Ok(args)
}

/// The part of `arg` after its leading dashes, if `arg` is a flag.
fn flag_body(arg: &str) -> Option<&str> {
    if arg.len() < 2 {
        return None;
    }
    let body = arg.strip_prefix('-')?;
    Some(body.strip_prefix('-').unwrap_or(body))
}

/// Flag values gathered from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Flag name → values in encounter order.
    pub values: BTreeMap<String, Vec<String>>,
    /// Bare tokens that no positional flag absorbed.
    pub leftover: Vec<String>,
}

impl ParsedArgs {
    /// Fold classified args into per-flag values.
    ///
    /// Bare tokens go to the registry's positional flag if there is one,
    /// otherwise to `leftover`.
    pub fn from_classified(classified: Vec<ClassifiedArg>, registry: &FlagRegistry) -> Self {
        let positional = registry.positional().map(|d| d.name.clone());
        let mut parsed = ParsedArgs::default();

        for arg in classified {
            match (arg, &positional) {
                (ClassifiedArg::Keyword { flag, value }, _) => {
                    parsed.values.entry(flag).or_default().push(value);
                }
                (ClassifiedArg::Positional(token), Some(flag)) => {
                    parsed.values.entry(flag.clone()).or_default().push(token);
                }
                (ClassifiedArg::Positional(token), None) => parsed.leftover.push(token),
            }
        }

        parsed
    }

    /// Values for `name`, empty if it was not given.
    pub fn get(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Classify and fold, rejecting bare tokens nothing can absorb.
pub fn parse_args(raw_args: &[String], registry: &FlagRegistry) -> Result<ParsedArgs, FlagsError> {
    let parsed = ParsedArgs::from_classified(classify(raw_args, registry)?, registry);
    if !parsed.leftover.is_empty() {
        return Err(FlagsError::UnexpectedPositional);
    }
    Ok(parsed)
}
