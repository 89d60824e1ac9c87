//! Pipeline — ties command-line parsing and the config file together.
//!
//! ```text
//! raw args → classify → ParsedArgs ─┐
//!                                    ├→ merge → tilt_config.json → FlagValues
//!         tilt_config.json (locked) ─┘
//! ```
//!
//! Args are merged into the config file only until the host records an args
//! write (`FlagsState::last_args_write`). After that the config file is
//! authoritative and args are ignored.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::config::{ConfigStore, FlagsState, PersistedConfig};
use crate::flags::classifier::{parse_args, ParsedArgs};
use crate::flags::error::FlagsError;
use crate::flags::registry::FlagRegistry;
use crate::flags::values::FlagValues;

/// Combine parsed args with the persisted config.
///
/// When `args_eligible`, every flag given on the command line replaces the
/// persisted value; flags not given keep it. Otherwise the persisted config
/// is returned unchanged.
pub fn merge(parsed: &ParsedArgs, persisted: PersistedConfig, args_eligible: bool) -> PersistedConfig {
    if !args_eligible {
        return persisted;
    }

    let mut values: BTreeMap<String, Vec<String>> = persisted.values;
    for (name, args) in &parsed.values {
        if !args.is_empty() {
            values.insert(name.clone(), args.clone());
        }
    }
    PersistedConfig::new(values)
}

/// Run a full parse: args, then the locked read-merge-write of the config.
///
/// On success `state` records the args write if it had not yet happened.
/// On failure neither the config file nor `state` is changed.
pub fn parse_flags(
    raw_args: &[String],
    registry: &FlagRegistry,
    store: &ConfigStore,
    state: &mut FlagsState,
    now: DateTime<Utc>,
) -> Result<FlagValues, FlagsError> {
    let parsed = parse_args(raw_args, registry)?;
    let eligible = state.args_eligible();

    if !eligible && !parsed.values.is_empty() {
        tracing::debug!(
            last_args_write = ?state.last_args_write,
            "Ignoring command-line flags; config file already captured args"
        );
    }

    let written = store.transaction(
        |name| registry.lookup(name).is_some(),
        |persisted| merge(&parsed, persisted, eligible),
    )?;

    if state.record_args_write(now) {
        tracing::info!(
            path = %store.path().display(),
            flags = written.values.len(),
            "Captured command-line flags into config file"
        );
    }

    Ok(FlagValues::new(written.values))
}
