use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flag values persisted in `tilt_config.json`.
///
/// Serializes as a plain JSON object of flag name → list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PersistedConfig {
    pub values: BTreeMap<String, Vec<String>>,
}

impl PersistedConfig {
    pub fn new(values: BTreeMap<String, Vec<String>>) -> Self {
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Host-side flags state carried between Tiltfile executions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagsState {
    /// When command-line args were last captured into `tilt_config.json`.
    /// `None` means never.
    #[serde(default)]
    pub last_args_write: Option<DateTime<Utc>>,
}

impl FlagsState {
    pub fn new(last_args_write: Option<DateTime<Utc>>) -> Self {
        Self { last_args_write }
    }

    /// Whether this run's args may still be merged into the config file.
    pub fn args_eligible(&self) -> bool {
        self.last_args_write.is_none()
    }

    /// Record the one-time args capture. Returns `true` if this call set it;
    /// an existing marker is left untouched.
    pub fn record_args_write(&mut self, now: DateTime<Utc>) -> bool {
        if self.last_args_write.is_some() {
            return false;
        }
        self.last_args_write = Some(now);
        true
    }
}
