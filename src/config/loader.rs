use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::config::types::PersistedConfig;

/// Errors that can occur when reading or writing `tilt_config.json`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file '{}': {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config for '{}': {source}", path.display())]
    SerializeError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: expected a JSON object of flag name to list of values", path.display())]
    InvalidShape { path: PathBuf },

    #[error("{}: specified unknown flag name '{name}'", path.display())]
    UnknownFlag { path: PathBuf, name: String },

    #[error("{}: specified invalid value for flag {name}: expected {expected}", path.display())]
    InvalidValue {
        path: PathBuf,
        name: String,
        expected: &'static str,
    },
}

impl PersistedConfig {
    /// Parses and validates config file contents.
    ///
    /// Empty (or whitespace-only) contents yield an empty config. Every key
    /// must satisfy `is_defined` and every value must be an array of strings.
    pub fn parse(
        path: &Path,
        content: &str,
        is_defined: impl Fn(&str) -> bool,
    ) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let root: Value = serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let Value::Object(entries) = root else {
            return Err(ConfigError::InvalidShape {
                path: path.to_path_buf(),
            });
        };

        let mut values = BTreeMap::new();
        for (name, value) in entries {
            if !is_defined(name.as_str()) {
                return Err(ConfigError::UnknownFlag {
                    path: path.to_path_buf(),
                    name,
                });
            }

            let invalid = |expected: &'static str| ConfigError::InvalidValue {
                path: path.to_path_buf(),
                name: name.clone(),
                expected,
            };

            let Value::Array(items) = value else {
                return Err(invalid("array"));
            };
            let strings = items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(invalid("array of strings")),
                })
                .collect::<Result<Vec<_>, _>>()?;

            values.insert(name, strings);
        }

        Ok(Self { values })
    }

    /// Renders the config as the contents of the file at `path`: pretty JSON,
    /// trailing newline.
    pub fn to_file_contents(&self, path: &Path) -> Result<String, ConfigError> {
        let mut out =
            serde_json::to_string_pretty(&self.values).map_err(|e| ConfigError::SerializeError {
                path: path.to_path_buf(),
                source: e,
            })?;
        out.push('\n');
        Ok(out)
    }
}
