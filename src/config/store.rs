//! Locked access to `tilt_config.json`.
//!
//! Reads and writes go through an exclusive `fs2` lock on the config file
//! itself, so a read-merge-write from one execution never interleaves with
//! another execution using the same path.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::config::loader::ConfigError;
use crate::config::types::PersistedConfig;
use crate::config::CONFIG_FILE_NAME;

/// Handle on one project's persisted flag config.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store for the Tiltfile directory `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(CONFIG_FILE_NAME))
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate the config. A missing file is an empty config.
    pub fn load(&self, is_defined: impl Fn(&str) -> bool) -> Result<PersistedConfig, ConfigError> {
        if !self.path.exists() {
            return Ok(PersistedConfig::default());
        }

        let file = self.open(false)?;
        self.lock(&file, false)?;
        let result = self
            .read_locked(&file)
            .and_then(|content| PersistedConfig::parse(&self.path, &content, is_defined));
        self.unlock(&file);
        result
    }

    /// Replace the file contents with `config`.
    pub fn save(&self, config: &PersistedConfig) -> Result<(), ConfigError> {
        let file = self.open(true)?;
        self.lock(&file, true)?;
        let result = self.write_locked(&file, config);
        self.unlock(&file);
        result
    }

    /// Read, update, and rewrite the config while holding the lock.
    ///
    /// `update` receives the validated on-disk config and returns the config
    /// to write back. On a load error nothing is written.
    pub fn transaction<F>(
        &self,
        is_defined: impl Fn(&str) -> bool,
        update: F,
    ) -> Result<PersistedConfig, ConfigError>
    where
        F: FnOnce(PersistedConfig) -> PersistedConfig,
    {
        let file = self.open(true)?;
        self.lock(&file, true)?;

        let result = self
            .read_locked(&file)
            .and_then(|content| PersistedConfig::parse(&self.path, &content, is_defined))
            .map(update)
            .and_then(|config| {
                self.write_locked(&file, &config)?;
                Ok(config)
            });

        self.unlock(&file);
        result
    }

    fn open(&self, create: bool) -> Result<File, ConfigError> {
        if create {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| self.io_error(true, e))?;
            }
        }

        OpenOptions::new()
            .read(true)
            .write(create)
            .create(create)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| self.io_error(create, e))
    }

    fn lock(&self, file: &File, write: bool) -> Result<(), ConfigError> {
        FileExt::lock_exclusive(file).map_err(|e| self.io_error(write, e))
    }

    fn unlock(&self, file: &File) {
        if let Err(e) = FileExt::unlock(file) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to unlock config file");
        }
    }

    fn read_locked(&self, mut file: &File) -> Result<String, ConfigError> {
        let mut content = String::new();
        file.seek(SeekFrom::Start(0))
            .and_then(|_| file.read_to_string(&mut content))
            .map_err(|e| self.io_error(false, e))?;
        Ok(content)
    }

    fn write_locked(&self, mut file: &File, config: &PersistedConfig) -> Result<(), ConfigError> {
        let contents = config.to_file_contents(&self.path)?;
        file.set_len(0)
            .and_then(|_| file.seek(SeekFrom::Start(0)))
            .and_then(|_| file.write_all(contents.as_bytes()))
            .and_then(|_| file.sync_data())
            .map_err(|e| self.io_error(true, e))?;

        tracing::debug!(path = %self.path.display(), flags = config.values.len(), "Wrote config file");
        Ok(())
    }

    /// Failures on the write paths (`save`, `transaction`) are write errors,
    /// including opening and locking.
    fn io_error(&self, write: bool, source: std::io::Error) -> ConfigError {
        let path = self.path.clone();
        if write {
            ConfigError::WriteError { path, source }
        } else {
            ConfigError::ReadError { path, source }
        }
    }
}
