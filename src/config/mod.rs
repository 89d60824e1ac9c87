//! Persisted flag configuration (`tilt_config.json`) and host flags state.

mod loader;
mod store;
mod types;

pub use loader::ConfigError;
pub use store::ConfigStore;
pub use types::{FlagsState, PersistedConfig};

/// File name of the persisted flag config, relative to the Tiltfile.
pub const CONFIG_FILE_NAME: &str = "tilt_config.json";
