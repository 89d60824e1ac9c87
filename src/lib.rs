//! Flag parsing and resource selection for Tiltfile executions.
//!
//! A Tiltfile declares flags through the `flags` host functions, parses the
//! process arguments against them, and may pick which resources to run.
//! Parsed values are persisted to `tilt_config.json` next to the Tiltfile so
//! later runs can reuse them:
//!
//! ```text
//! define_string_list → parse (args + tilt_config.json) → set_resources → Resources
//! ```

pub mod config;
pub mod flags;
pub mod logging;
pub mod model;
pub mod script;
