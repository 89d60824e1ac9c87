//! Tiltfile flags: definition, parsing, persistence and resource selection.
//!
//! ```text
//! define_string_list → FlagRegistry
//! parse              → classify → merge with tilt_config.json → FlagValues
//! set_resources      → ResourceSelection → Resources(args, manifests)
//! ```
//!
//! Each stage is a plain function or type that can be unit-tested on its own;
//! [`FlagsExtension`] wires them to the script host.

mod classifier;
mod error;
mod extension;
mod pipeline;
mod registry;
mod selector;
mod values;

pub use classifier::{classify, parse_args, ClassifiedArg, ParsedArgs};
pub use error::FlagsError;
pub use extension::{FlagsExtension, FlagsSettings, NAMESPACE};
pub use pipeline::{merge, parse_flags};
pub use registry::{FlagDef, FlagRegistry};
pub use selector::ResourceSelection;
pub use values::FlagValues;
