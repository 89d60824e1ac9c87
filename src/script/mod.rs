//! The surface a script sandbox exposes to host extensions.
//!
//! Evaluating the script language is not done here. A host drives an
//! execution by calling `namespace.function` entries in the order the script
//! would, printing values, and finally collecting the [`ExecResult`].

mod args;
mod host;
mod value;

pub use args::{BoundArgs, CallArgs, CallError};
pub use host::{CallContext, ExecResult, Extension, ScriptHost};
pub use value::{Value, ValueError};
