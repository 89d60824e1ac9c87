//! Host side of a script execution.
//!
//! The host owns the registered extensions for one execution, routes
//! `namespace.function` calls to them, and captures everything printed.
//! When the execution ends each extension hands its state to the
//! [`ExecResult`].

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::args::{CallArgs, CallError};
use super::value::Value;

/// A group of host functions exposed under one namespace.
pub trait Extension {
    /// Namespace the functions live under, e.g. `flags`.
    fn namespace(&self) -> &'static str;

    /// Run `function` with `args`.
    fn call(
        &mut self,
        ctx: &mut CallContext<'_>,
        function: &str,
        args: CallArgs,
    ) -> Result<Value, CallError>;

    /// Move per-execution state into the result.
    fn finish(self: Box<Self>, result: &mut ExecResult);
}

/// What a host function can see of the running script.
pub struct CallContext<'a> {
    script_path: &'a Path,
    output: &'a mut Vec<String>,
}

impl CallContext<'_> {
    pub fn script_path(&self) -> &Path {
        self.script_path
    }

    /// Directory containing the script; relative files resolve against it.
    pub fn script_dir(&self) -> &Path {
        self.script_path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Print text to the script's output, one captured line per `\n`.
    pub fn print(&mut self, text: &str) {
        push_lines(self.output, text);
    }
}

/// One script execution.
pub struct ScriptHost {
    script_path: PathBuf,
    extensions: Vec<Box<dyn Extension>>,
    output: Vec<String>,
}

impl ScriptHost {
    pub fn new(script_path: impl Into<PathBuf>) -> Self {
        Self {
            script_path: script_path.into(),
            extensions: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Register an extension for this execution.
    pub fn with_extension(mut self, extension: impl Extension + 'static) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    /// Call `namespace.function`.
    pub fn call(&mut self, name: &str, args: CallArgs) -> Result<Value, CallError> {
        let (namespace, function) =
            name.split_once('.')
                .ok_or_else(|| CallError::UnknownFunction {
                    name: name.to_string(),
                })?;

        let extension = self
            .extensions
            .iter_mut()
            .find(|e| e.namespace() == namespace)
            .ok_or_else(|| CallError::UnknownFunction {
                name: name.to_string(),
            })?;

        tracing::debug!(function = %name, "host call");

        let mut ctx = CallContext {
            script_path: &self.script_path,
            output: &mut self.output,
        };
        extension.call(&mut ctx, function, args)
    }

    /// `print(values...)`: renderings joined by a space.
    pub fn print(&mut self, values: &[Value]) {
        let line = values
            .iter()
            .map(Value::to_print_string)
            .collect::<Vec<_>>()
            .join(" ");
        push_lines(&mut self.output, &line);
    }

    /// End the execution and collect extension state.
    pub fn finish(self) -> ExecResult {
        let mut result = ExecResult {
            output: self.output,
            state: HashMap::new(),
        };
        for extension in self.extensions {
            extension.finish(&mut result);
        }
        result
    }
}

/// Output and extension state of a finished execution.
pub struct ExecResult {
    output: Vec<String>,
    state: HashMap<TypeId, Box<dyn Any>>,
}

impl ExecResult {
    /// Captured print output, in order.
    pub fn lines(&self) -> &[String] {
        &self.output
    }

    /// Captured print output joined with newlines.
    pub fn output(&self) -> String {
        self.output.join("\n")
    }

    /// Store extension state, replacing any previous value of the same type.
    pub fn insert_state<T: Any>(&mut self, state: T) {
        self.state.insert(TypeId::of::<T>(), Box::new(state));
    }

    pub fn state<T: Any>(&self) -> Option<&T> {
        self.state
            .get(&TypeId::of::<T>())
            .and_then(|s| s.downcast_ref::<T>())
    }
}

fn push_lines(output: &mut Vec<String>, text: &str) {
    output.extend(text.lines().map(str::to_string));
    if text.is_empty() {
        output.push(String::new());
    }
}
