//! The `flags` namespace exposed to Tiltfiles.
//!
//! ```python
//! flags.define_string_list('resources', args=True, usage='which resources to load')
//! cfg = flags.parse()
//! flags.set_resources(cfg['resources'])
//! ```
//!
//! One [`FlagsExtension`] serves one execution; everything it learns is
//! handed to the [`ExecResult`] as [`FlagsSettings`] when the execution ends.

use chrono::Utc;

use crate::config::{ConfigStore, FlagsState};
use crate::flags::pipeline::parse_flags;
use crate::flags::registry::FlagRegistry;
use crate::flags::selector::ResourceSelection;
use crate::model::Manifest;
use crate::script::{CallArgs, CallContext, CallError, ExecResult, Extension, Value};

pub const NAMESPACE: &str = "flags";

const DEFINE_STRING_LIST: &str = "define_string_list";
const PARSE: &str = "parse";
const SET_RESOURCES: &str = "set_resources";

/// Per-execution flags context.
#[derive(Debug)]
pub struct FlagsExtension {
    args: Vec<String>,
    state: FlagsState,
    registry: FlagRegistry,
    selection: ResourceSelection,
}

impl FlagsExtension {
    /// `args` are the raw command-line args (no program name); `state` is
    /// the host's flags state from the previous execution.
    pub fn new(args: Vec<String>, state: FlagsState) -> Self {
        Self {
            args,
            state,
            registry: FlagRegistry::new(),
            selection: ResourceSelection::new(),
        }
    }

    fn define_string_list(&mut self, args: CallArgs) -> Result<Value, CallError> {
        let bound = args.bind(
            "flags.define_string_list",
            &["name", "args", "usage"],
        )?;
        let name = bound.required_str(0)?;
        let positional = bound.optional_bool(1, false)?;
        let usage = bound.optional_str(2, "")?;

        self.registry
            .define(&name, positional, &usage)
            .map_err(CallError::extension)?;
        Ok(Value::None)
    }

    fn parse(&mut self, ctx: &mut CallContext<'_>, args: CallArgs) -> Result<Value, CallError> {
        args.bind("flags.parse", &[])?;

        self.selection.mark_parse_invoked();
        self.registry.freeze();

        let store = ConfigStore::in_dir(ctx.script_dir());
        match parse_flags(&self.args, &self.registry, &store, &mut self.state, Utc::now()) {
            Ok(values) => Ok(values.to_value()),
            Err(err) => {
                if err.shows_usage() {
                    ctx.print(&self.registry.usage_text());
                }
                Err(CallError::extension(err))
            }
        }
    }

    fn set_resources(&mut self, args: CallArgs) -> Result<Value, CallError> {
        let names = args
            .bind("flags.set_resources", &["names"])?
            .required_string_list(0)?;
        tracing::debug!(resources = ?names, "Resources set by Tiltfile");
        self.selection.set_explicit(names);
        Ok(Value::None)
    }
}

impl Extension for FlagsExtension {
    fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    fn call(
        &mut self,
        ctx: &mut CallContext<'_>,
        function: &str,
        args: CallArgs,
    ) -> Result<Value, CallError> {
        match function {
            DEFINE_STRING_LIST => self.define_string_list(args),
            PARSE => self.parse(ctx, args),
            SET_RESOURCES => self.set_resources(args),
            _ => Err(CallError::UnknownFunction {
                name: format!("{NAMESPACE}.{function}"),
            }),
        }
    }

    fn finish(self: Box<Self>, result: &mut ExecResult) {
        result.insert_state(FlagsSettings {
            flags_state: self.state,
            selection: self.selection,
        });
    }
}

/// What the flags extension leaves behind after an execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagsSettings {
    /// Host state to carry into the next execution.
    pub flags_state: FlagsState,
    pub selection: ResourceSelection,
}

impl FlagsSettings {
    /// The flags settings of a finished execution.
    pub fn from_result(result: &ExecResult) -> Option<&FlagsSettings> {
        result.state::<FlagsSettings>()
    }

    /// See [`ResourceSelection::resources`].
    pub fn resources(&self, args: &[String], manifests: &[Manifest]) -> Vec<Manifest> {
        self.selection.resources(args, manifests)
    }
}
