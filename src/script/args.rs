//! Host function arguments and binding them to parameters.

use std::error::Error as StdError;

use thiserror::Error;

use super::value::Value;

/// Errors raised while dispatching a host function call.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("no such function: {name}")]
    UnknownFunction { name: String },

    #[error("{function}: missing argument for {param}")]
    MissingArgument {
        function: String,
        param: &'static str,
    },

    #[error("{function}: unexpected keyword argument \"{name}\"")]
    UnexpectedKeyword { function: String, name: String },

    #[error("{function}: got {got} arguments, want at most {max}")]
    TooManyArguments {
        function: String,
        got: usize,
        max: usize,
    },

    #[error("{function}: got multiple values for parameter \"{param}\"")]
    DuplicateArgument {
        function: String,
        param: &'static str,
    },

    #[error("{function}: for parameter {param}: got {got}, want {want}")]
    WrongType {
        function: String,
        param: &'static str,
        got: &'static str,
        want: &'static str,
    },

    /// Failure reported by the extension itself.
    #[error("{0}")]
    Extension(Box<dyn StdError + Send + Sync>),
}

impl CallError {
    /// Wrap an extension error, keeping its message as-is.
    pub fn extension<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        CallError::Extension(Box::new(err))
    }

    /// The extension error, if this failure came from one of type `E`.
    pub fn extension_error<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        match self {
            CallError::Extension(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Positional and keyword arguments of one host call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallArgs {
    positional: Vec<Value>,
    keyword: Vec<(String, Value)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Append a keyword argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.push((name.into(), value.into()));
        self
    }

    /// Bind arguments to the named parameters of `function`.
    ///
    /// Positional arguments fill parameters in order; keyword arguments fill
    /// them by name. Each parameter may be bound at most once.
    pub fn bind(
        self,
        function: &str,
        params: &'static [&'static str],
    ) -> Result<BoundArgs, CallError> {
        if self.positional.len() > params.len() {
            return Err(CallError::TooManyArguments {
                function: function.to_string(),
                got: self.positional.len(),
                max: params.len(),
            });
        }

        let mut slots: Vec<Option<Value>> = vec![None; params.len()];
        for (slot, value) in slots.iter_mut().zip(self.positional) {
            *slot = Some(value);
        }

        for (name, value) in self.keyword {
            let idx = params.iter().position(|p| *p == name).ok_or_else(|| {
                CallError::UnexpectedKeyword {
                    function: function.to_string(),
                    name: name.clone(),
                }
            })?;
            if slots[idx].is_some() {
                return Err(CallError::DuplicateArgument {
                    function: function.to_string(),
                    param: params[idx],
                });
            }
            slots[idx] = Some(value);
        }

        Ok(BoundArgs {
            function: function.to_string(),
            params,
            slots,
        })
    }
}

/// Arguments bound to parameter slots, with typed accessors.
#[derive(Debug)]
pub struct BoundArgs {
    function: String,
    params: &'static [&'static str],
    slots: Vec<Option<Value>>,
}

impl BoundArgs {
    pub fn required_str(&self, idx: usize) -> Result<String, CallError> {
        match self.slot(idx) {
            Some(value) => self.expect_str(idx, value),
            None => Err(self.missing(idx)),
        }
    }

    pub fn optional_str(&self, idx: usize, default: &str) -> Result<String, CallError> {
        match self.slot(idx) {
            Some(value) => self.expect_str(idx, value),
            None => Ok(default.to_string()),
        }
    }

    pub fn optional_bool(&self, idx: usize, default: bool) -> Result<bool, CallError> {
        match self.slot(idx) {
            Some(value) => value
                .as_bool()
                .ok_or_else(|| self.wrong_type(idx, value, "bool")),
            None => Ok(default),
        }
    }

    pub fn required_string_list(&self, idx: usize) -> Result<Vec<String>, CallError> {
        match self.slot(idx) {
            Some(value) => value
                .to_string_list()
                .ok_or_else(|| self.wrong_type(idx, value, "list of strings")),
            None => Err(self.missing(idx)),
        }
    }

    fn slot(&self, idx: usize) -> Option<&Value> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn expect_str(&self, idx: usize, value: &Value) -> Result<String, CallError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.wrong_type(idx, value, "string"))
    }

    fn missing(&self, idx: usize) -> CallError {
        CallError::MissingArgument {
            function: self.function.clone(),
            param: self.params[idx],
        }
    }

    fn wrong_type(&self, idx: usize, value: &Value, want: &'static str) -> CallError {
        CallError::WrongType {
            function: self.function.clone(),
            param: self.params[idx],
            got: value.type_name(),
            want,
        }
    }
}
