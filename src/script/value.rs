//! Script-visible values.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// A value passed to or returned from a host function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    None,
    Bool(bool),
    String(String),
    List(Vec<Value>),
    Dict(BTreeMap<String, Value>),
}

/// Errors from looking up a key in a dict value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("key \"{key}\" not in dict")]
    KeyNotFound { key: String },

    #[error("unhandled index operation {type_name}[string]")]
    NotIndexable { type_name: &'static str },
}

impl Value {
    /// Build a list of strings.
    pub fn string_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(|s| Value::String(s.into())).collect())
    }

    /// Name of the value's type as a script author would see it.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert a list of strings into owned strings.
    ///
    /// Returns `None` if this is not a list or any element is not a string.
    pub fn to_string_list(&self) -> Option<Vec<String>> {
        match self {
            Value::List(items) => items
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => None,
        }
    }

    /// `value[key]`. Fails if the key is absent.
    pub fn index(&self, key: &str) -> Result<&Value, ValueError> {
        match self {
            Value::Dict(map) => map.get(key).ok_or_else(|| ValueError::KeyNotFound {
                key: key.to_string(),
            }),
            other => Err(ValueError::NotIndexable {
                type_name: other.type_name(),
            }),
        }
    }

    /// `value.get(key, default)`. Never fails; non-dicts yield the default.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        match self {
            Value::Dict(map) => map.get(key).cloned().unwrap_or(default),
            _ => default,
        }
    }

    /// Rendering used by `print`: top-level strings are printed raw.
    pub fn to_print_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::String(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Dict(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::string_list(items)
    }
}
