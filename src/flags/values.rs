use std::collections::BTreeMap;

use crate::script::Value;

/// Final flag values after merging args with `tilt_config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagValues(BTreeMap<String, Vec<String>>);

impl FlagValues {
    pub fn new(values: BTreeMap<String, Vec<String>>) -> Self {
        Self(values)
    }

    /// Values for `name`; empty when the flag has no value.
    pub fn get(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Values for `name`, or `default` when the flag has no entry.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a [String]) -> &'a [String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or(default)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The dict handed back to the script.
    pub fn to_value(&self) -> Value {
        Value::Dict(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), Value::string_list(v.iter().cloned())))
                .collect(),
        )
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl From<BTreeMap<String, Vec<String>>> for FlagValues {
    fn from(values: BTreeMap<String, Vec<String>>) -> Self {
        Self(values)
    }
}
