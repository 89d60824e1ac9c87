//! Which resources a run activates.

use std::collections::HashSet;

use crate::model::Manifest;

/// Resource selection made during one Tiltfile execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSelection {
    explicit: Option<Vec<String>>,
    parse_invoked: bool,
}

impl ResourceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// `flags.set_resources(names)`. A later call replaces an earlier one.
    pub fn set_explicit(&mut self, names: Vec<String>) {
        self.explicit = Some(names);
    }

    /// Parsing takes ownership of the command-line args, so they are no
    /// longer read as resource names.
    pub fn mark_parse_invoked(&mut self) {
        self.parse_invoked = true;
    }

    pub fn explicit(&self) -> Option<&[String]> {
        self.explicit.as_deref()
    }

    pub fn parse_invoked(&self) -> bool {
        self.parse_invoked
    }

    /// Select the manifests to run, keeping manifest order.
    ///
    /// 1. Names passed to `set_resources`, if it was called.
    /// 2. Otherwise `args`, if `parse` was never called and `args` is non-empty.
    /// 3. Otherwise every manifest.
    pub fn resources(&self, args: &[String], manifests: &[Manifest]) -> Vec<Manifest> {
        let selectors: &[String] = match &self.explicit {
            Some(names) => names.as_slice(),
            None if !self.parse_invoked && !args.is_empty() => args,
            None => return manifests.to_vec(),
        };

        let wanted: HashSet<&str> = selectors.iter().map(String::as_str).collect();
        for name in &wanted {
            if !manifests.iter().any(|m| m.name.as_str() == *name) {
                tracing::warn!(resource = %name, "No resource found with that name");
            }
        }

        manifests
            .iter()
            .filter(|m| wanted.contains(m.name.as_str()))
            .cloned()
            .collect()
    }
}
