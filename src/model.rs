//! Work items declared by a Tiltfile.

use std::fmt;

/// Name of a declared resource. Unique within one Tiltfile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManifestName(String);

impl ManifestName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ManifestName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ManifestName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ManifestName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A declared work item. Only the name matters for resource selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub name: ManifestName,
}

impl Manifest {
    pub fn new(name: impl Into<ManifestName>) -> Self {
        Self { name: name.into() }
    }
}
