//! Package descriptors and kinds

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a package is a game system or a module
///
/// The kind decides the manifest file name, the cache subtree and the
/// installed subtree under the Foundry data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    System,
    Module,
}

impl PackageKind {
    /// Lower-cased kind, e.g. `system`
    pub fn as_str(self) -> &'static str {
        match self {
            PackageKind::System => "system",
            PackageKind::Module => "module",
        }
    }

    /// Directory name used under `.cache/` and `Data/`
    pub fn plural(self) -> &'static str {
        match self {
            PackageKind::System => "systems",
            PackageKind::Module => "modules",
        }
    }

    /// Manifest file at the payload root, e.g. `module.json`
    pub fn manifest_file(self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable version of a system or module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Display name of the system or module
    pub name: String,
    /// Human version label from the catalog
    pub version: String,
    /// Archive url
    pub url: String,
}

impl PackageDescriptor {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            url: url.into(),
        }
    }

    /// Label used as a prefix in progress output and errors
    pub fn label(&self) -> String {
        format!("\"{} - {}\"", self.name, self.version)
    }
}
