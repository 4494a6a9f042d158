//! Catalog of installable systems and modules, and installed Foundry versions

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{PackageDescriptor, PackageKind};
use crate::error::config::missing;
use crate::error::{FvmError, Result};

/// A configured system or module with its downloadable versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name, shown in prompts and used for the cache folder
    pub name: String,

    #[serde(default)]
    pub versions: Vec<CatalogVersion>,
}

/// One downloadable version of a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogVersion {
    /// Version label shown to the user
    pub name: String,
    /// Url of the zip archive
    pub url: String,
}

impl CatalogEntry {
    /// A descriptor per configured version, in configuration order
    pub fn descriptors(&self) -> Vec<PackageDescriptor> {
        self.versions
            .iter()
            .map(|v| PackageDescriptor::new(&self.name, &v.name, &v.url))
            .collect()
    }
}

/// Versions of the catalog entry called `name`
pub fn package_versions(
    entries: &[CatalogEntry],
    kind: PackageKind,
    name: &str,
) -> Result<Vec<PackageDescriptor>> {
    entries
        .iter()
        .find(|entry| entry.name == name)
        .map(CatalogEntry::descriptors)
        .ok_or_else(|| FvmError::UnknownPackage {
            kind: kind.to_string(),
            name: name.to_string(),
        })
}

/// Installed Foundry versions: folders under `foundry_path` starting with `v`
///
/// Sorted by their numeric parts, so `v9` comes before `v10`.
pub fn host_versions(foundry_path: &Path) -> Result<Vec<String>> {
    let not_found = || {
        missing(format!(
            "Could not find any Foundry versions under '{}'",
            foundry_path.display()
        ))
    };

    let entries = fs::read_dir(foundry_path).map_err(|e| {
        log::debug!("reading {}: {e}", foundry_path.display());
        not_found()
    })?;

    let mut versions: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with('v'))
        .collect();

    if versions.is_empty() {
        return Err(not_found());
    }

    versions.sort_by(|a, b| {
        numeric_parts(a)
            .cmp(&numeric_parts(b))
            .then_with(|| a.cmp(b))
    });
    Ok(versions)
}

fn numeric_parts(name: &str) -> Vec<u64> {
    name.split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
        .collect()
}
