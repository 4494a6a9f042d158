//! Cache statistics and management
//!
//! This module provides functions for listing, removing, and
//! getting statistics about cached packages.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::paths::safe_name;
use crate::domain::PackageKind;
use crate::error::Result;
use crate::error::fs::failure;

const KINDS: [PackageKind; 2] = [PackageKind::System, PackageKind::Module];

/// Cached package information (one `<safe-name>` directory)
#[derive(Debug, Clone)]
pub struct CachedPackage {
    pub kind: PackageKind,
    /// Safe name of the package
    pub name: String,
    /// Version keys cached for it, sorted
    pub versions: Vec<String>,
    /// Total size in bytes
    pub size: u64,
}

impl CachedPackage {
    pub fn formatted_size(&self) -> String {
        format_size(self.size)
    }
}

/// Cache statistics
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached packages (by safe name and kind)
    pub packages: usize,
    /// Number of cached versions
    pub versions: usize,
    /// Total size in bytes
    pub total_size: u64,
}

impl CacheStats {
    pub fn formatted_size(&self) -> String {
        format_size(self.total_size)
    }
}

/// Format a byte count as a human-readable string
pub fn format_size(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let size = bytes as f64;
    if size < 1024.0 {
        format!("{bytes} B")
    } else if size < 1024.0 * 1024.0 {
        format!("{:.1} KB", size / 1024.0)
    } else if size < 1024.0 * 1024.0 * 1024.0 {
        format!("{:.1} MB", size / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", size / (1024.0 * 1024.0 * 1024.0))
    }
}

fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter_map(|e| e.metadata().ok())
        .filter(std::fs::Metadata::is_file)
        .map(|m| m.len())
        .sum()
}

fn subdirectories(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(Vec::new());
    }

    let mut dirs = Vec::new();
    for entry in fs::read_dir(path).map_err(|e| failure("Failed to read", path, &e))? {
        let entry = entry.map_err(|e| failure("Failed to read entry in", path, &e))?;
        if entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// List all cached packages, systems first, each kind sorted by name
pub fn list_cached(cache_root: &Path) -> Result<Vec<CachedPackage>> {
    let mut packages = Vec::new();

    for kind in KINDS {
        for package_dir in subdirectories(&cache_root.join(kind.plural()))? {
            let versions = subdirectories(&package_dir)?
                .iter()
                .map(|p| file_name_of(p))
                .collect();

            packages.push(CachedPackage {
                kind,
                name: file_name_of(&package_dir),
                versions,
                size: dir_size(&package_dir),
            });
        }
    }

    Ok(packages)
}

/// Get cache statistics
pub fn cache_stats(cache_root: &Path) -> Result<CacheStats> {
    let packages = list_cached(cache_root)?;

    Ok(CacheStats {
        packages: packages.len(),
        versions: packages.iter().map(|p| p.versions.len()).sum(),
        total_size: packages.iter().map(|p| p.size).sum(),
    })
}

/// Remove the whole cache tree
pub fn clear_all(cache_root: &Path) -> Result<()> {
    for kind in KINDS {
        let path = cache_root.join(kind.plural());
        if path.exists() {
            fs::remove_dir_all(&path).map_err(|e| failure("Failed to remove", &path, &e))?;
        }
    }
    Ok(())
}

/// Remove every cached package whose safe name matches `name`.
///
/// `name` may be the display name or its safe form. Returns the number of
/// package directories removed.
pub fn clear_package(cache_root: &Path, name: &str) -> Result<usize> {
    let key = safe_name(name);
    let mut removed = 0;
    for kind in KINDS {
        let path = cache_root.join(kind.plural()).join(&key);
        if path.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| failure("Failed to remove", &path, &e))?;
            removed += 1;
        }
    }
    Ok(removed)
}
