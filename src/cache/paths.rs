//! Cache path utilities and constants
//!
//! Cache entries live at `<workdir>/.cache/<kind-plural>/<safe-name>/<version-key>`.

use std::path::{Path, PathBuf};

use crate::domain::{PackageDescriptor, PackageKind};

/// Cache directory name under the working directory
pub const CACHE_DIR: &str = ".cache";

/// Downloaded archive, removed once the payload has been copied
pub const ARCHIVE_FILE: &str = ".fvm-archive.zip";

/// Scratch directory for extraction inside a cache entry
pub const EXTRACT_DIR: &str = ".fvm-extract";

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Replace every char outside `[A-Za-z0-9_-]` with `-`.
///
/// The result has as many chars as the input.
pub fn safe_name(name: &str) -> String {
    name.chars()
        .map(|c| if is_safe_char(c) { c } else { '-' })
        .collect()
}

/// Cache key for an archive url: the path after the host, segments joined with `_`.
///
/// Unlike [`safe_name`], the key alphabet is `[A-Za-z0-9_.-]`: dots are kept
/// so version numbers stay readable
/// (`https://example.com/releases/v1.2.0/pkg.zip` -> `releases_v1.2.0_pkg.zip`).
/// Every other character outside `[A-Za-z0-9_-]` becomes `-`.
/// A key that would be empty or consist only of dots is replaced so it
/// can never name the entry's parent directory.
pub fn version_key_from_url(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = without_scheme.split_once('/').map_or("", |(_, rest)| rest);

    let key: String = path
        .split('/')
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(|c| if is_safe_char(c) || c == '.' { c } else { '-' })
        .collect();

    if key.is_empty() {
        "_".to_string()
    } else if key.chars().all(|c| c == '.') {
        key.replace('.', "-")
    } else {
        key
    }
}

/// `<workdir>/.cache`
pub fn cache_root(workdir: &Path) -> PathBuf {
    workdir.join(CACHE_DIR)
}

/// Cache directory of one package version
pub fn cache_entry_path(
    cache_root: &Path,
    descriptor: &PackageDescriptor,
    kind: PackageKind,
) -> PathBuf {
    cache_root
        .join(kind.plural())
        .join(safe_name(&descriptor.name))
        .join(version_key_from_url(&descriptor.url))
}
