//! Package cache for fvm
//!
//! Downloads each system or module archive at most once and keeps the
//! extracted payload under the working directory.
//!
//! ## Cache Structure
//!
//! ```text
//! <workdir>/.cache/
//! ├── systems/
//! │   └── <safe-name>/
//! │       └── <version-key>/
//! │           ├── system.json
//! │           └── <payload contents>
//! └── modules/
//!     └── ...
//! ```
//!
//! The cache key is composed of:
//! - safe name: the package display name with special chars replaced
//! - version key: the archive url without scheme and host
//!
//! A non-empty cache directory is a cache hit. Its contents are not
//! validated; a broken entry has to be removed with `fvm cache clear`.
//! No locking is done, so two fvm processes must not fetch the same
//! package at the same time.

pub mod archive;
pub mod download;
pub mod paths;
pub mod stats;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::common::fs::{copy_dir_recursive, is_non_empty_dir, remove_if_exists};
use crate::domain::{PackageDescriptor, PackageKind};
use crate::error::Result;
use crate::error::fs::failure;
use crate::error::package::manifest_not_found;
use crate::ui::ProgressReporter;

pub use download::{DEFAULT_HEARTBEAT_INTERVAL, Heartbeat, HttpDownloader, PackageDownloader};
pub use paths::{ARCHIVE_FILE, EXTRACT_DIR, cache_entry_path, cache_root};
pub use stats::{CacheStats, cache_stats, clear_all, clear_package, list_cached};

/// Fetches packages into the on-disk cache
pub struct PackageCache {
    root: PathBuf,
    downloader: Box<dyn PackageDownloader>,
    reporter: Arc<dyn ProgressReporter>,
    heartbeat_interval: Duration,
}

impl PackageCache {
    /// Create a cache rooted at `root` (usually `<workdir>/.cache`)
    pub fn new(
        root: impl Into<PathBuf>,
        downloader: Box<dyn PackageDownloader>,
        reporter: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            root: root.into(),
            downloader,
            reporter,
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
        }
    }

    /// Set the interval of the "still downloading" signal
    #[must_use]
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Cache directory of a package, whether or not it is populated
    pub fn entry_path(&self, descriptor: &PackageDescriptor, kind: PackageKind) -> PathBuf {
        cache_entry_path(&self.root, descriptor, kind)
    }

    pub fn is_cached(&self, descriptor: &PackageDescriptor, kind: PackageKind) -> bool {
        is_non_empty_dir(&self.entry_path(descriptor, kind))
    }

    /// Return a directory holding the extracted payload of `descriptor`.
    ///
    /// On a cache hit the directory is returned without any network access.
    /// Otherwise the archive is downloaded, extracted, the payload root (the
    /// folder containing `<kind>.json`) is copied into the cache directory
    /// and the temporary files are removed.
    ///
    /// Errors are prefixed with the package label. A failed fetch may leave
    /// a partially built cache directory behind.
    pub fn ensure_cached(
        &self,
        descriptor: &PackageDescriptor,
        kind: PackageKind,
    ) -> Result<PathBuf> {
        let cache_dir = self.entry_path(descriptor, kind);
        let label = descriptor.label();

        self.reporter.step(&format!("Checking cache for {label}..."));
        if self.is_cached(descriptor, kind) {
            log::debug!("cache hit: {}", cache_dir.display());
            self.reporter.step(&format!("Loaded {label} from cache."));
            return Ok(cache_dir);
        }

        log::debug!("cache miss: {}", cache_dir.display());
        if let Err(e) = self.populate(descriptor, kind, &cache_dir) {
            self.reporter
                .error(&format!("Error downloading and extracting {label}"));
            return Err(e.for_package(label));
        }

        self.reporter.success(&format!("Cached {label}."));
        Ok(cache_dir)
    }

    fn populate(
        &self,
        descriptor: &PackageDescriptor,
        kind: PackageKind,
        cache_dir: &Path,
    ) -> Result<()> {
        let label = descriptor.label();

        self.reporter.step(&format!("Preparing cache for {label}..."));
        fs::create_dir_all(cache_dir)
            .map_err(|e| failure("Failed to create cache directory", cache_dir, &e))?;

        self.reporter.step(&format!(
            "Downloading {kind} zip file from {}...",
            descriptor.url
        ));
        let blob = self.download(&descriptor.url)?;

        self.reporter.step(&format!("Saving {label}..."));
        let archive_path = cache_dir.join(ARCHIVE_FILE);
        fs::write(&archive_path, &blob).map_err(|e| failure("Failed to write", &archive_path, &e))?;
        drop(blob);

        self.reporter.step(&format!("Extracting {label}..."));
        let extract_dir = cache_dir.join(EXTRACT_DIR);
        remove_if_exists(&extract_dir).map_err(|e| failure("Failed to remove", &extract_dir, &e))?;
        fs::create_dir_all(&extract_dir)
            .map_err(|e| failure("Failed to create directory", &extract_dir, &e))?;
        archive::extract_archive(&archive_path, &extract_dir)?;

        self.reporter.step(&format!("Updating cache for {label}..."));
        let manifest_file = kind.manifest_file();
        let manifest = archive::find_manifest(&extract_dir, &manifest_file)
            .ok_or_else(|| manifest_not_found(&manifest_file, &extract_dir))?;
        let payload_root = manifest.parent().unwrap_or(extract_dir.as_path());
        log::debug!("payload root: {}", payload_root.display());

        copy_dir_recursive(payload_root, cache_dir)
            .map_err(|e| failure("Failed to copy payload into", cache_dir, &e))?;

        remove_if_exists(&extract_dir).map_err(|e| failure("Failed to remove", &extract_dir, &e))?;
        remove_if_exists(&archive_path)
            .map_err(|e| failure("Failed to remove", &archive_path, &e))?;

        Ok(())
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        self.reporter.download_started(url);
        let heartbeat = Heartbeat::start(self.heartbeat_interval, Arc::clone(&self.reporter));
        let result = self.downloader.download(url);
        drop(heartbeat);
        self.reporter.download_finished();
        result
    }
}
