//! Installs cached packages into the Foundry data directory
//!
//! A package is installed under `<dataPath>/Data/<systems|modules>/<id>`,
//! where `id` is read from the package's own manifest. Installing is a full
//! replace: any previous folder with the same id is deleted first, so no
//! files of an older version survive.

pub mod manifest;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::common::fs::copy_dir_recursive;
use crate::domain::{PackageDescriptor, PackageKind};
use crate::error::Result;
use crate::error::fs::failure;
use crate::ui::ProgressReporter;

pub use manifest::read_manifest_id;

/// Folder under the data path that holds systems and modules
pub const DATA_DIR: &str = "Data";

/// Copies payloads into the Foundry data directory
pub struct Installer {
    data_path: PathBuf,
    reporter: Arc<dyn ProgressReporter>,
}

impl Installer {
    pub fn new(data_path: impl Into<PathBuf>, reporter: Arc<dyn ProgressReporter>) -> Self {
        Self {
            data_path: data_path.into(),
            reporter,
        }
    }

    /// Install folder for a package id: `<dataPath>/Data/<kind-plural>/<id>`
    pub fn target_dir(&self, kind: PackageKind, id: &str) -> PathBuf {
        self.data_path.join(DATA_DIR).join(kind.plural()).join(id)
    }

    /// Replace the installed copy of a package with `payload_dir`.
    ///
    /// Returns the install folder. Errors are prefixed with the package label.
    pub fn install(
        &self,
        payload_dir: &Path,
        descriptor: &PackageDescriptor,
        kind: PackageKind,
    ) -> Result<PathBuf> {
        let label = descriptor.label();

        match self.apply(payload_dir, kind) {
            Ok(target) => {
                self.reporter.success(&format!("Applied {kind} {label}."));
                Ok(target)
            }
            Err(e) => {
                self.reporter.error(&format!("Error applying {kind} {label}"));
                Err(e.for_package(label))
            }
        }
    }

    fn apply(&self, payload_dir: &Path, kind: PackageKind) -> Result<PathBuf> {
        self.reporter.step(&format!("Loading {kind} id..."));
        let id = read_manifest_id(payload_dir, kind)?;
        let target = self.target_dir(kind, &id);
        log::debug!("installing {} into {}", payload_dir.display(), target.display());

        self.reporter.step(&format!("Checking if old {kind} exists..."));
        if target.exists() {
            self.reporter.step(&format!("Deleting old {kind}..."));
            fs::remove_dir_all(&target).map_err(|e| failure("Failed to remove", &target, &e))?;
        }

        self.reporter.step(&format!("Applying new {kind}..."));
        copy_dir_recursive(payload_dir, &target)
            .map_err(|e| failure("Failed to copy package into", &target, &e))?;

        Ok(target)
    }
}
