//! Common test utilities for fvm integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A working directory with a Foundry install and data folder for integration tests
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to the working directory
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new, empty test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Create `foundry/<version>/resources/app/main.js`
    pub fn create_foundry_version(&self, version: &str) {
        self.write_file(
            &format!("foundry/{version}/resources/app/main.js"),
            "console.log('Foundry');\n",
        );
    }

    /// Write `fvm.yaml` with the given catalog section appended
    pub fn write_config(&self, catalog: &str) {
        self.write_file(
            "fvm.yaml",
            &format!("foundryPath: foundry\ndataPath: data\n{catalog}"),
        );
    }

    /// Create a populated cache entry
    pub fn create_cache_entry(&self, kind_plural: &str, name: &str, key: &str, content: &str) {
        self.write_file(
            &format!(".cache/{kind_plural}/{name}/{key}/manifest.json"),
            content,
        );
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// The fvm binary, isolated from the caller's fvm environment
#[allow(deprecated)]
pub fn fvm_cmd() -> Command {
    let mut cmd = Command::cargo_bin("fvm").expect("fvm binary not built");
    cmd.env_remove("FVM_CONFIG")
        .env_remove("FVM_WORKDIR")
        .env_remove("RUST_LOG");
    cmd
}

/// The fvm binary running in `workdir`
pub fn fvm_cmd_in(workdir: &Path) -> Command {
    let mut cmd = fvm_cmd();
    cmd.current_dir(workdir);
    cmd
}
