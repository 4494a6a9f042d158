//! Error types and handling for fvm
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Constructors for the pipeline errors live in sub-modules by area:
//! - [`config`]: configuration and catalog errors
//! - [`fs`]: file system errors
//! - [`package`]: download, archive and manifest errors

pub mod config;
pub mod fs;
pub mod package;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for fvm operations
#[derive(Error, Diagnostic, Debug)]
pub enum FvmError {
    // Configuration errors
    #[error("{message}")]
    #[diagnostic(
        code(fvm::config::missing),
        help("Check `foundryPath` and `dataPath` in your fvm.yaml or config.json")
    )]
    ConfigurationMissing { message: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(fvm::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(fvm::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(fvm::config::invalid))]
    ConfigInvalid { message: String },

    #[error("No {kind} named '{name}' is configured")]
    #[diagnostic(
        code(fvm::config::unknown_package),
        help("Run 'fvm list' to see the configured systems and modules")
    )]
    UnknownPackage { kind: String, name: String },

    // Package errors
    #[error("{file} not found in {path}")]
    #[diagnostic(
        code(fvm::package::manifest_not_found),
        help("The archive does not look like a Foundry system or module")
    )]
    ManifestNotFound { file: String, path: String },

    #[error("Could not read manifest {path}: {reason}")]
    #[diagnostic(code(fvm::package::manifest_unreadable))]
    ManifestUnreadable { path: String, reason: String },

    #[error("Download of {url} failed: {reason}")]
    #[diagnostic(
        code(fvm::package::network_failure),
        help("Check your network connection and the url in the configuration")
    )]
    NetworkFailure { url: String, reason: String },

    #[error("Failed to extract archive {path}: {reason}")]
    #[diagnostic(code(fvm::package::archive_failed))]
    ArchiveFailed { path: String, reason: String },

    /// Any pipeline error, prefixed with the package it happened for
    #[error("{package}: {source}")]
    #[diagnostic(code(fvm::package::failed))]
    Package {
        package: String,
        #[source]
        source: Box<FvmError>,
    },

    // File system errors
    #[error("{operation} {path}: {reason}")]
    #[diagnostic(code(fvm::fs::failure))]
    FilesystemFailure {
        operation: String,
        path: String,
        reason: String,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(fvm::fs::io_error))]
    IoError { message: String },

    // Process errors
    #[error("Failed to start subprocess '{command}': {reason}")]
    #[diagnostic(
        code(fvm::launch::spawn_failed),
        help("Check that `nodeBinary` is installed and the Foundry version folder is complete")
    )]
    SpawnFailure { command: String, reason: String },

    #[error("Prompt failed: {message}")]
    #[diagnostic(code(fvm::prompt::failed))]
    Prompt { message: String },
}

impl FvmError {
    /// Wrap this error with the `"<name> - <version>"` label of a package
    pub fn for_package(self, package: impl Into<String>) -> Self {
        FvmError::Package {
            package: package.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any package labels
    pub fn root(&self) -> &FvmError {
        match self {
            FvmError::Package { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<std::io::Error> for FvmError {
    fn from(err: std::io::Error) -> Self {
        FvmError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for FvmError {
    fn from(err: serde_yaml::Error) -> Self {
        FvmError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for FvmError {
    fn from(err: inquire::InquireError) -> Self {
        FvmError::Prompt {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, FvmError>;
