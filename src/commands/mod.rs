//! Command implementations for the fvm CLI

pub mod cache;
pub mod completions;
pub mod list;
pub mod start;
pub mod version;

use std::path::{Path, PathBuf};

use crate::config::FvmConfig;
use crate::error::Result;

/// The working directory: `-w/--workdir` if given, else the current directory
pub fn resolve_workdir(workdir: Option<PathBuf>) -> Result<PathBuf> {
    match workdir {
        Some(path) => Ok(path),
        None => Ok(std::env::current_dir()?),
    }
}

/// Find and load the configuration, logging which file was used
pub fn load_config(workdir: &Path, explicit: Option<&Path>) -> Result<(PathBuf, FvmConfig)> {
    let (path, config) = FvmConfig::discover(workdir, explicit)?;
    log::debug!("using configuration {}", path.display());
    Ok((path, config))
}
