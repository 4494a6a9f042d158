//! fvm configuration (`fvm.yaml`, or the legacy `config.json`)
//!
//! JSON is valid YAML, so both files are read with `serde_yaml`:
//!
//! ```yaml
//! foundryPath: ~/foundryvtt
//! dataPath: ~/foundrydata
//! successKeywords: ["Server started"]
//! warningKeywords: ["deprecated"]
//! systems:
//!   - name: D&D 5th Edition
//!     versions:
//!       - name: 3.0.0
//!         url: https://github.com/foundryvtt/dnd5e/releases/download/release-3.0.0/dnd5e-release-3.0.0.zip
//! modules: []
//! ```

pub mod catalog;

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_HEARTBEAT_INTERVAL;
use crate::domain::PackageKind;
use crate::error::config::{invalid, missing};
use crate::error::{FvmError, Result};
use crate::launcher::{LaunchOptions, OutputKeywords};

pub use catalog::{CatalogEntry, CatalogVersion, host_versions, package_versions};

/// Configuration files looked up in the working directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["fvm.yaml", "fvm.yml", "config.json"];

fn default_node_binary() -> String {
    "node".to_string()
}

fn default_heartbeat_secs() -> f64 {
    2.5
}

/// fvm configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FvmConfig {
    /// Folder holding one `v*` folder per installed Foundry version
    pub foundry_path: PathBuf,

    /// Foundry data directory; packages go to `<dataPath>/Data/...`
    pub data_path: PathBuf,

    /// Runtime used to start Foundry's `main.js`
    #[serde(default = "default_node_binary")]
    pub node_binary: String,

    /// Seconds between "still downloading" messages
    #[serde(default = "default_heartbeat_secs")]
    pub download_heartbeat_secs: f64,

    /// Foundry stderr lines containing one of these are shown as success
    #[serde(default)]
    pub success_keywords: Vec<String>,

    /// Foundry stderr lines containing one of these are shown as warning
    #[serde(default)]
    pub warning_keywords: Vec<String>,

    #[serde(default)]
    pub systems: Vec<CatalogEntry>,

    #[serde(default)]
    pub modules: Vec<CatalogEntry>,
}

impl FvmConfig {
    /// Parse and validate a configuration string.
    ///
    /// `~/` prefixes are expanded; relative paths are kept as they are.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut config: Self = serde_yaml::from_str(yaml)?;
        config.foundry_path = expand_home(&config.foundry_path);
        config.data_path = expand_home(&config.data_path);
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// Relative `foundryPath`/`dataPath` values are resolved against the
    /// directory of the file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| FvmError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut config = Self::from_yaml(&content).map_err(|e| match e {
            FvmError::ConfigParseFailed { reason, .. } => FvmError::ConfigParseFailed {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        if config.foundry_path.is_relative() {
            config.foundry_path = base.join(&config.foundry_path);
        }
        if config.data_path.is_relative() {
            config.data_path = base.join(&config.data_path);
        }

        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `explicit` if given, else the first of [`CONFIG_FILE_NAMES`]
    /// found in `workdir`.
    pub fn discover(workdir: &Path, explicit: Option<&Path>) -> Result<(PathBuf, Self)> {
        if let Some(path) = explicit {
            let path = if path.is_relative() {
                workdir.join(path)
            } else {
                path.to_path_buf()
            };
            let config = Self::load(&path)?;
            return Ok((path, config));
        }

        let path = CONFIG_FILE_NAMES
            .iter()
            .map(|name| workdir.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                missing(format!(
                    "No configuration found in '{}' (looked for {})",
                    workdir.display(),
                    CONFIG_FILE_NAMES.join(", ")
                ))
            })?;

        let config = Self::load(&path)?;
        Ok((path, config))
    }

    pub fn validate(&self) -> Result<()> {
        if self.foundry_path.as_os_str().is_empty() {
            return Err(invalid("foundryPath cannot be empty"));
        }
        if self.data_path.as_os_str().is_empty() {
            return Err(invalid("dataPath cannot be empty"));
        }
        let heartbeat = Duration::try_from_secs_f64(self.download_heartbeat_secs);
        if !heartbeat.is_ok_and(|interval| !interval.is_zero()) {
            return Err(invalid("downloadHeartbeatSecs must be a positive number of seconds"));
        }

        for kind in [PackageKind::System, PackageKind::Module] {
            let mut seen = HashSet::new();
            for entry in self.catalog(kind) {
                if !seen.insert(entry.name.as_str()) {
                    return Err(invalid(format!(
                        "{kind} '{}' is configured more than once",
                        entry.name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Configured systems or modules
    pub fn catalog(&self, kind: PackageKind) -> &[CatalogEntry] {
        match kind {
            PackageKind::System => &self.systems,
            PackageKind::Module => &self.modules,
        }
    }

    /// Falls back to the default when `downloadHeartbeatSecs` is out of range
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.download_heartbeat_secs)
            .unwrap_or(DEFAULT_HEARTBEAT_INTERVAL)
    }

    pub fn output_keywords(&self) -> OutputKeywords {
        OutputKeywords::new(self.success_keywords.clone(), self.warning_keywords.clone())
    }

    /// Launch options for one installed Foundry version
    pub fn launch_options(&self, foundry_version: impl Into<String>) -> LaunchOptions {
        LaunchOptions {
            foundry_path: self.foundry_path.clone(),
            data_path: self.data_path.clone(),
            foundry_version: foundry_version.into(),
            node_binary: self.node_binary.clone(),
        }
    }
}

/// Replace a leading `~` component with the user's home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}
