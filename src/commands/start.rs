//! Start command implementation
//!
//! Runs the interactive selection, stages the chosen system and modules
//! (system first, then each module in order) and starts Foundry when the
//! chosen action launches it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::{HttpDownloader, PackageCache, cache_root};
use crate::config::FvmConfig;
use crate::domain::PackageKind;
use crate::error::Result;
use crate::installer::Installer;
use crate::launcher::{ConsoleSink, OutputSink, launch};
use crate::prompt::Selection;
use crate::prompt::interactive::{self, InquirePrompter};
use crate::ui::{ConsoleReporter, ProgressReporter, log_error, log_info, log_warning};

pub fn run(workdir: &Path, config_path: Option<&Path>) -> Result<()> {
    let (_, config) = super::load_config(workdir, config_path)?;

    let Some(selection) = interactive::run(&InquirePrompter, &config)? else {
        log_info("Nothing to do.");
        return Ok(());
    };
    log::debug!("selection: {}", interactive::describe(&selection));

    let reporter: Arc<dyn ProgressReporter> = Arc::new(ConsoleReporter::new());
    let cache = PackageCache::new(
        cache_root(workdir),
        Box::new(HttpDownloader::new()?),
        Arc::clone(&reporter),
    )
    .with_heartbeat_interval(config.heartbeat_interval());
    let installer = Installer::new(config.data_path.clone(), reporter);

    execute(&selection, &config, &cache, &installer, Arc::new(ConsoleSink))
}

/// Outcome of staging the selected packages
#[derive(Debug, Default)]
pub struct StageReport {
    /// Install folders of the packages that were applied
    pub installed: Vec<PathBuf>,
    /// Labels of modules that failed
    pub failed_modules: Vec<String>,
}

/// Fetch and install the selected system, then each selected module.
///
/// A system failure aborts with its error. A module failure is reported and
/// the next module is processed.
pub fn stage(
    selection: &Selection,
    cache: &PackageCache,
    installer: &Installer,
) -> Result<StageReport> {
    let mut report = StageReport::default();

    if let Some(system) = selection.system() {
        let payload = cache.ensure_cached(system, PackageKind::System)?;
        report
            .installed
            .push(installer.install(&payload, system, PackageKind::System)?);
    }

    for module in selection.modules() {
        let result = cache
            .ensure_cached(module, PackageKind::Module)
            .and_then(|payload| installer.install(&payload, module, PackageKind::Module));
        match result {
            Ok(target) => report.installed.push(target),
            Err(e) => {
                log_error(&e.to_string());
                report.failed_modules.push(module.label());
            }
        }
    }

    Ok(report)
}

/// Stage the selection and, if the action launches, run Foundry until it exits
pub fn execute(
    selection: &Selection,
    config: &FvmConfig,
    cache: &PackageCache,
    installer: &Installer,
    sink: Arc<dyn OutputSink>,
) -> Result<()> {
    let report = stage(selection, cache, installer)?;
    if !report.failed_modules.is_empty() {
        log_warning(&format!(
            "Could not apply {} module(s): {}",
            report.failed_modules.len(),
            report.failed_modules.join(", ")
        ));
    }

    let launches = selection.action().is_some_and(|a| a.launches());
    let Some(version) = selection.host_version().filter(|_| launches) else {
        return Ok(());
    };

    let options = config.launch_options(version);
    log_info(&format!("Starting Foundry {version}..."));
    let process = launch(&options, config.output_keywords(), sink)?;
    log::debug!("Foundry running with pid {}", process.id());
    process.wait()?;

    Ok(())
}
