//! List command implementation
//!
//! Shows the installed Foundry versions and the configured catalog, marking
//! versions that are already in the cache.

use std::path::Path;

use console::Style;

use crate::cache::{cache_entry_path, cache_root};
use crate::common::fs::is_non_empty_dir;
use crate::config::host_versions;
use crate::domain::PackageKind;
use crate::error::Result;
use crate::launcher::has_entry_point;
use crate::ui::log_warning;

pub fn run(workdir: &Path, config_path: Option<&Path>) -> Result<()> {
    let (path, config) = super::load_config(workdir, config_path)?;
    let dim = Style::new().dim();

    println!("Configuration: {}", path.display());
    println!("Data path: {}", config.data_path.display());
    println!();

    println!("Foundry versions in {}:", config.foundry_path.display());
    match host_versions(&config.foundry_path) {
        Ok(versions) => {
            for version in versions {
                if has_entry_point(&config.foundry_path, &version) {
                    println!("  {version}");
                } else {
                    println!("  {version} {}", dim.apply_to("(no resources/app/main.js)"));
                }
            }
        }
        Err(e) => log_warning(&format!("  {e}")),
    }

    let root = cache_root(workdir);
    for kind in [PackageKind::System, PackageKind::Module] {
        let entries = config.catalog(kind);
        println!();
        if entries.is_empty() {
            println!("No {} configured.", kind.plural());
            continue;
        }

        println!("Configured {} ({}):", kind.plural(), entries.len());
        for entry in entries {
            println!("  {}", entry.name);
            for descriptor in entry.descriptors() {
                let cached = is_non_empty_dir(&cache_entry_path(&root, &descriptor, kind));
                println!(
                    "    {} {}{}",
                    descriptor.version,
                    dim.apply_to(&descriptor.url),
                    if cached { " (cached)" } else { "" }
                );
            }
        }
    }

    Ok(())
}
