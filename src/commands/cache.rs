//! Cache command implementation

use std::path::Path;

use crate::cache::{self, cache_root};
use crate::cli::{CacheArgs, CacheSubcommand};
use crate::error::Result;

pub fn run(workdir: &Path, args: CacheArgs) -> Result<()> {
    let root = cache_root(workdir);

    match args.command {
        Some(CacheSubcommand::List) => list_cached_packages(&root),
        Some(CacheSubcommand::Clear(clear_args)) => match clear_args.only {
            Some(name) => clean_specific_package(&root, &name),
            None => clean_all_cache(&root),
        },
        // Default: show only cache statistics
        None => show_cache_stats(&root),
    }
}

fn print_stats_header(root: &Path) -> Result<cache::CacheStats> {
    let stats = cache::cache_stats(root)?;

    println!("Cache Statistics:");
    println!("  Location: {}", root.display());
    println!("  Packages: {}", stats.packages);
    println!("  Versions: {}", stats.versions);
    println!("  Size: {}", stats.formatted_size());

    Ok(stats)
}

fn show_cache_stats(root: &Path) -> Result<()> {
    let stats = print_stats_header(root)?;

    if stats.packages == 0 {
        println!("\nCache is empty.");
    } else {
        println!("\nRun 'fvm cache list' to list cached packages.");
        println!("Run 'fvm cache clear' to remove everything from cache.");
        println!("Run 'fvm cache clear --only <name>' to remove a specific package.");
    }

    Ok(())
}

fn list_cached_packages(root: &Path) -> Result<()> {
    print_stats_header(root)?;
    println!();

    let packages = cache::list_cached(root)?;

    if packages.is_empty() {
        println!("No cached packages.");
        return Ok(());
    }

    println!("Cached packages ({}):", packages.len());
    for package in &packages {
        let count = package.versions.len();
        println!(
            "  {} {} ({} version{}, {})",
            package.kind,
            package.name,
            count,
            if count == 1 { "" } else { "s" },
            package.formatted_size()
        );
        for version in &package.versions {
            println!("    {version}");
        }
    }

    Ok(())
}

fn clean_all_cache(root: &Path) -> Result<()> {
    cache::clear_all(root)?;
    println!("Cache cleared successfully.");
    Ok(())
}

fn clean_specific_package(root: &Path, name: &str) -> Result<()> {
    match cache::clear_package(root, name)? {
        0 => println!("Nothing cached for: {name}"),
        _ => println!("Removed cached package: {name}"),
    }
    Ok(())
}
