//! CLI definitions using clap derive API
//!
//! Argument types that need more than a line live in submodules:
//! - cache: Cache command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod cache;
pub mod completions;

pub use cache::{CacheArgs, CacheSubcommand, ClearCacheArgs};
pub use completions::CompletionsArgs;

/// fvm - Foundry VTT version manager
///
/// Stage a game system and modules into a Foundry data directory and start
/// the chosen Foundry version.
#[derive(Parser, Debug)]
#[command(
    name = "fvm",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Version manager for Foundry VTT systems and modules",
    long_about = "fvm downloads the configured versions of Foundry VTT game systems and modules \
                  once, keeps them in a local cache, installs the selected ones into the Foundry \
                  data directory and starts the chosen Foundry version.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  fvm                          \x1b[90m# Interactive selection and start\x1b[0m\n   \
                  fvm -c ~/foundry/fvm.yaml    \x1b[90m# Use a specific configuration\x1b[0m\n   \
                  fvm list                     \x1b[90m# Show Foundry versions and catalog\x1b[0m\n   \
                  fvm cache                    \x1b[90m# Show cache statistics\x1b[0m\n   \
                  fvm cache clear --only dnd5e \x1b[90m# Drop one cached system\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Working directory holding the configuration and `.cache/` (defaults to current directory)
    #[arg(long, short = 'w', global = true, env = "FVM_WORKDIR")]
    pub workdir: Option<PathBuf>,

    /// Configuration file (defaults to fvm.yaml, fvm.yml or config.json in the working directory)
    #[arg(long, short = 'c', global = true, env = "FVM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The subcommand to run; `start` when none was given
    pub fn take_command(&mut self) -> Commands {
        self.command.take().unwrap_or(Commands::Start)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select a system and modules, install them and start Foundry (default)
    Start,

    /// List installed Foundry versions and configured systems and modules
    List,

    /// Manage the package cache
    #[command(name = "cache")]
    Cache(CacheArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
