//! fvm - Foundry VTT version manager
//!
//! Downloads the configured versions of Foundry VTT game systems and modules
//! once, caches them next to the configuration, installs the selected ones
//! into the Foundry data directory and starts the chosen Foundry version.

use clap::Parser;

mod cache;
mod cli;
mod commands;
mod common;
mod config;
mod domain;
mod error;
mod installer;
mod launcher;
mod prompt;
#[cfg(test)]
mod test_fixtures;
mod ui;

use cli::{Cli, Commands};
use error::Result;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(mut cli: Cli) -> Result<()> {
    let command = cli.take_command();
    let config = cli.config.as_deref();
    let workdir = || commands::resolve_workdir(cli.workdir.clone());

    match command {
        Commands::Start => commands::start::run(&workdir()?, config),
        Commands::List => commands::list::run(&workdir()?, config),
        Commands::Cache(args) => commands::cache::run(&workdir()?, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(&args),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
