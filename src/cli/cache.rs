use clap::{Parser, Subcommand};

/// Arguments for cache command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show cache statistics:\n    fvm cache\n\n\
                  List cached systems and modules:\n    fvm cache list\n\n\
                  Clear the whole cache:\n    fvm cache clear\n\n\
                  Remove one package:\n    fvm cache clear --only dnd5e")]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: Option<CacheSubcommand>,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// List cached systems and modules
    List,

    /// Clear cached packages
    Clear(ClearCacheArgs),
}

/// Arguments for cache clear command
#[derive(Parser, Debug)]
pub struct ClearCacheArgs {
    /// Remove only the package with this name (display name or cache folder name)
    #[arg(long)]
    pub only: Option<String>,
}
