use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    fvm completions --shell bash > ~/.bash_completion.d/fvm\n\n\
                  Generate zsh completions:\n    fvm completions --shell zsh > ~/.zfunc/_fvm\n\n\
                  Generate fish completions:\n    fvm completions --shell fish > ~/.config/fish/completions/fvm.fish")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(long, short = 's', value_enum, ignore_case = true)]
    pub shell: Shell,
}
