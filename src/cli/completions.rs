use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    uberpack completions bash > ~/.bash_completion.d/uberpack\n\n\
                  Generate zsh completions:\n    uberpack completions zsh > ~/.zfunc/_uberpack\n\n\
                  Generate fish completions:\n    uberpack completions fish > ~/.config/fish/completions/uberpack.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
