//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "strata";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            print_instructions(self.shell);
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}

/// Installation hints go to stderr so stdout stays a valid script.
fn print_instructions(shell: Shell) {
    eprintln!("# Generating {shell} completion script");
    eprintln!("# Run the following command to enable completions:");

    match shell {
        Shell::Bash => {
            eprintln!(
                "#   strata completions bash > ~/.local/share/bash-completion/completions/strata"
            );
            eprintln!("# Or source it directly in ~/.bashrc:");
            eprintln!("#   eval \"$(strata completions bash)\"");
        }
        Shell::Zsh => {
            eprintln!("#   strata completions zsh > ~/.zsh/completions/_strata");
            eprintln!("# Make sure ~/.zsh/completions is in your $fpath");
        }
        Shell::Fish => {
            eprintln!("#   strata completions fish > ~/.config/fish/completions/strata.fish");
            eprintln!("# Or add to config.fish:");
            eprintln!("#   strata completions fish | source");
        }
        Shell::PowerShell => {
            eprintln!("#   strata completions powershell > $PROFILE");
            eprintln!("# Or run:");
            eprintln!("#   strata completions powershell | Out-String | Invoke-Expression");
        }
        _ => {}
    }

    eprintln!();
}
