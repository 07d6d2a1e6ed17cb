//! Main entry point for the strata CLI.
//!
//! This is the command-line interface for inspecting layered configuration.
//! It provides commands for reading a configuration directory:
//! - `get`: Print the value at a dotted key
//! - `dump`: Print the whole merged configuration
//! - `keys`: List every leaf key
//! - `env`: Show the resolved environment and contributing files

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _level = strata::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        quiet: cli.quiet,
        config_dir: cli.config_dir,
        config_type: cli.config_type,
        config_name: cli.config_name,
        require_dotenv: cli.require_dotenv,
        env_prefix: cli.env_prefix,
        environment: cli.environment,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Get(cmd) => cmd.execute(&global),
        cli::Command::Dump(cmd) => cmd.execute(&global),
        cli::Command::Keys(cmd) => cmd.execute(&global),
        cli::Command::Env(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
