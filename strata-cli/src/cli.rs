//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, DumpCommand, EnvCommand, GetCommand, KeysCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting layered configuration.
#[derive(Parser)]
#[command(name = "strata")]
#[command(version, about = "Inspect layered configuration", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Directory containing the configuration files
    #[arg(
        long = "config",
        value_name = "DIR",
        global = true,
        env = "STRATA_CONFIG_DIR"
    )]
    pub config_dir: Option<PathBuf>,

    /// Configuration file type (yaml, yml, json, toml)
    #[arg(
        long,
        value_name = "EXT",
        global = true,
        alias = "configtype",
        env = "STRATA_CONFIG_TYPE"
    )]
    pub config_type: Option<String>,

    /// Base name of the default configuration file
    #[arg(long, value_name = "NAME", global = true, alias = "configName")]
    pub config_name: Option<String>,

    /// Fail if the .env secrets file is missing
    #[arg(long, global = true, env = "STRATA_REQUIRE_DOTENV")]
    pub require_dotenv: bool,

    /// Bind PREFIX_KEY_PATH environment variables to configuration keys
    #[arg(long, value_name = "PREFIX", global = true)]
    pub env_prefix: Option<String>,

    /// Load this environment instead of the one named by STRATA_ENV
    #[arg(long, value_name = "NAME", global = true)]
    pub environment: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the value at a dotted key
    Get(GetCommand),

    /// Print the whole merged configuration
    Dump(DumpCommand),

    /// List every leaf key
    Keys(KeysCommand),

    /// Show the resolved environment and contributing files
    Env(EnvCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
