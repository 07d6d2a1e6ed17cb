//! Build script for strata-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    let format = || {
        Arg::new("format")
            .long("format")
            .help("Output format")
            .value_parser(["yaml", "json", "dotenv", "export", "human"])
            .default_value("yaml")
            .env("STRATA_OUTPUT_FORMAT")
    };
    let shell = || {
        Arg::new("shell")
            .long("shell")
            .help("Shell type for export format (auto-detect if not specified)")
    };

    Command::new("strata")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect layered configuration")
        .long_about(
            "Load a configuration directory (default file, environment file and \
             environment variable overrides) and print the merged result",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Directory containing the configuration files")
                .value_name("DIR")
                .global(true)
                .env("STRATA_CONFIG_DIR"),
        )
        .arg(
            Arg::new("config-type")
                .long("config-type")
                .help("Configuration file type (yaml, yml, json, toml)")
                .value_name("EXT")
                .global(true)
                .env("STRATA_CONFIG_TYPE"),
        )
        .arg(
            Arg::new("config-name")
                .long("config-name")
                .help("Base name of the default configuration file")
                .value_name("NAME")
                .global(true),
        )
        .arg(
            Arg::new("require-dotenv")
                .long("require-dotenv")
                .help("Fail if the .env secrets file is missing")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("STRATA_REQUIRE_DOTENV"),
        )
        .arg(
            Arg::new("env-prefix")
                .long("env-prefix")
                .help("Bind PREFIX_KEY_PATH environment variables to configuration keys")
                .value_name("PREFIX")
                .global(true),
        )
        .arg(
            Arg::new("environment")
                .long("environment")
                .help("Load this environment instead of the one named by STRATA_ENV")
                .value_name("NAME")
                .global(true),
        )
        .subcommands(vec![
            Command::new("get")
                .about("Print the value at a dotted key")
                .arg(Arg::new("key").required(true))
                .arg(format())
                .arg(shell()),
            Command::new("dump")
                .about("Print the whole merged configuration")
                .arg(format())
                .arg(shell()),
            Command::new("keys")
                .about("List every leaf key")
                .arg(Arg::new("prefix")),
            Command::new("env")
                .about("Show the resolved environment and contributing files")
                .arg(
                    Arg::new("name-only")
                        .long("name-only")
                        .action(ArgAction::SetTrue),
                )
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "OUT_DIR not set by cargo")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("strata.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
