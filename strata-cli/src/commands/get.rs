//! Get command implementation.
//!
//! Prints the value stored at a dotted key. A missing key is a semantic
//! failure (exit code 1), so the command doubles as an existence check in
//! scripts.

use crate::error::CliError;
use crate::utils::{format_value, load_configuration, GlobalOptions, OutputFormatArg};
use clap::Args;

/// Print the value at a dotted key.
#[derive(Args)]
pub struct GetCommand {
    /// Dotted key, e.g. `services.foo.port`
    pub key: String,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "yaml",
        env = "STRATA_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormatArg,

    /// Shell type for export format (auto-detect if not specified)
    #[arg(long)]
    pub shell: Option<String>,
}

impl GetCommand {
    /// Execute the get command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.key.trim().is_empty() {
            return Err(CliError::InvalidArguments("key must not be empty".to_string()));
        }
        let output_format = self.format.to_output_format(self.shell.as_deref())?;

        let config = load_configuration(global)?;
        let value = config
            .get(&self.key)
            .ok_or_else(|| CliError::SemanticFailure(format!("key not found: {}", self.key)))?;

        println!("{}", format_value(&output_format, Some(self.key.as_str()), value)?);
        Ok(())
    }
}
