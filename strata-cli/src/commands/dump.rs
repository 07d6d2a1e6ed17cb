//! Dump command implementation.

use crate::error::CliError;
use crate::utils::{format_value, load_configuration, GlobalOptions, OutputFormatArg};
use clap::Args;
use strata::Value;

/// Print the whole merged configuration.
#[derive(Args)]
pub struct DumpCommand {
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

impl DumpCommand {
    /// Execute the dump command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let output_format = self.format.to_output_format(self.shell.as_deref())?;

        let config = load_configuration(global)?;
        let settings = Value::Mapping(config.all_settings().clone());

        let output = format_value(&output_format, None, &settings)?;
        if !output.is_empty() {
            println!("{output}");
        }
        Ok(())
    }
}
