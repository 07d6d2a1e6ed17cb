//! Env command implementation.
//!
//! Shows which environment was loaded and which files contributed to it.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;

/// Show the resolved environment and contributing files.
#[derive(Args)]
pub struct EnvCommand {
    /// Print only the environment name
    #[arg(long, conflicts_with = "json")]
    pub name_only: bool,

    /// Print as a JSON object
    #[arg(long)]
    pub json: bool,
}

impl EnvCommand {
    /// Execute the env command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let environment = config.environment().name();

        if self.name_only {
            println!("{environment}");
            return Ok(());
        }

        let sources: Vec<String> = config
            .sources()
            .iter()
            .map(|p| p.display().to_string())
            .collect();

        if self.json {
            let output = serde_json::json!({
                "environment": environment,
                "sources": sources,
            });
            let rendered = serde_json::to_string_pretty(&output).map_err(strata::Error::from)?;
            println!("{rendered}");
        } else {
            println!("environment: {environment}");
            println!("sources:");
            for source in sources {
                println!("  {source}");
            }
        }
        Ok(())
    }
}
