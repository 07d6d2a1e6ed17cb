//! Keys command implementation.
//!
//! Lists the dotted path of every leaf value, one per line.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use std::io::Write;

/// List every leaf key.
#[derive(Args)]
pub struct KeysCommand {
    /// Only list keys under this dotted prefix
    pub prefix: Option<String>,
}

impl KeysCommand {
    /// Execute the keys command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        let keys: Vec<String> = match &self.prefix {
            Some(prefix) => {
                let prefix = prefix.to_lowercase();
                let nested = format!("{prefix}.");
                config
                    .keys()
                    .into_iter()
                    .filter(|k| *k == prefix || k.starts_with(&nested))
                    .collect()
            }
            None => config.keys(),
        };

        if keys.is_empty() {
            if let Some(prefix) = self.prefix {
                return Err(CliError::SemanticFailure(format!(
                    "no keys under prefix: {prefix}"
                )));
            }
        }

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        for key in keys {
            writeln!(handle, "{key}")?;
        }
        Ok(())
    }
}
