//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading and output format selection.

use crate::error::CliError;
use clap::ValueEnum;
use std::path::PathBuf;
use strata::output::{OutputFormat, ShellType};
use strata::{Config, ConfigLoader, Environment, Params, Value};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Directory containing the configuration files.
    pub config_dir: Option<PathBuf>,

    /// Configuration file type.
    pub config_type: Option<String>,

    /// Base name of the default file.
    pub config_name: Option<String>,

    /// Fail if the secrets file is missing.
    pub require_dotenv: bool,

    /// Prefix for environment variable binding.
    pub env_prefix: Option<String>,

    /// Environment to load instead of resolving it from the process environment.
    pub environment: Option<String>,
}

impl GlobalOptions {
    /// Build load parameters from the global options.
    ///
    /// Unset options are left empty so the library defaults apply.
    pub fn params(&self) -> Params {
        let mut params = Params::new().with_require_dotenv(self.require_dotenv);
        if let Some(dir) = &self.config_dir {
            params = params.with_path(dir);
        }
        if let Some(file_type) = &self.config_type {
            params = params.with_file_type(file_type.as_str());
        }
        if let Some(name) = &self.config_name {
            params = params.with_config_name(name.as_str());
        }
        if let Some(prefix) = &self.env_prefix {
            params = params.with_env_prefix(prefix.as_str());
        }
        params
    }
}

/// Load the layered configuration described by the global options.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut loader = ConfigLoader::new(global.params());

    if let Some(name) = &global.environment {
        if name.trim().is_empty() {
            return Err(CliError::InvalidArguments(
                "--environment must not be empty".to_string(),
            ));
        }
        loader = loader.with_environment(Environment::new(name));
    }

    let config = loader.load()?;
    log::debug!(
        "configuration has {} keys from {} files",
        config.keys().len(),
        config.sources().len()
    );
    Ok(config)
}

/// Output format argument for clap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormatArg {
    /// YAML document
    Yaml,
    /// JSON format
    Json,
    /// Dotenv (.env file) format
    Dotenv,
    /// Shell export statements
    Export,
    /// Human-readable format
    Human,
}

impl OutputFormatArg {
    /// Convert to `OutputFormat`, detecting shell type if needed.
    pub fn to_output_format(self, shell_arg: Option<&str>) -> Result<OutputFormat, CliError> {
        match self {
            Self::Export => {
                let shell = match shell_arg {
                    Some(shell_str) => ShellType::from_string(shell_str)
                        .map_err(|e| CliError::InvalidArguments(e.to_string()))?,
                    None => ShellType::detect(),
                };
                Ok(OutputFormat::Export(shell))
            }
            Self::Yaml => Ok(OutputFormat::Yaml),
            Self::Json => Ok(OutputFormat::Json),
            Self::Dotenv => Ok(OutputFormat::Dotenv),
            Self::Human => Ok(OutputFormat::Human),
        }
    }
}

/// Render a value with the selected output format.
pub fn format_value(
    output_format: &OutputFormat,
    key: Option<&str>,
    value: &Value,
) -> Result<String, CliError> {
    let formatter = output_format.create_formatter();
    formatter.format(key, value).map_err(CliError::from)
}
