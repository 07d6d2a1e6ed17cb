//! Output formatting module for configuration values.
//!
//! This module renders a merged configuration tree, or a single value from
//! it, as YAML, JSON, dotenv lines, shell-specific export statements, or
//! human-readable text.

mod formatters;
mod shell;

use crate::{Result, Value};

pub use formatters::{
    DotenvFormatter, ExportFormatter, HumanFormatter, JsonFormatter, YamlFormatter,
};
pub use shell::ShellType;

/// Trait for formatting configuration values into different output formats.
pub trait OutputFormatter {
    /// Format a value into a string.
    ///
    /// # Arguments
    ///
    /// * `key` - Dotted key the value lives at, or `None` for the whole tree
    /// * `value` - The value to render
    ///
    /// # Errors
    ///
    /// Returns an error if the formatting fails (e.g., a key that cannot be
    /// turned into an environment variable name).
    fn format(&self, key: Option<&str>, value: &Value) -> Result<String>;
}

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML document.
    Yaml,
    /// Pretty-printed JSON.
    Json,
    /// Dotenv (.env file) format.
    Dotenv,
    /// Shell-specific export statements.
    Export(ShellType),
    /// Human-readable format.
    Human,
}

impl OutputFormat {
    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(&self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Yaml => Box::new(YamlFormatter),
            Self::Json => Box::new(JsonFormatter),
            Self::Dotenv => Box::new(DotenvFormatter),
            Self::Export(shell) => Box::new(ExportFormatter::new(*shell)),
            Self::Human => Box::new(HumanFormatter),
        }
    }
}
