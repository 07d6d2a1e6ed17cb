//! Load parameters.

use std::path::{Path, PathBuf};

use crate::config::environment::DEFAULT_ENV_VAR;

/// Directory searched when no path is supplied.
pub const DEFAULT_CONFIG_PATH: &str = "./config";

/// File type (extension) used when none is supplied.
pub const DEFAULT_FILE_TYPE: &str = "yaml";

/// Base name of the mandatory default file.
pub const DEFAULT_CONFIG_NAME: &str = "default";

/// Name of the secrets file looked up in the working directory.
pub const DOTENV_FILE: &str = ".env";

/// Parameters describing how to load a configuration directory.
///
/// Empty fields are filled in by [`Params::set_defaults`]; explicitly
/// supplied values are never overwritten.
///
/// # Examples
///
/// ```
/// use strata::Params;
/// use std::path::PathBuf;
///
/// let mut params = Params::new().with_file_type("toml");
/// params.set_defaults();
/// assert_eq!(params.path, PathBuf::from("./config"));
/// assert_eq!(params.file_type, "toml");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    /// Directory containing the configuration files.
    pub path: PathBuf,

    /// File type, doubling as the file extension (`yaml`, `yml`, `json`, `toml`).
    pub file_type: String,

    /// Fail the load if the secrets file is absent.
    pub require_dotenv: bool,

    /// Base name of the default file.
    pub config_name: String,

    /// Environment variable that selects the environment name.
    pub env_var: String,

    /// Prefix for automatic environment binding; `None` disables binding.
    pub env_prefix: Option<String>,

    /// Location of the secrets file; `None` means `.env` in the working directory.
    pub dotenv_path: Option<PathBuf>,
}

impl Params {
    /// Creates empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration directory.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the file type.
    #[must_use]
    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = file_type.into();
        self
    }

    /// Requires the secrets file to exist.
    #[must_use]
    pub const fn with_require_dotenv(mut self, required: bool) -> Self {
        self.require_dotenv = required;
        self
    }

    /// Sets the base name of the default file.
    #[must_use]
    pub fn with_config_name(mut self, name: impl Into<String>) -> Self {
        self.config_name = name.into();
        self
    }

    /// Sets the environment variable that selects the environment name.
    #[must_use]
    pub fn with_env_var(mut self, var: impl Into<String>) -> Self {
        self.env_var = var.into();
        self
    }

    /// Enables automatic environment binding with the given prefix.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Sets the location of the secrets file.
    #[must_use]
    pub fn with_dotenv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_path = Some(path.into());
        self
    }

    /// Fill empty fields with their defaults.
    ///
    /// Idempotent: calling it again changes nothing.
    pub fn set_defaults(&mut self) {
        if self.path.as_os_str().is_empty() {
            self.path = PathBuf::from(DEFAULT_CONFIG_PATH);
        }
        if self.file_type.is_empty() {
            self.file_type = DEFAULT_FILE_TYPE.to_string();
        }
        if self.config_name.is_empty() {
            self.config_name = DEFAULT_CONFIG_NAME.to_string();
        }
        if self.env_var.is_empty() {
            self.env_var = DEFAULT_ENV_VAR.to_string();
        }
    }

    /// Resolved location of the secrets file.
    #[must_use]
    pub fn dotenv_path(&self) -> &Path {
        self.dotenv_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DOTENV_FILE))
    }
}
