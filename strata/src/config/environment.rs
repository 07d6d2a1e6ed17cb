//! Environment name resolution and environment-variable binding.
//!
//! The environment name (`local`, `staging`, `production`, ...) picks the
//! override file merged on top of the default file. It comes from a single
//! designated variable and falls back to `local`.

use std::env;
use std::fmt;

use crate::config::accessor::KEY_DELIMITER;

/// Variable consulted for the environment name unless overridden in
/// [`Params`](crate::Params).
pub const DEFAULT_ENV_VAR: &str = "STRATA_ENV";

/// Environment name used when none is configured.
pub const LOCAL_ENVIRONMENT: &str = "local";

/// The resolved environment name.
///
/// # Examples
///
/// ```no_run
/// use strata::Environment;
///
/// let env = Environment::resolve_from("STRATA_ENV");
/// println!("running in {env}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment(String);

impl Environment {
    /// Creates an environment with an explicit name.
    ///
    /// Blank names resolve to `local`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Self::local()
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The local-development environment.
    #[must_use]
    pub fn local() -> Self {
        Self(LOCAL_ENVIRONMENT.to_string())
    }

    /// Resolve from [`DEFAULT_ENV_VAR`].
    #[must_use]
    pub fn resolve() -> Self {
        Self::resolve_from(DEFAULT_ENV_VAR)
    }

    /// Resolve from the named variable.
    ///
    /// Unset, empty and whitespace-only values resolve to `local`.
    #[must_use]
    pub fn resolve_from(var: &str) -> Self {
        env::var(var).map_or_else(|_| Self::local(), |value| Self::new(&value))
    }

    /// The environment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether this is the local-development environment.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.0 == LOCAL_ENVIRONMENT
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Automatic binding of configuration keys to environment variables.
///
/// A key such as `api.port` bound with prefix `APP` is looked up as
/// `APP_API_PORT`. The separator replaces both the key delimiter and the
/// joint between prefix and key.
///
/// # Examples
///
/// ```
/// use strata::EnvBinding;
///
/// let binding = EnvBinding::new("app");
/// assert_eq!(binding.var_name("api.port"), "APP_API_PORT");
///
/// let binding = EnvBinding::new("APP").with_separator("__");
/// assert_eq!(binding.var_name("api.port"), "APP__API__PORT");
///
/// assert_eq!(EnvBinding::new("").var_name("api.port"), "API_PORT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvBinding {
    prefix: String,
    separator: String,
}

impl EnvBinding {
    /// Creates a binding with the default `_` separator.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: "_".to_string(),
        }
    }

    /// Replaces the separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// The configured prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Environment variable name for a dotted key.
    #[must_use]
    pub fn var_name(&self, key: &str) -> String {
        let key = key
            .to_uppercase()
            .replace(KEY_DELIMITER, &self.separator);
        if self.prefix.is_empty() {
            key
        } else {
            format!("{}{}{key}", self.prefix.to_uppercase(), self.separator)
        }
    }

    /// Read the bound variable for a key, if set.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        env::var(self.var_name(key)).ok()
    }
}
