//! Error types for the strata library.
//!
//! This module provides the error hierarchy for loading layered
//! configuration, using `thiserror` for ergonomic error handling.
//!
//! Store-level file failures are reported as [`FileError`] and converted
//! into the phase-specific [`Error`] variants by the loader.

use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a strata error.
///
/// # Examples
///
/// ```
/// use strata::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the strata library.
#[derive(Debug, Error)]
pub enum Error {
    /// No load parameters were supplied.
    #[error("nil params")]
    NilParameters,

    /// The configured file type has no parser.
    #[error("unsupported configuration file type '{file_type}'")]
    UnsupportedFormat {
        /// The file type as supplied by the caller.
        file_type: String,
    },

    /// The mandatory default configuration file does not exist.
    #[error("error reading \"{name}\" configuration file: {} not found", path.display())]
    MissingDefaultFile {
        /// Base name of the default file.
        name: String,
        /// Full path that was probed.
        path: PathBuf,
    },

    /// The default configuration file exists but could not be parsed.
    #[error("error reading \"{name}\" configuration file {}: {message}", path.display())]
    UnparsableDefaultFile {
        /// Base name of the default file.
        name: String,
        /// Full path of the file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// The environment override file is missing for a non-local environment.
    #[error("error merging \"{environment}\" configuration file: {} not found", path.display())]
    MissingOverrideFile {
        /// The resolved environment name.
        environment: String,
        /// Full path that was probed.
        path: PathBuf,
    },

    /// The environment override file exists but could not be parsed.
    #[error("error merging \"{environment}\" configuration file {}: {message}", path.display())]
    UnparsableOverrideFile {
        /// The resolved environment name.
        environment: String,
        /// Full path of the file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// The secrets file was required but is absent.
    #[error("missing required {}", path.display())]
    MissingRequiredSecretsFile {
        /// Path of the secrets file.
        path: PathBuf,
    },

    /// The secrets file has invalid syntax.
    ///
    /// Only the byte index is reported so that secret values never end up in
    /// error output.
    #[error("failed to parse secrets file at position {error_index}")]
    DotenvParse {
        /// Byte index of the parse failure.
        error_index: usize,
    },

    /// The secrets file could not be read.
    #[error("failed to read secrets file: {kind}")]
    DotenvIo {
        /// Kind of the underlying I/O failure.
        kind: ErrorKind,
    },

    /// Output or argument validation failed.
    #[error("validation error for {field}: {message}")]
    Validation {
        /// The field or input that failed validation.
        field: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration value could not be converted into the requested type.
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reading a single file into the layered store.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file does not exist.
    #[error("{} not found", path.display())]
    Missing {
        /// Path that was probed.
        path: PathBuf,
    },

    /// The file could not be parsed in the configured format.
    #[error("invalid {format} in {}: {message}", path.display())]
    Parse {
        /// Path of the file.
        path: PathBuf,
        /// Format name used to parse.
        format: &'static str,
        /// Parser diagnostic.
        message: String,
    },

    /// The file exists but reading it failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    /// Path of the file the error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Missing { path } | Self::Parse { path, .. } | Self::Io { path, .. } => path,
        }
    }

    /// Check if the error indicates the file does not exist.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    /// Convert into the error reported when the default file fails.
    #[must_use]
    pub fn into_default_error(self, name: &str) -> Error {
        let name = name.to_string();
        match self {
            Self::Missing { path } => Error::MissingDefaultFile { name, path },
            Self::Parse { path, message, .. } => Error::UnparsableDefaultFile {
                name,
                path,
                message,
            },
            Self::Io { path, source } => Error::UnparsableDefaultFile {
                name,
                path,
                message: source.to_string(),
            },
        }
    }

    /// Convert into the error reported when the environment file fails.
    #[must_use]
    pub fn into_override_error(self, environment: &str) -> Error {
        let environment = environment.to_string();
        match self {
            Self::Missing { path } => Error::MissingOverrideFile { environment, path },
            Self::Parse { path, message, .. } => Error::UnparsableOverrideFile {
                environment,
                path,
                message,
            },
            Self::Io { path, source } => Error::UnparsableOverrideFile {
                environment,
                path,
                message: source.to_string(),
            },
        }
    }
}

impl Error {
    /// Check if the error is one of the missing-file variants.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::MissingRequiredSecretsFile { path: PathBuf::from(".env") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MissingDefaultFile { .. }
                | Self::MissingOverrideFile { .. }
                | Self::MissingRequiredSecretsFile { .. }
        )
    }
}
