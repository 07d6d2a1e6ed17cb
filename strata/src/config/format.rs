//! Supported configuration file formats.

use std::fmt;
use std::path::Path;

use crate::config::accessor;
use crate::error::{Error, FileError};
use crate::value::{Map, Value};

/// A configuration file format, selected by file extension.
///
/// # Examples
///
/// ```
/// use strata::FileFormat;
///
/// assert_eq!(FileFormat::from_extension("yml").unwrap(), FileFormat::Yaml);
/// assert_eq!(FileFormat::from_extension("TOML").unwrap(), FileFormat::Toml);
/// assert!(FileFormat::from_extension("xml").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// YAML (`yaml`, `yml`).
    Yaml,
    /// JSON (`json`).
    Json,
    /// TOML (`toml`).
    Toml,
}

impl FileFormat {
    /// Resolve a format from a file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for unknown extensions.
    pub fn from_extension(ext: &str) -> Result<Self, Error> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(Error::UnsupportedFormat {
                file_type: ext.to_string(),
            }),
        }
    }

    /// Human-readable format name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
            Self::Toml => "TOML",
        }
    }

    /// Parse file contents into a top-level mapping.
    ///
    /// An empty document is an empty mapping. A document whose root is not a
    /// mapping is rejected. Keys are lower-cased and literal dotted keys are
    /// expanded into nested mappings (see [`accessor::expand`]).
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Parse`] if the contents are invalid.
    pub fn parse(self, path: &Path, contents: &str) -> Result<Map, FileError> {
        let parse_error = |message: String| FileError::Parse {
            path: path.to_path_buf(),
            format: self.name(),
            message,
        };

        let value = match self {
            Self::Yaml => serde_yaml::from_str::<serde_yaml::Value>(contents)
                .map(Value::from)
                .map_err(|e| parse_error(e.to_string()))?,
            Self::Json => {
                if contents.trim().is_empty() {
                    Value::Null
                } else {
                    serde_json::from_str::<serde_json::Value>(contents)
                        .map(Value::from)
                        .map_err(|e| parse_error(e.to_string()))?
                }
            }
            Self::Toml => toml::from_str::<toml::Table>(contents)
                .map(|table| Value::from(toml::Value::Table(table)))
                .map_err(|e| parse_error(e.to_string()))?,
        };

        match value {
            Value::Mapping(map) => Ok(accessor::expand(map)),
            Value::Null => Ok(Map::new()),
            other => Err(parse_error(format!(
                "expected a mapping at the document root, found {}",
                other.type_name()
            ))),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
