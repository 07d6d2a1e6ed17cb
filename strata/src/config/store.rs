//! The layered key-value store.
//!
//! Files from one configuration directory are read and merged into a single
//! tree. On top of that tree sit two more layers: values from bound
//! environment variables and explicit overrides set through
//! [`LayeredStore::set`].
//!
//! Precedence, lowest to highest:
//!
//! 1. Files, in the order they were read/merged
//! 2. Bound environment variables (`PREFIX_KEY_PATH`)
//! 3. Explicit overrides

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::accessor;
use crate::config::environment::EnvBinding;
use crate::config::format::FileFormat;
use crate::config::merger::ConfigMerger;
use crate::error::FileError;
use crate::value::{Map, Value};

/// Hierarchical store backed by files in one directory.
///
/// # Examples
///
/// ```no_run
/// use strata::{FileFormat, LayeredStore};
///
/// let mut store = LayeredStore::new("./config", FileFormat::Yaml, "yaml");
/// store.read("default").unwrap();
/// store.merge("production").unwrap();
/// println!("{:?}", store.get("api.port"));
/// ```
#[derive(Debug, Clone)]
pub struct LayeredStore {
    dir: PathBuf,
    format: FileFormat,
    extension: String,
    files: Map,
    overrides: Map,
    binding: Option<EnvBinding>,
    sources: Vec<PathBuf>,
}

impl LayeredStore {
    /// Creates an empty store for `dir`, reading files with `extension`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, format: FileFormat, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            format,
            extension: extension.into(),
            files: Map::new(),
            overrides: Map::new(),
            binding: None,
            sources: Vec::new(),
        }
    }

    /// The directory files are read from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The format files are parsed with.
    #[must_use]
    pub const fn format(&self) -> FileFormat {
        self.format
    }

    /// Path of the file with the given base name.
    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{}", self.extension))
    }

    /// Files that have been loaded so far, in load order.
    #[must_use]
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Initialize the store from the named file, discarding earlier file
    /// contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or unparsable. The
    /// store is left unchanged on error.
    pub fn read(&mut self, name: &str) -> Result<(), FileError> {
        let path = self.file_path(name);
        let map = self.load_file(&path)?;
        log::debug!("read {} keys from {}", map.len(), path.display());
        self.files = map;
        self.sources.clear();
        self.sources.push(path);
        Ok(())
    }

    /// Overlay the named file on the existing contents.
    ///
    /// Overlay values win on collision; keys only present in the existing
    /// contents are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or unparsable. The
    /// store is left unchanged on error.
    pub fn merge(&mut self, name: &str) -> Result<(), FileError> {
        let path = self.file_path(name);
        let map = self.load_file(&path)?;
        log::debug!("merging {} keys from {}", map.len(), path.display());
        ConfigMerger::merge_into(&mut self.files, map);
        self.sources.push(path);
        Ok(())
    }

    /// Read and parse a file without touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Missing`] if the file does not exist,
    /// [`FileError::Io`] on other read failures and [`FileError::Parse`] for
    /// invalid contents.
    pub fn load_file(&self, path: &Path) -> Result<Map, FileError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                FileError::Missing {
                    path: path.to_path_buf(),
                }
            } else {
                FileError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        self.format.parse(path, &contents)
    }

    /// Enable automatic lookup of keys from environment variables.
    pub fn bind_environment(&mut self, binding: EnvBinding) {
        log::debug!("binding environment variables with prefix '{}'", binding.prefix());
        self.binding = Some(binding);
    }

    /// Set an explicit override at a dotted key.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        accessor::insert(&mut self.overrides, key, value.into());
    }

    /// Look up a dotted key across all layers.
    ///
    /// Unlike [`snapshot`](Self::snapshot), this also consults the
    /// environment binding for keys no file defines. Bound values are coerced
    /// with [`Value::coerce`].
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = accessor::lookup(&self.overrides, key) {
            if !value.is_mapping() {
                return Some(value.clone());
            }
        }
        if let Some(raw) = self.binding.as_ref().and_then(|b| b.lookup(key)) {
            return Some(Value::coerce(&raw));
        }
        accessor::lookup(&self.snapshot(), key).cloned()
    }

    /// The full merged tree.
    ///
    /// Bound environment variables apply to every leaf key defined by a file.
    #[must_use]
    pub fn snapshot(&self) -> Map {
        let mut merged = self.files.clone();

        if let Some(binding) = &self.binding {
            for key in accessor::leaf_paths(&self.files) {
                if let Some(raw) = binding.lookup(&key) {
                    log::debug!("{} overridden by {}", key, binding.var_name(&key));
                    accessor::insert(&mut merged, &key, Value::coerce(&raw));
                }
            }
        }

        ConfigMerger::merge_into(&mut merged, self.overrides.clone());
        merged
    }

    /// Dotted paths of every leaf in the snapshot, in key order.
    #[must_use]
    pub fn all_keys(&self) -> Vec<String> {
        accessor::leaf_paths(&self.snapshot())
    }
}
