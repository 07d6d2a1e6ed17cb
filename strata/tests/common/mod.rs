//! Common test utilities for integration tests.
//!
//! This module provides fixture paths, temporary configuration directories,
//! and environment guards for testing the strata library.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use strata::Params;
use tempfile::TempDir;

/// Path to a checked-in fixture directory under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Parameters for a directory, with the secrets file pinned inside a
/// directory that has none so the working directory never leaks in.
#[allow(dead_code)]
pub fn params_for(dir: &Path, secrets_dir: &TempDir) -> Params {
    Params::new()
        .with_path(dir)
        .with_dotenv_path(secrets_dir.path().join(".env"))
}

/// Builder for temporary configuration directories.
///
/// # Examples
///
/// ```no_run
/// # use common::ConfigDir;
/// let dir = ConfigDir::new()
///     .with_file("default.yaml", "api:\n  port: 8080\n")
///     .build();
/// ```
#[allow(dead_code)]
pub struct ConfigDir {
    files: Vec<(String, String)>,
}

#[allow(dead_code)]
impl ConfigDir {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a file relative to the directory root.
    pub fn with_file(mut self, name: &str, contents: &str) -> Self {
        self.files.push((name.to_string(), contents.to_string()));
        self
    }

    /// Writes every file into a fresh temporary directory.
    pub fn build(self) -> TempDir {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        for (name, contents) in self.files {
            let path = temp_dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("failed to create fixture dir");
            }
            fs::write(path, contents).expect("failed to write fixture file");
        }
        temp_dir
    }
}

/// RAII guard for setting and restoring environment variables.
///
/// Tests using it must be marked `#[serial]`.
#[allow(dead_code)]
pub struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    /// Sets `key` to `value` until the guard is dropped.
    pub fn set(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    /// Removes `key` until the guard is dropped.
    pub fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(value) => env::set_var(&self.key, value),
            None => env::remove_var(&self.key),
        }
    }
}
