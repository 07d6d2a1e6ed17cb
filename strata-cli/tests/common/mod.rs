//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary configuration directory
//! - Command builder helpers that isolate the process environment
//! - Test data fixtures

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables the binary reads that must not leak in from the test runner.
const ISOLATED_VARS: &[&str] = &[
    "STRATA_ENV",
    "STRATA_CONFIG_DIR",
    "STRATA_CONFIG_TYPE",
    "STRATA_REQUIRE_DOTENV",
    "STRATA_OUTPUT_FORMAT",
    "STRATA_LOG_MODE",
    "HOST",
    "RATIO",
];

/// Default file used by most tests.
pub const DEFAULT_YAML: &str = "\
api:
  host: 127.0.0.1
  port: 8080
services:
  foo:
    string: foo
    float: 9.81
    enabled: false
";

/// Production overlay used by most tests.
pub const PRODUCTION_YAML: &str = "\
api:
  host: api.example.com
";

/// Indirection file used by most tests.
pub const OVERRIDES_YAML: &str = "\
api.host: HOST
services:
  foo:
    float: RATIO
";

/// Test environment with an isolated working and configuration directory.
///
/// Commands run with the temporary directory as working directory, so the
/// `.env` secrets file is looked up there.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the configuration directory
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create an environment with an empty configuration directory.
    pub fn empty() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let config_dir = temp_path.join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            temp_dir,
            temp_path,
            config_dir,
        }
    }

    /// Create an environment holding the default, production and
    /// indirection fixture files.
    pub fn new() -> Self {
        let env = Self::empty();
        env.write_config("default.yaml", DEFAULT_YAML);
        env.write_config("production.yaml", PRODUCTION_YAML);
        env.write_config("environment-variables.yaml", OVERRIDES_YAML);
        env
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// The process environment is scrubbed of variables the binary reads
    /// and the working directory is the temporary directory.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("strata").expect("Failed to find strata binary");
        cmd.current_dir(&self.temp_path);
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with `--config` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config").arg(&self.config_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file into the configuration directory.
    pub fn write_config(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.config_dir.join(name);
        fs::write(&path, contents).expect("Failed to write config file");
        path
    }

    /// Write the `.env` secrets file into the working directory.
    pub fn write_dotenv(&self, contents: &str) -> PathBuf {
        let path = self.temp_path.join(".env");
        fs::write(&path, contents).expect("Failed to write .env file");
        path
    }

    /// Run `strata get <key>` with extra arguments and return stdout.
    ///
    /// # Panics
    /// Panics if the command fails.
    pub fn get(&self, key: &str, extra: &[&str]) -> String {
        let output = self
            .command()
            .arg("get")
            .arg(key)
            .args(extra)
            .output()
            .expect("Failed to run get command");

        assert!(
            output.status.success(),
            "get failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
