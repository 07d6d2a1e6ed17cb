//! Environment-variable overrides through an indirection file.
//!
//! The indirection file (`environment-variables.<ext>`) maps configuration
//! keys to environment variable names:
//!
//! ```yaml
//! api:
//!   host: HOST
//! services.foo.float: FLOAT
//! ```
//!
//! Nested mappings and literal dotted keys are equivalent. For every mapped
//! key whose variable is set, the coerced variable value replaces whatever
//! the files defined. A missing or broken indirection file disables this
//! step without failing the load.

use std::collections::BTreeMap;
use std::env;

use crate::config::accessor;
use crate::config::store::LayeredStore;
use crate::value::Value;

/// Base name of the indirection file.
pub const ENV_OVERRIDES_FILE: &str = "environment-variables";

/// Mapping from dotted configuration keys to environment variable names.
///
/// # Examples
///
/// ```
/// use strata::EnvOverrides;
///
/// let overrides = EnvOverrides::from_pairs([("api.host", "HOST")]);
/// assert_eq!(overrides.var_for("api.host"), Some("HOST"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    vars: BTreeMap<String, String>,
}

impl EnvOverrides {
    /// Build a mapping from explicit key/variable pairs.
    ///
    /// Keys are lower-cased; variable names are kept as given.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into().to_lowercase(), v.into()))
                .collect(),
        }
    }

    /// Read the indirection file from the store's directory.
    ///
    /// Returns `None` if the file is missing or cannot be parsed. Entries
    /// whose value is not a scalar are skipped.
    #[must_use]
    pub fn load(store: &LayeredStore) -> Option<Self> {
        let path = store.file_path(ENV_OVERRIDES_FILE);
        let map = match store.load_file(&path) {
            Ok(map) => map,
            Err(e) => {
                log::debug!("no environment variable overrides: {e}");
                return None;
            }
        };

        let mut vars = BTreeMap::new();
        for (key, value) in accessor::flatten(&map) {
            match value.scalar_string() {
                Some(var) if !var.is_empty() => {
                    vars.insert(key, var);
                }
                _ => log::debug!("ignoring non-scalar override entry for {key}"),
            }
        }

        log::debug!("loaded {} override mappings from {}", vars.len(), path.display());
        Some(Self { vars })
    }

    /// The environment variable mapped to a key.
    #[must_use]
    pub fn var_for(&self, key: &str) -> Option<&str> {
        self.vars.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Number of mapped keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no keys are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Apply every mapping whose variable is set.
    ///
    /// Variables holding non-UTF-8 data are skipped. Returns the number of
    /// keys overridden.
    pub fn apply(&self, store: &mut LayeredStore) -> usize {
        let mut applied = 0;
        for (key, var) in &self.vars {
            let Some(raw) = env::var_os(var) else {
                continue;
            };
            let Some(raw) = raw.to_str() else {
                log::debug!("skipping ${var} for {key}: value is not valid UTF-8");
                continue;
            };
            let value = Value::coerce(raw);
            log::debug!("{key} overridden by ${var} ({})", value.type_name());
            store.set(key, value);
            applied += 1;
        }
        applied
    }
}

/// Load the indirection file next to the store's files and apply it.
///
/// Returns the number of keys overridden; zero when the file is absent.
pub fn apply_env_overrides(store: &mut LayeredStore) -> usize {
    EnvOverrides::load(store).map_or(0, |overrides| overrides.apply(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::format::FileFormat;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &str)]) -> (TempDir, LayeredStore) {
        let temp_dir = TempDir::new().unwrap();
        for (name, contents) in files {
            fs::write(temp_dir.path().join(name), contents).unwrap();
        }
        let mut store = LayeredStore::new(temp_dir.path(), FileFormat::Yaml, "yaml");
        store.read("default").unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let (_dir, store) = store_with(&[("default.yaml", "a: 1\n")]);
        assert!(EnvOverrides::load(&store).is_none());
    }

    #[test]
    fn test_load_unparsable_file_is_none() {
        let (_dir, store) = store_with(&[
            ("default.yaml", "a: 1\n"),
            ("environment-variables.yaml", "invalid: yaml: syntax:"),
        ]);
        assert!(EnvOverrides::load(&store).is_none());
    }

    #[test]
    fn test_load_nested_and_dotted_keys() {
        let (_dir, store) = store_with(&[
            ("default.yaml", "a: 1\n"),
            (
                "environment-variables.yaml",
                "api:\n  host: HOST\nservices.foo.float: FLOAT\nbad: [1, 2]\n",
            ),
        ]);
        let overrides = EnvOverrides::load(&store).unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.var_for("api.host"), Some("HOST"));
        assert_eq!(overrides.var_for("services.foo.float"), Some("FLOAT"));
        assert_eq!(overrides.var_for("bad"), None);
    }

    #[test]
    #[serial]
    fn test_apply_coerces_values() {
        let (_dir, mut store) = store_with(&[(
            "default.yaml",
            "api:\n  host: 127.0.0.1\n  port: 8080\n  debug: false\nratio: 1.0\n",
        )]);
        let overrides = EnvOverrides::from_pairs([
            ("api.host", "_STRATA_OV_HOST"),
            ("api.port", "_STRATA_OV_PORT"),
            ("api.debug", "_STRATA_OV_DEBUG"),
            ("ratio", "_STRATA_OV_RATIO"),
        ]);

        env::set_var("_STRATA_OV_HOST", "0.0.0.0");
        env::set_var("_STRATA_OV_PORT", "9090");
        env::set_var("_STRATA_OV_DEBUG", "true");
        env::set_var("_STRATA_OV_RATIO", "10.5");

        assert_eq!(overrides.apply(&mut store), 4);
        assert_eq!(store.get("api.host"), Some(Value::from("0.0.0.0")));
        assert_eq!(store.get("api.port"), Some(Value::Integer(9090)));
        assert_eq!(store.get("api.debug"), Some(Value::Bool(true)));
        assert_eq!(store.get("ratio"), Some(Value::Float(10.5)));

        for var in [
            "_STRATA_OV_HOST",
            "_STRATA_OV_PORT",
            "_STRATA_OV_DEBUG",
            "_STRATA_OV_RATIO",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_apply_skips_unset_variables() {
        let (_dir, mut store) = store_with(&[("default.yaml", "api:\n  host: 127.0.0.1\n")]);
        env::remove_var("_STRATA_OV_UNSET");
        let overrides = EnvOverrides::from_pairs([("api.host", "_STRATA_OV_UNSET")]);
        assert_eq!(overrides.apply(&mut store), 0);
        assert_eq!(store.get("api.host"), Some(Value::from("127.0.0.1")));
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_apply_skips_non_utf8_values() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (_dir, mut store) = store_with(&[("default.yaml", "api:\n  host: 127.0.0.1\n")]);
        env::set_var("_STRATA_OV_BYTES", OsStr::from_bytes(&[0x68, 0xff, 0x6f]));
        let overrides = EnvOverrides::from_pairs([("api.host", "_STRATA_OV_BYTES")]);
        assert_eq!(overrides.apply(&mut store), 0);
        assert_eq!(store.get("api.host"), Some(Value::from("127.0.0.1")));
        env::remove_var("_STRATA_OV_BYTES");
    }

    #[test]
    #[serial]
    fn test_mixed_case_keys_override_the_same_entry() {
        let (_dir, mut store) = store_with(&[("default.yaml", "API:\n  Host: 127.0.0.1\n")]);
        let overrides = EnvOverrides::from_pairs([("Api.HOST", "_STRATA_OV_CASE")]);
        assert_eq!(overrides.var_for("api.host"), Some("_STRATA_OV_CASE"));

        env::set_var("_STRATA_OV_CASE", "0.0.0.0");
        assert_eq!(overrides.apply(&mut store), 1);
        assert_eq!(store.all_keys(), vec!["api.host"]);
        assert_eq!(store.get("api.host"), Some(Value::from("0.0.0.0")));
        env::remove_var("_STRATA_OV_CASE");
    }

    #[test]
    #[serial]
    fn test_apply_env_overrides_from_file() {
        let (_dir, mut store) = store_with(&[
            ("default.yaml", "api:\n  host: 127.0.0.1\n"),
            ("environment-variables.yaml", "api.host: _STRATA_OV_FILE_HOST\n"),
        ]);
        env::set_var("_STRATA_OV_FILE_HOST", "192.168.0.1");
        assert_eq!(apply_env_overrides(&mut store), 1);
        assert_eq!(store.get("api.host"), Some(Value::from("192.168.0.1")));
        env::remove_var("_STRATA_OV_FILE_HOST");
    }

    #[test]
    fn test_apply_env_overrides_without_file() {
        let (_dir, mut store) = store_with(&[("default.yaml", "a: 1\n")]);
        assert_eq!(apply_env_overrides(&mut store), 0);
    }
}
