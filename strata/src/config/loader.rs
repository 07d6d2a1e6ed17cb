//! Top-level load procedure and the immutable configuration handle.
//!
//! Load order:
//!
//! 1. Secrets file (`.env`) into the process environment
//! 2. Default file (`default.<ext>`), mandatory
//! 3. Environment file (`<env>.<ext>`), mandatory unless the environment is `local`
//! 4. Environment binding, when a prefix is configured
//! 5. Indirection overrides (`environment-variables.<ext>`), optional
//!
//! The result is frozen into a [`Config`] that callers share by reference.

use std::path::PathBuf;

use serde::de::DeserializeOwned;

use crate::config::accessor;
use crate::config::environment::{EnvBinding, Environment};
use crate::config::format::FileFormat;
use crate::config::overrides::apply_env_overrides;
use crate::config::params::Params;
use crate::config::store::LayeredStore;
use crate::dotenv::load_dotenv;
use crate::error::{Error, Result};
use crate::value::{Map, Value};

/// Fully merged, read-only configuration.
///
/// # Examples
///
/// ```no_run
/// use strata::{load, Params, Value};
///
/// let config = load(Some(&Params::new().with_path("./config"))).unwrap();
/// if let Some(Value::Integer(port)) = config.get("api.port") {
///     println!("listening on {port}");
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    environment: Environment,
    settings: Map,
    sources: Vec<PathBuf>,
}

impl Config {
    /// Wrap an already merged mapping.
    #[must_use]
    pub fn from_settings(environment: Environment, settings: Map) -> Self {
        Self {
            environment,
            settings,
            sources: Vec::new(),
        }
    }

    /// Look up a dotted path.
    ///
    /// Returns `None` when any segment is absent or when the path continues
    /// past a non-mapping value.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        accessor::lookup(&self.settings, path)
    }

    /// Look up a dotted path and deserialize it into `T`.
    ///
    /// Returns `Ok(None)` when the path is missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Deserialize`] if the value does not fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let Some(value) = self.get(path) else {
            return Ok(None);
        };
        let json = value.to_json()?;
        Ok(Some(serde_json::from_value(json)?))
    }

    /// Deserialize the whole configuration into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Deserialize`] if the configuration does not fit `T`.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T> {
        let json = serde_json::to_value(&self.settings)?;
        Ok(serde_json::from_value(json)?)
    }

    /// The whole merged mapping.
    #[must_use]
    pub fn all_settings(&self) -> &Map {
        &self.settings
    }

    /// Dotted paths of every leaf value, in key order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        accessor::leaf_paths(&self.settings)
    }

    /// The environment the configuration was loaded for.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Files that contributed, in load order.
    #[must_use]
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }
}

/// Load a configuration directory.
///
/// `params` is copied; defaults are applied to the copy only.
///
/// # Errors
///
/// - [`Error::NilParameters`] if `params` is `None`
/// - [`Error::MissingRequiredSecretsFile`] and the dotenv errors from [`load_dotenv`]
/// - [`Error::UnsupportedFormat`] for an unknown file type
/// - [`Error::MissingDefaultFile`] / [`Error::UnparsableDefaultFile`]
/// - [`Error::MissingOverrideFile`] / [`Error::UnparsableOverrideFile`] for
///   non-local environments
pub fn load(params: Option<&Params>) -> Result<Config> {
    let params = params.ok_or(Error::NilParameters)?;
    ConfigLoader::new(params.clone()).load()
}

/// Runs the load procedure for one set of parameters.
///
/// [`load`] is the usual entry point; the loader is useful when the
/// environment name should not come from the process environment.
///
/// # Examples
///
/// ```no_run
/// use strata::{ConfigLoader, Environment, Params};
///
/// let config = ConfigLoader::new(Params::new())
///     .with_environment(Environment::new("staging"))
///     .load()
///     .unwrap();
/// assert_eq!(config.environment().name(), "staging");
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    params: Params,
    environment: Option<Environment>,
}

impl ConfigLoader {
    /// Creates a loader. Defaults are applied to `params`.
    #[must_use]
    pub fn new(params: Params) -> Self {
        let mut params = params;
        params.set_defaults();
        Self {
            params,
            environment: None,
        }
    }

    /// Use a fixed environment instead of resolving it from the process
    /// environment.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// The effective parameters.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Run the full load procedure.
    ///
    /// # Errors
    ///
    /// See [`load`].
    pub fn load(self) -> Result<Config> {
        let params = &self.params;

        load_dotenv(params.dotenv_path(), params.require_dotenv)?;

        let format = FileFormat::from_extension(&params.file_type)?;
        let mut store = LayeredStore::new(&params.path, format, params.file_type.as_str());

        store
            .read(&params.config_name)
            .map_err(|e| e.into_default_error(&params.config_name))?;

        let environment = self
            .environment
            .clone()
            .unwrap_or_else(|| Environment::resolve_from(&params.env_var));
        merge_environment(&mut store, &environment)?;

        if let Some(prefix) = &params.env_prefix {
            store.bind_environment(EnvBinding::new(prefix.as_str()));
        }

        let applied = apply_env_overrides(&mut store);
        log::debug!("applied {applied} environment variable overrides");

        log::info!(
            "loaded configuration for '{environment}' from {}",
            store.dir().display()
        );

        Ok(Config {
            environment,
            settings: store.snapshot(),
            sources: store.sources().to_vec(),
        })
    }
}

/// Merge the environment file, tolerating failure only for `local`.
fn merge_environment(store: &mut LayeredStore, environment: &Environment) -> Result<()> {
    match store.merge(environment.name()) {
        Ok(()) => Ok(()),
        Err(e) if environment.is_local() => {
            if e.is_missing() {
                log::debug!("no '{environment}' configuration file, using defaults only");
            } else {
                log::warn!("ignoring '{environment}' configuration file: {e}");
            }
            Ok(())
        }
        Err(e) => Err(e.into_override_error(environment.name())),
    }
}
