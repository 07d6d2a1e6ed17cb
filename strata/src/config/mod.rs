//! Layered configuration loading.
//!
//! This module reads a configuration directory into a single merged tree:
//! - A mandatory default file (`default.<ext>`)
//! - An environment file (`<env>.<ext>`) selected by an environment variable
//! - Environment variable overrides, either bound by prefix or mapped through
//!   an indirection file (`environment-variables.<ext>`)
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Indirection-file overrides
//! 2. Prefix-bound environment variables (`PREFIX_KEY_PATH`)
//! 3. Environment file
//! 4. Default file
//!
//! # Examples
//!
//! ```no_run
//! use strata::config::{load, Params};
//!
//! let config = load(Some(&Params::new())).unwrap();
//! println!("{:?}", config.get("api.port"));
//! ```
//!
//! Pinning the environment instead of reading it from `STRATA_ENV`:
//!
//! ```no_run
//! use strata::config::{ConfigLoader, Environment, Params};
//!
//! let config = ConfigLoader::new(Params::new().with_path("deploy/config"))
//!     .with_environment(Environment::new("production"))
//!     .load()
//!     .unwrap();
//! ```

pub mod accessor;
pub mod environment;
pub mod format;
pub mod loader;
pub mod merger;
pub mod overrides;
pub mod params;
pub mod store;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use environment::{EnvBinding, Environment, DEFAULT_ENV_VAR, LOCAL_ENVIRONMENT};
pub use format::FileFormat;
pub use loader::{load, Config, ConfigLoader};
pub use merger::ConfigMerger;
pub use overrides::{apply_env_overrides, EnvOverrides, ENV_OVERRIDES_FILE};
pub use params::{
    Params, DEFAULT_CONFIG_NAME, DEFAULT_CONFIG_PATH, DEFAULT_FILE_TYPE, DOTENV_FILE,
};
pub use store::LayeredStore;
