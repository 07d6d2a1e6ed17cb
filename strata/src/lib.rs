#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # strata
//!
//! A library for loading layered configuration.
//!
//! A configuration directory holds a mandatory default file, optional
//! per-environment files, and an optional indirection file that maps keys to
//! environment variables. [`load`] reads them in order, applies environment
//! overrides, and returns an immutable [`Config`] with dotted-key access.
//!
//! ## Core Types
//!
//! - [`Params`]: Where and how to load from
//! - [`Config`] and [`Value`]: The merged, read-only result
//! - [`ConfigLoader`] and [`LayeredStore`]: The loading pipeline
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```no_run
//! use strata::{load, Params};
//!
//! let params = Params::new().with_path("config").with_file_type("yaml");
//! let config = load(Some(&params)).unwrap();
//!
//! if let Some(host) = config.get("api.host") {
//!     println!("api host: {host}");
//! }
//! ```

pub mod config;
pub mod dotenv;
pub mod error;
pub mod logging;
pub mod output;
pub mod value;

// Re-export key types at crate root for convenience
pub use config::{
    apply_env_overrides, load, Config, ConfigLoader, ConfigMerger, EnvBinding, EnvOverrides,
    Environment, FileFormat, LayeredStore, Params,
};
pub use dotenv::load_dotenv;
pub use error::{Error, FileError, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use output::{OutputFormat, OutputFormatter, ShellType};
pub use value::{Map, Value};
