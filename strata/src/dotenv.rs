//! Secrets file (`.env`) loading.
//!
//! Responsibilities:
//! - Load `KEY=VALUE` pairs from the secrets file into the process environment.
//! - Enforce the "required" flag when the file is absent.
//!
//! Invariants:
//! - Variables already present in the process environment are never overwritten.
//! - The whole file is parsed before any variable is set; a bad file sets
//!   nothing.
//! - Parse errors carry the byte index only, never the offending line, so
//!   secret values cannot leak into logs.

use std::env;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

/// Load the secrets file at `path` into the process environment.
///
/// Returns the number of variables that were set.
///
/// # Errors
///
/// - [`Error::MissingRequiredSecretsFile`] if `required` is set and the file is absent
/// - [`Error::DotenvParse`] if the file has invalid syntax
/// - [`Error::DotenvIo`] if the file cannot be read
///
/// An absent optional file is not an error.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// let loaded = strata::load_dotenv(Path::new(".env"), false).unwrap();
/// println!("{loaded} variables loaded");
/// ```
pub fn load_dotenv(path: &Path, required: bool) -> Result<usize> {
    if !path.exists() {
        if required {
            return Err(Error::MissingRequiredSecretsFile {
                path: path.to_path_buf(),
            });
        }
        log::debug!("no secrets file at {}", path.display());
        return Ok(0);
    }

    let items = dotenvy::from_path_iter(path)
        .map_err(map_dotenv_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(map_dotenv_error)?;

    let mut loaded = 0;
    for (key, value) in items {
        if env::var_os(&key).is_some() {
            log::debug!("{key} already set, keeping process value");
            continue;
        }
        env::set_var(&key, value);
        loaded += 1;
    }

    log::debug!("loaded {loaded} variables from {}", path.display());
    Ok(loaded)
}

fn map_dotenv_error(err: dotenvy::Error) -> Error {
    match err {
        dotenvy::Error::LineParse(_, error_index) => Error::DotenvParse { error_index },
        dotenvy::Error::Io(io_err) => Error::DotenvIo {
            kind: io_err.kind(),
        },
        _ => Error::DotenvIo {
            kind: ErrorKind::InvalidData,
        },
    }
}
