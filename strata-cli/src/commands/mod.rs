//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `get`: Print the value at a dotted key
//! - `dump`: Print the whole merged configuration
//! - `keys`: List every leaf key
//! - `env`: Show the resolved environment and contributing files
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod dump;
pub mod env;
pub mod get;
pub mod keys;

pub use completions::CompletionsCommand;
pub use dump::DumpCommand;
pub use env::EnvCommand;
pub use get::GetCommand;
pub use keys::KeysCommand;
