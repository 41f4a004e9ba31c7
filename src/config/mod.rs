//! Configuration loading and merging
//!
//! Precedence is CLI flags, then the config file, then built-in defaults.
//! The result is one immutable [`Config`](crate::domain::Config) per invocation.

pub mod loader;
pub mod merge;

pub use loader::{load_config, LoadedConfig, CONFIG_RELATIVE_PATH};
pub use merge::{merge_cli_with_config, CliOverrides};
