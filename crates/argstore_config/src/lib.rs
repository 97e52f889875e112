//! Parsing and validation of `argstore.toml` store configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`StoreConfig`] describing where dataset stores live and how the fuzz
//! cache treats overwritten entries.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use types::*;
