//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads and writes the TOML settings file and
//! supplies defaults on first run. Nothing else in the service touches the
//! file system.

pub mod config;
