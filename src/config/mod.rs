//! Configuration management for wavebars.
//!
//! Bar style and viewer settings are loaded from a TOML file in the user's
//! config directory. A missing file means defaults.

pub mod file;

pub use file::{get_config_path, ViewerConfig, WavebarsConfig};
