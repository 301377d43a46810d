//! Application command handlers for wavebars.
//!
//! Each submodule handles one CLI command.
//!
//! # Commands
//! - `view`: Interactive terminal viewer with drag-to-seek
//! - `render`: Headless frame render to JSON or SVG
//! - `config`: Open configuration file in user's preferred editor
//! - `logs`: Display recent log entries

pub mod config;
pub mod logs;
pub mod render;
pub mod view;

pub use config::handle_config;
pub use logs::handle_logs;
pub use render::{handle_render, OutputFormat, RenderRequest};
pub use view::handle_view;
