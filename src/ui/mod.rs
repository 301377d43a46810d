//! Terminal user interface.

pub mod viewer;

pub use viewer::{StatusLine, ViewerCommand, WaveformViewer};
