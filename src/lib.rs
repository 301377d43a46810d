//! Waveform bars: renders an amplitude envelope as a row of bars with
//! drag-to-seek and a playback colour sweep.
//!
//! The pure core lives in [`waveform`] (resampling, colour math, frame
//! rendering). [`controller::WaveformBars`] keeps the mutable widget state and
//! draws through any [`controller::Surface`]. Everything else is the
//! command-line shell.

pub mod app;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod playhead;
pub mod raster;
pub mod samples;
pub mod ui;
pub mod waveform;

pub use controller::{pointer_fraction, PointerEvent, Surface, WaveformBars};
pub use error::WaveformError;
pub use raster::Raster;
pub use waveform::{render, resample, BarStyle, DrawCommand, HexColor, RenderMode};
