//! Pure waveform core.
//!
//! Resampling, colour math and frame rendering. Nothing in here keeps state,
//! logs, or draws; the controller and the shell build on top of it.

pub mod color;
pub mod render;
pub mod resample;

pub use color::{lerp, lighten, HexColor};
pub use render::{blend_factor, render, BarStyle, DrawCommand, RenderMode};
pub use resample::resample;
