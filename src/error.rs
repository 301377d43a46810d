//! Error type for the waveform core.
//!
//! Every variant describes an invalid argument handed to the core. None of them
//! are recoverable inside the call that produced them; callers are expected to
//! validate configuration before constructing a controller.

/// Invalid-argument failures raised by resampling, colour parsing and style validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WaveformError {
    #[error("Sample buffer is empty")]
    EmptySamples,

    #[error("Bar count must be at least 1 (got {0})")]
    InvalidBarCount(usize),

    #[error("Invalid hex color '{value}': {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("Invalid bar style: {0}")]
    InvalidStyle(String),
}
