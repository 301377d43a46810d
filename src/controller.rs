//! Stateful widget controller around the pure waveform core.
//!
//! Owns the mutable state (cached bars, playback progress, hover position,
//! drag state) and delegates every computation to [`crate::waveform`].
//! Drawing goes through the [`Surface`] capability so any backend can host it.

use crate::error::WaveformError;
use crate::waveform::{render, resample, BarStyle, DrawCommand};

/// A 2D target that can execute draw commands.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (f64, f64);
    /// Resets every pixel to the background.
    fn clear(&mut self);
    fn fill_rect(&mut self, command: &DrawCommand);
}

/// Pointer input during a press-and-hold seek gesture, in surface-space x pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { x: f64 },
    Move { x: f64 },
    Release,
}

/// Maps a pointer x coordinate to a fraction of the surface width.
///
/// The pointer is clamped to the surface bounds. A surface without width
/// always maps to 0.
pub fn pointer_fraction(pointer_x: f64, origin_x: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    (pointer_x - origin_x).clamp(0.0, width) / width
}

/// Waveform bar widget state.
pub struct WaveformBars {
    style: BarStyle,
    samples: Option<Vec<f64>>,
    bars: Vec<f64>,
    progress: f64,
    hover_progress: Option<f64>,
    dragging: bool,
}

impl WaveformBars {
    /// Creates a controller with no data loaded.
    ///
    /// # Errors
    /// - If the style fails validation
    pub fn new(style: BarStyle) -> Result<Self, WaveformError> {
        style.validate()?;
        Ok(Self {
            style,
            samples: None,
            bars: Vec::new(),
            progress: 0.0,
            hover_progress: None,
            dragging: false,
        })
    }

    /// Replaces the sample buffer and recomputes the cached bars.
    ///
    /// On failure the previous samples and bars stay in place.
    ///
    /// # Errors
    /// - `EmptySamples` if `samples` is empty
    pub fn set_data(&mut self, samples: Vec<f64>) -> Result<(), WaveformError> {
        let bars = resample(&samples, self.style.bar_count)?;
        tracing::debug!(
            "Resampled {} samples into {} bars",
            samples.len(),
            bars.len()
        );
        self.samples = Some(samples);
        self.bars = bars;
        Ok(())
    }

    /// Changes the bar count, resampling the current data if any.
    ///
    /// # Errors
    /// - `InvalidBarCount` if `bar_count` is zero
    pub fn set_bar_count(&mut self, bar_count: usize) -> Result<(), WaveformError> {
        if bar_count == 0 {
            return Err(WaveformError::InvalidBarCount(bar_count));
        }
        if let Some(samples) = &self.samples {
            self.bars = resample(samples, bar_count)?;
        }
        self.style.bar_count = bar_count;
        tracing::debug!("Bar count set to {bar_count}");
        Ok(())
    }

    pub fn style(&self) -> &BarStyle {
        &self.style
    }

    pub fn bars(&self) -> &[f64] {
        &self.bars
    }

    pub fn has_data(&self) -> bool {
        self.samples.is_some()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn hover_progress(&self) -> Option<f64> {
        self.hover_progress
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Sets playback progress. Values outside `[0, 1]` are kept as given.
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress;
    }

    pub fn set_hover_progress(&mut self, hover: Option<f64>) {
        self.hover_progress = hover;
    }

    /// Moves progress to the hover position and clears the hover.
    ///
    /// Returns the committed progress, or `None` when nothing was hovered.
    pub fn commit_progress(&mut self) -> Option<f64> {
        let committed = self.hover_progress.take()?;
        self.progress = committed;
        tracing::debug!("Seek committed at {committed:.3}");
        Some(committed)
    }

    /// Applies a pointer event against a surface spanning `origin_x..origin_x + width`.
    ///
    /// Moves outside an active drag are ignored. Returns whether the frame changed.
    pub fn handle_pointer(&mut self, event: PointerEvent, origin_x: f64, width: f64) -> bool {
        match event {
            PointerEvent::Press { x } => {
                self.dragging = true;
                self.hover_progress = Some(pointer_fraction(x, origin_x, width));
                true
            }
            PointerEvent::Move { x } if self.dragging => {
                self.hover_progress = Some(pointer_fraction(x, origin_x, width));
                true
            }
            PointerEvent::Move { .. } => false,
            PointerEvent::Release if self.dragging => {
                self.dragging = false;
                self.commit_progress();
                true
            }
            PointerEvent::Release => false,
        }
    }

    /// Draw commands for the current state on a `width` x `height` surface.
    pub fn frame(&self, width: f64, height: f64) -> Vec<DrawCommand> {
        render(
            &self.bars,
            self.progress,
            self.hover_progress,
            width,
            height,
            &self.style,
        )
    }

    /// Clears `surface` and paints the current frame onto it.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (width, height) = surface.size();
        surface.clear();
        for command in self.frame(width, height) {
            surface.fill_rect(&command);
        }
    }
}
