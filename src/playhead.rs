//! Simulated playback progress source.
//!
//! Reports how far through the track a virtual playhead is, so the viewer can
//! drive progress without an actual audio player.

use std::time::{Duration, Instant};

/// A pausable clock that sweeps from 0 to 1 over `duration`.
#[derive(Debug, Clone)]
pub struct Playhead {
    duration: Duration,
    /// Position at the moment `started` was taken (or the paused position)
    offset: f64,
    started: Option<Instant>,
}

impl Playhead {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            offset: 0.0,
            started: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.started.is_some()
    }

    /// Progress in `[0, 1]` at `now`.
    pub fn position_at(&self, now: Instant) -> f64 {
        let running = match self.started {
            Some(started) if !self.duration.is_zero() => {
                now.saturating_duration_since(started).as_secs_f64() / self.duration.as_secs_f64()
            }
            _ => 0.0,
        };
        (self.offset + running).clamp(0.0, 1.0)
    }

    /// Elapsed track time at `now`.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.duration.mul_f64(self.position_at(now))
    }

    /// Pauses a running playhead or resumes a paused one.
    ///
    /// Resuming at the end restarts from the beginning.
    pub fn toggle_at(&mut self, now: Instant) {
        if self.is_playing() {
            self.offset = self.position_at(now);
            self.started = None;
            tracing::debug!("Playhead paused at {:.3}", self.offset);
        } else {
            if self.offset >= 1.0 {
                self.offset = 0.0;
            }
            self.started = Some(now);
            tracing::debug!("Playhead started at {:.3}", self.offset);
        }
    }

    /// Jumps to `position`, keeping the play/pause state.
    pub fn seek_at(&mut self, position: f64, now: Instant) {
        self.offset = position.clamp(0.0, 1.0);
        if self.is_playing() {
            self.started = Some(now);
        }
    }

    /// Pauses automatically once the end is reached. Returns true if it stopped.
    pub fn stop_at_end(&mut self, now: Instant) -> bool {
        if self.is_playing() && self.position_at(now) >= 1.0 {
            self.offset = 1.0;
            self.started = None;
            tracing::debug!("Playhead reached the end");
            return true;
        }
        false
    }
}
