//! Frame clock for the host update pump.

use std::time::{Duration, Instant};

/// Where frame deltas come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockSource {
    /// Measure wall-clock time between frames.
    Realtime,
    /// Advance by a constant step every frame (headless runs, tests).
    Fixed(Duration),
}

/// Produces per-frame deltas for the cooperative, frame-stepped systems.
#[derive(Debug)]
pub struct FrameClock {
    source: ClockSource,
    last_frame: Instant,
    /// Scaled delta of the last frame.
    delta: Duration,
    /// Sum of scaled deltas since start.
    elapsed: Duration,
    frame_count: u64,
    /// Upper bound on a single delta so a hitch cannot teleport falling bodies.
    max_delta: Duration,
    time_scale: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::realtime()
    }
}

impl FrameClock {
    /// Wall-clock driven clock.
    pub fn realtime() -> Self {
        Self::with_source(ClockSource::Realtime)
    }

    /// Clock advancing by a constant step each frame.
    pub fn fixed(step: Duration) -> Self {
        Self::with_source(ClockSource::Fixed(step))
    }

    /// Fixed-step clock at the given rate in Hz.
    pub fn fixed_rate(hz: f64) -> Self {
        Self::fixed(Duration::from_secs_f64(1.0 / hz.max(1.0)))
    }

    fn with_source(source: ClockSource) -> Self {
        Self {
            source,
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            max_delta: Duration::from_millis(100),
            time_scale: 1.0,
        }
    }

    /// Start a new frame and return its delta in seconds.
    pub fn advance(&mut self) -> f32 {
        let raw = match self.source {
            ClockSource::Realtime => {
                let now = Instant::now();
                let raw = now - self.last_frame;
                self.last_frame = now;
                raw
            }
            ClockSource::Fixed(step) => step,
        };
        let clamped = if raw > self.max_delta {
            log::debug!(
                "Frame {} took {:.3}s, clamping to {:.3}s",
                self.frame_count,
                raw.as_secs_f32(),
                self.max_delta.as_secs_f32()
            );
            self.max_delta
        } else {
            raw
        };
        self.delta = clamped.mul_f32(self.time_scale.max(0.0));
        self.elapsed += self.delta;
        self.frame_count += 1;
        self.delta.as_secs_f32()
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn source(&self) -> ClockSource {
        self.source
    }

    /// Slow-mo / fast-forward multiplier applied to every delta. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale;
    }

    pub fn set_max_delta(&mut self, max: Duration) {
        self.max_delta = max;
    }
}
