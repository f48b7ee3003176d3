/// Frame timing helpers for tracking animation performance.
///
/// Provides an RAII-style frame scope and a running frame timer.
use std::time::Instant;

/// Measures one frame's work; elapsed time is read before the scope is dropped.
pub struct FrameScope {
    start: Instant,
}

impl FrameScope {
    /// Starts measuring.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Gets elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Stops measuring and records into `timer`.
    pub fn finish(self, timer: &mut FrameTimer) -> f64 {
        let elapsed = self.elapsed_ms();
        timer.record(elapsed);
        elapsed
    }
}

/// Simple frame timer for tracking per-frame cost.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last_frame_time_ms: f64,
    total_ms: f64,
    frames: u64,
}

impl FrameTimer {
    /// Creates a new frame timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records frame time in milliseconds.
    pub fn record(&mut self, time_ms: f64) {
        self.last_frame_time_ms = time_ms;
        self.total_ms += time_ms;
        self.frames += 1;
    }

    /// Gets the last recorded frame time.
    pub fn last_frame_time_ms(&self) -> f64 {
        self.last_frame_time_ms
    }

    /// Mean frame time over every recorded frame, 0 before the first one.
    pub fn mean_frame_time_ms(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.total_ms / self.frames as f64
        }
    }

    /// Number of recorded frames.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
