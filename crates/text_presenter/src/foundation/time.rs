//! Time management utilities
//!
//! Every animation in the crate is advanced with a [`FrameTime`] snapshot.
//! The snapshot carries both the scaled delta (affected by the global time
//! scale, which is zero while the game is paused) and the unscaled delta,
//! which keeps running regardless.

use std::time::Instant;

/// Per-frame timing snapshot handed to every tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Scaled time since the last frame in seconds
    pub delta: f32,
    /// Real time since the last frame in seconds
    pub unscaled_delta: f32,
    /// Scaled time since the timer started
    pub total: f32,
    /// Real time since the timer started
    pub unscaled_total: f32,
}

impl FrameTime {
    /// Build a snapshot where scaled and unscaled clocks agree
    pub fn fixed(delta: f32, total: f32) -> Self {
        Self {
            delta,
            unscaled_delta: delta,
            total,
            unscaled_total: total,
        }
    }

    /// Pick the delta matching the requested clock
    pub fn delta_for(&self, unscaled: bool) -> f32 {
        if unscaled {
            self.unscaled_delta
        } else {
            self.delta
        }
    }
}

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    time_scale: f32,
    frame: FrameTime,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            time_scale: 1.0,
            frame: FrameTime::default(),
            frame_count: 0,
        }
    }

    /// Update the timer from the wall clock (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(elapsed);
    }

    /// Step the timer by a fixed amount of real time
    ///
    /// Used for fixed-timestep loops and deterministic tests.
    pub fn advance(&mut self, unscaled_delta: f32) {
        let unscaled_delta = unscaled_delta.max(0.0);
        let delta = unscaled_delta * self.time_scale;
        self.frame = FrameTime {
            delta,
            unscaled_delta,
            total: self.frame.total + delta,
            unscaled_total: self.frame.unscaled_total + unscaled_delta,
        };
        self.frame_count += 1;
    }

    /// Set the global time scale (0 pauses scaled time)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Current global time scale
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Timing snapshot of the most recent frame
    pub fn frame(&self) -> FrameTime {
        self.frame
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
