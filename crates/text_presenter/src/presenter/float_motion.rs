//! Floating idle motion
//!
//! A label bobs around its rest position along the world up axis. The phase
//! comes from unscaled time so the motion keeps going while the game is
//! paused.

use crate::config::PresenterConfig;
use crate::foundation::math::{up, Vec3};

/// Vertical oscillation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatMotion {
    /// Whether the motion is applied at all
    pub enabled: bool,
    /// Angular speed (radians per second)
    pub speed: f32,
    /// Peak offset from the rest position
    pub amplitude: f32,
}

impl FloatMotion {
    /// Read the float settings out of a presenter config
    pub fn from_config(config: &PresenterConfig) -> Self {
        Self {
            enabled: config.floating_enabled,
            speed: config.float_speed,
            amplitude: config.float_amplitude,
        }
    }

    /// Vertical offset at `unscaled_time` seconds
    pub fn displacement(&self, unscaled_time: f32) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        self.amplitude * (unscaled_time * self.speed).sin()
    }

    /// Position of a label resting at `base` at `unscaled_time` seconds
    pub fn position(&self, base: Vec3, unscaled_time: f32) -> Vec3 {
        base + up() * self.displacement(unscaled_time)
    }
}
