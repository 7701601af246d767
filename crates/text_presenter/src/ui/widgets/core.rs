//! Core UI widget primitives
//!
//! Shared types and structures used by all label widgets.

use crate::foundation::math::Vec3;

/// Base element properties
#[derive(Debug, Clone, PartialEq)]
pub struct UIElement {
    /// Position relative to the parent
    pub local_position: Vec3,

    /// Opacity in `[0, 1]`
    pub opacity: f32,
}

impl Default for UIElement {
    fn default() -> Self {
        Self {
            local_position: Vec3::zeros(),
            opacity: 1.0,
        }
    }
}

impl UIElement {
    /// Create an element at a position
    pub fn at(local_position: Vec3) -> Self {
        Self {
            local_position,
            ..Self::default()
        }
    }

    /// Set opacity, clamped to `[0, 1]`
    pub fn set_opacity(&mut self, alpha: f32) {
        self.opacity = alpha.clamp(0.0, 1.0);
    }
}
