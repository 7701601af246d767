//! Display Surface Trait
//!
//! Defines the interface between presenters and whatever draws the text.
//! Keeps the presenter independent of font shaping and layout specifics.

use std::cell::RefCell;
use std::rc::Rc;

use bitflags::bitflags;

use crate::foundation::math::Vec3;

bitflags! {
    /// What a surface can do beyond holding a transform
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SurfaceCapabilities: u8 {
        /// Holds literal text content
        const TEXT = 1;
        /// Can hide all but the first N characters of its text
        const VISIBLE_CHARACTER_LIMIT = 1 << 1;
        /// Needs an explicit layout pass after text changes
        const LAYOUT = 1 << 2;
    }
}

/// Shared, single-threaded reference to a surface
pub type SharedSurface = Rc<RefCell<dyn DisplaySurface>>;

/// Backend-agnostic text label interface
pub trait DisplaySurface {
    /// Capabilities of this surface kind
    fn capabilities(&self) -> SurfaceCapabilities;

    /// Human-readable name used in diagnostics
    fn name(&self) -> &str;

    /// Literal text content
    fn text(&self) -> &str;

    /// Replace the literal text content
    fn set_text(&mut self, text: &str);

    /// Limit display to the first `count` characters (`None` shows everything)
    ///
    /// Surfaces without [`SurfaceCapabilities::VISIBLE_CHARACTER_LIMIT`] ignore this.
    fn set_visible_characters(&mut self, count: Option<usize>);

    /// Current visible-character limit
    fn visible_characters(&self) -> Option<usize>;

    /// Text as it currently appears on screen
    fn displayed_text(&self) -> String {
        match self.visible_characters() {
            Some(count) => self.text().chars().take(count).collect(),
            None => self.text().to_string(),
        }
    }

    /// Current opacity in `[0, 1]`
    fn opacity(&self) -> f32;

    /// Set opacity, clamped to `[0, 1]`
    fn set_opacity(&mut self, alpha: f32);

    /// Rebuild layout after a text change
    fn force_layout(&mut self);

    /// Characters the surface can display, as of the last layout pass
    ///
    /// Surfaces without [`SurfaceCapabilities::LAYOUT`] count their text directly.
    fn character_count(&self) -> usize {
        self.text().chars().count()
    }

    /// Position relative to the parent
    fn local_position(&self) -> Vec3;

    /// Move relative to the parent
    fn set_local_position(&mut self, position: Vec3);
}
