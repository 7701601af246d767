//! Text widgets - labels and text display
//!
//! Two label kinds exist. [`RichTextLabel`] keeps its whole text and can hide
//! trailing characters, the way mesh-based text components work.
//! [`PlainTextLabel`] only knows its literal string, so anything that wants
//! partial display has to write a shorter string into it.

use super::core::UIElement;
use crate::foundation::math::Vec3;
use crate::ui::surface::{DisplaySurface, SurfaceCapabilities};

/// Mesh-style text label supporting a visible-character limit
#[derive(Debug, Clone)]
pub struct RichTextLabel {
    /// Base element properties
    pub element: UIElement,

    /// Name used in diagnostics
    pub name: String,

    text: String,
    visible_characters: Option<usize>,

    /// Character count as of the last layout pass
    character_count: usize,
}

impl RichTextLabel {
    /// Create a label showing `text`
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            element: UIElement::default(),
            name: "rich_text".to_string(),
            character_count: text.chars().count(),
            text,
            visible_characters: None,
        }
    }

    /// Set the diagnostic name (builder pattern)
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the initial position (builder pattern)
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.element.local_position = position;
        self
    }
}

impl DisplaySurface for RichTextLabel {
    fn capabilities(&self) -> SurfaceCapabilities {
        SurfaceCapabilities::TEXT
            | SurfaceCapabilities::VISIBLE_CHARACTER_LIMIT
            | SurfaceCapabilities::LAYOUT
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    fn set_visible_characters(&mut self, count: Option<usize>) {
        self.visible_characters = count;
    }

    fn visible_characters(&self) -> Option<usize> {
        self.visible_characters
    }

    fn opacity(&self) -> f32 {
        self.element.opacity
    }

    fn set_opacity(&mut self, alpha: f32) {
        self.element.set_opacity(alpha);
    }

    fn force_layout(&mut self) {
        self.character_count = self.text.chars().count();
    }

    fn character_count(&self) -> usize {
        self.character_count
    }

    fn local_position(&self) -> Vec3 {
        self.element.local_position
    }

    fn set_local_position(&mut self, position: Vec3) {
        self.element.local_position = position;
    }
}

/// Plain string label without partial-display support
#[derive(Debug, Clone)]
pub struct PlainTextLabel {
    /// Base element properties
    pub element: UIElement,

    /// Name used in diagnostics
    pub name: String,

    text: String,
}

impl PlainTextLabel {
    /// Create a label showing `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            element: UIElement::default(),
            name: "plain_text".to_string(),
            text: text.into(),
        }
    }

    /// Set the diagnostic name (builder pattern)
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the initial position (builder pattern)
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.element.local_position = position;
        self
    }
}

impl DisplaySurface for PlainTextLabel {
    fn capabilities(&self) -> SurfaceCapabilities {
        SurfaceCapabilities::TEXT
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    fn set_visible_characters(&mut self, _count: Option<usize>) {}

    fn visible_characters(&self) -> Option<usize> {
        None
    }

    fn opacity(&self) -> f32 {
        self.element.opacity
    }

    fn set_opacity(&mut self, alpha: f32) {
        self.element.set_opacity(alpha);
    }

    fn force_layout(&mut self) {}

    fn local_position(&self) -> Vec3 {
        self.element.local_position
    }

    fn set_local_position(&mut self, position: Vec3) {
        self.element.local_position = position;
    }
}
