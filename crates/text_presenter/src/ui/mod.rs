//! UI System Module
//!
//! Label storage and the display-surface boundary the presenter drives.
//!
//! Architecture:
//! - Canvas: owns every label surface and issues stable [`LabelId`]s
//! - surface: the [`DisplaySurface`] trait and its capability flags
//! - widgets/: concrete label kinds (rich text, plain text)

pub mod manager;
pub mod surface;
pub mod widgets;

pub use manager::Canvas;
pub use surface::{DisplaySurface, SharedSurface, SurfaceCapabilities};

// Re-export widgets
pub use widgets::{PlainTextLabel, RichTextLabel, UIElement};

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

slotmap::new_key_type! {
    /// Unique identifier for a label on a [`Canvas`]
    pub struct LabelId;
}

/// Non-owning reference to a label surface
///
/// The canvas owns the surface. Once the label is destroyed the handle stops
/// upgrading, which is how running jobs notice the label is gone.
#[derive(Clone)]
pub struct LabelHandle {
    id: LabelId,
    surface: Weak<RefCell<dyn DisplaySurface>>,
}

impl LabelHandle {
    /// Create a handle for a surface stored under `id`
    pub fn new(id: LabelId, surface: &SharedSurface) -> Self {
        Self {
            id,
            surface: Rc::downgrade(surface),
        }
    }

    /// Stable identity of the label
    pub fn id(&self) -> LabelId {
        self.id
    }

    /// Strong reference to the surface, if it still exists
    pub fn upgrade(&self) -> Option<SharedSurface> {
        self.surface.upgrade()
    }

    /// Whether the label still exists
    pub fn is_alive(&self) -> bool {
        self.surface.strong_count() > 0
    }
}

impl fmt::Debug for LabelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelHandle")
            .field("id", &self.id)
            .field("alive", &self.is_alive())
            .finish()
    }
}
