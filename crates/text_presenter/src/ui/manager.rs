//! Canvas
//!
//! Owns every label surface. Presenters and jobs only hold [`LabelHandle`]s,
//! so destroying a label here is observed by them on their next tick.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::SlotMap;

use super::surface::{DisplaySurface, SharedSurface};
use super::{LabelHandle, LabelId};

/// Label storage keyed by [`LabelId`]
#[derive(Default)]
pub struct Canvas {
    labels: SlotMap<LabelId, SharedSurface>,
}

impl Canvas {
    /// Create an empty canvas
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label and return a handle to it
    pub fn add<S: DisplaySurface + 'static>(&mut self, surface: S) -> LabelHandle {
        let shared: SharedSurface = Rc::new(RefCell::new(surface));
        let id = self.labels.insert(shared.clone());
        LabelHandle::new(id, &shared)
    }

    /// Get a label surface
    pub fn get(&self, id: LabelId) -> Option<SharedSurface> {
        self.labels.get(id).cloned()
    }

    /// Replace a label's text, as unrelated UI code would
    pub fn set_text(&self, id: LabelId, text: &str) -> bool {
        let Some(surface) = self.labels.get(id) else {
            return false;
        };
        surface.borrow_mut().set_text(text);
        true
    }

    /// Destroy a label; returns whether it existed
    pub fn destroy(&mut self, id: LabelId) -> bool {
        self.labels.remove(id).is_some()
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the canvas holds no labels
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
