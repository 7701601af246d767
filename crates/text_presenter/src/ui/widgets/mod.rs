//! UI widgets module
//!
//! Contains the concrete label kinds a presenter can drive.

pub mod core;
pub mod text;

// Re-export core types
pub use core::UIElement;

// Re-export widget types
pub use text::{PlainTextLabel, RichTextLabel};
