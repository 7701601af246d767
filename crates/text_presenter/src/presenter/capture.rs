//! Line-entry state for input capture
//!
//! [`InputLine`] is the edit buffer behind a capturing label and
//! [`CaretBlink`] is the per-label caret job.

const BACKSPACE: char = '\u{8}';
const DELETE: char = '\u{7f}';

/// Result of feeding one character to an [`InputLine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    /// The buffer changed
    Edited,
    /// The character asks for submission
    Submit,
    /// Nothing happened
    Ignored,
}

/// Single-line edit buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    buffer: String,
}

impl InputLine {
    /// Create an empty line
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one typed character
    ///
    /// Newlines request submission instead of being stored. Backspace and
    /// delete remove the last character; on an empty line they do nothing.
    /// Other control characters are ignored.
    pub fn ingest(&mut self, c: char) -> LineAction {
        match c {
            '\n' | '\r' => LineAction::Submit,
            BACKSPACE | DELETE => {
                if self.buffer.pop().is_some() {
                    LineAction::Edited
                } else {
                    LineAction::Ignored
                }
            }
            c if c.is_control() => LineAction::Ignored,
            c => {
                self.buffer.push(c);
                LineAction::Edited
            }
        }
    }

    /// Text typed so far
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Forget everything typed
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Build the label text for this line
    pub fn compose(&self, prompt: &str, separator: &str, caret: Option<char>) -> String {
        let mut composed = String::with_capacity(prompt.len() + separator.len() + self.buffer.len() + 4);
        composed.push_str(prompt);
        composed.push_str(separator);
        composed.push_str(&self.buffer);
        if let Some(caret) = caret {
            composed.push(caret);
        }
        composed
    }
}

/// Caret visibility toggling on a fixed interval
#[derive(Debug, Clone, PartialEq)]
pub struct CaretBlink {
    interval: f32,
    elapsed: f32,
    visible: bool,
}

impl CaretBlink {
    /// Start with the caret shown
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            visible: true,
        }
    }

    /// Advance by `delta` seconds; returns whether the caret toggled
    pub fn tick(&mut self, delta: f32) -> bool {
        if !(self.interval.is_finite() && self.interval > 0.0) {
            return false;
        }
        self.elapsed += delta;
        let mut toggled = false;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.visible = !self.visible;
            toggled = true;
        }
        toggled
    }

    /// Whether the caret is currently drawn
    pub fn visible(&self) -> bool {
        self.visible
    }
}
