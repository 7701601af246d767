//! Typewriter reveal job
//!
//! A [`RevealJob`] discloses a string a few characters per tick. How the
//! partial text reaches the screen depends on the surface:
//!
//! - surfaces with a visible-character limit get the whole text once and a
//!   rising limit
//! - plain surfaces get successive prefixes of the text
//!
//! The strategy is chosen once when the job starts.

use log::{trace, warn};

use super::JobStep;
use crate::config::PresenterConfig;
use crate::foundation::time::FrameTime;
use crate::ui::{DisplaySurface, LabelHandle, LabelId, SurfaceCapabilities};

/// Parameters of a single reveal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSettings {
    /// Reveal rate; zero or less reveals instantly
    pub chars_per_second: f32,
    /// Advance on real time instead of scaled game time
    pub use_unscaled_time: bool,
    /// Clear the label before revealing
    pub reset_before_start: bool,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            chars_per_second: 30.0,
            use_unscaled_time: true,
            reset_before_start: true,
        }
    }
}

impl RevealSettings {
    /// Read the reveal settings out of a presenter config
    pub fn from_config(config: &PresenterConfig) -> Self {
        Self {
            chars_per_second: config.chars_per_second,
            use_unscaled_time: config.use_unscaled_time,
            reset_before_start: config.reset_content_before_reveal,
        }
    }

    /// Whether a text of `total` characters would be shown in one go
    fn is_instant(&self, total: usize) -> bool {
        let cps = self.chars_per_second;
        let duration = total as f32 / cps;
        cps.is_nan() || cps <= 0.0 || duration.is_nan() || duration <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealMode {
    CharacterLimit,
    Prefix,
}

impl RevealMode {
    fn select(capabilities: SurfaceCapabilities) -> Option<Self> {
        if !capabilities.contains(SurfaceCapabilities::TEXT) {
            None
        } else if capabilities.contains(SurfaceCapabilities::VISIBLE_CHARACTER_LIMIT) {
            Some(Self::CharacterLimit)
        } else {
            Some(Self::Prefix)
        }
    }
}

/// First `chars` characters of `text`
fn prefix(text: &str, chars: usize) -> &str {
    text.char_indices()
        .nth(chars)
        .map_or(text, |(index, _)| &text[..index])
}

/// Progressive reveal of one string on one label
pub struct RevealJob {
    label: LabelHandle,
    full_text: String,
    mode: RevealMode,
    settings: RevealSettings,

    total: usize,
    visible: usize,
    elapsed: f32,
    complete: bool,
}

impl RevealJob {
    /// Prepare the label and start revealing `text`
    ///
    /// Returns `None` when the label no longer exists or cannot show text;
    /// the latter is logged as a warning. An instant reveal comes back
    /// already complete.
    pub fn start(label: &LabelHandle, text: &str, settings: RevealSettings) -> Option<Self> {
        let shared = label.upgrade()?;
        let mut surface = shared.borrow_mut();

        let Some(mode) = RevealMode::select(surface.capabilities()) else {
            warn!("Typewriter: '{}' has no text capability, reveal dropped", surface.name());
            return None;
        };

        if settings.reset_before_start {
            surface.set_text("");
        }

        let total = if mode == RevealMode::CharacterLimit {
            surface.set_text(text);
            surface.force_layout();
            surface.set_visible_characters(Some(0));
            surface.character_count()
        } else {
            text.chars().count()
        };

        let mut job = Self {
            label: label.clone(),
            full_text: text.to_string(),
            mode,
            settings,
            total,
            visible: 0,
            elapsed: 0.0,
            complete: false,
        };

        if settings.is_instant(total) {
            job.finish(&mut *surface);
        }
        Some(job)
    }

    /// Advance the reveal by one frame
    pub fn tick(&mut self, time: &FrameTime) -> JobStep {
        if self.complete {
            return JobStep::Completed;
        }
        let Some(shared) = self.label.upgrade() else {
            trace!("Typewriter: label {:?} destroyed mid-reveal", self.label.id());
            return JobStep::Abandoned;
        };
        let mut surface = shared.borrow_mut();

        self.elapsed += time.delta_for(self.settings.use_unscaled_time);
        let target = ((self.elapsed * self.settings.chars_per_second).floor() as usize).min(self.total);
        if target > self.visible {
            self.visible = target;
            self.show(&mut *surface);
        }

        if self.visible >= self.total {
            self.finish(&mut *surface);
            JobStep::Completed
        } else {
            JobStep::Running
        }
    }

    fn show(&self, surface: &mut dyn DisplaySurface) {
        match self.mode {
            RevealMode::CharacterLimit => surface.set_visible_characters(Some(self.visible)),
            RevealMode::Prefix => surface.set_text(prefix(&self.full_text, self.visible)),
        }
    }

    fn finish(&mut self, surface: &mut dyn DisplaySurface) {
        self.visible = self.total;
        self.complete = true;
        match self.mode {
            RevealMode::CharacterLimit => surface.set_visible_characters(None),
            RevealMode::Prefix => surface.set_text(&self.full_text),
        }
    }

    /// Label being revealed
    pub fn label_id(&self) -> LabelId {
        self.label.id()
    }

    /// Text being revealed
    pub fn text(&self) -> &str {
        &self.full_text
    }

    /// Characters shown so far
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Characters in the full text
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether every character has been shown
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
