//! Text presenter
//!
//! [`TextPresenter`] is the per-label controller. Each tick it:
//!
//! 1. applies floating motion (independent of everything else)
//! 2. handles focus and keyboard device changes
//! 3. starts or restarts a typewriter reveal when content is new
//! 4. advances running reveal and fade jobs
//! 5. enters input capture once a prompt is revealed, if configured
//! 6. drains typed characters and redraws the input line
//!
//! ## States
//!
//! ```text
//! Idle -> Revealing -> Revealed -> Capturing -> Submitted
//!             ^            |
//!             +------------+  (content changed)
//! ```
//!
//! Content-change detection is off while capturing or submitted, so the
//! label's own echo of `prompt + line` is never mistaken for new content.

pub mod capture;
pub mod fade;
pub mod float_motion;
pub mod typewriter;

#[cfg(test)]
mod tests;

pub use capture::{CaretBlink, InputLine, LineAction};
pub use fade::FadeJob;
pub use float_motion::FloatMotion;
pub use typewriter::{RevealJob, RevealSettings};

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::{debug, info, trace};

use crate::config::PresenterConfig;
use crate::events::{Event, EventArg, EventSystem, EventType, ARG_LABEL, ARG_TEXT};
use crate::foundation::collections::JobRegistry;
use crate::foundation::math::Vec3;
use crate::foundation::time::FrameTime;
use crate::input::{
    DeviceKind, InputSource, LifecycleEvent, LifecycleQueue, ListenerId, TextQueue,
};
use crate::ui::{LabelHandle, LabelId};

/// Outcome of advancing a timed job by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStep {
    /// More ticks needed
    Running,
    /// Reached its end state
    Completed,
    /// Its label no longer exists
    Abandoned,
}

/// Where a presenter is in its reveal/capture cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterState {
    /// Activated, nothing revealed yet
    Idle,
    /// A reveal of the current content is running
    Revealing,
    /// Content fully shown
    Revealed,
    /// Typed characters are being collected
    Capturing,
    /// Input was submitted; terminal until deactivation
    Submitted,
}

/// Reasons a manual capture request is refused
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterError {
    /// The presenter is not active
    #[error("presenter is not active")]
    Inactive,

    /// The label is not configured as an input field
    #[error("label is not an input field")]
    NotInputField,

    /// The prompt has not finished revealing
    #[error("reveal has not completed")]
    RevealIncomplete,

    /// Capture is already running
    #[error("input capture already active")]
    AlreadyCapturing,

    /// Input was already submitted
    #[error("input already submitted")]
    InputLocked,

    /// There is no capture to submit
    #[error("input capture is not active")]
    NotCapturing,
}

/// Animated presentation controller for one label
pub struct TextPresenter {
    label: LabelHandle,
    config: PresenterConfig,
    input: Rc<RefCell<dyn InputSource>>,
    events: Rc<RefCell<EventSystem>>,
    listener: ListenerId,

    active: bool,
    state: PresenterState,
    float_motion: FloatMotion,
    base_position: Vec3,
    last_known_content: String,

    reveal_jobs: JobRegistry<LabelId, RevealJob>,
    caret_jobs: JobRegistry<LabelId, CaretBlink>,
    fade_jobs: JobRegistry<LabelId, FadeJob>,

    line: InputLine,
    text_queue: TextQueue,
    lifecycle_queue: LifecycleQueue,

    /// Unscaled time of the latest tick, used for event timestamps
    clock: f32,
}

impl TextPresenter {
    /// Create an inactive presenter for `label`
    pub fn new(
        label: LabelHandle,
        config: PresenterConfig,
        input: Rc<RefCell<dyn InputSource>>,
        events: Rc<RefCell<EventSystem>>,
    ) -> Self {
        Self {
            float_motion: FloatMotion::from_config(&config),
            label,
            config,
            input,
            events,
            listener: ListenerId::next(),
            active: false,
            state: PresenterState::Idle,
            base_position: Vec3::zeros(),
            last_known_content: String::new(),
            reveal_jobs: JobRegistry::new(),
            caret_jobs: JobRegistry::new(),
            fade_jobs: JobRegistry::new(),
            line: InputLine::new(),
            text_queue: Rc::new(RefCell::new(VecDeque::new())),
            lifecycle_queue: Rc::new(RefCell::new(VecDeque::new())),
            clock: 0.0,
        }
    }

    /// Bring the presenter up for a label that just became visible
    ///
    /// Captures the float rest position and the content snapshot and starts
    /// listening for focus and device changes. Calling it on an active
    /// presenter does nothing.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.state = PresenterState::Idle;
        self.line.clear();
        self.text_queue.borrow_mut().clear();
        self.lifecycle_queue.borrow_mut().clear();

        if let Some(shared) = self.label.upgrade() {
            let mut surface = shared.borrow_mut();
            self.base_position = surface.local_position();
            surface.text().clone_into(&mut self.last_known_content);
            surface.set_visible_characters(None);
        }

        let listener = self.listener;
        let mut input = self.input.borrow_mut();
        input.unsubscribe_lifecycle(listener);
        input.subscribe_lifecycle(listener, self.lifecycle_queue.clone());
        drop(input);

        debug!("Presenter {:?}: activated", self.label.id());
    }

    /// Tear the presenter down for a label that became hidden
    ///
    /// Cancels every job, drops every subscription and puts back the content
    /// the presenter was showing before it started editing the label. Safe to
    /// call on an inactive presenter.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }

        let restore_text = matches!(
            self.state,
            PresenterState::Revealing | PresenterState::Capturing | PresenterState::Submitted
        );
        self.reveal_jobs.clear();
        self.caret_jobs.clear();
        self.fade_jobs.clear();

        let listener = self.listener;
        {
            let mut input = self.input.borrow_mut();
            input.unsubscribe_text(listener);
            input.unsubscribe_lifecycle(listener);
        }

        if let Some(shared) = self.label.upgrade() {
            let mut surface = shared.borrow_mut();
            if restore_text {
                surface.set_text(&self.last_known_content);
            }
            surface.set_visible_characters(None);
            if self.float_motion.enabled {
                surface.set_local_position(self.base_position);
            }
        }

        self.line.clear();
        self.text_queue.borrow_mut().clear();
        self.lifecycle_queue.borrow_mut().clear();
        self.state = PresenterState::Idle;
        self.active = false;

        debug!("Presenter {:?}: deactivated", self.label.id());
    }

    /// Advance the presenter by one frame
    pub fn tick(&mut self, time: &FrameTime) {
        if !self.active {
            return;
        }
        self.clock = time.unscaled_total;

        if !self.label.is_alive() {
            debug!("Presenter {:?}: label destroyed, shutting down", self.label.id());
            self.deactivate();
            return;
        }

        self.apply_float(time);
        self.process_lifecycle_events();
        self.check_reveal_due();
        self.advance_jobs(time);
        self.try_auto_capture();

        if self.state == PresenterState::Capturing {
            self.tick_capture(time);
        }
    }

    /// Reveal `text` on any label, replacing a reveal already running there
    ///
    /// Targeting this presenter's own label counts as new content: the
    /// snapshot is updated and the state machine goes back to revealing.
    /// That request is dropped while capturing or after submission.
    pub fn animate_typewriter(&mut self, label: &LabelHandle, text: &str, settings: RevealSettings) {
        if label.id() != self.label.id() {
            self.launch_reveal(label, text, settings);
            return;
        }
        if !self.active {
            debug!("Presenter {:?}: inactive, reveal dropped", self.label.id());
            return;
        }
        if matches!(self.state, PresenterState::Capturing | PresenterState::Submitted) {
            debug!("Presenter {:?}: reveal dropped while {:?}", self.label.id(), self.state);
            return;
        }
        self.restart_reveal(text.to_string(), settings);
    }

    /// Fade any label's opacity, replacing a fade already running there
    pub fn fade_to(&mut self, label: &LabelHandle, opacity: f32, duration: f32, use_unscaled_time: bool) {
        self.fade_jobs.cancel(label.id());
        if let Some(job) = FadeJob::start(label, opacity, duration, use_unscaled_time) {
            if !job.is_complete() {
                self.fade_jobs.start(label.id(), job);
            }
        }
    }

    /// Enter input capture now
    ///
    /// Needed when automatic capture is disabled in the config.
    pub fn begin_capture(&mut self) -> Result<(), PresenterError> {
        if !self.active {
            return Err(PresenterError::Inactive);
        }
        if !self.config.is_input_field {
            return Err(PresenterError::NotInputField);
        }
        match self.state {
            PresenterState::Capturing => return Err(PresenterError::AlreadyCapturing),
            PresenterState::Submitted => return Err(PresenterError::InputLocked),
            PresenterState::Idle | PresenterState::Revealing => {
                return Err(PresenterError::RevealIncomplete)
            }
            PresenterState::Revealed => {}
        }
        if self.reveal_jobs.contains(self.label.id()) {
            return Err(PresenterError::RevealIncomplete);
        }
        self.enter_capture();
        Ok(())
    }

    /// Submit the current line now
    pub fn submit(&mut self) -> Result<(), PresenterError> {
        match self.state {
            PresenterState::Capturing => {
                self.finish_capture();
                Ok(())
            }
            PresenterState::Submitted => Err(PresenterError::InputLocked),
            _ => Err(PresenterError::NotCapturing),
        }
    }

    fn current_text(&self) -> String {
        self.label
            .upgrade()
            .map(|shared| shared.borrow().text().to_string())
            .unwrap_or_default()
    }

    fn emit(&self, event_type: EventType, label: LabelId, text: Option<&str>) {
        let mut event = Event::new(event_type, f64::from(self.clock))
            .with_arg(ARG_LABEL, EventArg::Label(label));
        if let Some(text) = text {
            event = event.with_arg(ARG_TEXT, EventArg::Text(text.to_string()));
        }
        self.events.borrow_mut().send(event);
    }

    fn apply_float(&self, time: &FrameTime) {
        if !self.float_motion.enabled {
            return;
        }
        if let Some(shared) = self.label.upgrade() {
            let position = self.float_motion.position(self.base_position, time.unscaled_total);
            shared.borrow_mut().set_local_position(position);
        }
    }

    fn process_lifecycle_events(&mut self) {
        let pending: Vec<LifecycleEvent> = self.lifecycle_queue.borrow_mut().drain(..).collect();
        for event in pending {
            match event {
                LifecycleEvent::FocusChanged(false) => self.suspend_text_input(),
                LifecycleEvent::FocusChanged(true) => self.resume_text_input(),
                LifecycleEvent::DeviceChanged {
                    device: DeviceKind::Keyboard,
                    change,
                } => {
                    if change.is_available() {
                        self.resume_text_input();
                    } else {
                        self.suspend_text_input();
                    }
                }
                LifecycleEvent::DeviceChanged { .. } => {}
            }
        }
    }

    fn suspend_text_input(&mut self) {
        if self.state != PresenterState::Capturing {
            return;
        }
        self.input.borrow_mut().unsubscribe_text(self.listener);
        debug!("Presenter {:?}: text input suspended", self.label.id());
    }

    fn resume_text_input(&mut self) {
        if self.state != PresenterState::Capturing {
            return;
        }
        self.subscribe_text();
        self.redraw();
        debug!("Presenter {:?}: text input resumed", self.label.id());
    }

    fn subscribe_text(&self) {
        let listener = self.listener;
        let mut input = self.input.borrow_mut();
        input.unsubscribe_text(listener);
        input.subscribe_text(listener, self.text_queue.clone());
    }

    fn check_reveal_due(&mut self) {
        match self.state {
            PresenterState::Idle => {
                if self.config.typewriter_enabled {
                    let content = self.current_text();
                    self.restart_reveal(content, RevealSettings::from_config(&self.config));
                } else {
                    self.state = PresenterState::Revealed;
                    debug!("Presenter {:?}: Idle -> Revealed (typewriter off)", self.label.id());
                }
            }
            PresenterState::Revealed if self.config.typewriter_enabled => {
                let content = self.current_text();
                if content != self.last_known_content {
                    self.restart_reveal(content, RevealSettings::from_config(&self.config));
                }
            }
            _ => {}
        }
    }

    fn restart_reveal(&mut self, content: String, settings: RevealSettings) {
        let own = self.label.clone();
        debug!("Presenter {:?}: {:?} -> Revealing", own.id(), self.state);

        self.state = PresenterState::Revealing;
        self.launch_reveal(&own, &content, settings);
        self.last_known_content = content;

        // Dropped (unsupported surface) leaves nothing to wait for
        if self.state == PresenterState::Revealing && !self.reveal_jobs.contains(own.id()) {
            self.state = PresenterState::Revealed;
        }
    }

    fn launch_reveal(&mut self, label: &LabelHandle, text: &str, settings: RevealSettings) {
        self.reveal_jobs.cancel(label.id());
        let Some(job) = RevealJob::start(label, text, settings) else {
            return;
        };
        self.emit(EventType::RevealStarted, label.id(), Some(text));

        if job.is_complete() {
            self.on_reveal_complete(label.id(), text);
        } else {
            self.reveal_jobs.start(label.id(), job);
        }
    }

    fn on_reveal_complete(&mut self, label: LabelId, text: &str) {
        self.emit(EventType::RevealCompleted, label, Some(text));
        if label == self.label.id() && self.state == PresenterState::Revealing {
            self.state = PresenterState::Revealed;
            debug!("Presenter {:?}: Revealing -> Revealed", label);
        }
    }

    fn advance_jobs(&mut self, time: &FrameTime) {
        let mut completed = Vec::new();
        self.reveal_jobs.advance(|id, job| match job.tick(time) {
            JobStep::Running => false,
            JobStep::Completed => {
                completed.push((id, job.text().to_string()));
                true
            }
            JobStep::Abandoned => true,
        });
        for (id, text) in completed {
            self.on_reveal_complete(id, &text);
        }

        self.fade_jobs.advance(|_, job| job.tick(time) != JobStep::Running);
    }

    fn try_auto_capture(&mut self) {
        if self.state == PresenterState::Revealed
            && self.config.is_input_field
            && self.config.auto_enter_capture_on_reveal_complete
            && !self.reveal_jobs.contains(self.label.id())
        {
            self.enter_capture();
        }
    }

    fn enter_capture(&mut self) {
        let id = self.label.id();
        debug!("Presenter {:?}: Revealed -> Capturing", id);

        self.state = PresenterState::Capturing;
        self.line.clear();
        self.text_queue.borrow_mut().clear();
        self.caret_jobs
            .start(id, CaretBlink::new(self.config.caret_blink_interval_seconds));
        if self.input.borrow().keyboard_connected() {
            self.subscribe_text();
        } else {
            // The reconnect notification subscribes us
            debug!("Presenter {:?}: no keyboard, text input waits for reconnect", id);
        }
        self.redraw();
        self.emit(EventType::CaptureStarted, id, None);
    }

    fn tick_capture(&mut self, time: &FrameTime) {
        let id = self.label.id();
        let mut redraw = self
            .caret_jobs
            .get_mut(id)
            .is_some_and(|caret| caret.tick(time.unscaled_delta));

        let pending: Vec<char> = self.text_queue.borrow_mut().drain(..).collect();
        let mut submit = false;
        for c in pending {
            if submit {
                trace!("Presenter {:?}: '{}' after submit ignored", id, c.escape_debug());
                continue;
            }
            match self.line.ingest(c) {
                LineAction::Edited => redraw = true,
                LineAction::Submit => submit = true,
                LineAction::Ignored => {}
            }
        }

        if !submit {
            let input = self.input.borrow();
            submit = self
                .config
                .submit_trigger_keys
                .iter()
                .any(|key| input.was_pressed_this_tick(*key));
        }

        if submit {
            self.finish_capture();
        } else if redraw {
            self.redraw();
        }
    }

    fn finish_capture(&mut self) {
        let id = self.label.id();
        self.state = PresenterState::Submitted;
        self.caret_jobs.cancel(id);
        self.input.borrow_mut().unsubscribe_text(self.listener);
        self.text_queue.borrow_mut().clear();

        let submitted = self.line.text().to_string();
        self.draw_line(None);
        self.emit(EventType::InputSubmitted, id, Some(&submitted));
        info!("Presenter {:?}: submitted {:?}", id, submitted);
    }

    fn redraw(&self) {
        let caret = self
            .caret_jobs
            .get(self.label.id())
            .filter(|caret| caret.visible())
            .map(|_| self.config.caret_glyph);
        self.draw_line(caret);
    }

    fn draw_line(&self, caret: Option<char>) {
        let Some(shared) = self.label.upgrade() else {
            return;
        };
        let composed = self
            .line
            .compose(&self.last_known_content, &self.config.prompt_separator, caret);
        let mut surface = shared.borrow_mut();
        surface.set_visible_characters(None);
        surface.set_text(&composed);
    }

    /// Label this presenter drives
    pub fn label(&self) -> &LabelHandle {
        &self.label
    }

    /// Identity this presenter subscribes to input with
    pub fn listener_id(&self) -> ListenerId {
        self.listener
    }

    /// Active configuration
    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    /// Whether the presenter is active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current state
    pub fn state(&self) -> PresenterState {
        self.state
    }

    /// Whether a reveal job is running for this label
    pub fn reveal_active(&self) -> bool {
        self.reveal_jobs.contains(self.label.id())
    }

    /// Whether the current content has begun revealing
    pub fn reveal_started(&self) -> bool {
        self.state != PresenterState::Idle
    }

    /// Whether the current content is fully revealed
    pub fn reveal_complete(&self) -> bool {
        matches!(
            self.state,
            PresenterState::Revealed | PresenterState::Capturing | PresenterState::Submitted
        )
    }

    /// Whether input capture is engaged
    pub fn capture_active(&self) -> bool {
        self.state == PresenterState::Capturing
    }

    /// Whether input was submitted during this activation
    pub fn input_locked(&self) -> bool {
        self.state == PresenterState::Submitted
    }

    /// Whether the caret is currently drawn
    pub fn caret_visible(&self) -> bool {
        self.caret_jobs
            .get(self.label.id())
            .is_some_and(CaretBlink::visible)
    }

    /// Text typed during capture
    pub fn input_buffer(&self) -> &str {
        self.line.text()
    }

    /// Content snapshot used for change detection and as the prompt
    pub fn last_known_content(&self) -> &str {
        &self.last_known_content
    }

    /// Rest position of the float motion
    pub fn base_position(&self) -> Vec3 {
        self.base_position
    }

    /// Number of reveal jobs running on any label
    pub fn running_reveals(&self) -> usize {
        self.reveal_jobs.len()
    }
}

impl Drop for TextPresenter {
    fn drop(&mut self) {
        let listener = self.listener;
        if let Ok(mut input) = self.input.try_borrow_mut() {
            input.unsubscribe_text(listener);
            input.unsubscribe_lifecycle(listener);
        }
    }
}
