//! Presenter notifications
//!
//! Presenters never call user code from inside their tick. They queue an
//! [`Event`] with [`EventSystem::send`] and the host delivers the batch with
//! [`EventSystem::dispatch`] once the frame's presenters have run.
//!
//! - arguments are keyed (`"label"`, `"text"`), not positional
//! - handlers subscribe per [`EventType`]
//! - a handler returning `true` consumes the event for later handlers

use std::collections::HashMap;

use crate::ui::LabelId;

/// Argument key carrying the label an event concerns
pub const ARG_LABEL: &str = "label";
/// Argument key carrying revealed or submitted text
pub const ARG_TEXT: &str = "text";

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A typewriter reveal started on a label
    RevealStarted,
    /// A typewriter reveal finished on a label
    RevealCompleted,
    /// A label entered input capture
    CaptureStarted,
    /// A label submitted its typed line
    InputSubmitted,
}

/// Event argument value
#[derive(Debug, Clone, PartialEq)]
pub enum EventArg {
    /// Label the event is about
    Label(LabelId),
    /// Text payload
    Text(String),
}

/// A queued notification
#[derive(Debug, Clone)]
pub struct Event {
    /// Kind of notification
    pub event_type: EventType,
    /// Unscaled seconds at which the presenter raised it
    pub timestamp: f64,
    args: HashMap<&'static str, EventArg>,
}

impl Event {
    /// Start building an event with no arguments
    pub fn new(event_type: EventType, timestamp: f64) -> Self {
        Self {
            event_type,
            timestamp,
            args: HashMap::with_capacity(2),
        }
    }

    /// Attach an argument, replacing any earlier value under `key`
    #[must_use]
    pub fn with_arg(mut self, key: &'static str, value: EventArg) -> Self {
        self.args.insert(key, value);
        self
    }

    /// Raw argument lookup
    pub fn get_arg(&self, key: &str) -> Option<&EventArg> {
        self.args.get(key)
    }

    /// The `label` argument
    pub fn get_label(&self) -> Option<LabelId> {
        match self.get_arg(ARG_LABEL)? {
            EventArg::Label(id) => Some(*id),
            EventArg::Text(_) => None,
        }
    }

    /// The `text` argument
    pub fn get_text(&self) -> Option<&str> {
        match self.get_arg(ARG_TEXT)? {
            EventArg::Text(text) => Some(text),
            EventArg::Label(_) => None,
        }
    }
}

/// Receiver of dispatched events
pub trait EventHandler {
    /// React to `event`; return `true` to hide it from later handlers
    fn on_event(&mut self, event: &Event) -> bool;
}

/// Per-type handler lists plus a FIFO of undelivered events
#[derive(Default)]
pub struct EventSystem {
    pending: Vec<Event>,
    handlers: HashMap<EventType, Vec<Box<dyn EventHandler>>>,
}

impl EventSystem {
    /// Create an event system with no handlers
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler behind any already registered for `event_type`
    pub fn register_handler(&mut self, event_type: EventType, handler: Box<dyn EventHandler>) {
        self.handlers.entry(event_type).or_default().push(handler);
    }

    /// Queue `event` for the next [`dispatch`](Self::dispatch)
    pub fn send(&mut self, event: Event) {
        self.pending.push(event);
    }

    /// Number of undelivered events
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Deliver every queued event in send order
    ///
    /// Events sent by handlers during delivery wait for the next call.
    pub fn dispatch(&mut self) {
        for event in std::mem::take(&mut self.pending) {
            let Some(handlers) = self.handlers.get_mut(&event.event_type) else {
                continue;
            };
            for handler in handlers.iter_mut() {
                if handler.on_event(&event) {
                    break;
                }
            }
        }
    }

    /// Drop undelivered events
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
