//! Input management system
//!
//! The presenter never talks to a concrete device. It sees an [`InputSource`]
//! that hands out two kinds of subscription:
//!
//! - **Text**: characters typed while the application has focus
//! - **Lifecycle**: focus changes and device attach/detach notifications
//!
//! Events are pushed into listener-owned queues between ticks and drained by
//! the listener during its own tick, so arrival order is preserved.

pub mod keyboard;

pub use keyboard::Keyboard;

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a subscriber on an [`InputSource`]
///
/// One source can serve listeners from several canvases, so ids come from a
/// process-wide counter rather than from any per-canvas key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

static NEXT_LISTENER: AtomicU64 = AtomicU64::new(1);

impl ListenerId {
    /// Allocate an id no other listener in this process holds
    pub fn next() -> Self {
        Self(NEXT_LISTENER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Queue receiving typed characters
pub type TextQueue = Rc<RefCell<VecDeque<char>>>;

/// Queue receiving focus and device notifications
pub type LifecycleQueue = Rc<RefCell<VecDeque<LifecycleEvent>>>;

/// Kind of input device reported by lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Physical keyboard
    Keyboard,
    /// Mouse or trackpad
    Mouse,
    /// Game controller
    Gamepad,
}

/// Device availability change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceChange {
    /// Device plugged in for the first time
    Added,
    /// Device unplugged and forgotten
    Removed,
    /// Device lost connection but may come back
    Disconnected,
    /// Previously disconnected device is back
    Reconnected,
}

impl DeviceChange {
    /// Whether the device can deliver input after this change
    pub fn is_available(self) -> bool {
        matches!(self, Self::Added | Self::Reconnected)
    }
}

/// Notification delivered on the lifecycle channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Application focus gained (`true`) or lost (`false`)
    FocusChanged(bool),
    /// A device changed availability
    DeviceChanged {
        /// Which device
        device: DeviceKind,
        /// What happened to it
        change: DeviceChange,
    },
}

/// Source of keyboard input for presenters
///
/// Subscribing the same listener twice is not deduplicated: both
/// subscriptions receive every event. Listeners are expected to unsubscribe
/// before subscribing. Unsubscribing a listener that holds no subscription
/// is a no-op.
pub trait InputSource {
    /// Start delivering typed characters to `queue`
    fn subscribe_text(&mut self, listener: ListenerId, queue: TextQueue);

    /// Stop delivering typed characters to `listener`
    fn unsubscribe_text(&mut self, listener: ListenerId);

    /// Start delivering focus and device notifications to `queue`
    fn subscribe_lifecycle(&mut self, listener: ListenerId, queue: LifecycleQueue);

    /// Stop delivering focus and device notifications to `listener`
    fn unsubscribe_lifecycle(&mut self, listener: ListenerId);

    /// Whether `key` went down during the current tick
    fn was_pressed_this_tick(&self, key: KeyCode) -> bool;

    /// Whether a keyboard is currently attached
    fn keyboard_connected(&self) -> bool;
}

/// Keys a presenter can poll, e.g. as submit triggers
///
/// Typed characters arrive on the text channel instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Enter key on the numeric keypad
    KeypadEnter,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}
