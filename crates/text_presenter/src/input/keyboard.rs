//! In-memory keyboard device
//!
//! [`Keyboard`] is the reference [`InputSource`]. The host feeds it from its
//! window event loop (or a test feeds it directly) and calls
//! [`Keyboard::end_tick`] once all presenters have ticked, which clears the
//! per-tick pressed flags.

use std::collections::HashSet;

use super::{
    DeviceChange, DeviceKind, InputSource, KeyCode, LifecycleEvent, LifecycleQueue, ListenerId,
    TextQueue,
};

/// Keyboard input state and subscriber fan-out
pub struct Keyboard {
    text_subscribers: Vec<(ListenerId, TextQueue)>,
    lifecycle_subscribers: Vec<(ListenerId, LifecycleQueue)>,

    /// Keys that went down since the last `end_tick`
    pressed_this_tick: HashSet<KeyCode>,

    focused: bool,
    connected: bool,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyboard {
    /// Create a connected, focused keyboard with no subscribers
    pub fn new() -> Self {
        Self {
            text_subscribers: Vec::new(),
            lifecycle_subscribers: Vec::new(),
            pressed_this_tick: HashSet::new(),
            focused: true,
            connected: true,
        }
    }

    /// Deliver one typed character to every text subscriber
    ///
    /// Dropped while unfocused or disconnected.
    pub fn type_char(&mut self, c: char) {
        if !self.accepts_input() {
            return;
        }
        for (_, queue) in &self.text_subscribers {
            queue.borrow_mut().push_back(c);
        }
    }

    /// Deliver every character of `text` in order
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.type_char(c);
        }
    }

    /// Mark a key as pressed for the current tick
    pub fn press(&mut self, key: KeyCode) {
        if self.accepts_input() {
            self.pressed_this_tick.insert(key);
        }
    }

    /// Reset per-tick key flags (call after every listener has ticked)
    pub fn end_tick(&mut self) {
        self.pressed_this_tick.clear();
    }

    /// Report an application focus change
    pub fn set_focus(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        if !focused {
            self.pressed_this_tick.clear();
        }
        self.broadcast(LifecycleEvent::FocusChanged(focused));
    }

    /// Report a device availability change
    ///
    /// Keyboard changes also update the connected state of this device.
    pub fn device_changed(&mut self, device: DeviceKind, change: DeviceChange) {
        if device == DeviceKind::Keyboard {
            self.connected = change.is_available();
            if !self.connected {
                self.pressed_this_tick.clear();
            }
        }
        self.broadcast(LifecycleEvent::DeviceChanged { device, change });
    }

    /// Number of live text subscriptions held by `listener`
    pub fn text_subscription_count(&self, listener: ListenerId) -> usize {
        self.text_subscribers
            .iter()
            .filter(|(id, _)| *id == listener)
            .count()
    }

    /// Number of live lifecycle subscriptions held by `listener`
    pub fn lifecycle_subscription_count(&self, listener: ListenerId) -> usize {
        self.lifecycle_subscribers
            .iter()
            .filter(|(id, _)| *id == listener)
            .count()
    }

    fn accepts_input(&self) -> bool {
        self.focused && self.connected
    }

    fn broadcast(&self, event: LifecycleEvent) {
        for (_, queue) in &self.lifecycle_subscribers {
            queue.borrow_mut().push_back(event);
        }
    }
}

impl InputSource for Keyboard {
    fn subscribe_text(&mut self, listener: ListenerId, queue: TextQueue) {
        self.text_subscribers.push((listener, queue));
    }

    fn unsubscribe_text(&mut self, listener: ListenerId) {
        self.text_subscribers.retain(|(id, _)| *id != listener);
    }

    fn subscribe_lifecycle(&mut self, listener: ListenerId, queue: LifecycleQueue) {
        self.lifecycle_subscribers.push((listener, queue));
    }

    fn unsubscribe_lifecycle(&mut self, listener: ListenerId) {
        self.lifecycle_subscribers.retain(|(id, _)| *id != listener);
    }

    fn was_pressed_this_tick(&self, key: KeyCode) -> bool {
        self.pressed_this_tick.contains(&key)
    }

    fn keyboard_connected(&self) -> bool {
        self.connected
    }
}
