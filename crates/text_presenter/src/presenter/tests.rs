use std::cell::{Cell, RefCell};
use std::rc::Rc;

use approx::assert_relative_eq;

use super::*;
use crate::events::EventHandler;
use crate::foundation::time::Timer;
use crate::input::{DeviceChange, KeyCode, Keyboard};
use crate::ui::{Canvas, DisplaySurface, PlainTextLabel, RichTextLabel, SurfaceCapabilities};

const FRAME: f32 = 0.125;
const BACKSPACE: char = '\u{8}';

type EventLog = Rc<RefCell<Vec<(EventType, Option<String>)>>>;

struct Recorder {
    log: EventLog,
}

impl EventHandler for Recorder {
    fn on_event(&mut self, event: &Event) -> bool {
        self.log
            .borrow_mut()
            .push((event.event_type, event.get_text().map(str::to_string)));
        false
    }
}

/// Rich label that counts text writes
struct RecordingSurface {
    inner: RichTextLabel,
    writes: Rc<Cell<usize>>,
}

impl DisplaySurface for RecordingSurface {
    fn capabilities(&self) -> SurfaceCapabilities {
        self.inner.capabilities()
    }
    fn name(&self) -> &str {
        self.inner.name()
    }
    fn text(&self) -> &str {
        self.inner.text()
    }
    fn set_text(&mut self, text: &str) {
        self.writes.set(self.writes.get() + 1);
        self.inner.set_text(text);
    }
    fn set_visible_characters(&mut self, count: Option<usize>) {
        self.inner.set_visible_characters(count);
    }
    fn visible_characters(&self) -> Option<usize> {
        self.inner.visible_characters()
    }
    fn opacity(&self) -> f32 {
        self.inner.opacity()
    }
    fn set_opacity(&mut self, alpha: f32) {
        self.inner.set_opacity(alpha);
    }
    fn force_layout(&mut self) {
        self.inner.force_layout();
    }
    fn character_count(&self) -> usize {
        self.inner.character_count()
    }
    fn local_position(&self) -> Vec3 {
        self.inner.local_position()
    }
    fn set_local_position(&mut self, position: Vec3) {
        self.inner.set_local_position(position);
    }
}

/// Image-like surface with no text component
struct Sprite {
    position: Vec3,
    opacity: f32,
}

impl DisplaySurface for Sprite {
    fn capabilities(&self) -> SurfaceCapabilities {
        SurfaceCapabilities::empty()
    }
    fn name(&self) -> &str {
        "sprite"
    }
    fn text(&self) -> &str {
        ""
    }
    fn set_text(&mut self, _text: &str) {}
    fn set_visible_characters(&mut self, _count: Option<usize>) {}
    fn visible_characters(&self) -> Option<usize> {
        None
    }
    fn opacity(&self) -> f32 {
        self.opacity
    }
    fn set_opacity(&mut self, alpha: f32) {
        self.opacity = alpha;
    }
    fn force_layout(&mut self) {}
    fn local_position(&self) -> Vec3 {
        self.position
    }
    fn set_local_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

struct Fixture {
    canvas: Canvas,
    keyboard: Rc<RefCell<Keyboard>>,
    events: Rc<RefCell<EventSystem>>,
    log: EventLog,
    timer: Timer,
}

impl Fixture {
    fn new() -> Self {
        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        let mut events = EventSystem::new();
        for event_type in [
            EventType::RevealStarted,
            EventType::RevealCompleted,
            EventType::CaptureStarted,
            EventType::InputSubmitted,
        ] {
            events.register_handler(event_type, Box::new(Recorder { log: log.clone() }));
        }
        Self {
            canvas: Canvas::new(),
            keyboard: Rc::new(RefCell::new(Keyboard::new())),
            events: Rc::new(RefCell::new(events)),
            log,
            timer: Timer::new(),
        }
    }

    fn presenter(&self, label: &LabelHandle, config: PresenterConfig) -> TextPresenter {
        TextPresenter::new(label.clone(), config, self.keyboard.clone(), self.events.clone())
    }

    fn step(&mut self, presenter: &mut TextPresenter) {
        self.timer.advance(FRAME);
        presenter.tick(&self.timer.frame());
        self.keyboard.borrow_mut().end_tick();
        self.events.borrow_mut().dispatch();
    }

    fn steps(&mut self, presenter: &mut TextPresenter, count: usize) {
        for _ in 0..count {
            self.step(presenter);
        }
    }

    fn displayed(&self, label: &LabelHandle) -> String {
        self.canvas.get(label.id()).unwrap().borrow().displayed_text()
    }

    fn text_subscriptions(&self, listener: ListenerId) -> usize {
        self.keyboard.borrow().text_subscription_count(listener)
    }

    fn lifecycle_subscriptions(&self, listener: ListenerId) -> usize {
        self.keyboard.borrow().lifecycle_subscription_count(listener)
    }

    fn logged(&self, event_type: EventType) -> Vec<Option<String>> {
        self.log
            .borrow()
            .iter()
            .filter(|(logged, _)| *logged == event_type)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

/// One character per frame
fn prompt_config() -> PresenterConfig {
    PresenterConfig {
        chars_per_second: 8.0,
        is_input_field: true,
        caret_blink_interval_seconds: 100.0,
        ..PresenterConfig::default()
    }
}

fn reveal(chars_per_second: f32) -> RevealSettings {
    RevealSettings {
        chars_per_second,
        ..RevealSettings::default()
    }
}

/// Activate and run until the prompt is capturing
fn capturing(fx: &mut Fixture, prompt: &str) -> (LabelHandle, TextPresenter) {
    let label = fx.canvas.add(RichTextLabel::new(prompt));
    let mut presenter = fx.presenter(&label, prompt_config());
    presenter.activate();
    fx.steps(&mut presenter, prompt.chars().count());
    assert_eq!(presenter.state(), PresenterState::Capturing);
    (label, presenter)
}

#[test]
fn test_reveal_then_auto_capture() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(RichTextLabel::new("Name?"));
    let mut presenter = fx.presenter(&label, prompt_config());
    presenter.activate();
    assert_eq!(presenter.state(), PresenterState::Idle);

    fx.step(&mut presenter);
    assert_eq!(presenter.state(), PresenterState::Revealing);
    assert_eq!(fx.displayed(&label), "N");

    fx.steps(&mut presenter, 4);
    assert_eq!(presenter.state(), PresenterState::Capturing);
    assert!(presenter.caret_visible());
    assert_eq!(fx.displayed(&label), "Name? _");
    assert_eq!(fx.text_subscriptions(presenter.listener_id()), 1);

    let order: Vec<EventType> = fx.log.borrow().iter().map(|(event, _)| *event).collect();
    assert_eq!(
        order,
        vec![
            EventType::RevealStarted,
            EventType::RevealCompleted,
            EventType::CaptureStarted
        ]
    );
}

#[test]
fn test_reveal_progress_is_monotonic() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(RichTextLabel::new("Hello, world"));
    let config = PresenterConfig {
        chars_per_second: 11.0,
        ..PresenterConfig::default()
    };
    let mut presenter = fx.presenter(&label, config);
    presenter.activate();

    let mut previous = 0;
    for _ in 0..20 {
        fx.step(&mut presenter);
        let shown = fx.displayed(&label).chars().count();
        assert!(shown >= previous);
        assert!(shown <= 12);
        previous = shown;
    }
    assert_eq!(presenter.state(), PresenterState::Revealed);
    assert_eq!(fx.logged(EventType::RevealCompleted).len(), 1);
}

#[test]
fn test_typing_backspace_and_newline_submit() {
    let mut fx = Fixture::new();
    let (label, mut presenter) = capturing(&mut fx, "Name?");

    fx.keyboard.borrow_mut().type_char('H');
    fx.keyboard.borrow_mut().type_char('i');
    fx.keyboard.borrow_mut().type_char(BACKSPACE);
    fx.step(&mut presenter);
    assert_eq!(presenter.input_buffer(), "H");
    assert_eq!(fx.displayed(&label), "Name? H_");

    fx.keyboard.borrow_mut().type_char('\n');
    fx.step(&mut presenter);
    assert_eq!(presenter.state(), PresenterState::Submitted);
    assert!(presenter.input_locked());
    assert!(!presenter.caret_visible());
    assert_eq!(fx.displayed(&label), "Name? H");
    assert_eq!(fx.logged(EventType::InputSubmitted), vec![Some("H".to_string())]);
}

#[test]
fn test_backspace_on_empty_buffer() {
    let mut fx = Fixture::new();
    let (label, mut presenter) = capturing(&mut fx, "Hi");

    fx.keyboard.borrow_mut().type_char(BACKSPACE);
    fx.step(&mut presenter);
    assert_eq!(presenter.input_buffer(), "");
    assert_eq!(fx.displayed(&label), "Hi _");
}

#[test]
fn test_characters_after_newline_in_same_tick_are_dropped() {
    let mut fx = Fixture::new();
    let (_label, mut presenter) = capturing(&mut fx, "Hi");

    fx.keyboard.borrow_mut().type_text("ab\ncd");
    fx.step(&mut presenter);
    assert_eq!(presenter.input_buffer(), "ab");
    assert_eq!(fx.logged(EventType::InputSubmitted), vec![Some("ab".to_string())]);
}

#[test]
fn test_submit_is_terminal() {
    let mut fx = Fixture::new();
    let (label, mut presenter) = capturing(&mut fx, "Hi");

    fx.keyboard.borrow_mut().type_text("yo\n");
    fx.step(&mut presenter);
    assert_eq!(fx.text_subscriptions(presenter.listener_id()), 0);

    fx.keyboard.borrow_mut().type_text("more");
    fx.keyboard.borrow_mut().press(KeyCode::Enter);
    fx.steps(&mut presenter, 3);

    assert_eq!(presenter.state(), PresenterState::Submitted);
    assert_eq!(presenter.input_buffer(), "yo");
    assert_eq!(fx.displayed(&label), "Hi yo");
    assert_eq!(fx.logged(EventType::InputSubmitted).len(), 1);
    assert_eq!(presenter.begin_capture(), Err(PresenterError::InputLocked));
    assert_eq!(presenter.submit(), Err(PresenterError::InputLocked));
}

#[test]
fn test_submit_key_polling() {
    let mut fx = Fixture::new();
    let (_label, mut presenter) = capturing(&mut fx, "Hi");

    fx.keyboard.borrow_mut().type_text("ok");
    fx.step(&mut presenter);
    assert_eq!(presenter.state(), PresenterState::Capturing);

    fx.keyboard.borrow_mut().press(KeyCode::KeypadEnter);
    fx.step(&mut presenter);
    assert_eq!(presenter.state(), PresenterState::Submitted);
    assert_eq!(fx.logged(EventType::InputSubmitted), vec![Some("ok".to_string())]);
}

#[test]
fn test_unlisted_key_does_not_submit() {
    let mut fx = Fixture::new();
    let (_label, mut presenter) = capturing(&mut fx, "Hi");

    fx.keyboard.borrow_mut().press(KeyCode::Escape);
    fx.step(&mut presenter);
    assert_eq!(presenter.state(), PresenterState::Capturing);
}

#[test]
fn test_second_reveal_cancels_first() {
    let mut fx = Fixture::new();
    let own = fx.canvas.add(RichTextLabel::new("title"));
    let other = fx.canvas.add(RichTextLabel::new(""));
    let config = PresenterConfig {
        typewriter_enabled: false,
        ..PresenterConfig::default()
    };
    let mut presenter = fx.presenter(&own, config);
    presenter.activate();

    presenter.animate_typewriter(&other, "abcdef", reveal(8.0));
    fx.step(&mut presenter);
    assert_eq!(fx.displayed(&other), "a");

    presenter.animate_typewriter(&other, "xy", reveal(8.0));
    assert_eq!(presenter.running_reveals(), 1);

    for _ in 0..10 {
        fx.step(&mut presenter);
        assert!(!fx.displayed(&other).starts_with("ab"));
    }
    assert_eq!(fx.displayed(&other), "xy");
    assert_eq!(presenter.running_reveals(), 0);
    assert_eq!(fx.logged(EventType::RevealCompleted), vec![Some("xy".to_string())]);
}

#[test]
fn test_zero_rate_completes_in_same_tick() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(RichTextLabel::new("Hello"));
    let config = PresenterConfig {
        chars_per_second: 0.0,
        ..PresenterConfig::default()
    };
    let mut presenter = fx.presenter(&label, config);
    presenter.activate();

    fx.step(&mut presenter);
    assert_eq!(presenter.state(), PresenterState::Revealed);
    assert!(!presenter.reveal_active());
    assert_eq!(fx.displayed(&label), "Hello");
    assert_eq!(fx.logged(EventType::RevealStarted).len(), 1);
    assert_eq!(fx.logged(EventType::RevealCompleted).len(), 1);
}

#[test]
fn test_content_change_restarts_reveal() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(RichTextLabel::new("ab"));
    let config = PresenterConfig {
        chars_per_second: 8.0,
        ..PresenterConfig::default()
    };
    let mut presenter = fx.presenter(&label, config);
    presenter.activate();
    fx.steps(&mut presenter, 2);
    assert_eq!(presenter.state(), PresenterState::Revealed);

    fx.step(&mut presenter);
    assert_eq!(presenter.state(), PresenterState::Revealed);

    fx.canvas.set_text(label.id(), "xyz");
    fx.step(&mut presenter);
    assert_eq!(presenter.state(), PresenterState::Revealing);
    assert_eq!(presenter.last_known_content(), "xyz");
    assert_eq!(fx.displayed(&label), "x");

    fx.steps(&mut presenter, 2);
    assert_eq!(presenter.state(), PresenterState::Revealed);
    assert_eq!(fx.displayed(&label), "xyz");
}

#[test]
fn test_plain_label_reveal_restores_full_text() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(PlainTextLabel::new("Hey"));
    let config = PresenterConfig {
        chars_per_second: 8.0,
        ..PresenterConfig::default()
    };
    let mut presenter = fx.presenter(&label, config);
    presenter.activate();

    fx.step(&mut presenter);
    assert_eq!(fx.displayed(&label), "H");
    fx.steps(&mut presenter, 2);
    assert_eq!(fx.displayed(&label), "Hey");

    // Full text written back is not seen as a content change
    fx.steps(&mut presenter, 3);
    assert_eq!(presenter.state(), PresenterState::Revealed);
    assert_eq!(fx.logged(EventType::RevealStarted).len(), 1);
}

#[test]
fn test_own_reveal_dropped_while_capturing() {
    let mut fx = Fixture::new();
    let (label, mut presenter) = capturing(&mut fx, "Hi");

    presenter.animate_typewriter(&label, "replacement", reveal(8.0));
    assert_eq!(presenter.state(), PresenterState::Capturing);
    assert_eq!(presenter.last_known_content(), "Hi");
    assert!(!presenter.reveal_active());
}

#[test]
fn test_own_reveal_request_restarts_state_machine() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(RichTextLabel::new("old"));
    let config = PresenterConfig {
        chars_per_second: 0.0,
        ..PresenterConfig::default()
    };
    let mut presenter = fx.presenter(&label, config);
    presenter.activate();
    fx.step(&mut presenter);

    presenter.animate_typewriter(&label, "news", reveal(8.0));
    assert_eq!(presenter.state(), PresenterState::Revealing);
    assert_eq!(presenter.last_known_content(), "news");

    fx.steps(&mut presenter, 4);
    assert_eq!(presenter.state(), PresenterState::Revealed);
    assert_eq!(fx.displayed(&label), "news");
}

#[test]
fn test_deactivate_restores_and_reactivate_is_clean() {
    let mut fx = Fixture::new();
    let (label, mut presenter) = capturing(&mut fx, "Name?");

    fx.keyboard.borrow_mut().type_text("Bob");
    fx.step(&mut presenter);
    assert_eq!(fx.displayed(&label), "Name? Bob_");

    presenter.deactivate();
    assert!(!presenter.is_active());
    assert_eq!(presenter.state(), PresenterState::Idle);
    assert_eq!(fx.displayed(&label), "Name?");
    assert_eq!(fx.text_subscriptions(presenter.listener_id()), 0);
    assert_eq!(fx.lifecycle_subscriptions(presenter.listener_id()), 0);

    // Ticks while inactive do nothing
    fx.keyboard.borrow_mut().type_text("zz");
    fx.steps(&mut presenter, 2);
    assert_eq!(fx.displayed(&label), "Name?");

    presenter.activate();
    assert_eq!(fx.lifecycle_subscriptions(presenter.listener_id()), 1);
    fx.steps(&mut presenter, 5);
    assert_eq!(presenter.state(), PresenterState::Capturing);
    assert_eq!(presenter.input_buffer(), "");
    assert_eq!(fx.text_subscriptions(presenter.listener_id()), 1);
    assert_eq!(fx.displayed(&label), "Name? _");
}

#[test]
fn test_deactivate_mid_reveal_restores_content() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(PlainTextLabel::new("Hello"));
    let config = PresenterConfig {
        chars_per_second: 8.0,
        ..PresenterConfig::default()
    };
    let mut presenter = fx.presenter(&label, config);
    presenter.activate();
    fx.steps(&mut presenter, 2);
    assert_eq!(fx.displayed(&label), "He");

    presenter.deactivate();
    assert_eq!(fx.displayed(&label), "Hello");
    assert!(!presenter.reveal_active());
}

#[test]
fn test_deactivate_mid_reveal_clears_limit_on_rich_label() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(RichTextLabel::new("Hello"));
    let config = PresenterConfig {
        chars_per_second: 8.0,
        ..PresenterConfig::default()
    };
    let mut presenter = fx.presenter(&label, config);
    let limit = |fx: &Fixture| fx.canvas.get(label.id()).unwrap().borrow().visible_characters();

    presenter.activate();
    fx.steps(&mut presenter, 2);
    assert_eq!(limit(&fx), Some(2));
    assert_eq!(fx.displayed(&label), "He");

    presenter.deactivate();
    assert_eq!(limit(&fx), None);
    assert_eq!(fx.displayed(&label), "Hello");

    presenter.activate();
    assert_eq!(presenter.state(), PresenterState::Idle);
    assert_eq!(limit(&fx), None);

    fx.step(&mut presenter);
    assert_eq!(presenter.state(), PresenterState::Revealing);
    assert_eq!(limit(&fx), Some(1));
    assert_eq!(fx.displayed(&label), "H");
    assert_eq!(fx.logged(EventType::RevealStarted).len(), 2);

    fx.steps(&mut presenter, 4);
    assert_eq!(limit(&fx), None);
    assert_eq!(fx.displayed(&label), "Hello");
}

#[test]
fn test_presenters_on_separate_canvases_keep_own_subscriptions() {
    let mut fx = Fixture::new();
    let (label_a, mut presenter_a) = capturing(&mut fx, "Hi");

    let mut other_canvas = Canvas::new();
    let label_b = other_canvas.add(RichTextLabel::new("Hi"));
    assert_eq!(label_a.id(), label_b.id());

    let mut presenter_b = fx.presenter(&label_b, prompt_config());
    assert_ne!(presenter_a.listener_id(), presenter_b.listener_id());

    let both = |fx: &mut Fixture, a: &mut TextPresenter, b: &mut TextPresenter| {
        fx.timer.advance(FRAME);
        let time = fx.timer.frame();
        a.tick(&time);
        b.tick(&time);
        fx.keyboard.borrow_mut().end_tick();
        fx.events.borrow_mut().dispatch();
    };

    presenter_b.activate();
    both(&mut fx, &mut presenter_a, &mut presenter_b);
    both(&mut fx, &mut presenter_a, &mut presenter_b);
    assert_eq!(presenter_b.state(), PresenterState::Capturing);
    assert_eq!(fx.text_subscriptions(presenter_a.listener_id()), 1);
    assert_eq!(fx.text_subscriptions(presenter_b.listener_id()), 1);

    fx.keyboard.borrow_mut().type_char('x');
    both(&mut fx, &mut presenter_a, &mut presenter_b);
    assert_eq!(presenter_a.input_buffer(), "x");
    assert_eq!(presenter_b.input_buffer(), "x");

    presenter_b.deactivate();
    assert_eq!(fx.lifecycle_subscriptions(presenter_a.listener_id()), 1);
    assert_eq!(fx.text_subscriptions(presenter_a.listener_id()), 1);

    fx.keyboard.borrow_mut().type_char('y');
    fx.step(&mut presenter_a);
    assert_eq!(presenter_a.input_buffer(), "xy");
    assert_eq!(fx.displayed(&label_a), "Hi xy_");
}

#[test]
fn test_double_activate_keeps_one_subscription() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(RichTextLabel::new("x"));
    let mut presenter = fx.presenter(&label, PresenterConfig::default());

    presenter.activate();
    presenter.activate();
    assert_eq!(fx.lifecycle_subscriptions(presenter.listener_id()), 1);

    presenter.deactivate();
    presenter.deactivate();
    assert_eq!(fx.lifecycle_subscriptions(presenter.listener_id()), 0);
}

#[test]
fn test_focus_cycle_resubscribes_once() {
    let mut fx = Fixture::new();
    let writes = Rc::new(Cell::new(0));
    let label = fx.canvas.add(RecordingSurface {
        inner: RichTextLabel::new("Hi"),
        writes: writes.clone(),
    });
    let mut presenter = fx.presenter(&label, prompt_config());
    presenter.activate();
    fx.steps(&mut presenter, 2);
    assert_eq!(presenter.state(), PresenterState::Capturing);

    let before = writes.get();
    fx.keyboard.borrow_mut().set_focus(false);
    fx.step(&mut presenter);
    assert_eq!(fx.text_subscriptions(presenter.listener_id()), 0);
    assert_eq!(writes.get(), before);

    fx.keyboard.borrow_mut().set_focus(true);
    fx.step(&mut presenter);
    assert_eq!(fx.text_subscriptions(presenter.listener_id()), 1);
    assert_eq!(writes.get(), before + 1);

    fx.keyboard.borrow_mut().type_char('a');
    fx.step(&mut presenter);
    assert_eq!(presenter.input_buffer(), "a");
}

#[test]
fn test_keyboard_detach_and_reconnect() {
    let mut fx = Fixture::new();
    let (label, mut presenter) = capturing(&mut fx, "Hi");

    fx.keyboard
        .borrow_mut()
        .device_changed(DeviceKind::Keyboard, DeviceChange::Disconnected);
    fx.step(&mut presenter);
    assert_eq!(fx.text_subscriptions(presenter.listener_id()), 0);
    assert_eq!(presenter.state(), PresenterState::Capturing);

    fx.keyboard
        .borrow_mut()
        .device_changed(DeviceKind::Mouse, DeviceChange::Added);
    fx.step(&mut presenter);
    assert_eq!(fx.text_subscriptions(presenter.listener_id()), 0);

    fx.keyboard
        .borrow_mut()
        .device_changed(DeviceKind::Keyboard, DeviceChange::Reconnected);
    fx.step(&mut presenter);
    assert_eq!(fx.text_subscriptions(presenter.listener_id()), 1);

    fx.keyboard.borrow_mut().type_char('k');
    fx.step(&mut presenter);
    assert_eq!(presenter.input_buffer(), "k");
}

#[test]
fn test_capture_without_keyboard_waits_for_reconnect() {
    let mut fx = Fixture::new();
    fx.keyboard
        .borrow_mut()
        .device_changed(DeviceKind::Keyboard, DeviceChange::Disconnected);
    let label = fx.canvas.add(RichTextLabel::new("Hi"));
    let mut presenter = fx.presenter(&label, prompt_config());
    presenter.activate();
    fx.steps(&mut presenter, 2);

    assert_eq!(presenter.state(), PresenterState::Capturing);
    assert_eq!(fx.text_subscriptions(presenter.listener_id()), 0);
    assert_eq!(fx.displayed(&label), "Hi _");

    fx.keyboard
        .borrow_mut()
        .device_changed(DeviceKind::Keyboard, DeviceChange::Reconnected);
    fx.step(&mut presenter);
    assert_eq!(fx.text_subscriptions(presenter.listener_id()), 1);

    fx.keyboard.borrow_mut().type_char('k');
    fx.step(&mut presenter);
    assert_eq!(presenter.input_buffer(), "k");
}

#[test]
fn test_focus_events_outside_capture_are_ignored() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(RichTextLabel::new("Hi"));
    let mut presenter = fx.presenter(&label, prompt_config());
    presenter.activate();

    fx.keyboard.borrow_mut().set_focus(false);
    fx.keyboard.borrow_mut().set_focus(true);
    fx.step(&mut presenter);
    assert_eq!(presenter.state(), PresenterState::Revealing);
    assert_eq!(fx.text_subscriptions(presenter.listener_id()), 0);
}

#[test]
fn test_typewriter_disabled_goes_straight_to_capture() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(RichTextLabel::new("Name?"));
    let config = PresenterConfig {
        typewriter_enabled: false,
        ..prompt_config()
    };
    let mut presenter = fx.presenter(&label, config);
    presenter.activate();

    fx.step(&mut presenter);
    assert_eq!(presenter.state(), PresenterState::Capturing);
    assert!(fx.logged(EventType::RevealStarted).is_empty());
    assert_eq!(fx.displayed(&label), "Name? _");
}

#[test]
fn test_destroyed_label_shuts_presenter_down() {
    let mut fx = Fixture::new();
    let (label, mut presenter) = capturing(&mut fx, "Hi");

    fx.canvas.destroy(label.id());
    fx.step(&mut presenter);
    assert!(!presenter.is_active());
    assert_eq!(fx.text_subscriptions(presenter.listener_id()), 0);
    assert_eq!(fx.lifecycle_subscriptions(presenter.listener_id()), 0);
}

#[test]
fn test_surface_without_text_is_skipped() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(Sprite {
        position: Vec3::zeros(),
        opacity: 1.0,
    });
    let mut presenter = fx.presenter(&label, PresenterConfig::default());
    presenter.activate();

    fx.step(&mut presenter);
    assert_eq!(presenter.state(), PresenterState::Revealed);
    assert!(fx.logged(EventType::RevealStarted).is_empty());
    assert!(!presenter.reveal_active());
}

#[test]
fn test_manual_capture_requests() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(RichTextLabel::new("Hi"));
    let config = PresenterConfig {
        auto_enter_capture_on_reveal_complete: false,
        ..prompt_config()
    };
    let mut presenter = fx.presenter(&label, config);
    assert_eq!(presenter.begin_capture(), Err(PresenterError::Inactive));

    presenter.activate();
    assert_eq!(presenter.begin_capture(), Err(PresenterError::RevealIncomplete));
    fx.step(&mut presenter);
    assert_eq!(presenter.begin_capture(), Err(PresenterError::RevealIncomplete));

    fx.steps(&mut presenter, 3);
    assert_eq!(presenter.state(), PresenterState::Revealed);
    assert_eq!(presenter.submit(), Err(PresenterError::NotCapturing));

    assert_eq!(presenter.begin_capture(), Ok(()));
    assert!(presenter.capture_active());
    assert_eq!(presenter.begin_capture(), Err(PresenterError::AlreadyCapturing));

    fx.keyboard.borrow_mut().type_text("me");
    fx.step(&mut presenter);
    assert_eq!(presenter.submit(), Ok(()));
    fx.events.borrow_mut().dispatch();
    assert_eq!(fx.logged(EventType::InputSubmitted), vec![Some("me".to_string())]);
}

#[test]
fn test_capture_refused_for_display_label() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(RichTextLabel::new("Hi"));
    let mut presenter = fx.presenter(&label, PresenterConfig::default());
    presenter.activate();
    fx.steps(&mut presenter, 2);

    assert_eq!(presenter.begin_capture(), Err(PresenterError::NotInputField));
    assert_eq!(presenter.state(), PresenterState::Revealed);
}

#[test]
fn test_scaled_reveal_pauses_with_time_scale() {
    let mut fx = Fixture::new();
    let label = fx.canvas.add(RichTextLabel::new("abc"));
    let config = PresenterConfig {
        chars_per_second: 8.0,
        use_unscaled_time: false,
        ..PresenterConfig::default()
    };
    let mut presenter = fx.presenter(&label, config);
    presenter.activate();

    fx.timer.set_time_scale(0.0);
    fx.steps(&mut presenter, 4);
    assert_eq!(fx.displayed(&label), "");

    fx.timer.set_time_scale(1.0);
    fx.steps(&mut presenter, 3);
    assert_eq!(fx.displayed(&label), "abc");
}

#[test]
fn test_float_runs_on_unscaled_time_and_restores() {
    let mut fx = Fixture::new();
    let base = Vec3::new(1.0, 2.0, 3.0);
    let label = fx
        .canvas
        .add(RichTextLabel::new("bob").with_position(base));
    let config = PresenterConfig {
        floating_enabled: true,
        float_speed: 2.0,
        float_amplitude: 0.5,
        ..PresenterConfig::default()
    };
    let mut presenter = fx.presenter(&label, config);
    presenter.activate();
    fx.timer.set_time_scale(0.0);

    fx.steps(&mut presenter, 4);
    let position = fx.canvas.get(label.id()).unwrap().borrow().local_position();
    assert_relative_eq!(position.x, 1.0);
    assert_relative_eq!(position.z, 3.0);
    assert_relative_eq!(position.y, 2.0 + 0.5 * 1.0_f32.sin(), epsilon = 1e-5);

    presenter.deactivate();
    let position = fx.canvas.get(label.id()).unwrap().borrow().local_position();
    assert_relative_eq!(position, base);
}

#[test]
fn test_fade_other_label() {
    let mut fx = Fixture::new();
    let own = fx.canvas.add(RichTextLabel::new("title"));
    let other = fx.canvas.add(PlainTextLabel::new("hint"));
    let mut presenter = fx.presenter(&own, PresenterConfig::default());
    presenter.activate();

    presenter.fade_to(&other, 0.0, 0.5, true);
    fx.step(&mut presenter);
    let opacity = fx.canvas.get(other.id()).unwrap().borrow().opacity();
    assert!(opacity < 1.0 && opacity > 0.0);

    fx.steps(&mut presenter, 3);
    let opacity = fx.canvas.get(other.id()).unwrap().borrow().opacity();
    assert_relative_eq!(opacity, 0.0);
}

#[test]
fn test_drop_releases_subscriptions() {
    let mut fx = Fixture::new();
    let (_label, presenter) = capturing(&mut fx, "Hi");
    let listener = presenter.listener_id();
    drop(presenter);
    assert_eq!(fx.text_subscriptions(listener), 0);
    assert_eq!(fx.lifecycle_subscriptions(listener), 0);
}
