//! Presenter demo application
//!
//! Plays a scripted name-entry scene in the terminal: a floating title, a
//! typewriter prompt that turns into an input field, and a fading hint.
//! Keyboard input comes from a fixed script so the run is reproducible.
//!
//! Usage: `presenter_demo [config.toml|config.ron]`

use std::cell::RefCell;
use std::rc::Rc;

use text_presenter::prelude::*;

const FRAME_SECONDS: f32 = 1.0 / 30.0;
const MAX_FRAMES: u64 = 600;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("failed to load presenter config: {0}")]
    Config(#[from] ConfigError),

    #[error("presenter refused request: {0}")]
    Presenter(#[from] PresenterError),
}

/// Scripted keyboard activity keyed by frame number
enum ScriptStep {
    Type(&'static str),
    Press(KeyCode),
    Focus(bool),
    Pause(bool),
}

const SCRIPT: &[(u64, ScriptStep)] = &[
    (70, ScriptStep::Type("Ad")),
    (80, ScriptStep::Type("x\u{8}a")),
    (90, ScriptStep::Focus(false)),
    (95, ScriptStep::Type("ignored")),
    (100, ScriptStep::Focus(true)),
    (110, ScriptStep::Pause(true)),
    (130, ScriptStep::Pause(false)),
    (140, ScriptStep::Type("!")),
    (150, ScriptStep::Press(KeyCode::Enter)),
];

struct SubmissionLogger {
    name: Rc<RefCell<Option<String>>>,
}

impl EventHandler for SubmissionLogger {
    fn on_event(&mut self, event: &Event) -> bool {
        if let Some(text) = event.get_text() {
            log::info!("Player entered name {:?} at {:.2}s", text, event.timestamp);
            *self.name.borrow_mut() = Some(text.to_string());
        }
        true
    }
}

fn load_prompt_config() -> Result<PresenterConfig, DemoError> {
    let defaults = PresenterConfig {
        is_input_field: true,
        chars_per_second: 20.0,
        ..PresenterConfig::default()
    };
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading prompt config from {}", path);
            Ok(PresenterConfig::load_from_file(&path)?)
        }
        None => Ok(defaults),
    }
}

fn run() -> Result<(), DemoError> {
    let mut canvas = Canvas::new();
    let keyboard = Rc::new(RefCell::new(Keyboard::new()));
    let events = Rc::new(RefCell::new(EventSystem::new()));

    let entered = Rc::new(RefCell::new(None));
    events.borrow_mut().register_handler(
        EventType::InputSubmitted,
        Box::new(SubmissionLogger {
            name: entered.clone(),
        }),
    );

    let title = canvas.add(
        PlainTextLabel::new("RUSTEROIDS")
            .with_name("title")
            .with_position(Vec3::new(0.0, 4.0, 0.0)),
    );
    let prompt = canvas.add(RichTextLabel::new("Enter your name:").with_name("prompt"));
    let hint = canvas.add(PlainTextLabel::new("press enter to continue").with_name("hint"));

    let title_config = PresenterConfig {
        floating_enabled: true,
        typewriter_enabled: false,
        ..PresenterConfig::default()
    };
    let mut title_presenter = TextPresenter::new(title.clone(), title_config, keyboard.clone(), events.clone());
    let mut prompt_presenter =
        TextPresenter::new(prompt.clone(), load_prompt_config()?, keyboard.clone(), events.clone());

    title_presenter.activate();
    prompt_presenter.activate();

    let mut timer = Timer::new();
    let mut last_shown = String::new();

    while timer.frame_count() < MAX_FRAMES {
        let frame = timer.frame_count();
        for (_, step) in SCRIPT.iter().filter(|(at, _)| *at == frame) {
            match step {
                ScriptStep::Type(text) => keyboard.borrow_mut().type_text(text),
                ScriptStep::Press(key) => keyboard.borrow_mut().press(*key),
                ScriptStep::Focus(focused) => keyboard.borrow_mut().set_focus(*focused),
                ScriptStep::Pause(paused) => {
                    timer.set_time_scale(if *paused { 0.0 } else { 1.0 });
                    log::info!("Game {}", if *paused { "paused" } else { "resumed" });
                }
            }
        }

        timer.advance(FRAME_SECONDS);
        let time = timer.frame();
        title_presenter.tick(&time);
        prompt_presenter.tick(&time);
        keyboard.borrow_mut().end_tick();
        events.borrow_mut().dispatch();

        if let Some(surface) = canvas.get(prompt.id()) {
            let shown = surface.borrow().displayed_text();
            if shown != last_shown {
                log::debug!("[{:>3}] {}", frame, shown);
                last_shown = shown;
            }
        }

        if prompt_presenter.input_locked() && prompt_presenter.running_reveals() == 0 {
            break;
        }
    }

    if entered.borrow().is_none() {
        log::warn!("No name submitted within {} frames", MAX_FRAMES);
        if prompt_presenter.capture_active() {
            prompt_presenter.submit()?;
            events.borrow_mut().dispatch();
        }
    }

    // Greet on the hint line while the title fades out
    let name = entered.borrow().clone();
    if let Some(name) = name {
        let greeting = format!("Welcome, {}!", name);
        prompt_presenter.animate_typewriter(&hint, &greeting, RevealSettings::default());
    }
    prompt_presenter.fade_to(&title, 0.0, 1.0, true);
    for _ in 0..45 {
        timer.advance(FRAME_SECONDS);
        prompt_presenter.tick(&timer.frame());
        title_presenter.tick(&timer.frame());
        events.borrow_mut().dispatch();
    }

    if let Some(surface) = canvas.get(hint.id()) {
        log::info!("Hint: {}", surface.borrow().displayed_text());
    }
    if let Some(surface) = canvas.get(title.id()) {
        log::info!("Title opacity: {:.2}", surface.borrow().opacity());
    }

    prompt_presenter.deactivate();
    title_presenter.deactivate();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    text_presenter::foundation::logging::init_with_default("debug");

    log::info!("Starting presenter demo");
    run()?;
    log::info!("Presenter demo finished");
    Ok(())
}
