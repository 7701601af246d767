//! # Text Presenter
//!
//! Animated presentation effects for on-screen text labels.
//!
//! ## Features
//!
//! - **Floating Motion**: Idle vertical bobbing driven by unscaled time
//! - **Typewriter Reveal**: Character-by-character reveal, restarted when content changes
//! - **Input Capture**: Turns a revealed prompt into a line-entry field with a blinking caret
//! - **Fades**: Smoothstep opacity fades for any label
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use text_presenter::prelude::*;
//!
//! let mut canvas = Canvas::new();
//! let label = canvas.add(RichTextLabel::new("What is your name?"));
//!
//! let keyboard = Rc::new(RefCell::new(Keyboard::new()));
//! let events = Rc::new(RefCell::new(EventSystem::new()));
//!
//! let config = PresenterConfig {
//!     is_input_field: true,
//!     ..PresenterConfig::default()
//! };
//! let mut presenter = TextPresenter::new(label, config, keyboard, events.clone());
//! presenter.activate();
//!
//! let mut timer = Timer::new();
//! loop {
//!     timer.update();
//!     presenter.tick(&timer.frame());
//!     events.borrow_mut().dispatch();
//! #   break;
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod events;
pub mod input;
pub mod ui;
pub mod presenter;

pub use presenter::{PresenterError, PresenterState, TextPresenter};

/// Common imports for presenter users
pub mod prelude {
    pub use crate::{
        PresenterError, PresenterState, TextPresenter,
        config::{Config, ConfigError, PresenterConfig},
        events::{Event, EventArg, EventHandler, EventSystem, EventType},
        foundation::{
            math::Vec3,
            time::{FrameTime, Timer},
        },
        input::{InputSource, KeyCode, Keyboard, LifecycleEvent, DeviceKind, DeviceChange},
        presenter::RevealSettings,
        ui::{Canvas, DisplaySurface, LabelHandle, LabelId, PlainTextLabel, RichTextLabel},
    };
}
