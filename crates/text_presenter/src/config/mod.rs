//! Configuration system
//!
//! [`PresenterConfig`] carries every option a label's presenter recognizes.
//! Configs can be loaded from and saved to TOML or RON files through the
//! [`Config`] trait; the format is picked from the file extension.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::KeyCode;

/// On-disk encodings a config file may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// File-backed settings
///
/// Missing fields take their defaults, so implementors should carry
/// `#[serde(default)]`.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Read settings from a `.toml` or `.ron` file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        let config: Self = match format {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that parse but cannot be used
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Write settings to a `.toml` or `.ron` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Failures loading, saving or validating a config
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or written
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents are not valid for the format
    #[error("config parse failed: {0}")]
    Parse(String),

    /// Settings could not be encoded
    #[error("config encode failed: {0}")]
    Serialize(String),

    /// The extension is neither `.toml` nor `.ron`
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of its accepted range
    #[error("invalid config setting: {0}")]
    Invalid(String),
}

/// # Presenter Configuration
///
/// Options for a single label's [`TextPresenter`](crate::TextPresenter).
/// Missing fields fall back to their defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// Whether the label bobs up and down
    pub floating_enabled: bool,
    /// Angular speed of the float oscillation (radians per second)
    pub float_speed: f32,
    /// Peak vertical offset of the float oscillation
    pub float_amplitude: f32,

    /// Whether content is revealed with the typewriter effect
    pub typewriter_enabled: bool,
    /// Reveal rate; zero or less reveals instantly
    pub chars_per_second: f32,
    /// Reveal on real time instead of scaled game time
    pub use_unscaled_time: bool,
    /// Clear the label before each reveal starts
    pub reset_content_before_reveal: bool,

    /// Whether the label turns into a line-entry field
    pub is_input_field: bool,
    /// Enter capture automatically once the prompt is revealed
    pub auto_enter_capture_on_reveal_complete: bool,
    /// Keys that submit the line while capturing
    pub submit_trigger_keys: Vec<KeyCode>,
    /// Seconds between caret visibility toggles
    pub caret_blink_interval_seconds: f32,
    /// Glyph drawn for the caret
    pub caret_glyph: char,
    /// Text placed between the prompt and the typed line
    pub prompt_separator: String,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            floating_enabled: false,
            float_speed: 2.0,
            float_amplitude: 0.5,
            typewriter_enabled: true,
            chars_per_second: 30.0,
            use_unscaled_time: true,
            reset_content_before_reveal: true,
            is_input_field: false,
            auto_enter_capture_on_reveal_complete: true,
            submit_trigger_keys: vec![KeyCode::Enter, KeyCode::KeypadEnter],
            caret_blink_interval_seconds: 0.5,
            caret_glyph: '_',
            prompt_separator: " ".to_string(),
        }
    }
}

impl Config for PresenterConfig {
    /// Check numeric settings are usable
    ///
    /// A non-positive reveal rate is valid (it means "reveal instantly"), but
    /// it must still be a number.
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.float_speed.is_finite() || !self.float_amplitude.is_finite() {
            return Err(ConfigError::Invalid("float speed and amplitude must be finite".to_string()));
        }
        if self.chars_per_second.is_nan() {
            return Err(ConfigError::Invalid("chars_per_second must be a number".to_string()));
        }
        if !(self.caret_blink_interval_seconds.is_finite() && self.caret_blink_interval_seconds > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "caret_blink_interval_seconds must be positive, got {}",
                self.caret_blink_interval_seconds
            )));
        }
        Ok(())
    }
}

impl PresenterConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
