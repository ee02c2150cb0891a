//! Configuration system
//!
//! Every config struct can be read from and written to `.toml` or `.ron`
//! files through the [`Config`] trait. Missing fields fall back to their
//! defaults, so a file only needs to name what it changes.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::render::{WindowFlags, WindowSettings};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.toml` or `.ron` file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::of(path)?;
        let contents = std::fs::read_to_string(path)?;

        match format {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::of(path)? {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Everything the engine reads at start-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Frame timing
    pub timing: TimingConfig,
    /// Media directories
    pub assets: AssetConfig,
    /// Log output
    pub logging: LoggingConfig,
}

impl Config for ApplicationConfig {}

impl ApplicationConfig {
    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.title.trim().is_empty() {
            return Err(ConfigError::Invalid("window title is empty".to_owned()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} has a zero dimension",
                self.window.width, self.window.height
            )));
        }
        let step = self.timing.fixed_timestep;
        if step.is_nan() || step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fixed timestep must be positive, got {step}"
            )));
        }
        if self.timing.max_fixed_steps_per_frame == 0 {
            return Err(ConfigError::Invalid("max fixed steps per frame is zero".to_owned()));
        }
        Ok(())
    }
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Whether the user can resize the window
    pub resizable: bool,
    /// Vertical sync
    pub vsync: bool,
    /// 4x multisampling
    pub msaa_4x: bool,
    /// Frame rate cap, 0 for uncapped
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Mistral".to_owned(),
            width: 2560,
            height: 1440,
            resizable: true,
            vsync: true,
            msaa_4x: true,
            target_fps: 165,
        }
    }
}

impl WindowConfig {
    /// Backend-facing window description
    #[must_use]
    pub fn to_window_settings(&self) -> WindowSettings {
        let mut flags = WindowFlags::empty();
        flags.set(WindowFlags::RESIZABLE, self.resizable);
        flags.set(WindowFlags::VSYNC, self.vsync);
        flags.set(WindowFlags::MSAA_4X, self.msaa_4x);

        WindowSettings {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            flags,
            target_fps: self.target_fps,
        }
    }
}

/// Frame timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Seconds per fixed update step
    pub fixed_timestep: f32,
    /// Fixed steps allowed in one frame before the backlog is dropped
    pub max_fixed_steps_per_frame: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_fixed_steps_per_frame: 5,
        }
    }
}

/// Media directory names, relative to the executable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Game media
    pub resources_dir: String,
    /// Editor media
    pub editor_resources_dir: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            resources_dir: crate::assets::paths::RESOURCES_DIR_NAME.to_owned(),
            editor_resources_dir: crate::assets::paths::EDITOR_RESOURCES_DIR_NAME.to_owned(),
        }
    }
}

/// Log output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level (`error`, `warn`, `info`, `debug`, `trace` or `off`);
    /// `RUST_LOG` takes precedence
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned() }
    }
}
