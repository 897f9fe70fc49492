//! # Watch Settings
//!
//! Everything a build of the face might want to tune without touching code:
//! dial geometry, the datum new moon, button GPIOs, the fast-repeat timing,
//! the shopping list and where retained UI state lives on the host.
//!
//! A bad or missing `chronometer.toml` never stops the watch from drawing;
//! [`Config::load_from_path`] logs why and carries on with the defaults.
//! Use [`Config::try_load`] when the caller needs the error.

use crate::celestial::FaceGeometry;
use crate::input::ButtonPins;
use crate::lunar::MoonConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "chronometer.toml";

/// Errors from reading, writing or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config IO: {0}")]
    Io(#[from] io::Error),

    #[error("config parse: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Application configuration loaded from chronometer.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Dial dimensions and icon sizes
    pub face: FaceGeometry,
    /// Datum new moon and moon-art animation
    pub moon: MoonConfig,
    /// Fast-repeat timing and list paging
    pub navigation: NavigationConfig,
    /// GPIO wiring of the four buttons
    pub buttons: ButtonPins,
    /// Shopping list shown from the main menu
    pub list: ListConfig,
    /// UI state persistence
    pub storage: StorageConfig,
}

/// Fast-repeat loop and list behaviour
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NavigationConfig {
    /// Idle time after the last press before returning to sleep
    pub fast_repeat_timeout_ms: u64,
    /// Interval between repeats while a button is held
    pub repeat_interval_ms: u64,
    /// Entries per list screen
    pub list_page_size: usize,
}

/// Shopping list entries
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ListConfig {
    pub items: Vec<String>,
}

/// Where the retained UI state lives between wakes
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageConfig {
    pub state_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            face: FaceGeometry::default(),
            moon: MoonConfig::default(),
            navigation: NavigationConfig {
                fast_repeat_timeout_ms: 5000,
                repeat_interval_ms: 150,
                list_page_size: 5,
            },
            buttons: ButtonPins::default(),
            list: ListConfig {
                items: ["Milk", "Bread", "Eggs", "Coffee", "Apples", "Rice", "Tea"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            },
            storage: StorageConfig {
                state_path: PathBuf::from("/tmp/chronometer_state.json"),
            },
        }
    }
}

impl Config {
    /// Settings from [`CONFIG_FILE`] in the working directory, or the defaults.
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Settings from `path`, or the defaults when the file is absent,
    /// unparsable or fails [`Config::validate`].
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load(&path) {
            Ok(config) => {
                info!(path = %path.as_ref().display(), "loaded configuration");
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                info!("no config file found, using default configuration");
                Self::default()
            }
            Err(e) => {
                warn!(error = %e, "unusable config file, using default configuration");
                Self::default()
            }
        }
    }

    /// Read, parse and validate a config file without falling back.
    pub fn try_load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the dial or the loops misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.face.width <= 0 || self.face.height <= 0 {
            return invalid("face dimensions must be positive");
        }
        if self.face.zero_minute >= 1440 {
            return invalid("face.zero_minute must be a minute of the day");
        }
        if self.moon.cycle_scaled == 0 {
            return invalid("moon.cycle_scaled must be non-zero");
        }
        if self.moon.phase_divisor.is_nan() || self.moon.phase_divisor <= 0.0 {
            return invalid("moon.phase_divisor must be positive");
        }
        if self.moon.minutes_per_frame == 0 {
            return invalid("moon.minutes_per_frame must be non-zero");
        }
        if self.moon.first_frame_hour > 23 {
            return invalid("moon.first_frame_hour must be an hour of the day");
        }
        if self.navigation.repeat_interval_ms == 0
            || self.navigation.repeat_interval_ms >= self.navigation.fast_repeat_timeout_ms
        {
            return invalid("navigation.repeat_interval_ms must be non-zero and below the timeout");
        }
        if self.navigation.list_page_size == 0 {
            return invalid("navigation.list_page_size must be non-zero");
        }

        let pins = [
            self.buttons.menu,
            self.buttons.back,
            self.buttons.up,
            self.buttons.down,
        ];
        if pins.iter().any(|&pin| pin >= 64) {
            return invalid("button pins must fit the 64-bit wakeup mask");
        }
        for (i, pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(pin) {
                return invalid("button pins must be distinct");
            }
        }
        Ok(())
    }

    /// Write the settings back out, e.g. to seed an editable file.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }
}
