// Configuration management
//
// Handles display settings, screenshot output, silkscreen artwork and
// logging, persisted as TOML.

use crate::display::geometry::{DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};
use crate::display::{Geometry, Orientation};
use crate::screenshot::ScreenshotOptions;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default configuration file path
pub const CONFIG_FILE: &str = "display_config.toml";

/// Errors that can occur while loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error
    Io(io::Error),

    /// The file is not valid TOML for this configuration
    Parse(toml::de::Error),

    /// The configuration could not be written as TOML
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "Invalid configuration: {}", e),
            ConfigError::Serialize(e) => write!(f, "Failed to serialize configuration: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Display configuration
///
/// Stores all user-configurable settings for the display host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Video settings
    pub video: VideoConfig,

    /// Screenshot settings
    pub screenshot: ScreenshotConfig,

    /// Silkscreen artwork
    pub silkscreen: SilkscreenConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Video configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Window scale (1-8)
    pub scale: u32,

    /// Panel orientation
    pub orientation: Orientation,

    /// Largest surface width the host will allocate
    pub max_width: u32,

    /// Largest surface height the host will allocate
    pub max_height: u32,

    /// Frames that may queue between the core and the window
    pub channel_capacity: usize,
}

/// Screenshot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    /// Screenshot directory
    pub screenshot_directory: PathBuf,

    /// Include timestamp in filename
    pub include_timestamp: bool,
}

/// Silkscreen configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SilkscreenConfig {
    /// XBM file drawn under the LCD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level filter: off, error, warn, info, debug or trace
    pub level: String,

    /// Also append log lines to this file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        VideoConfig {
            scale: 2,
            orientation: Orientation::Native,
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            channel_capacity: crate::display::channel::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        ScreenshotConfig {
            screenshot_directory: PathBuf::from("screenshots"),
            include_timestamp: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl VideoConfig {
    /// Host size limits as a geometry
    pub fn limits(&self) -> Geometry {
        Geometry::new(self.max_width, self.max_height)
    }
}

impl ScreenshotConfig {
    /// Options for the screenshot writer
    pub fn options(&self) -> ScreenshotOptions {
        ScreenshotOptions {
            directory: self.screenshot_directory.clone(),
            include_timestamp: self.include_timestamp,
        }
    }
}

impl LoggingConfig {
    /// Parsed level filter; unknown names fall back to `Info`
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

impl DisplayConfig {
    /// Load configuration from file or create default
    ///
    /// If the configuration file doesn't exist, creates a default configuration
    /// and saves it to the file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use newton_display::config::{DisplayConfig, CONFIG_FILE};
    ///
    /// let config = DisplayConfig::load_or_default(CONFIG_FILE);
    /// ```
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                // Try to save the default config, but don't fail if we can't
                let _ = config.save(path);
                config
            }
            Err(e) => {
                // Logging is not set up yet when the config is read
                eprintln!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Save configuration to file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use newton_display::config::DisplayConfig;
    ///
    /// let config = DisplayConfig::default();
    /// config.save("display_config.toml").expect("Failed to save configuration");
    /// ```
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DisplayConfig::default();
        assert_eq!(config.video.scale, 2);
        assert_eq!(config.video.limits(), Geometry::new(4096, 4096));
        assert_eq!(config.logging.level_filter(), LevelFilter::Info);
        assert!(config.silkscreen.path.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = DisplayConfig::from_toml(
            r#"
            [video]
            orientation = "rotated"
            max_width = 640

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.video.orientation, Orientation::Rotated);
        assert_eq!(config.video.max_width, 640);
        assert_eq!(config.video.max_height, DEFAULT_MAX_HEIGHT);
        assert_eq!(config.logging.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_orientation_rejected() {
        let result = DisplayConfig::from_toml("[video]\norientation = \"sideways\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_serialization() {
        let mut config = DisplayConfig::default();
        config.silkscreen.path = Some(PathBuf::from("silkscreen.xbm"));

        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        let deserialized = DisplayConfig::from_toml(&toml_str).expect("Failed to deserialize");

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_unknown_level_falls_back() {
        let logging = LoggingConfig {
            level: "chatty".to_string(),
            file: None,
        };
        assert_eq!(logging.level_filter(), LevelFilter::Info);
    }
}
