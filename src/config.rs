//=========================================================================
// Driver Configuration
//=========================================================================
//
// Startup settings for input drivers, loaded from TOML or assembled in
// code through `DriverBuilder`.
//
// ```toml
// platform = "switch"
// pad_index = 0
//
// [display]
// handheld = { width = 1280, height = 720 }
// docked = { width = 1920, height = 1080 }
//
// [desktop]
// title = "Game"
// width = 800
// height = 600
// channel_capacity = 0
// ```
//
// Every field has a default, so an empty document is a valid config.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::Platform;
use crate::error::ConfigError;

//=== DisplaySize =========================================================

/// Framebuffer size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid {
                field,
                reason: format!("{}x{} has a zero dimension", self.width, self.height),
            });
        }
        Ok(())
    }
}

//=== DisplayConfig =======================================================

/// Sizes reported on operation-mode changes (Switch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub handheld: DisplaySize,
    pub docked: DisplaySize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            handheld: DisplaySize::new(1280, 720),
            docked: DisplaySize::new(1920, 1080),
        }
    }
}

//=== DesktopConfig =======================================================

/// Window settings for the desktop pump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Pump → driver channel capacity; `0` is unbounded.
    pub channel_capacity: usize,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            title: String::from("Game"),
            width: 800,
            height: 600,
            channel_capacity: 0,
        }
    }
}

//=== DriverConfig ========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub platform: Platform,
    /// Registry index of the pad the console drivers sample.
    pub pad_index: usize,
    pub display: DisplayConfig,
    pub desktop: DesktopConfig,
}

impl DriverConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&text)?;
        info!(target: "platform", "Loaded input config from {} ({})", path.display(), config.platform);
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Rejects sizes that could never be reported as a resize.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.display.handheld.check("display.handheld")?;
        self.display.docked.check("display.docked")?;
        DisplaySize::new(self.desktop.width, self.desktop.height).check("desktop")?;

        debug!(target: "platform", "Config valid: {:?}", self);
        Ok(())
    }
}

//=== DriverBuilder =======================================================

/// Fluent construction of a [`DriverConfig`].
///
/// Values are not checked here; [`DriverConfig::validate`] (run by
/// [`build_driver`](crate::platform::build_driver)) reports bad ones.
///
/// ```
/// use aetheric_hid::config::DriverBuilder;
/// use aetheric_hid::core::Platform;
///
/// let config = DriverBuilder::new()
///     .with_platform(Platform::Ctr)
///     .with_pad_index(1)
///     .build();
///
/// assert_eq!(config.pad_index, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DriverBuilder {
    config: DriverConfig,
}

impl DriverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.config.platform = platform;
        self
    }

    pub fn with_pad_index(mut self, pad_index: usize) -> Self {
        self.config.pad_index = pad_index;
        self
    }

    pub fn with_handheld_size(mut self, width: u32, height: u32) -> Self {
        self.config.display.handheld = DisplaySize::new(width, height);
        self
    }

    pub fn with_docked_size(mut self, width: u32, height: u32) -> Self {
        self.config.display.docked = DisplaySize::new(width, height);
        self
    }

    pub fn with_window(mut self, title: impl Into<String>, width: u32, height: u32) -> Self {
        self.config.desktop.title = title.into();
        self.config.desktop.width = width;
        self.config.desktop.height = height;
        self
    }

    /// Pump → driver channel capacity; `0` is unbounded.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.config.desktop.channel_capacity = capacity;
        self
    }

    pub fn build(self) -> DriverConfig {
        self.config
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = DriverConfig::from_toml_str("").unwrap();
        assert_eq!(config, DriverConfig::default());
        assert_eq!(config.platform, Platform::Switch);
        assert_eq!(config.display.handheld, DisplaySize::new(1280, 720));
        assert_eq!(config.display.docked, DisplaySize::new(1920, 1080));
        assert_eq!(config.desktop.channel_capacity, 0);
    }

    #[test]
    fn parses_full_document() {
        let text = r#"
            platform = "ctr"
            pad_index = 2

            [display]
            handheld = { width = 400, height = 240 }

            [desktop]
            title = "Viewer"
            channel_capacity = 64
        "#;

        let config = DriverConfig::from_toml_str(text).unwrap();
        assert_eq!(config.platform, Platform::Ctr);
        assert_eq!(config.pad_index, 2);
        assert_eq!(config.display.handheld, DisplaySize::new(400, 240));
        assert_eq!(config.display.docked, DisplaySize::new(1920, 1080), "Unset table keys default");
        assert_eq!(config.desktop.title, "Viewer");
        assert_eq!(config.desktop.width, 800);
        assert_eq!(config.desktop.channel_capacity, 64);
    }

    #[test]
    fn rejects_unknown_platform() {
        let result = DriverConfig::from_toml_str(r#"platform = "dreamcast""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn rejects_zero_dimensions() {
        let result = DriverConfig::from_toml_str("[display]\ndocked = { width = 1920, height = 0 }");
        match result {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "display.docked"),
            other => panic!("Expected Invalid, got {:?}", other),
        }

        let config = DriverBuilder::new().with_window("w", 0, 600).build();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "desktop", .. })));
    }

    #[test]
    fn serializes_back_to_equal_config() {
        let config = DriverBuilder::new()
            .with_platform(Platform::Desktop)
            .with_window("Tool", 1024, 768)
            .with_channel_capacity(16)
            .build();

        let text = config.to_toml_string().unwrap();
        assert!(text.contains(r#"platform = "desktop""#));
        assert_eq!(DriverConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn load_reports_missing_file() {
        let path = std::env::temp_dir().join("aetheric-hid-missing-config.toml");
        match DriverConfig::load(&path) {
            Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!("aetheric-hid-config-{}.toml", std::process::id()));
        fs::write(&path, "pad_index = 3\n").unwrap();

        let config = DriverConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.pad_index, 3);
    }

    #[test]
    fn builder_sets_each_field() {
        let config = DriverBuilder::new()
            .with_platform(Platform::Switch)
            .with_pad_index(4)
            .with_handheld_size(640, 360)
            .with_docked_size(1280, 720)
            .build();

        assert_eq!(config.pad_index, 4);
        assert_eq!(config.display.handheld, DisplaySize::new(640, 360));
        assert_eq!(config.display.docked, DisplaySize::new(1280, 720));
    }
}
