//! Configuration file support for canvas-utils.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/canvas-utils/config.toml`. Settings include the default surface
//! size, drawing-board pen, grid appearance and export defaults.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{CanvasConfig, DrawingBoardConfig, ExportConfig, GridConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 300
/// height = 150
/// device_pixel_scale = 1.0
///
/// [drawing_board]
/// line_width = 2.0
/// color = "black"
///
/// [grid]
/// spacing = 20
/// color = [204, 204, 204]
///
/// [export]
/// format = "png"
/// quality = 0.9
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Surface size, scale and shape limits
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Freehand drawing-board pen
    #[serde(default)]
    pub drawing_board: DrawingBoardConfig,

    /// Background grid appearance
    #[serde(default)]
    pub grid: GridConfig,

    /// Export format and destination
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    fn validate_and_clamp(&mut self) {
        clamp_setting("canvas.width", &mut self.canvas.width, 1.0, 16384.0, 300.0);
        clamp_setting("canvas.height", &mut self.canvas.height, 1.0, 16384.0, 150.0);
        clamp_setting(
            "canvas.device_pixel_scale",
            &mut self.canvas.device_pixel_scale,
            0.25,
            8.0,
            1.0,
        );
        clamp_setting(
            "drawing_board.line_width",
            &mut self.drawing_board.line_width,
            0.5,
            100.0,
            2.0,
        );
        clamp_setting("grid.spacing", &mut self.grid.spacing, 2.0, 1000.0, 20.0);
        clamp_setting("grid.line_width", &mut self.grid.line_width, 0.1, 10.0, 0.5);
        clamp_setting("export.quality", &mut self.export.quality, 0.0, 1.0, 0.9);

        if self.export.filename_template.trim().is_empty() {
            log::warn!("Empty export filename_template, falling back to 'canvas-%s%3f'");
            self.export.filename_template = "canvas-%s%3f".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("canvas-utils");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or the file exists
    /// but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the config to TOML and writes it to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Saves the current configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Writes the documented example config to `path`.
    ///
    /// # Errors
    /// Returns an error if a file already exists there or it cannot be written.
    pub fn create_default_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(path, default_config)?;

        info!("Created default config at {}", path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_setting(name: &str, value: &mut f64, min: f64, max: f64, fallback: f64) {
    if !value.is_finite() {
        log::warn!("Invalid {} {}, falling back to {:.2}", name, value, fallback);
        *value = fallback;
    } else if !(min..=max).contains(value) {
        log::warn!(
            "Invalid {} {:.2}, clamping to {}-{} range",
            name,
            value,
            min,
            max
        );
        *value = value.clamp(min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, LIGHT_GRAY};
    use crate::export::ExportFormat;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.canvas.width, 300.0);
        assert_eq!(config.canvas.height, 150.0);
        assert_eq!(config.canvas.max_shapes_per_frame, 0);
        assert_eq!(config.drawing_board.to_options().color, BLACK);
        assert_eq!(config.grid.to_options().color, LIGHT_GRAY);
        assert_eq!(config.export.format, ExportFormat::Png);
        assert_eq!(config.export.quality, 0.9);
    }

    #[test]
    fn partial_file_fills_defaults_and_clamps() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[canvas]
width = 640
device_pixel_scale = 100.0

[grid]
spacing = 0.5

[export]
format = "jpeg"
quality = 3.0
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.canvas.width, 640.0);
        assert_eq!(config.canvas.height, 150.0);
        assert_eq!(config.canvas.device_pixel_scale, 8.0);
        assert_eq!(config.grid.spacing, 2.0);
        assert_eq!(config.export.format, ExportFormat::Jpeg);
        assert_eq!(config.export.quality, 1.0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[canvas\nwidth = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.drawing_board.line_width = 5.0;
        config.export.directory = Some("/tmp/exports".to_string());

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.drawing_board.line_width, 5.0);
        assert_eq!(
            loaded.export.to_save_options().directory,
            PathBuf::from("/tmp/exports")
        );
    }

    #[test]
    fn example_file_parses() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        Config::create_default_file(&path).unwrap();
        assert!(Config::create_default_file(&path).is_err());

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.canvas.width, 300.0);
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema.get("properties").unwrap();
        for section in ["canvas", "drawing_board", "grid", "export"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
