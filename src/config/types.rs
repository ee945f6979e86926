//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::GridOptions;
use crate::export::file::expand_tilde;
use crate::export::types::default_export_directory;
use crate::export::{ExportFormat, SaveOptions};
use crate::input::BoardOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Surface settings used when a canvas is created from configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Logical width in CSS pixels (valid range: 1 - 16384)
    #[serde(default = "default_width")]
    pub width: f64,

    /// Logical height in CSS pixels (valid range: 1 - 16384)
    #[serde(default = "default_height")]
    pub height: f64,

    /// Device pixels per logical pixel (valid range: 0.25 - 8.0)
    #[serde(default = "default_device_pixel_scale")]
    pub device_pixel_scale: f64,

    /// Maximum clickable shapes per frame (0 = unlimited)
    #[serde(default)]
    pub max_shapes_per_frame: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            device_pixel_scale: default_device_pixel_scale(),
            max_shapes_per_frame: 0,
        }
    }
}

/// Pen defaults for the freehand drawing board.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingBoardConfig {
    /// Stroke width in logical pixels (valid range: 0.5 - 100.0)
    #[serde(default = "default_board_line_width")]
    pub line_width: f64,

    /// Stroke color - a named color or an RGB array like `[0, 0, 0]`
    #[serde(default = "default_board_color")]
    pub color: ColorSpec,
}

impl Default for DrawingBoardConfig {
    fn default() -> Self {
        Self {
            line_width: default_board_line_width(),
            color: default_board_color(),
        }
    }
}

impl DrawingBoardConfig {
    pub fn to_options(&self) -> BoardOptions {
        BoardOptions {
            line_width: self.line_width,
            color: self.color.to_color(),
        }
    }
}

/// Background grid appearance.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GridConfig {
    /// Distance between grid lines (valid range: 2.0 - 1000.0)
    #[serde(default = "default_grid_spacing")]
    pub spacing: f64,

    /// Line color
    #[serde(default = "default_grid_color")]
    pub color: ColorSpec,

    /// Line width (valid range: 0.1 - 10.0)
    #[serde(default = "default_grid_line_width")]
    pub line_width: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: default_grid_spacing(),
            color: default_grid_color(),
            line_width: default_grid_line_width(),
        }
    }
}

impl GridConfig {
    pub fn to_options(&self) -> GridOptions {
        GridOptions {
            spacing: self.spacing,
            color: self.color.to_color(),
            line_width: self.line_width,
        }
    }
}

/// Export defaults for `save`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Output format: "png" or "jpeg"
    #[serde(default)]
    pub format: ExportFormat,

    /// JPEG quality (valid range: 0.0 - 1.0)
    #[serde(default = "default_quality")]
    pub quality: f64,

    /// Target directory; `~/` is expanded. Defaults to the downloads directory
    #[serde(default)]
    pub directory: Option<String>,

    /// File name template with chrono format specifiers; the extension is appended
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            quality: default_quality(),
            directory: None,
            filename_template: default_filename_template(),
        }
    }
}

impl ExportConfig {
    pub fn to_save_options(&self) -> SaveOptions {
        SaveOptions {
            format: self.format,
            quality: self.quality,
            directory: self
                .directory
                .as_deref()
                .map(expand_tilde)
                .unwrap_or_else(default_export_directory),
            filename: None,
            filename_template: self.filename_template.clone(),
        }
    }
}

fn default_width() -> f64 {
    300.0
}

fn default_height() -> f64 {
    150.0
}

fn default_device_pixel_scale() -> f64 {
    1.0
}

fn default_board_line_width() -> f64 {
    2.0
}

fn default_board_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_grid_spacing() -> f64 {
    20.0
}

fn default_grid_color() -> ColorSpec {
    ColorSpec::Rgb([204, 204, 204])
}

fn default_grid_line_width() -> f64 {
    0.5
}

fn default_quality() -> f64 {
    crate::export::DEFAULT_QUALITY
}

fn default_filename_template() -> String {
    "canvas-%s%3f".to_string()
}
