//! Types for surface export.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Default lossy quality when none (or a non-finite one) is given.
pub const DEFAULT_QUALITY: f64 = 0.9;

/// Encoded image format for exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    /// Maps a MIME type to a format; anything unrecognised exports as PNG.
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => ExportFormat::Jpeg,
            "image/png" => ExportFormat::Png,
            other => {
                log::debug!("Unsupported export MIME type '{other}', falling back to PNG");
                ExportFormat::Png
            }
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }
}

/// Encoded surface contents handed to `to_blob` callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Blob {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Options for writing the surface to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOptions {
    pub format: ExportFormat,
    /// JPEG quality 0.0 - 1.0 (ignored for PNG)
    pub quality: f64,
    /// Target directory, created when missing
    pub directory: PathBuf,
    /// Exact file name; `None` generates one from `filename_template`
    pub filename: Option<String>,
    /// Chrono format string used when no explicit file name is given
    pub filename_template: String,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            quality: DEFAULT_QUALITY,
            directory: default_export_directory(),
            filename: None,
            filename_template: "canvas-%s%3f".to_string(),
        }
    }
}

/// Downloads directory, falling back to the working directory.
pub fn default_export_directory() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Errors that can occur while exporting the surface.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),

    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}
