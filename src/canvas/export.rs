use crate::error::CanvasError;
use crate::export::file::save_bytes;
use crate::export::{
    Blob, DEFAULT_QUALITY, ExportError, ExportFormat, SaveOptions, data_url, encode_surface,
};
use std::path::PathBuf;

use super::Canvas;

impl Canvas {
    /// Encodes the current surface contents.
    pub fn encode(&self, format: ExportFormat, quality: f64) -> Result<Vec<u8>, ExportError> {
        encode_surface(&self.surface, format, quality)
    }

    /// Encodes the surface as a `data:` URL.
    ///
    /// Unknown MIME types export as PNG; `quality` (0.0 - 1.0, default 0.9)
    /// only affects JPEG.
    pub fn to_data_url(&self, mime: &str, quality: Option<f64>) -> Result<String, CanvasError> {
        let format = ExportFormat::from_mime(mime);
        let bytes = self.encode(format, quality.unwrap_or(DEFAULT_QUALITY))?;
        Ok(data_url(format, &bytes))
    }

    /// Encodes the surface and hands the result to `callback`.
    pub fn to_blob<F>(&self, mime: &str, quality: Option<f64>, callback: F)
    where
        F: FnOnce(Result<Blob, ExportError>),
    {
        let format = ExportFormat::from_mime(mime);
        let result = self
            .encode(format, quality.unwrap_or(DEFAULT_QUALITY))
            .map(|bytes| Blob {
                mime_type: format.mime_type().to_string(),
                bytes,
            });
        callback(result);
    }

    /// Writes the surface to a file and returns its path.
    pub fn save(&self, options: &SaveOptions) -> Result<PathBuf, CanvasError> {
        let bytes = self.encode(options.format, options.quality)?;
        Ok(save_bytes(&bytes, options)?)
    }
}
