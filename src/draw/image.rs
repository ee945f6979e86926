//! Image sources and decoding into Cairo surfaces.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Where an image is loaded from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// File on disk
    Path(PathBuf),
    /// Encoded image bytes (PNG or JPEG)
    Bytes(Vec<u8>),
    /// `data:` URL, base64 or plain
    DataUrl(String),
}

impl From<&str> for ImageSource {
    fn from(src: &str) -> Self {
        if src.starts_with("data:") {
            ImageSource::DataUrl(src.to_string())
        } else {
            ImageSource::Path(PathBuf::from(src))
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Bytes(bytes)
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => write!(f, "{}", path.display()),
            ImageSource::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            ImageSource::DataUrl(url) => {
                let head: String = url.chars().take(32).collect();
                if url.len() > head.len() {
                    write!(f, "{head}...")
                } else {
                    f.write_str(&head)
                }
            }
        }
    }
}

/// Errors that can occur while loading an image.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed data URL: {0}")]
    DataUrl(String),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Unsupported or corrupt image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels")]
    Empty,

    #[error("Cairo surface error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Cairo surface busy: {0}")]
    Borrow(#[from] cairo::BorrowError),
}

impl ImageSource {
    /// Reads the encoded bytes behind this source.
    pub fn read_bytes(&self) -> Result<Vec<u8>, ImageLoadError> {
        match self {
            ImageSource::Path(path) => Ok(fs::read(path)?),
            ImageSource::Bytes(bytes) => Ok(bytes.clone()),
            ImageSource::DataUrl(url) => decode_data_url(url),
        }
    }

    /// Reads and decodes this source into a Cairo surface.
    pub fn load(&self) -> Result<cairo::ImageSurface, ImageLoadError> {
        decode_surface(&self.read_bytes()?)
    }
}

/// Extracts the payload of a `data:[<mime>][;base64],<data>` URL.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, ImageLoadError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ImageLoadError::DataUrl("missing 'data:' prefix".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| ImageLoadError::DataUrl("missing ',' separator".to_string()))?;

    if meta.ends_with(";base64") {
        Ok(BASE64.decode(payload.trim())?)
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

/// Decodes PNG/JPEG bytes into a premultiplied ARGB32 Cairo surface.
pub fn decode_surface(bytes: &[u8]) -> Result<cairo::ImageSurface, ImageLoadError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageLoadError::Empty);
    }

    let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width as i32, height as i32)?;
    let stride = surface.stride() as usize;

    {
        let mut data = surface.data()?;
        for (y, row) in rgba.rows().enumerate() {
            for (x, pixel) in row.enumerate() {
                let [r, g, b, a] = pixel.0;
                let premultiply = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
                let argb = (a as u32) << 24
                    | (premultiply(r) as u32) << 16
                    | (premultiply(g) as u32) << 8
                    | premultiply(b) as u32;
                let offset = y * stride + x * 4;
                data[offset..offset + 4].copy_from_slice(&argb.to_ne_bytes());
            }
        }
    }

    Ok(surface)
}
