//! Encoding Cairo image surfaces as PNG or JPEG.

use super::types::{DEFAULT_QUALITY, ExportError, ExportFormat};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;

/// Maps a 0.0 - 1.0 quality to the encoder's 1 - 100 scale.
pub fn jpeg_quality(quality: f64) -> u8 {
    let quality = if quality.is_finite() {
        quality.clamp(0.0, 1.0)
    } else {
        DEFAULT_QUALITY
    };
    ((quality * 100.0).round() as u8).max(1)
}

/// Encodes the surface in the requested format.
pub fn encode_surface(
    surface: &cairo::ImageSurface,
    format: ExportFormat,
    quality: f64,
) -> Result<Vec<u8>, ExportError> {
    surface.flush();
    match format {
        ExportFormat::Png => encode_png(surface),
        ExportFormat::Jpeg => encode_jpeg(surface, jpeg_quality(quality)),
    }
}

pub fn encode_png(surface: &cairo::ImageSurface) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    surface.write_to_png(&mut bytes)?;
    Ok(bytes)
}

/// Encodes the surface as JPEG. Transparent areas come out black.
pub fn encode_jpeg(surface: &cairo::ImageSurface, quality: u8) -> Result<Vec<u8>, ExportError> {
    let rgb = surface_to_rgb(surface)?;
    let width = surface.width() as u32;
    let height = surface.height() as u32;

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality).encode(
        &rgb,
        width,
        height,
        ExtendedColorType::Rgb8,
    )?;
    Ok(bytes)
}

/// Flattens the surface onto black as packed RGB8.
///
/// The live surface is shared with its drawing context, so the pixels are
/// read from a private copy.
fn surface_to_rgb(surface: &cairo::ImageSurface) -> Result<Vec<u8>, ExportError> {
    let width = surface.width();
    let height = surface.height();
    let mut copy = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
    {
        let ctx = cairo::Context::new(&copy)?;
        ctx.set_source_surface(surface, 0.0, 0.0)?;
        ctx.paint()?;
    }
    copy.flush();

    let stride = copy.stride() as usize;
    let data = copy.data()?;
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height as usize {
        let row = &data[y * stride..y * stride + width as usize * 4];
        for pixel in row.chunks_exact(4) {
            // Premultiplied ARGB over black is the premultiplied color itself.
            let argb = u32::from_ne_bytes([pixel[0], pixel[1], pixel[2], pixel[3]]);
            rgb.push((argb >> 16) as u8);
            rgb.push((argb >> 8) as u8);
            rgb.push(argb as u8);
        }
    }
    Ok(rgb)
}

/// Builds a `data:` URL for already encoded bytes.
pub fn data_url(format: ExportFormat, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", format.mime_type(), BASE64.encode(bytes))
}
