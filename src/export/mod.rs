//! Surface export for canvas-utils.
//!
//! This module turns the drawing surface into encoded images:
//! - PNG (through Cairo) and JPEG (through the `image` crate)
//! - `data:` URLs and in-memory blobs
//! - Files on disk with templated names

pub mod encode;
pub mod file;
pub mod types;

pub use encode::{data_url, encode_surface, jpeg_quality};
pub use types::{Blob, DEFAULT_QUALITY, ExportError, ExportFormat, SaveOptions};
