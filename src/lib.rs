//! Declarative 2D drawing on a Cairo surface with hit-testable shapes.
//!
//! A [`Canvas`] wraps an image surface and exposes option-struct drawing calls
//! (rectangles, arcs, triangles, text, images, ...). Shapes drawn with a click
//! handler are recorded in a per-frame registry, and pointer events are mapped
//! back through the device-pixel scale, Y flip and origin so the top-most shape
//! under the pointer receives the click.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod error;
pub mod export;
pub mod hit;
pub mod input;
pub mod transform;
pub mod util;

pub use canvas::Canvas;
pub use config::Config;
pub use error::CanvasError;
