//! Rendering primitives and drawing options (Cairo-based).
//!
//! This module defines the drawing-side types used by [`Canvas`](crate::Canvas):
//! - [`Color`]: RGBA color representation with predefined color constants
//! - Option structs for each drawing call ([`RectOptions`], [`ArcOptions`], ...)
//! - [`ImageSource`]: where images come from, plus decoding into Cairo surfaces
//! - Rendering functions that paint the primitives onto a Cairo context

pub mod color;
pub mod font;
pub mod image;
pub mod options;
pub mod render;

// Re-export commonly used types at module level
pub use color::Color;
pub use font::FontDescriptor;
pub use image::{ImageLoadError, ImageSource};
pub use options::{
    ArcOptions, ArcTextOptions, BezierOptions, CenterOptions, GridOptions, ImageOptions, LineKind,
    LineOptions, PaintStyle, Point, RectOptions, StarOptions, TextAlign, TextBaseline,
    TextOptions, TextPaint, TriangleOptions,
};
pub use render::ImagePlacement;

pub use color::{
    BLACK, BLUE, GOLD, GREEN, LIGHT_GRAY, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW,
};
