//! Hit testing for clickable shapes.
//!
//! - [`ShapeGeometry`]: rect, arc/sector, triangle and rotated image geometry
//! - [`ShapeRegistry`]: per-frame, draw-ordered list of clickable shapes
//! - point-containment predicates used by pointer dispatch

pub mod registry;
pub mod shape;

pub use registry::ShapeRegistry;
pub use shape::{
    ClickHandler, ShapeGeometry, ShapeKind, ShapeRecord, point_in_arc, point_in_image,
    point_in_rect, point_in_triangle,
};
