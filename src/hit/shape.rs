//! Hit-testable shape records and their point-containment predicates.
//!
//! Every predicate is boundary-inclusive and pure. Degenerate input (zero-area
//! triangles, non-finite coordinates) resolves to "not inside" rather than
//! propagating NaN through the comparisons.

use crate::canvas::Canvas;
use crate::util::normalize_angle;
use std::f64::consts::TAU;
use std::fmt;
use std::rc::Rc;

/// Callback invoked when a registered shape receives a click.
///
/// The handler gets the canvas back so it can change state and re-render; the
/// registry it was dispatched from may be rebuilt while it runs.
pub type ClickHandler = Rc<dyn Fn(&mut Canvas)>;

/// Discriminant of a [`ShapeGeometry`], handy for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    Arc,
    Triangle,
    Image,
}

/// Geometry of a clickable shape, in the local coordinates it was drawn with.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    /// Axis-aligned rectangle
    Rect {
        /// Top-left X coordinate
        x: f64,
        /// Top-left Y coordinate
        y: f64,
        /// Width (non-negative)
        width: f64,
        /// Height (non-negative)
        height: f64,
    },
    /// Circle or circular sector
    Arc {
        /// Center X coordinate
        x: f64,
        /// Center Y coordinate
        y: f64,
        /// Radius (positive)
        radius: f64,
        /// Start angle in radians, clockwise from +X
        start_angle: f64,
        /// End angle in radians, clockwise from +X
        end_angle: f64,
    },
    /// Triangle given by three vertices
    Triangle {
        points: [(f64, f64); 3],
    },
    /// Rotated image rectangle positioned by an anchor point
    Image {
        /// Anchor X position (where `anchor_x` of the width lands)
        x: f64,
        /// Anchor Y position (where `anchor_y` of the height lands)
        y: f64,
        /// Drawn width
        width: f64,
        /// Drawn height
        height: f64,
        /// Rotation about the anchor in radians
        rotation: f64,
        /// Horizontal anchor fraction (0.0 - 1.0)
        anchor_x: f64,
        /// Vertical anchor fraction (0.0 - 1.0)
        anchor_y: f64,
    },
}

impl ShapeGeometry {
    /// Returns the kind of this geometry.
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeGeometry::Rect { .. } => ShapeKind::Rect,
            ShapeGeometry::Arc { .. } => ShapeKind::Arc,
            ShapeGeometry::Triangle { .. } => ShapeKind::Triangle,
            ShapeGeometry::Image { .. } => ShapeKind::Image,
        }
    }

    /// Returns `true` when `(x, y)` lies inside (or on the boundary of) this shape.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }

        match *self {
            ShapeGeometry::Rect {
                x: rx,
                y: ry,
                width,
                height,
            } => point_in_rect(x, y, rx, ry, width, height),
            ShapeGeometry::Arc {
                x: cx,
                y: cy,
                radius,
                start_angle,
                end_angle,
            } => point_in_arc(x, y, cx, cy, radius, start_angle, end_angle),
            ShapeGeometry::Triangle { points } => point_in_triangle(x, y, &points),
            ShapeGeometry::Image {
                x: ax,
                y: ay,
                width,
                height,
                rotation,
                anchor_x,
                anchor_y,
            } => point_in_image(
                x, y, ax, ay, width, height, rotation, anchor_x, anchor_y,
            ),
        }
    }
}

/// One clickable shape registered during the current frame.
///
/// Besides its geometry a record keeps the frame it was drawn in, so a later
/// change of origin or flip cannot move its hit area away from its pixels.
#[derive(Clone)]
pub struct ShapeRecord {
    pub geometry: ShapeGeometry,
    pub on_click: ClickHandler,
    /// Surface pixels to drawing-frame coordinates; `None` if the drawing
    /// matrix was singular
    pixel_to_local: Option<cairo::Matrix>,
}

impl ShapeRecord {
    /// Creates a record whose drawing frame is the identity (local units are
    /// surface pixels).
    pub fn new(geometry: ShapeGeometry, on_click: ClickHandler) -> Self {
        Self {
            geometry,
            on_click,
            pixel_to_local: Some(cairo::Matrix::identity()),
        }
    }

    /// Records the drawing matrix (local coordinates to surface pixels) that
    /// was active when the shape was painted.
    pub fn with_frame(mut self, local_to_pixel: cairo::Matrix) -> Self {
        self.pixel_to_local = local_to_pixel.try_invert().ok();
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    /// Maps a surface pixel position into this shape's drawing frame.
    pub fn local_point(&self, pixel_x: f64, pixel_y: f64) -> Option<(f64, f64)> {
        self.pixel_to_local
            .map(|matrix| matrix.transform_point(pixel_x, pixel_y))
    }

    /// Returns `true` when the surface pixel position falls inside the shape.
    pub fn contains_pixel(&self, pixel_x: f64, pixel_y: f64) -> bool {
        self.local_point(pixel_x, pixel_y)
            .is_some_and(|(x, y)| self.geometry.contains(x, y))
    }
}

impl fmt::Debug for ShapeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeRecord")
            .field("geometry", &self.geometry)
            .field("pixel_to_local", &self.pixel_to_local)
            .finish_non_exhaustive()
    }
}

/// Inclusive axis-aligned bounds test.
pub fn point_in_rect(x: f64, y: f64, rx: f64, ry: f64, width: f64, height: f64) -> bool {
    x >= rx && x <= rx + width && y >= ry && y <= ry + height
}

/// Circle / sector test.
///
/// A start of 0 with an end of 2π (or any sweep of a full turn) is treated as
/// a whole circle. Otherwise both angles are normalized into `[0, 2π)` and a
/// start greater than the end describes a sector wrapping through 0.
pub fn point_in_arc(
    x: f64,
    y: f64,
    cx: f64,
    cy: f64,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> bool {
    let dx = x - cx;
    let dy = y - cy;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance.is_nan() || distance > radius {
        return false;
    }

    if (start_angle == 0.0 && end_angle == TAU) || (end_angle - start_angle).abs() >= TAU {
        return true;
    }

    let angle = normalize_angle(dy.atan2(dx));
    let start = normalize_angle(start_angle);
    let end = normalize_angle(end_angle);

    if start < end {
        angle >= start && angle <= end
    } else {
        angle >= start || angle <= end
    }
}

/// Barycentric triangle test, independent of winding.
///
/// Returns `false` for zero-area (collinear or coincident) triangles.
pub fn point_in_triangle(x: f64, y: f64, points: &[(f64, f64); 3]) -> bool {
    let [a, b, c] = *points;

    let v0 = (c.0 - a.0, c.1 - a.1);
    let v1 = (b.0 - a.0, b.1 - a.1);
    let v2 = (x - a.0, y - a.1);

    let dot00 = v0.0 * v0.0 + v0.1 * v0.1;
    let dot01 = v0.0 * v1.0 + v0.1 * v1.1;
    let dot02 = v0.0 * v2.0 + v0.1 * v2.1;
    let dot11 = v1.0 * v1.0 + v1.1 * v1.1;
    let dot12 = v1.0 * v2.0 + v1.1 * v2.1;

    let denominator = dot00 * dot11 - dot01 * dot01;
    // Gram determinant is |v0|²|v1|² sin²θ; compare relative to its scale
    if !denominator.is_finite() || denominator <= f64::EPSILON * dot00 * dot11 {
        return false;
    }

    let inv = 1.0 / denominator;
    let u = (dot11 * dot02 - dot01 * dot12) * inv;
    let v = (dot00 * dot12 - dot01 * dot02) * inv;

    u >= 0.0 && v >= 0.0 && u + v <= 1.0
}

/// Rotated, anchored rectangle test used for images.
#[allow(clippy::too_many_arguments)]
pub fn point_in_image(
    x: f64,
    y: f64,
    ax: f64,
    ay: f64,
    width: f64,
    height: f64,
    rotation: f64,
    anchor_x: f64,
    anchor_y: f64,
) -> bool {
    let offset_x = width * anchor_x;
    let offset_y = height * anchor_y;

    let mut local_x = x - ax;
    let mut local_y = y - ay;

    if rotation != 0.0 {
        let (sin, cos) = (-rotation).sin_cos();
        let rotated_x = local_x * cos - local_y * sin;
        let rotated_y = local_x * sin + local_y * cos;
        local_x = rotated_x;
        local_y = rotated_y;
    }

    local_x >= -offset_x
        && local_x <= width - offset_x
        && local_y >= -offset_y
        && local_y <= height - offset_y
}
