//! Option structs for every drawing call.
//!
//! Each struct implements [`Default`] with the values a bare call uses, so
//! callers only spell out what they change:
//!
//! ```
//! use canvas_utils::draw::{RectOptions, PaintStyle, BLUE};
//! let opts = RectOptions {
//!     position: (10.0, 10.0),
//!     color: BLUE,
//!     paint: PaintStyle::Stroke,
//!     ..Default::default()
//! };
//! assert_eq!(opts.size, (100.0, 100.0));
//! ```

use super::color::{BLACK, BLUE, Color, GOLD, RED, WHITE};
use super::image::ImageSource;
use crate::canvas::Canvas;
use crate::hit::ClickHandler;
use crate::transform::OriginCoord;
use std::f64::consts::TAU;
use std::rc::Rc;

/// A point in local drawing coordinates.
pub type Point = (f64, f64);

/// How a closed shape is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintStyle {
    /// Solid fill
    #[default]
    Fill,
    /// Solid outline
    Stroke,
    /// Dashed outline using the call's dash pattern
    Dash,
}

/// Line pattern for straight lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineKind {
    #[default]
    Solid,
    Dash,
}

/// How text glyphs are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextPaint {
    #[default]
    Fill,
    Stroke,
    Both,
}

/// Horizontal text alignment relative to the text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to the text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Top,
    Middle,
    Bottom,
    Alphabetic,
}

fn default_dash() -> Vec<f64> {
    vec![5.0, 10.0]
}

fn handler(f: impl Fn(&mut Canvas) + 'static) -> Option<ClickHandler> {
    Some(Rc::new(f))
}

/// Straight line between two points.
#[derive(Debug, Clone)]
pub struct LineOptions {
    /// Solid or dashed (default: Solid)
    pub kind: LineKind,
    /// Start point (default: (50, 50))
    pub a: Point,
    /// End point (default: (150, 150))
    pub b: Point,
    /// Dash pattern used when `kind` is Dash (default: [5, 10])
    pub dash: Vec<f64>,
    /// Stroke color (default: red)
    pub color: Color,
    /// Stroke width (default: 1)
    pub line_width: f64,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            kind: LineKind::Solid,
            a: (50.0, 50.0),
            b: (150.0, 150.0),
            dash: default_dash(),
            color: RED,
            line_width: 1.0,
        }
    }
}

/// Axis-aligned rectangle; clickable when `on_click` is set.
#[derive(Clone)]
pub struct RectOptions {
    /// Fill, outline or dashed outline (default: Fill)
    pub paint: PaintStyle,
    /// Top-left corner (default: (50, 50))
    pub position: Point,
    /// Width and height (default: (100, 100))
    pub size: (f64, f64),
    /// Fill/stroke color (default: red)
    pub color: Color,
    /// Outline width (default: 1)
    pub line_width: f64,
    /// Dash pattern for `PaintStyle::Dash` (default: [5, 10])
    pub dash: Vec<f64>,
    pub on_click: Option<ClickHandler>,
}

impl Default for RectOptions {
    fn default() -> Self {
        Self {
            paint: PaintStyle::Fill,
            position: (50.0, 50.0),
            size: (100.0, 100.0),
            color: RED,
            line_width: 1.0,
            dash: default_dash(),
            on_click: None,
        }
    }
}

impl RectOptions {
    /// Makes the rectangle clickable.
    pub fn with_click(mut self, f: impl Fn(&mut Canvas) + 'static) -> Self {
        self.on_click = handler(f);
        self
    }
}

/// Triangle through three vertices; clickable when `on_click` is set.
#[derive(Clone)]
pub struct TriangleOptions {
    /// Fill, outline or dashed outline (default: Fill)
    pub paint: PaintStyle,
    /// Vertices (default: [(50, 50), (150, 50), (100, 150)])
    pub points: [Point; 3],
    /// Fill/stroke color (default: red)
    pub color: Color,
    /// Outline width (default: 1)
    pub line_width: f64,
    /// Dash pattern for `PaintStyle::Dash` (default: [5, 10])
    pub dash: Vec<f64>,
    pub on_click: Option<ClickHandler>,
}

impl Default for TriangleOptions {
    fn default() -> Self {
        Self {
            paint: PaintStyle::Fill,
            points: [(50.0, 50.0), (150.0, 50.0), (100.0, 150.0)],
            color: RED,
            line_width: 1.0,
            dash: default_dash(),
            on_click: None,
        }
    }
}

impl TriangleOptions {
    /// Makes the triangle clickable.
    pub fn with_click(mut self, f: impl Fn(&mut Canvas) + 'static) -> Self {
        self.on_click = handler(f);
        self
    }
}

/// Circle or arc; clickable when `on_click` is set.
#[derive(Clone)]
pub struct ArcOptions {
    /// Fill, outline or dashed outline (default: Fill)
    pub paint: PaintStyle,
    /// Center (default: (100, 100))
    pub center: Point,
    /// Radius (default: 50)
    pub radius: f64,
    /// Start angle in radians, clockwise from +X (default: 0)
    pub start_angle: f64,
    /// End angle in radians (default: 2π)
    pub end_angle: f64,
    /// Sweep counter-clockwise from start to end (default: false)
    pub anticlockwise: bool,
    /// Fill/stroke color (default: red)
    pub color: Color,
    /// Outline width (default: 1)
    pub line_width: f64,
    /// Dash pattern for `PaintStyle::Dash` (default: [5, 10])
    pub dash: Vec<f64>,
    pub on_click: Option<ClickHandler>,
}

impl Default for ArcOptions {
    fn default() -> Self {
        Self {
            paint: PaintStyle::Fill,
            center: (100.0, 100.0),
            radius: 50.0,
            start_angle: 0.0,
            end_angle: TAU,
            anticlockwise: false,
            color: RED,
            line_width: 1.0,
            dash: default_dash(),
            on_click: None,
        }
    }
}

impl ArcOptions {
    /// Makes the arc clickable.
    pub fn with_click(mut self, f: impl Fn(&mut Canvas) + 'static) -> Self {
        self.on_click = handler(f);
        self
    }
}

/// Single text run.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Anchor position, interpreted through `align`/`baseline` (default: (50, 50))
    pub position: Point,
    /// Text content (default: "Hello")
    pub text: String,
    /// Fill color (default: white)
    pub color: Color,
    /// Outline color for Stroke/Both (default: black)
    pub stroke_color: Color,
    /// Font size in pixels (default: 20)
    pub font_size: f64,
    /// Font family (default: "Sans")
    pub font_family: String,
    /// Font weight (default: "normal")
    pub font_weight: String,
    /// Horizontal alignment (default: Left)
    pub align: TextAlign,
    /// Vertical alignment (default: Top)
    pub baseline: TextBaseline,
    /// Fill, stroke or both (default: Fill)
    pub paint: TextPaint,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            position: (50.0, 50.0),
            text: "Hello".to_string(),
            color: WHITE,
            stroke_color: BLACK,
            font_size: 20.0,
            font_family: "Sans".to_string(),
            font_weight: "normal".to_string(),
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
            paint: TextPaint::Fill,
        }
    }
}

/// Quadratic (one control point) or cubic (two) Bézier curve.
#[derive(Debug, Clone)]
pub struct BezierOptions {
    /// Start point (default: (50, 100))
    pub start: Point,
    /// Control points (default: [(100, 50), (150, 150)])
    pub controls: Vec<Point>,
    /// End point (default: (200, 100))
    pub end: Point,
    /// Stroke color (default: blue)
    pub color: Color,
    /// Stroke width (default: 2)
    pub line_width: f64,
    /// Dash pattern; empty means solid (default: [])
    pub dash: Vec<f64>,
}

impl Default for BezierOptions {
    fn default() -> Self {
        Self {
            start: (50.0, 100.0),
            controls: vec![(100.0, 50.0), (150.0, 150.0)],
            end: (200.0, 100.0),
            color: BLUE,
            line_width: 2.0,
            dash: Vec::new(),
        }
    }
}

/// Image placed by an anchor point; clickable when `on_click` is set.
#[derive(Clone)]
pub struct ImageOptions {
    /// Where to load the image from; nothing is drawn without one
    pub src: Option<ImageSource>,
    /// Anchor position (default: (0, 0))
    pub position: Point,
    /// Drawn size; `None` uses the decoded size
    pub size: Option<(f64, f64)>,
    /// Opacity 0.0 - 1.0 (default: 1)
    pub opacity: f64,
    /// Rotation about the anchor in radians (default: 0)
    pub rotation: f64,
    /// Anchor as fractions of width/height (default: (0.5, 0.5))
    pub anchor: (f64, f64),
    pub on_click: Option<ClickHandler>,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            src: None,
            position: (0.0, 0.0),
            size: None,
            opacity: 1.0,
            rotation: 0.0,
            anchor: (0.5, 0.5),
            on_click: None,
        }
    }
}

impl ImageOptions {
    /// Makes the image clickable once it has loaded.
    pub fn with_click(mut self, f: impl Fn(&mut Canvas) + 'static) -> Self {
        self.on_click = handler(f);
        self
    }
}

/// Five-pointed star.
#[derive(Debug, Clone)]
pub struct StarOptions {
    /// Center (default: (100, 100))
    pub center: Point,
    /// Fill color (default: gold)
    pub color: Color,
    /// Outer radius; the inner radius is 0.382 of it (default: 50)
    pub size: f64,
}

impl Default for StarOptions {
    fn default() -> Self {
        Self {
            center: (100.0, 100.0),
            color: GOLD,
            size: 50.0,
        }
    }
}

/// Text laid out along a circular arc (seal/stamp lettering).
#[derive(Debug, Clone)]
pub struct ArcTextOptions {
    /// Arc center (default: (100, 100))
    pub center: Point,
    /// Arc radius (default: 80)
    pub radius: f64,
    /// Start angle in radians (default: π)
    pub start_angle: f64,
    /// End angle in radians (default: 2π)
    pub end_angle: f64,
    /// Characters to place (default: empty)
    pub text: String,
    /// Font size in pixels (default: 16)
    pub font_size: f64,
    /// Font family (default: "Sans")
    pub font_family: String,
    /// Font weight (default: "normal")
    pub font_weight: String,
    /// Glyph color (default: red)
    pub color: Color,
    /// Place glyphs inside the arc, rotated to face outward (default: false)
    pub inside: bool,
    /// Extra per-glyph rotation in radians (default: 0)
    pub char_rotation: f64,
    /// Lay glyphs out clockwise (default: true)
    pub clockwise: bool,
}

impl Default for ArcTextOptions {
    fn default() -> Self {
        Self {
            center: (100.0, 100.0),
            radius: 80.0,
            start_angle: std::f64::consts::PI,
            end_angle: TAU,
            text: String::new(),
            font_size: 16.0,
            font_family: "Sans".to_string(),
            font_weight: "normal".to_string(),
            color: RED,
            inside: false,
            char_rotation: 0.0,
            clockwise: true,
        }
    }
}

/// Background grid.
#[derive(Debug, Clone)]
pub struct GridOptions {
    /// Distance between grid lines (default: 20)
    pub spacing: f64,
    /// Line color (default: #ccc)
    pub color: Color,
    /// Line width (default: 0.5)
    pub line_width: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            spacing: 20.0,
            color: super::color::LIGHT_GRAY,
            line_width: 0.5,
        }
    }
}

/// Moves the origin and optionally points the Y axis up.
#[derive(Debug, Clone, Copy)]
pub struct CenterOptions {
    /// New origin; `None` means the middle of the surface
    pub origin: Option<[OriginCoord; 2]>,
    /// Make Y grow upward (sticky for the canvas lifetime, default: false)
    pub y_up: bool,
    /// Push the surface state before translating (default: true)
    pub save: bool,
}

impl Default for CenterOptions {
    fn default() -> Self {
        Self {
            origin: None,
            y_up: false,
            save: true,
        }
    }
}
