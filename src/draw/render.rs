//! Cairo-based rendering functions for the drawing primitives.
//!
//! These functions only paint; registering clickable geometry is the
//! canvas's job. Cairo drawing errors are ignored the same way a failed
//! paint would just leave pixels untouched.

use super::color::Color;
use super::font::FontDescriptor;
use super::options::{
    ArcOptions, ArcTextOptions, BezierOptions, GridOptions, LineKind, LineOptions, PaintStyle,
    Point, RectOptions, StarOptions, TextAlign, TextBaseline, TextOptions, TextPaint,
    TriangleOptions,
};
use std::f64::consts::{FRAC_PI_2, PI};

/// Ratio between inner and outer star radius (golden section).
const STAR_INNER_RATIO: f64 = 0.382;

/// Radial offset between an arc and the centre line of its lettering.
const ARC_TEXT_OFFSET: f64 = 15.0;

/// Paints the current path according to `paint`, then resets the dash.
fn finish_path(ctx: &cairo::Context, paint: PaintStyle, color: Color, line_width: f64, dash: &[f64]) {
    color.apply(ctx);
    match paint {
        PaintStyle::Fill => {
            let _ = ctx.fill();
        }
        PaintStyle::Stroke | PaintStyle::Dash => {
            if paint == PaintStyle::Dash {
                ctx.set_dash(dash, 0.0);
            }
            ctx.set_line_width(line_width);
            let _ = ctx.stroke();
            ctx.set_dash(&[], 0.0);
        }
    }
}

/// Render a straight line
pub fn render_line(ctx: &cairo::Context, opts: &LineOptions) {
    let _ = ctx.save();
    if opts.kind == LineKind::Dash {
        ctx.set_dash(&opts.dash, 0.0);
    }
    ctx.new_path();
    ctx.move_to(opts.a.0, opts.a.1);
    ctx.line_to(opts.b.0, opts.b.1);
    ctx.set_line_width(opts.line_width);
    opts.color.apply(ctx);
    let _ = ctx.stroke();
    let _ = ctx.restore();
}

/// Render a rectangle (filled, outlined or dashed)
pub fn render_rect(ctx: &cairo::Context, opts: &RectOptions) {
    let (x, y) = opts.position;
    let (width, height) = opts.size;

    ctx.new_path();
    ctx.rectangle(x, y, width, height);
    finish_path(ctx, opts.paint, opts.color, opts.line_width, &opts.dash);
}

/// Render a closed triangle
pub fn render_triangle(ctx: &cairo::Context, opts: &TriangleOptions) {
    let [a, b, c] = opts.points;

    ctx.new_path();
    ctx.move_to(a.0, a.1);
    ctx.line_to(b.0, b.1);
    ctx.line_to(c.0, c.1);
    ctx.close_path();
    finish_path(ctx, opts.paint, opts.color, opts.line_width, &opts.dash);
}

/// Render a circle or arc
pub fn render_arc(ctx: &cairo::Context, opts: &ArcOptions) {
    let (x, y) = opts.center;

    ctx.new_path();
    if opts.anticlockwise {
        ctx.arc_negative(x, y, opts.radius, opts.start_angle, opts.end_angle);
    } else {
        ctx.arc(x, y, opts.radius, opts.start_angle, opts.end_angle);
    }
    finish_path(ctx, opts.paint, opts.color, opts.line_width, &opts.dash);
}

/// Render a quadratic or cubic Bézier curve.
///
/// One control point draws a quadratic curve (elevated to cubic for Cairo),
/// two or more draw a cubic curve using the first two. With no control
/// points only the start point is visited and nothing is stroked.
pub fn render_bezier(ctx: &cairo::Context, opts: &BezierOptions) {
    let (sx, sy) = opts.start;
    let (ex, ey) = opts.end;

    ctx.new_path();
    ctx.move_to(sx, sy);

    if !opts.dash.is_empty() {
        ctx.set_dash(&opts.dash, 0.0);
    }

    match opts.controls.as_slice() {
        [] => {}
        [(cx, cy)] => {
            let c1 = (sx + 2.0 / 3.0 * (cx - sx), sy + 2.0 / 3.0 * (cy - sy));
            let c2 = (ex + 2.0 / 3.0 * (cx - ex), ey + 2.0 / 3.0 * (cy - ey));
            ctx.curve_to(c1.0, c1.1, c2.0, c2.1, ex, ey);
        }
        [(c1x, c1y), (c2x, c2y), ..] => {
            ctx.curve_to(*c1x, *c1y, *c2x, *c2y, ex, ey);
        }
    }

    opts.color.apply(ctx);
    ctx.set_line_width(opts.line_width);
    let _ = ctx.stroke();
    ctx.set_dash(&[], 0.0);
}

/// Builds a Pango layout for `text` in the given font.
fn text_layout(ctx: &cairo::Context, text: &str, font: &FontDescriptor, size: f64) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&font.to_pango(size)));
    layout.set_text(text);
    layout
}

/// Offset from the requested position to the layout's top-left corner.
fn text_anchor_offset(layout: &pango::Layout, align: TextAlign, baseline: TextBaseline) -> (f64, f64) {
    let (width, height) = layout.pixel_size();
    let width = width as f64;
    let height = height as f64;
    let ascent = layout.baseline() as f64 / pango::SCALE as f64;

    let dx = match align {
        TextAlign::Left => 0.0,
        TextAlign::Center => -width / 2.0,
        TextAlign::Right => -width,
    };
    let dy = match baseline {
        TextBaseline::Top => 0.0,
        TextBaseline::Middle => -height / 2.0,
        TextBaseline::Bottom => -height,
        TextBaseline::Alphabetic => -ascent,
    };
    (dx, dy)
}

/// Renders a text run with Pango.
///
/// When the surface Y axis points up, the text is mirrored back locally so
/// glyphs stay upright at the requested position.
pub fn render_text(ctx: &cairo::Context, opts: &TextOptions, y_up: bool) {
    if opts.text.is_empty() {
        return;
    }

    let _ = ctx.save();
    ctx.set_antialias(cairo::Antialias::Best);

    let (x, y) = if y_up {
        ctx.scale(1.0, -1.0);
        (opts.position.0, -opts.position.1)
    } else {
        opts.position
    };

    let font = FontDescriptor::new(opts.font_family.as_str(), opts.font_weight.as_str(), "normal");
    let layout = text_layout(ctx, &opts.text, &font, opts.font_size);
    let (dx, dy) = text_anchor_offset(&layout, opts.align, opts.baseline);

    if matches!(opts.paint, TextPaint::Fill | TextPaint::Both) {
        ctx.new_path();
        ctx.move_to(x + dx, y + dy);
        opts.color.apply(ctx);
        pangocairo::functions::show_layout(ctx, &layout);
    }

    if matches!(opts.paint, TextPaint::Stroke | TextPaint::Both) {
        ctx.new_path();
        ctx.move_to(x + dx, y + dy);
        pangocairo::functions::layout_path(ctx, &layout);
        opts.stroke_color.apply(ctx);
        ctx.set_line_width(1.0);
        ctx.set_line_join(cairo::LineJoin::Round);
        let _ = ctx.stroke();
    }

    let _ = ctx.restore();
}

/// Renders text distributed along a circular arc, one glyph at a time.
///
/// Glyphs are spread evenly over the arc, squeezed together when the arc
/// is shorter than the text, centred within the span and rotated to follow
/// the tangent. Inside lettering sits closer to the centre and is turned
/// half a revolution.
pub fn render_text_along_arc(ctx: &cairo::Context, opts: &ArcTextOptions) {
    let chars: Vec<char> = opts.text.chars().collect();
    if chars.is_empty() {
        return;
    }

    let _ = ctx.save();
    ctx.set_antialias(cairo::Antialias::Best);
    opts.color.apply(ctx);

    let font = FontDescriptor::new(opts.font_family.as_str(), opts.font_weight.as_str(), "normal");
    let (cx, cy) = opts.center;
    let direction = if opts.clockwise { 1.0 } else { -1.0 };

    let (mut start, mut end) = (opts.start_angle, opts.end_angle);
    if (opts.clockwise && end < start) || (!opts.clockwise && end > start) {
        std::mem::swap(&mut start, &mut end);
    }

    let total_angle = (end - start).abs();
    let text_width = text_layout(ctx, &opts.text, &font, opts.font_size).pixel_size().0 as f64;

    let count = chars.len() as f64;
    let angle_per_char = total_angle / count;
    let spacing = if text_width > 0.0 {
        (opts.radius * total_angle / text_width).min(1.0)
    } else {
        1.0
    };
    let step = angle_per_char * spacing * direction;

    let run_angle = step * (count - 1.0);
    start += (total_angle - run_angle.abs()) / 2.0 * direction;

    let char_radius = if opts.inside {
        opts.radius - ARC_TEXT_OFFSET
    } else {
        opts.radius + ARC_TEXT_OFFSET
    };

    let mut buf = [0u8; 4];
    for (i, ch) in chars.iter().enumerate() {
        let angle = start + i as f64 * step;
        let x = cx + angle.cos() * char_radius;
        let y = cy + angle.sin() * char_radius;

        let mut rotation = angle + FRAC_PI_2 + opts.char_rotation;
        if opts.inside {
            rotation += PI;
        }

        let _ = ctx.save();
        ctx.translate(x, y);
        ctx.rotate(rotation);

        let layout = text_layout(ctx, ch.encode_utf8(&mut buf), &font, opts.font_size);
        let (dx, dy) = text_anchor_offset(&layout, TextAlign::Center, TextBaseline::Middle);
        ctx.new_path();
        ctx.move_to(dx, dy);
        pangocairo::functions::show_layout(ctx, &layout);

        let _ = ctx.restore();
    }

    let _ = ctx.restore();
}

/// Renders a filled five-pointed star.
pub fn render_star(ctx: &cairo::Context, opts: &StarOptions) {
    let (x, y) = opts.center;
    let outer = opts.size;
    let inner = opts.size * STAR_INNER_RATIO;

    let _ = ctx.save();
    ctx.new_path();
    for i in 0..10 {
        let angle = PI / 5.0 * i as f64 - FRAC_PI_2;
        let radius = if i % 2 == 0 { outer } else { inner };
        let px = x + radius * angle.cos();
        let py = y + radius * angle.sin();
        if i == 0 {
            ctx.move_to(px, py);
        } else {
            ctx.line_to(px, py);
        }
    }
    ctx.close_path();
    opts.color.apply(ctx);
    let _ = ctx.fill();
    let _ = ctx.restore();
}

/// Renders a grid of vertical and horizontal lines covering `width` x `height`.
pub fn render_grid(ctx: &cairo::Context, width: f64, height: f64, opts: &GridOptions) {
    if !(opts.spacing > 0.0) {
        return;
    }

    let _ = ctx.save();
    let mut line = LineOptions {
        color: opts.color,
        line_width: opts.line_width,
        ..LineOptions::default()
    };

    let mut x = 0.0;
    while x <= width {
        line.a = (x, 0.0);
        line.b = (x, height);
        render_line(ctx, &line);
        x += opts.spacing;
    }

    let mut y = 0.0;
    while y <= height {
        line.a = (0.0, y);
        line.b = (width, y);
        render_line(ctx, &line);
        y += opts.spacing;
    }
    let _ = ctx.restore();
}

/// Placement of a decoded image on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    /// Anchor position
    pub position: Point,
    /// Drawn width and height
    pub size: (f64, f64),
    /// Rotation about the anchor in radians
    pub rotation: f64,
    /// Anchor as fractions of the drawn size
    pub anchor: (f64, f64),
    /// Opacity 0.0 - 1.0
    pub opacity: f64,
}

/// Draws a decoded image scaled to its placement size, rotated about its anchor.
pub fn render_image(ctx: &cairo::Context, image: &cairo::ImageSurface, placement: &ImagePlacement) {
    let (width, height) = placement.size;
    let natural_width = image.width() as f64;
    let natural_height = image.height() as f64;
    if natural_width <= 0.0 || natural_height <= 0.0 || width <= 0.0 || height <= 0.0 {
        return;
    }

    let _ = ctx.save();
    ctx.translate(placement.position.0, placement.position.1);
    if placement.rotation != 0.0 {
        ctx.rotate(placement.rotation);
    }

    let offset_x = -width * placement.anchor.0;
    let offset_y = -height * placement.anchor.1;
    ctx.translate(offset_x, offset_y);
    ctx.scale(width / natural_width, height / natural_height);

    if ctx.set_source_surface(image, 0.0, 0.0).is_ok() {
        let _ = ctx.paint_with_alpha(placement.opacity.clamp(0.0, 1.0));
    }
    let _ = ctx.restore();
}

/// Strokes one freehand segment with round caps.
pub fn render_segment(ctx: &cairo::Context, from: Point, to: Point, color: Color, line_width: f64) {
    let _ = ctx.save();
    ctx.new_path();
    color.apply(ctx);
    ctx.set_line_width(line_width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
    ctx.move_to(from.0, from.1);
    ctx.line_to(to.0, to.1);
    let _ = ctx.stroke();
    let _ = ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};

    fn surface_with_context(width: i32, height: i32) -> (cairo::ImageSurface, cairo::Context) {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        (surface, ctx)
    }

    fn pixel(surface: &mut cairo::ImageSurface, x: usize, y: usize) -> u32 {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = y * stride + x * 4;
        u32::from_ne_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
    }

    fn has_pixels(surface: &mut cairo::ImageSurface) -> bool {
        surface
            .data()
            .map(|data| data.iter().any(|byte| *byte != 0))
            .unwrap_or(false)
    }

    #[test]
    fn filled_rect_covers_its_area_only() {
        let (mut surface, ctx) = surface_with_context(40, 40);
        render_rect(
            &ctx,
            &RectOptions {
                position: (10.0, 10.0),
                size: (20.0, 20.0),
                ..RectOptions::default()
            },
        );
        drop(ctx);

        assert_eq!(pixel(&mut surface, 20, 20), 0xffff_0000);
        assert_eq!(pixel(&mut surface, 5, 5), 0);
    }

    #[test]
    fn dashed_outline_leaves_interior_clear_and_resets_dash() {
        let (mut surface, ctx) = surface_with_context(40, 40);
        render_rect(
            &ctx,
            &RectOptions {
                paint: PaintStyle::Dash,
                position: (5.0, 5.0),
                size: (30.0, 30.0),
                line_width: 2.0,
                ..RectOptions::default()
            },
        );
        assert_eq!(ctx.dash_count(), 0);
        drop(ctx);

        assert_eq!(pixel(&mut surface, 20, 20), 0);
        assert!(has_pixels(&mut surface));
    }

    #[test]
    fn triangle_and_arc_fill() {
        let (mut surface, ctx) = surface_with_context(200, 200);
        render_triangle(&ctx, &TriangleOptions::default());
        render_arc(
            &ctx,
            &ArcOptions {
                center: (150.0, 150.0),
                radius: 20.0,
                color: BLUE,
                ..ArcOptions::default()
            },
        );
        drop(ctx);

        assert_eq!(pixel(&mut surface, 100, 80), 0xffff_0000);
        assert_eq!(pixel(&mut surface, 150, 150), 0xff00_00ff);
    }

    #[test]
    fn quadratic_and_cubic_curves_stroke() {
        for controls in [vec![(100.0, 20.0)], vec![(80.0, 20.0), (120.0, 180.0)]] {
            let (mut surface, ctx) = surface_with_context(220, 200);
            render_bezier(
                &ctx,
                &BezierOptions {
                    controls,
                    dash: vec![4.0, 2.0],
                    ..BezierOptions::default()
                },
            );
            assert_eq!(ctx.dash_count(), 0);
            drop(ctx);
            assert!(has_pixels(&mut surface));
        }
    }

    #[test]
    fn bezier_without_controls_draws_nothing() {
        let (mut surface, ctx) = surface_with_context(220, 200);
        render_bezier(
            &ctx,
            &BezierOptions {
                controls: Vec::new(),
                ..BezierOptions::default()
            },
        );
        drop(ctx);
        assert!(!has_pixels(&mut surface));
    }

    #[test]
    fn star_fills_its_center() {
        let (mut surface, ctx) = surface_with_context(200, 200);
        render_star(
            &ctx,
            &StarOptions {
                color: RED,
                ..StarOptions::default()
            },
        );
        drop(ctx);
        assert_eq!(pixel(&mut surface, 100, 100), 0xffff_0000);
        assert_eq!(pixel(&mut surface, 2, 2), 0);
    }

    #[test]
    fn text_renders_pixels_with_and_without_flip() {
        for y_up in [false, true] {
            let (mut surface, ctx) = surface_with_context(200, 100);
            if y_up {
                ctx.translate(0.0, 100.0);
                ctx.scale(1.0, -1.0);
            }
            render_text(
                &ctx,
                &TextOptions {
                    position: (10.0, 30.0),
                    text: "Hi".to_string(),
                    color: RED,
                    paint: TextPaint::Both,
                    ..TextOptions::default()
                },
                y_up,
            );
            drop(ctx);
            assert!(has_pixels(&mut surface), "text should render (y_up = {y_up})");
        }
    }

    #[test]
    fn arc_text_renders_every_glyph() {
        let (mut surface, ctx) = surface_with_context(200, 200);
        render_text_along_arc(
            &ctx,
            &ArcTextOptions {
                text: "SEAL".to_string(),
                ..ArcTextOptions::default()
            },
        );
        drop(ctx);
        assert!(has_pixels(&mut surface));
    }

    #[test]
    fn image_is_scaled_into_placement() {
        let source = cairo::ImageSurface::create(cairo::Format::ARgb32, 2, 2).unwrap();
        {
            let ctx = cairo::Context::new(&source).unwrap();
            ctx.set_source_rgba(0.0, 0.0, 1.0, 1.0);
            ctx.paint().unwrap();
        }

        let (mut surface, ctx) = surface_with_context(100, 100);
        render_image(
            &ctx,
            &source,
            &ImagePlacement {
                position: (50.0, 50.0),
                size: (20.0, 20.0),
                rotation: 0.0,
                anchor: (0.5, 0.5),
                opacity: 1.0,
            },
        );
        drop(ctx);

        assert_eq!(pixel(&mut surface, 50, 50), 0xff00_00ff);
        assert_eq!(pixel(&mut surface, 45, 45), 0xff00_00ff);
        assert_eq!(pixel(&mut surface, 30, 30), 0);
    }

    #[test]
    fn grid_draws_lines() {
        let (mut surface, ctx) = surface_with_context(60, 60);
        render_grid(&ctx, 60.0, 60.0, &GridOptions::default());
        drop(ctx);
        assert!(has_pixels(&mut surface));
    }
}
