use crate::draw::render;
use crate::draw::{
    ArcOptions, ArcTextOptions, BezierOptions, GridOptions, LineOptions, RectOptions,
    StarOptions, TextOptions, TriangleOptions,
};
use crate::hit::{ClickHandler, ShapeGeometry, ShapeRecord};

use super::Canvas;

impl Canvas {
    /// Draws a straight (optionally dashed) line.
    pub fn line(&mut self, options: &LineOptions) {
        render::render_line(&self.ctx, options);
    }

    /// Draws a rectangle and registers it when it has a click handler.
    pub fn rect(&mut self, options: &RectOptions) {
        render::render_rect(&self.ctx, options);

        if let Some(handler) = &options.on_click {
            let (mut x, mut y) = options.position;
            let (mut width, mut height) = options.size;
            if width < 0.0 {
                x += width;
                width = -width;
            }
            if height < 0.0 {
                y += height;
                height = -height;
            }
            self.register(
                ShapeGeometry::Rect {
                    x,
                    y,
                    width,
                    height,
                },
                handler,
            );
        }
    }

    /// Draws a triangle and registers it when it has a click handler.
    pub fn triangle(&mut self, options: &TriangleOptions) {
        render::render_triangle(&self.ctx, options);

        if let Some(handler) = &options.on_click {
            self.register(
                ShapeGeometry::Triangle {
                    points: options.points,
                },
                handler,
            );
        }
    }

    /// Draws a circle or arc and registers its sector when it has a click handler.
    ///
    /// An anticlockwise arc covers the angles from `end` round to `start`, so
    /// it is registered with the two swapped.
    pub fn arc(&mut self, options: &ArcOptions) {
        render::render_arc(&self.ctx, options);

        if let Some(handler) = &options.on_click {
            let (start_angle, end_angle) = if options.anticlockwise {
                (options.end_angle, options.start_angle)
            } else {
                (options.start_angle, options.end_angle)
            };
            self.register(
                ShapeGeometry::Arc {
                    x: options.center.0,
                    y: options.center.1,
                    radius: options.radius,
                    start_angle,
                    end_angle,
                },
                handler,
            );
        }
    }

    /// Draws a text run; glyphs stay upright when the Y axis points up.
    pub fn text(&mut self, options: &TextOptions) {
        render::render_text(&self.ctx, options, self.transform.y_up());
    }

    pub fn bezier(&mut self, options: &BezierOptions) {
        render::render_bezier(&self.ctx, options);
    }

    pub fn star(&mut self, options: &StarOptions) {
        render::render_star(&self.ctx, options);
    }

    /// Lays characters out along a circular arc.
    pub fn text_along_arc(&mut self, options: &ArcTextOptions) {
        render::render_text_along_arc(&self.ctx, options);
    }

    /// Draws a grid over the whole surface, ignoring any centering or flip.
    pub fn grid(&mut self, options: &GridOptions) {
        let scale = self.transform.device_pixel_scale;
        let _ = self.ctx.save();
        self.ctx
            .set_matrix(cairo::Matrix::new(scale, 0.0, 0.0, scale, 0.0, 0.0));
        render::render_grid(&self.ctx, self.width, self.height, options);
        let _ = self.ctx.restore();
    }

    pub(super) fn register(&mut self, geometry: ShapeGeometry, handler: &ClickHandler) {
        let record = ShapeRecord::new(geometry, handler.clone()).with_frame(self.ctx.matrix());
        self.registry.try_register(record);
    }
}
