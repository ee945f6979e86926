use crate::config::Config;
use crate::draw::CenterOptions;
use crate::error::CanvasError;
use crate::hit::ShapeRegistry;
use crate::input::{DrawingBoard, ResizeEvent};
use crate::transform::{BoundingRect, OriginCoord, TransformState};
use log::{debug, info, warn};

use super::images::PendingImage;

/// User draw callback invoked on every render pass.
pub type DrawCallback = Box<dyn FnMut(&mut Canvas) -> anyhow::Result<()>>;

/// Stateful drawing surface with per-frame hit testing.
///
/// Owns the Cairo surface and context, the coordinate transform, the clickable
/// shape registry and the optional freehand drawing board. Everything is
/// single-threaded; the host feeds in resize, pointer and animation-frame
/// notifications.
pub struct Canvas {
    /// Backing pixel surface (`width * scale` x `height * scale`)
    pub(super) surface: cairo::ImageSurface,
    /// Drawing context bound to `surface`
    pub(super) ctx: cairo::Context,
    /// Logical width in CSS pixels
    pub(super) width: f64,
    /// Logical height in CSS pixels
    pub(super) height: f64,
    pub(super) transform: TransformState,
    /// Where the surface sits in client coordinates
    pub(super) bounding_rect: BoundingRect,
    pub(super) registry: ShapeRegistry,
    pub(super) draw: Option<DrawCallback>,
    /// Image loads waiting for the host to complete them
    pub(super) pending_images: Vec<PendingImage>,
    pub(super) board: Option<DrawingBoard>,
    /// Set by resize; consumed by the next animation frame
    pub(super) redraw_scheduled: bool,
    /// Set while the draw callback runs
    pub(super) rendering: bool,
    /// Origins to put back on `restore_state`, one per saved surface state
    pub(super) saved_origins: Vec<Option<[OriginCoord; 2]>>,
}

impl Canvas {
    /// Creates a canvas of `width` x `height` logical pixels.
    ///
    /// The backing surface is `device_pixel_scale` times larger in each
    /// direction and the context is pre-scaled so drawing happens in logical
    /// units.
    pub fn new(width: f64, height: f64, device_pixel_scale: f64) -> Result<Self, CanvasError> {
        let transform = TransformState::new(device_pixel_scale);
        let (surface, ctx) = create_surface(width, height, transform.device_pixel_scale)?;

        let canvas = Self {
            surface,
            ctx,
            width,
            height,
            transform,
            bounding_rect: BoundingRect::new(0.0, 0.0, width, height),
            registry: ShapeRegistry::new(),
            draw: None,
            pending_images: Vec::new(),
            board: None,
            redraw_scheduled: false,
            rendering: false,
            saved_origins: Vec::new(),
        };
        canvas.apply_transform();

        info!(
            "Canvas initialized: {}x{} logical, {}x{} pixels (scale {})",
            width,
            height,
            canvas.surface.width(),
            canvas.surface.height(),
            canvas.transform.device_pixel_scale
        );
        Ok(canvas)
    }

    /// Creates a canvas from the `[canvas]` configuration section.
    pub fn from_config(config: &Config) -> Result<Self, CanvasError> {
        let settings = &config.canvas;
        let mut canvas = Self::new(settings.width, settings.height, settings.device_pixel_scale)?;
        canvas.registry = ShapeRegistry::with_limit(settings.max_shapes_per_frame);
        Ok(canvas)
    }

    /// Installs the draw callback run by every [`render`](Self::render).
    pub fn set_draw<F>(&mut self, draw: F)
    where
        F: FnMut(&mut Canvas) -> anyhow::Result<()> + 'static,
    {
        self.draw = Some(Box::new(draw));
    }

    /// Removes the draw callback; renders then only clear the surface.
    pub fn clear_draw(&mut self) {
        self.draw = None;
    }

    /// Runs one render pass: clear the surface, clear the registry, draw.
    ///
    /// Image loads still queued from earlier passes are dropped. The draw
    /// callback may replace itself but must not call `render` again; a nested
    /// call fails with [`CanvasError::RenderInProgress`] and leaves the frame
    /// untouched. Click handlers run outside the pass and may re-render. An
    /// error returned by the callback is wrapped in
    /// [`CanvasError::RenderFailure`].
    pub fn render(&mut self) -> Result<(), CanvasError> {
        if self.rendering {
            warn!("render() called from inside the draw callback; ignored");
            return Err(CanvasError::RenderInProgress);
        }

        self.redraw_scheduled = false;
        self.clear();
        self.registry.clear();
        if !self.pending_images.is_empty() {
            debug!(
                "Dropping {} image load(s) from earlier frames",
                self.pending_images.len()
            );
            self.pending_images.clear();
        }
        debug!("Render pass started (frame {})", self.registry.generation());

        let Some(mut draw) = self.draw.take() else {
            debug!("No draw callback installed; surface left blank");
            return Ok(());
        };
        self.rendering = true;
        let result = draw(self);
        self.rendering = false;
        if self.draw.is_none() {
            self.draw = Some(draw);
        }

        result.map_err(|source| CanvasError::RenderFailure { source })
    }

    /// Wipes the surface to transparent and resets the transform.
    ///
    /// Unbalanced saved states are dropped. A recorded centering survives and
    /// is re-applied.
    pub fn clear(&mut self) {
        for _ in self.saved_origins.drain(..) {
            let _ = self.ctx.restore();
        }

        self.ctx.identity_matrix();
        let _ = self.ctx.save();
        self.ctx.set_operator(cairo::Operator::Clear);
        let _ = self.ctx.paint();
        let _ = self.ctx.restore();

        self.apply_transform();
    }

    /// Moves the origin and optionally points the Y axis up.
    ///
    /// With `save` set the surface state is pushed first so that
    /// [`restore_state`](Self::restore_state) can undo the translation.
    pub fn center(&mut self, options: CenterOptions) -> Result<(), CanvasError> {
        if options.save {
            self.ctx.save()?;
            self.saved_origins.push(self.transform.origin());
        }

        let origin = options.origin.unwrap_or_default();
        self.transform.center(origin, options.y_up);
        self.apply_transform();
        debug!(
            "Centered at {:?} (y_up: {})",
            self.transform.resolved_origin(self.width, self.height),
            self.transform.y_up()
        );
        Ok(())
    }

    /// Pops the state pushed by the last saving [`center`](Self::center) call.
    ///
    /// The previous origin comes back but an upward Y axis stays up. With no
    /// previous origin the flipped axis is anchored at the bottom-left corner.
    pub fn restore_state(&mut self) -> Result<(), CanvasError> {
        let origin = self
            .saved_origins
            .pop()
            .ok_or(CanvasError::NothingToRestore)?;
        self.ctx.restore()?;
        self.transform.restore_origin(origin);
        self.apply_transform();
        Ok(())
    }

    /// Re-creates the surface for new dimensions and schedules one redraw.
    pub fn on_resize(
        &mut self,
        width: f64,
        height: f64,
        device_pixel_scale: f64,
    ) -> Result<(), CanvasError> {
        let mut transform = self.transform.clone();
        transform.set_device_pixel_scale(device_pixel_scale);
        let (surface, ctx) = create_surface(width, height, transform.device_pixel_scale)?;

        self.surface = surface;
        self.ctx = ctx;
        self.transform = transform;
        self.width = width;
        self.height = height;
        self.bounding_rect.width = width;
        self.bounding_rect.height = height;
        self.saved_origins.clear();
        self.apply_transform();

        debug!(
            "Canvas resized to {}x{} (scale {})",
            width, height, self.transform.device_pixel_scale
        );
        self.schedule_redraw();
        Ok(())
    }

    pub fn handle_resize(&mut self, event: ResizeEvent) -> Result<(), CanvasError> {
        self.on_resize(event.width, event.height, event.device_pixel_scale)
    }

    /// Requests a redraw on the next animation frame.
    ///
    /// Returns `false` when one was already pending.
    pub fn schedule_redraw(&mut self) -> bool {
        if self.redraw_scheduled {
            return false;
        }
        self.redraw_scheduled = true;
        true
    }

    /// Animation-frame tick: renders if a redraw is pending.
    ///
    /// Returns whether a render pass ran.
    pub fn on_animation_frame(&mut self) -> Result<bool, CanvasError> {
        if !self.redraw_scheduled {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    pub fn is_redraw_scheduled(&self) -> bool {
        self.redraw_scheduled
    }

    /// Logical width in CSS pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Logical height in CSS pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn pixel_width(&self) -> f64 {
        self.surface.width() as f64
    }

    pub fn pixel_height(&self) -> f64 {
        self.surface.height() as f64
    }

    pub fn device_pixel_scale(&self) -> f64 {
        self.transform.device_pixel_scale
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn bounding_rect(&self) -> BoundingRect {
        self.bounding_rect
    }

    /// Updates where the surface sits in client coordinates (layout changes).
    pub fn set_bounding_rect(&mut self, rect: BoundingRect) {
        self.bounding_rect = rect;
    }

    /// Clickable shapes registered during the current frame.
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Raw Cairo context, for drawing beyond the built-in primitives.
    pub fn context(&self) -> &cairo::Context {
        &self.ctx
    }

    pub(super) fn apply_transform(&self) {
        self.ctx
            .set_matrix(self.transform.surface_matrix(self.width, self.height));
    }
}

fn create_surface(
    width: f64,
    height: f64,
    scale: f64,
) -> Result<(cairo::ImageSurface, cairo::Context), CanvasError> {
    let pixel_width = (width * scale).round();
    let pixel_height = (height * scale).round();
    let valid = |v: f64| v.is_finite() && v >= 0.0 && v <= i32::MAX as f64;
    if !(valid(pixel_width) && valid(pixel_height)) {
        return Err(CanvasError::InvalidDimensions {
            width,
            height,
            scale,
        });
    }

    let surface = cairo::ImageSurface::create(
        cairo::Format::ARgb32,
        pixel_width as i32,
        pixel_height as i32,
    )?;
    let ctx = cairo::Context::new(&surface)?;
    Ok((surface, ctx))
}
