use crate::draw::render::{ImagePlacement, render_image};
use crate::draw::ImageOptions;
use crate::hit::{ShapeGeometry, ShapeRecord};
use log::{debug, error};

use super::Canvas;

/// Image draw requested during a frame, waiting for its load to complete.
#[derive(Clone)]
pub(crate) struct PendingImage {
    /// Frame generation the request was made in
    pub generation: u64,
    /// Surface matrix in effect when the request was made
    pub matrix: cairo::Matrix,
    pub options: ImageOptions,
}

impl Canvas {
    /// Requests an image draw.
    ///
    /// Loading is deferred: the host completes it with
    /// [`load_pending_images`](Self::load_pending_images). Without a source
    /// nothing happens.
    pub fn image(&mut self, options: &ImageOptions) {
        let Some(src) = &options.src else {
            debug!("Image call without a source ignored");
            return;
        };

        debug!(
            "Queued image load for {} (frame {})",
            src,
            self.registry.generation()
        );
        self.pending_images.push(PendingImage {
            generation: self.registry.generation(),
            matrix: self.ctx.matrix(),
            options: options.clone(),
        });
    }

    /// Number of image loads waiting to be completed.
    pub fn pending_image_count(&self) -> usize {
        self.pending_images.len()
    }

    /// Completes every queued image load.
    ///
    /// Each image is decoded, drawn with the transform that was active when it
    /// was requested and, with a click handler, registered as clickable. Loads
    /// requested before the latest render pass are discarded. Decode failures
    /// are logged and skipped. Returns how many images were drawn.
    pub fn load_pending_images(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending_images);
        let mut drawn = 0;

        for request in pending {
            let Some(src) = &request.options.src else {
                continue;
            };

            let current = self.registry.generation();
            if request.generation != current {
                debug!(
                    "Discarding stale image load for {} (frame {}, current {})",
                    src, request.generation, current
                );
                continue;
            }

            match src.load() {
                Ok(image) => {
                    self.place_image(&image, &request);
                    drawn += 1;
                }
                Err(err) => {
                    error!("Image load failed for {}: {}", src, err);
                }
            }
        }

        drawn
    }

    fn place_image(&mut self, image: &cairo::ImageSurface, request: &PendingImage) {
        let options = &request.options;
        let size = options
            .size
            .unwrap_or((image.width() as f64, image.height() as f64));
        let placement = ImagePlacement {
            position: options.position,
            size,
            rotation: options.rotation,
            anchor: options.anchor,
            opacity: options.opacity,
        };

        let _ = self.ctx.save();
        self.ctx.set_matrix(request.matrix);
        render_image(&self.ctx, image, &placement);
        let _ = self.ctx.restore();

        if let Some(handler) = &options.on_click {
            let geometry = ShapeGeometry::Image {
                x: options.position.0,
                y: options.position.1,
                width: size.0,
                height: size.1,
                rotation: options.rotation,
                anchor_x: options.anchor.0,
                anchor_y: options.anchor.1,
            };
            let record = ShapeRecord::new(geometry, handler.clone()).with_frame(request.matrix);
            self.registry.try_register_for(request.generation, record);
        }
    }
}
