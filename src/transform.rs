//! Coordinate transform between pointer input and logical drawing space.
//!
//! Drawing happens on a surface scaled by the device pixel ratio, optionally
//! flipped so Y grows upward, and optionally translated to a custom origin.
//! [`TransformState`] records those three pieces so the exact same mapping can
//! be applied to the Cairo context and inverted for incoming pointer events.

use std::fmt;
use std::str::FromStr;

/// Client-space rectangle the surface occupies on the host (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Maps a client position onto surface pixels, undoing only the
    /// CSS-to-pixel stretch.
    ///
    /// Returns `None` when either the rect or the surface has no area, or the
    /// result is not finite.
    pub fn to_pixels(
        &self,
        client_x: f64,
        client_y: f64,
        pixel_width: f64,
        pixel_height: f64,
    ) -> Option<(f64, f64)> {
        if !(self.width > 0.0 && self.height > 0.0 && pixel_width > 0.0 && pixel_height > 0.0) {
            return None;
        }

        let x = (client_x - self.left) / (self.width / pixel_width);
        let y = (client_y - self.top) / (self.height / pixel_height);
        (x.is_finite() && y.is_finite()).then_some((x, y))
    }
}

/// One component of a custom origin: a literal offset or a share of the
/// surface dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OriginCoord {
    /// Absolute offset in logical units
    Absolute(f64),
    /// Percentage of the logical width/height (50.0 = middle)
    Percent(f64),
}

impl OriginCoord {
    /// Resolves this coordinate against the given logical extent.
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            OriginCoord::Absolute(value) => value,
            OriginCoord::Percent(percent) => percent / 100.0 * extent,
        }
    }
}

impl Default for OriginCoord {
    fn default() -> Self {
        OriginCoord::Percent(50.0)
    }
}

impl From<f64> for OriginCoord {
    fn from(value: f64) -> Self {
        OriginCoord::Absolute(value)
    }
}

/// Error returned when an origin string is neither a number nor a percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOriginError(String);

impl fmt::Display for ParseOriginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid origin coordinate '{}'", self.0)
    }
}

impl std::error::Error for ParseOriginError {}

impl FromStr for OriginCoord {
    type Err = ParseOriginError;

    /// Parses `"50%"` as a percentage and `"120"` / `"-4.5"` as absolute units.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed.strip_suffix('%') {
            Some(percent) => percent.trim().parse().map(OriginCoord::Percent),
            None => trimmed.parse().map(OriginCoord::Absolute),
        };
        parsed.map_err(|_| ParseOriginError(s.to_string()))
    }
}

/// Scale, flip and origin currently applied to the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    /// Device pixels per logical unit (> 0)
    pub device_pixel_scale: f64,
    /// Whether Y grows upward; once enabled it stays enabled
    y_up: bool,
    /// Custom origin, set by a centering call
    origin: Option<[OriginCoord; 2]>,
}

impl TransformState {
    /// Creates an unflipped, untranslated transform for the given scale.
    ///
    /// Non-positive or non-finite scales fall back to 1.0.
    pub fn new(device_pixel_scale: f64) -> Self {
        Self {
            device_pixel_scale: sanitize_scale(device_pixel_scale),
            y_up: false,
            origin: None,
        }
    }

    /// Updates the device pixel scale (e.g. after a resize or monitor change).
    pub fn set_device_pixel_scale(&mut self, scale: f64) {
        self.device_pixel_scale = sanitize_scale(scale);
    }

    /// Records a centering call: a new origin and, optionally, an upward Y axis.
    pub fn center(&mut self, origin: [OriginCoord; 2], y_up: bool) {
        self.origin = Some(origin);
        if y_up {
            self.y_up = true;
        }
    }

    /// Puts back an origin recorded earlier; the Y flip is left untouched.
    pub fn restore_origin(&mut self, origin: Option<[OriginCoord; 2]>) {
        self.origin = origin;
    }

    pub fn y_up(&self) -> bool {
        self.y_up
    }

    /// Recorded origin components, if a centering call happened.
    pub fn origin(&self) -> Option<[OriginCoord; 2]> {
        self.origin
    }

    /// Origin resolved to logical units.
    ///
    /// Without a recorded origin this is the top-left corner, or the
    /// bottom-left corner once Y points up, so the flipped axis still draws
    /// onto the surface.
    pub fn resolved_origin(&self, logical_width: f64, logical_height: f64) -> (f64, f64) {
        match self.origin {
            Some([ox, oy]) => (ox.resolve(logical_width), oy.resolve(logical_height)),
            None if self.y_up => (0.0, logical_height),
            None => (0.0, 0.0),
        }
    }

    /// Device-space matrix that maps local drawing coordinates to surface pixels.
    pub fn surface_matrix(&self, logical_width: f64, logical_height: f64) -> cairo::Matrix {
        let scale = self.device_pixel_scale;
        let (ox, oy) = self.resolved_origin(logical_width, logical_height);
        let flip = if self.y_up { -1.0 } else { 1.0 };
        cairo::Matrix::new(scale, 0.0, 0.0, scale * flip, scale * ox, scale * oy)
    }

    /// Maps a client position to logical surface coordinates.
    ///
    /// Undoes the CSS-to-pixel stretch and the device pixel scale, then
    /// mirrors Y when the axis points up. Returns `None` when the surface or
    /// its bounding rect has no area, or the result is not finite.
    pub fn client_to_surface(
        &self,
        client_x: f64,
        client_y: f64,
        rect: &BoundingRect,
        pixel_width: f64,
        pixel_height: f64,
    ) -> Option<(f64, f64)> {
        let (pixel_x, pixel_y) = rect.to_pixels(client_x, client_y, pixel_width, pixel_height)?;

        let scale = self.device_pixel_scale;
        let x = pixel_x / scale;
        let y = pixel_y / scale;

        let y = if self.y_up {
            let logical_height = pixel_height / scale;
            logical_height - y
        } else {
            y
        };

        (x.is_finite() && y.is_finite()).then_some((x, y))
    }

    /// Maps logical surface coordinates (output of [`client_to_surface`]) into
    /// the local frame shapes are drawn in, undoing the origin translation.
    ///
    /// [`client_to_surface`]: Self::client_to_surface
    pub fn surface_to_local(
        &self,
        (x, y): (f64, f64),
        logical_width: f64,
        logical_height: f64,
    ) -> (f64, f64) {
        let (ox, oy) = self.resolved_origin(logical_width, logical_height);
        let local_y = if self.y_up {
            y - (logical_height - oy)
        } else {
            y - oy
        };
        (x - ox, local_y)
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        log::warn!("Invalid device pixel scale {scale}, using 1.0");
        1.0
    }
}
