use crate::draw::render::render_segment;
use crate::draw::{Color, Point};
use crate::input::{BoardOptions, DrawingBoard, MouseButton, PointerEvent, PointerEventKind};
use log::{debug, warn};

use super::Canvas;

impl Canvas {
    /// Maps a client position into the frame the next drawing call uses.
    ///
    /// Returns `None` for zero-sized surfaces and non-finite input.
    pub fn to_local(&self, client_x: f64, client_y: f64) -> Option<Point> {
        let surface_point = self.transform.client_to_surface(
            client_x,
            client_y,
            &self.bounding_rect,
            self.pixel_width(),
            self.pixel_height(),
        )?;
        Some(
            self.transform
                .surface_to_local(surface_point, self.width, self.height),
        )
    }

    /// Dispatches a click to the top-most shape under the pointer.
    ///
    /// The pointer is tested against every shape in the frame that shape was
    /// drawn in, so shapes drawn before a [`restore_state`](Self::restore_state)
    /// stay clickable where they appear. Returns `true` if a handler ran. The
    /// handler receives the canvas and may re-render it.
    pub fn handle_click(&mut self, client_x: f64, client_y: f64) -> bool {
        let Some((pixel_x, pixel_y)) = self.bounding_rect.to_pixels(
            client_x,
            client_y,
            self.pixel_width(),
            self.pixel_height(),
        ) else {
            debug!("Click at ({client_x}, {client_y}) has no surface position");
            return false;
        };

        let Some(index) = self.registry.topmost_hit(pixel_x, pixel_y) else {
            return false;
        };
        let Some(shape) = self.registry.get(index) else {
            return false;
        };

        debug!(
            "Click at pixel ({:.1}, {:.1}) hit {:?} #{}",
            pixel_x,
            pixel_y,
            shape.kind(),
            index
        );
        let handler = shape.on_click.clone();
        handler(self);
        true
    }

    /// Routes a host pointer event to click dispatch or the drawing board.
    ///
    /// Returns `true` if the event changed anything (a handler ran or a
    /// stroke was updated). Non-primary buttons are ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }

        match event.kind {
            PointerEventKind::Click => self.handle_click(event.client_x, event.client_y),
            PointerEventKind::Down => {
                let Some(point) = self.to_local(event.client_x, event.client_y) else {
                    return false;
                };
                match &mut self.board {
                    Some(board) => {
                        board.on_press(point);
                        true
                    }
                    None => false,
                }
            }
            PointerEventKind::Move => {
                let Some(point) = self.to_local(event.client_x, event.client_y) else {
                    return false;
                };
                let Some(segment) = self.board.as_mut().and_then(|board| board.on_motion(point))
                else {
                    return false;
                };
                render_segment(
                    &self.ctx,
                    segment.from,
                    segment.to,
                    segment.color,
                    segment.line_width,
                );
                true
            }
            PointerEventKind::Up | PointerEventKind::Leave => match &mut self.board {
                Some(board) if board.is_drawing() => {
                    board.on_release();
                    true
                }
                _ => false,
            },
        }
    }

    /// Attaches the freehand drawing board.
    pub fn drawing_board(&mut self, options: BoardOptions) {
        debug!(
            "Drawing board enabled (width {}, color {:?})",
            options.line_width, options.color
        );
        self.board = Some(DrawingBoard::new(options));
    }

    pub fn disable_drawing_board(&mut self) {
        self.board = None;
    }

    pub fn drawing_board_state(&self) -> Option<&DrawingBoard> {
        self.board.as_ref()
    }

    pub fn set_board_line_width(&mut self, line_width: f64) {
        match &mut self.board {
            Some(board) => board.set_line_width(line_width),
            None => warn!("Drawing board is not enabled; line width unchanged"),
        }
    }

    pub fn set_board_color(&mut self, color: Color) {
        match &mut self.board {
            Some(board) => board.set_color(color),
            None => warn!("Drawing board is not enabled; color unchanged"),
        }
    }
}
