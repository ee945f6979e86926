//! Freehand drawing-board state machine.

use crate::draw::{BLACK, Color, Point};

/// Pen settings used while the drawing board is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardOptions {
    /// Stroke width in logical pixels (default: 2)
    pub line_width: f64,
    /// Stroke color (default: black)
    pub color: Color,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            color: BLACK,
        }
    }
}

/// Current stroke state.
///
/// Tracks whether the user is idle or dragging the pen. State transitions
/// occur on pointer down/move/up/leave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeState {
    /// Not drawing - waiting for a pointer press
    Idle,
    /// Pointer held down; `last` is where the previous segment ended
    Drawing { last: Point },
}

/// One straight piece of a freehand stroke, ready to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub line_width: f64,
}

/// Freehand drawing board: turns pointer drags into stroke segments.
#[derive(Debug, Clone)]
pub struct DrawingBoard {
    pub options: BoardOptions,
    pub state: StrokeState,
}

impl DrawingBoard {
    pub fn new(options: BoardOptions) -> Self {
        Self {
            options,
            state: StrokeState::Idle,
        }
    }

    /// Changes the pen width; non-positive or non-finite widths are ignored.
    pub fn set_line_width(&mut self, line_width: f64) {
        if line_width.is_finite() && line_width > 0.0 {
            self.options.line_width = line_width;
        } else {
            log::warn!("Ignoring invalid drawing board line width {line_width}");
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.options.color = color;
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Pointer pressed: start a new stroke at `point`.
    pub fn on_press(&mut self, point: Point) {
        self.state = StrokeState::Drawing { last: point };
    }

    /// Pointer moved: returns the segment to paint while a stroke is active.
    pub fn on_motion(&mut self, point: Point) -> Option<Segment> {
        match &mut self.state {
            StrokeState::Drawing { last } => {
                let segment = Segment {
                    from: *last,
                    to: point,
                    color: self.options.color,
                    line_width: self.options.line_width,
                };
                *last = point;
                Some(segment)
            }
            StrokeState::Idle => None,
        }
    }

    /// Pointer released or left the surface: end the stroke.
    pub fn on_release(&mut self) {
        self.state = StrokeState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RED;

    #[test]
    fn motion_without_press_draws_nothing() {
        let mut board = DrawingBoard::new(BoardOptions::default());
        assert!(board.on_motion((10.0, 10.0)).is_none());
        assert!(!board.is_drawing());
    }

    #[test]
    fn drag_produces_connected_segments() {
        let mut board = DrawingBoard::new(BoardOptions::default());
        board.on_press((0.0, 0.0));

        let first = board.on_motion((5.0, 0.0)).unwrap();
        let second = board.on_motion((5.0, 5.0)).unwrap();
        assert_eq!(first.from, (0.0, 0.0));
        assert_eq!(first.to, (5.0, 0.0));
        assert_eq!(second.from, first.to);
        assert_eq!(second.line_width, 2.0);

        board.on_release();
        assert!(board.on_motion((9.0, 9.0)).is_none());
    }

    #[test]
    fn pen_changes_apply_to_next_segment() {
        let mut board = DrawingBoard::new(BoardOptions::default());
        board.on_press((0.0, 0.0));
        board.set_color(RED);
        board.set_line_width(6.0);
        board.set_line_width(-1.0);

        let segment = board.on_motion((1.0, 1.0)).unwrap();
        assert_eq!(segment.color, RED);
        assert_eq!(segment.line_width, 6.0);
    }
}
