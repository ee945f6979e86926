//! Pointer input handling.
//!
//! This module defines the host-agnostic pointer and resize events the canvas
//! consumes, and the freehand drawing-board state machine that turns pointer
//! drags into stroke segments.

pub mod board;
pub mod events;

// Re-export commonly used types at module level
pub use board::{BoardOptions, DrawingBoard, Segment, StrokeState};
pub use events::{MouseButton, PointerEvent, PointerEventKind, ResizeEvent};
