//! Host-agnostic pointer and resize event types.

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    /// Left mouse button (primary: clicks and drawing)
    #[default]
    Left,
    /// Right mouse button (ignored)
    Right,
    /// Middle mouse button (ignored)
    Middle,
}

/// Kind of pointer notification delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Completed click (press and release without leaving the surface)
    Click,
    /// Button pressed
    Down,
    /// Pointer moved
    Move,
    /// Button released
    Up,
    /// Pointer left the surface
    Leave,
}

/// A pointer notification in client (CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub client_x: f64,
    pub client_y: f64,
    pub button: MouseButton,
}

impl PointerEvent {
    /// Creates a left-button event of the given kind.
    pub fn new(kind: PointerEventKind, client_x: f64, client_y: f64) -> Self {
        Self {
            kind,
            client_x,
            client_y,
            button: MouseButton::Left,
        }
    }

    pub fn click(client_x: f64, client_y: f64) -> Self {
        Self::new(PointerEventKind::Click, client_x, client_y)
    }

    pub fn down(client_x: f64, client_y: f64) -> Self {
        Self::new(PointerEventKind::Down, client_x, client_y)
    }

    pub fn moved(client_x: f64, client_y: f64) -> Self {
        Self::new(PointerEventKind::Move, client_x, client_y)
    }

    pub fn up(client_x: f64, client_y: f64) -> Self {
        Self::new(PointerEventKind::Up, client_x, client_y)
    }

    pub fn leave(client_x: f64, client_y: f64) -> Self {
        Self::new(PointerEventKind::Leave, client_x, client_y)
    }

    /// Same event with a different button.
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }
}

/// New surface geometry reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    /// Logical (CSS pixel) width
    pub width: f64,
    /// Logical (CSS pixel) height
    pub height: f64,
    /// Device pixels per logical pixel
    pub device_pixel_scale: f64,
}
