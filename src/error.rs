//! Library-level error type for canvas operations.

use crate::export::ExportError;
use thiserror::Error;

/// Errors that can occur while creating or rendering a [`Canvas`](crate::Canvas).
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The user draw callback returned an error.
    #[error("Render callback failed")]
    RenderFailure {
        #[source]
        source: anyhow::Error,
    },

    /// Surface or context creation failed.
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    /// Width, height or scale cannot back a pixel surface.
    #[error("Invalid canvas dimensions {width}x{height} at scale {scale}")]
    InvalidDimensions { width: f64, height: f64, scale: f64 },

    /// `restore_state` was called without a matching saved state.
    #[error("No saved surface state to restore")]
    NothingToRestore,

    /// `render` was called from inside the draw callback.
    #[error("Render called while a render pass is running")]
    RenderInProgress,

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}
