//! Per-frame registry of clickable shapes.

use super::shape::ShapeRecord;
use log::warn;

/// Container for all clickable shapes registered during the current frame.
///
/// Shapes are kept in draw order (first = bottom layer, last = top layer).
/// Each [`clear`](Self::clear) starts a new frame generation so late work
/// tagged with an older generation can be recognised and dropped.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    shapes: Vec<ShapeRecord>,
    generation: u64,
    /// Maximum number of shapes per frame (0 = unlimited)
    max_shapes: usize,
}

impl ShapeRegistry {
    /// Creates a new empty registry with no shape limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry enforcing `max_shapes` per frame when > 0.
    pub fn with_limit(max_shapes: usize) -> Self {
        Self {
            max_shapes,
            ..Self::default()
        }
    }

    /// Drops every shape and advances to the next frame generation.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Current frame generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Attempts to register a shape on top of the existing ones.
    ///
    /// Returns `true` if the shape was added, `false` if the per-frame limit
    /// would be exceeded.
    pub fn try_register(&mut self, shape: ShapeRecord) -> bool {
        if self.max_shapes == 0 || self.shapes.len() < self.max_shapes {
            self.shapes.push(shape);
            true
        } else {
            warn!(
                "Shape limit ({}) reached; {:?} will not be clickable this frame",
                self.max_shapes,
                shape.kind()
            );
            false
        }
    }

    /// Registers a shape only if `generation` is still the current frame.
    ///
    /// Used by deferred work (image loads) that was started in an earlier frame.
    pub fn try_register_for(&mut self, generation: u64, shape: ShapeRecord) -> bool {
        if generation != self.generation {
            return false;
        }
        self.try_register(shape)
    }

    /// Index of the top-most shape containing the surface pixel `(x, y)`,
    /// scanning from the most recently registered shape down.
    ///
    /// Each shape tests the point in the frame it was drawn in.
    pub fn topmost_hit(&self, x: f64, y: f64) -> Option<usize> {
        self.shapes
            .iter()
            .rposition(|shape| shape.contains_pixel(x, y))
    }

    /// Returns the shape at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ShapeRecord> {
        self.shapes.get(index)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
