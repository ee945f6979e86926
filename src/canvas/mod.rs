//! The stateful canvas: render cycle, drawing calls, pointer dispatch and export.

mod core;
mod export;
mod images;
mod pointer;
mod primitives;
#[cfg(test)]
mod tests;

pub use core::{Canvas, DrawCallback};
