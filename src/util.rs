//! Utility functions for color names, hex parsing, and angle math.
//!
//! This module provides:
//! - Name-to-color mapping for the CSS keywords drawing calls commonly use
//! - Hex color parsing (`#rgb`, `#rrggbb`, `#rrggbbaa`)
//! - Angle normalization shared by arc drawing and hit testing

use crate::draw::{Color, color::*};
use std::f64::consts::TAU;

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system and by [`Color::parse`].
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "gold", "orange", "pink", "gray"/"grey",
///   "lightgray", "white", "black", "transparent"
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "gold" => Some(GOLD),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "gray" | "grey" => Some(Color::from_rgb8(128, 128, 128)),
        "lightgray" | "lightgrey" => Some(Color::from_rgb8(211, 211, 211)),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "transparent" => Some(TRANSPARENT),
        _ => None,
    }
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` hex notation.
pub fn hex_to_color(spec: &str) -> Option<Color> {
    let hex = spec.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                let v = c.to_digit(16)? as u8;
                *slot = v * 16 + v;
            }
            Some(Color::from_rgb8(rgb[0], rgb[1], rgb[2]))
        }
        6 | 8 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            let mut color = Color::from_rgb8(r, g, b);
            if hex.len() == 8 {
                color.a = channel(&hex[6..8])? as f64 / 255.0;
            }
            Some(color)
        }
        _ => None,
    }
}

// ============================================================================
// Angles
// ============================================================================

/// Normalizes an angle in radians into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if normalized >= TAU { 0.0 } else { normalized }
}
