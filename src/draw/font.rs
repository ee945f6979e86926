//! Font descriptor for text rendering.

/// Font configuration for text rendering.
///
/// Describes which font to use, including family name, weight, and style.
/// Text and arc-text calls build one of these from their options and hand
/// the resulting Pango description to the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "Arial")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
        }
    }
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(
        family: impl Into<String>,
        weight: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            family: family.into(),
            weight: weight.into(),
            style: style.into(),
        }
    }

    /// Converts this font descriptor to a Pango font description string with
    /// an absolute pixel size.
    ///
    /// Format: "Family Style Weight Sizepx"
    /// Example: "Sans Bold 20px" or "Monospace Italic 24px"
    pub fn to_pango_string(&self, size_px: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if !self.style.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.style));
        }

        if !self.weight.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}px", size_px.max(1.0).round() as i32));

        parts.join(" ")
    }

    /// Builds the Pango font description for this descriptor.
    pub fn to_pango(&self, size_px: f64) -> pango::FontDescription {
        pango::FontDescription::from_string(&self.to_pango_string(size_px))
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
