//! Presentation attributes forwarded from a presenter to the rendered icon.
//!
//! The loader never looks at these. The renderer interprets the few keys it
//! understands (`fill`, `width`, `height`) and ignores the rest.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute key for the fill color.
pub const FILL: &str = "fill";
/// Attribute key for the rendered width.
pub const WIDTH: &str = "width";
/// Attribute key for the rendered height.
pub const HEIGHT: &str = "height";

/// Open set of caller-supplied rendering hints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresentationAttributes {
    values: BTreeMap<String, String>,
}

impl PresentationAttributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary attribute.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Set the fill color.
    pub fn fill(self, value: impl Into<String>) -> Self {
        self.with(FILL, value)
    }

    /// Set the width.
    pub fn width(self, value: impl Into<String>) -> Self {
        self.with(WIDTH, value)
    }

    /// Set the height.
    pub fn height(self, value: impl Into<String>) -> Self {
        self.with(HEIGHT, value)
    }

    /// Get a raw attribute value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Iterate over all attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fill color as `0xRRGGBB`, if set and understood.
    pub fn fill_rgb(&self) -> Option<u32> {
        self.get(FILL).and_then(parse_color)
    }

    /// Width in pixels, if set and understood.
    pub fn width_px(&self) -> Option<f32> {
        self.get(WIDTH).and_then(parse_length)
    }

    /// Height in pixels, if set and understood.
    pub fn height_px(&self) -> Option<f32> {
        self.get(HEIGHT).and_then(parse_length)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PresentationAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Parse a CSS color (`#rgb`, `#rrggbb` or a common named color) into `0xRRGGBB`.
pub fn parse_color(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return match hex.len() {
            6 => u32::from_str_radix(hex, 16).ok(),
            3 => {
                let short = u32::from_str_radix(hex, 16).ok()?;
                let (r, g, b) = ((short >> 8) & 0xf, (short >> 4) & 0xf, short & 0xf);
                Some(((r * 0x11) << 16) | ((g * 0x11) << 8) | (b * 0x11))
            }
            _ => None,
        };
    }

    let rgb = match value.to_ascii_lowercase().as_str() {
        "black" => 0x000000,
        "white" => 0xffffff,
        "gray" | "grey" => 0x808080,
        "darkgray" | "darkgrey" => 0xa9a9a9,
        "lightgray" | "lightgrey" => 0xd3d3d3,
        "silver" => 0xc0c0c0,
        "red" => 0xff0000,
        "darkred" => 0x8b0000,
        "green" => 0x008000,
        "darkgreen" => 0x006400,
        "lime" => 0x00ff00,
        "blue" => 0x0000ff,
        "darkblue" => 0x00008b,
        "navy" => 0x000080,
        "skyblue" => 0x87ceeb,
        "yellow" => 0xffff00,
        "orange" => 0xffa500,
        "purple" => 0x800080,
        "teal" => 0x008080,
        "cyan" | "aqua" => 0x00ffff,
        "magenta" | "fuchsia" => 0xff00ff,
        _ => return None,
    };
    Some(rgb)
}

/// Parse a length in pixels, accepting an optional `px` suffix.
pub fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim_end();
    number.parse::<f32>().ok().filter(|n| n.is_finite() && *n >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_forwarded_verbatim() {
        let attrs = PresentationAttributes::new()
            .fill("darkblue")
            .height("100")
            .with("aria-label", "logo");

        assert_eq!(attrs.get(FILL), Some("darkblue"));
        assert_eq!(attrs.get(HEIGHT), Some("100"));
        assert_eq!(attrs.get("aria-label"), Some("logo"));
        assert_eq!(attrs.get(WIDTH), None);
        assert_eq!(attrs.len(), 3);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("gray"), Some(0x808080));
        assert_eq!(parse_color("DarkBlue"), Some(0x00008b));
        assert_eq!(parse_color("#1e66f5"), Some(0x1e66f5));
        assert_eq!(parse_color("#fa0"), Some(0xffaa00));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("chartreuse-ish"), None);
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("300"), Some(300.0));
        assert_eq!(parse_length("24px"), Some(24.0));
        assert_eq!(parse_length(" 12.5 "), Some(12.5));
        assert_eq!(parse_length("-4"), None);
        assert_eq!(parse_length("auto"), None);
    }

    #[test]
    fn test_typed_accessors() {
        let attrs = PresentationAttributes::new().fill("gray").width("300");
        assert_eq!(attrs.fill_rgb(), Some(0x808080));
        assert_eq!(attrs.width_px(), Some(300.0));
        assert_eq!(attrs.height_px(), None);
    }

    #[test]
    fn test_serde_is_a_plain_map() {
        let attrs: PresentationAttributes =
            serde_json::from_str(r#"{"fill":"gray","width":"300"}"#).unwrap();
        assert_eq!(attrs, [("fill", "gray"), ("width", "300")].into_iter().collect());
    }
}
