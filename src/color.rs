//! Catalog color records and hex/RGB utilities, including the WCAG
//! luminance math behind the automatic label text color.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::inventory::{PaintInventory, Sheen};

/// One catalog entry, optionally decorated with library-only fields
/// (`custom_name`, `added_at`, `inventory`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorRecord {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub hex: String,
    pub rgb: [u8; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// User override; takes display precedence over `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<PaintInventory>,
}

impl ColorRecord {
    /// Build a catalog entry with a derived id and RGB triple.
    pub fn new(brand: &str, name: &str, hex: &str, code: Option<&str>) -> Self {
        let hex = format_hex(hex);
        Self {
            id: color_id(brand, name, &hex),
            name: name.to_string(),
            brand: brand.to_string(),
            rgb: hex_to_rgb(&hex),
            hex,
            code: code.map(str::to_string),
            custom_name: None,
            added_at: None,
            inventory: None,
        }
    }

    /// Name shown on labels: the user override when present.
    pub fn display_name(&self) -> &str {
        self.custom_name.as_deref().unwrap_or(&self.name)
    }

    /// Number of labels this color expands to: the total can count, or 1
    /// when the color carries no inventory at all.
    pub fn label_count(&self) -> u32 {
        match &self.inventory {
            Some(inv) => inv.total_cans(),
            None => 1,
        }
    }

    /// Sheens carrying at least one can, in canonical order.
    pub fn stocked_sheens(&self) -> Vec<Sheen> {
        let Some(inv) = &self.inventory else {
            return Vec::new();
        };
        Sheen::CANONICAL
            .iter()
            .copied()
            .filter(|s| inv.sheens.get(s).is_some_and(|cans| !cans.is_empty()))
            .collect()
    }
}

/// Stable slug id: `{brand}-{name}-{hex-without-#}`, lowercased.
pub fn color_id(brand: &str, name: &str, hex: &str) -> String {
    let slug = |s: &str| s.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-");
    format!(
        "{}-{}-{}",
        slug(brand),
        slug(name),
        hex.trim_start_matches('#').to_lowercase()
    )
}

/// Parse a `#rrggbb` or `#rgb` string. Returns `None` on malformed input.
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some([r, g, b])
    } else if hex.len() == 3 {
        let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
        let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
        let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
        Some([r, g, b])
    } else {
        None
    }
}

/// Parse a hex string, falling back to black on malformed input.
pub fn hex_to_rgb(hex: &str) -> [u8; 3] {
    parse_hex(hex).unwrap_or([0, 0, 0])
}

/// Format an RGB triple as `#rrggbb`.
pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

pub fn is_valid_hex(hex: &str) -> bool {
    let h = hex.trim_start_matches('#');
    h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit())
}

/// Ensure the `#` prefix; empty input becomes black.
pub fn format_hex(hex: &str) -> String {
    if hex.is_empty() {
        return "#000000".to_string();
    }
    if hex.starts_with('#') {
        hex.to_string()
    } else {
        format!("#{hex}")
    }
}

/// WCAG relative luminance of an sRGB triple.
pub fn luminance(rgb: [u8; 3]) -> f64 {
    let channel = |v: u8| {
        let n = v as f64 / 255.0;
        if n <= 0.03928 {
            n / 12.92
        } else {
            ((n + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * channel(rgb[0]) + 0.7152 * channel(rgb[1]) + 0.0722 * channel(rgb[2])
}

/// WCAG contrast ratio between two colors, in `1.0..=21.0`.
pub fn contrast_ratio(a: [u8; 3], b: [u8; 3]) -> f64 {
    let (la, lb) = (luminance(a), luminance(b));
    let lighter = la.max(lb);
    let darker = la.min(lb);
    (lighter + 0.05) / (darker + 0.05)
}

/// Best contrasting text color (black or white) for a background.
pub fn contrast_color(background: [u8; 3]) -> [u8; 3] {
    if luminance(background) > 0.5 {
        [0, 0, 0]
    } else {
        [255, 255, 255]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        assert_eq!(hex_to_rgb("#253342"), [37, 51, 66]);
        assert_eq!(rgb_to_hex([37, 51, 66]), "#253342");
        assert_eq!(hex_to_rgb("fff"), [255, 255, 255]);
        assert_eq!(hex_to_rgb("not-a-color"), [0, 0, 0]);
    }

    #[test]
    fn hex_validation() {
        assert!(is_valid_hex("#CDD4D1"));
        assert!(is_valid_hex("cdd4d1"));
        assert!(!is_valid_hex("#cdd4"));
        assert!(!is_valid_hex("zzzzzz"));
        assert_eq!(format_hex("abc123"), "#abc123");
        assert_eq!(format_hex(""), "#000000");
    }

    #[test]
    fn contrast_picks_readable_text() {
        // Navy background wants white text, off-white wants black.
        assert_eq!(contrast_color([37, 51, 66]), [255, 255, 255]);
        assert_eq!(contrast_color([205, 212, 209]), [0, 0, 0]);
    }

    #[test]
    fn contrast_ratio_bounds() {
        let max = contrast_ratio([0, 0, 0], [255, 255, 255]);
        assert!((max - 21.0).abs() < 0.01);
        let min = contrast_ratio([128, 128, 128], [128, 128, 128]);
        assert!((min - 1.0).abs() < 1e-9);
    }

    #[test]
    fn id_slug_shape() {
        assert_eq!(
            color_id("Sherwin Williams", "Sea Salt", "#CDD4D1"),
            "sherwin-williams-sea-salt-cdd4d1"
        );
    }

    #[test]
    fn display_name_prefers_override() {
        let mut color = ColorRecord::new("Behr", "Broadway", "#3f4347", Some("PPU18-20"));
        assert_eq!(color.display_name(), "Broadway");
        color.custom_name = Some("Front Door".to_string());
        assert_eq!(color.display_name(), "Front Door");
    }

    #[test]
    fn record_json_uses_camel_case() {
        let mut color = ColorRecord::new("Behr", "Broadway", "#3f4347", None);
        color.custom_name = Some("Front Door".to_string());
        let json = serde_json::to_string(&color).unwrap();
        assert!(json.contains("\"customName\""));
        assert!(!json.contains("\"custom_name\""));
    }
}
