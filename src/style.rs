//! Label style configuration: layout, shape, physical dimensions, color
//! policies, typography, and display-field toggles.
//!
//! This is pure configuration with no identity — it is replaced wholesale
//! on update and serialized as plain JSON. Unknown fields are ignored and
//! missing fields take defaults, so older saved configs keep loading.

use serde::{Deserialize, Serialize};

use crate::color::{contrast_color, hex_to_rgb};

/// Which arrangement of text fields the label uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelLayout {
    #[default]
    Default,
    Minimal,
    Detailed,
}

/// Physical outline of the label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelShape {
    #[default]
    Rectangle,
    Rounded,
    Circle,
}

/// Background color policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundPolicy {
    /// Fill with the paint color itself.
    #[default]
    Color,
    White,
    Black,
    /// Use `LabelStyle::custom_background_color`.
    Custom,
}

/// Text color policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPolicy {
    /// Contrast-derived black or white, based on the background luminance.
    #[default]
    Auto,
    Black,
    White,
    /// Use `LabelStyle::custom_text_color`.
    Custom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Sans,
    Serif,
    Mono,
}

impl FontFamily {
    /// Concrete font stack handed to the rasterization collaborator.
    pub fn stack(&self) -> &'static str {
        match self {
            FontFamily::Sans => "system-ui, -apple-system, sans-serif",
            FontFamily::Serif => "Georgia, serif",
            FontFamily::Mono => "ui-monospace, monospace",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Medium,
    Semibold,
    Bold,
}

impl FontWeight {
    /// CSS numeric weight.
    pub fn numeric(&self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Normal => 400,
            FontWeight::Medium => 500,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineHeight {
    Tight,
    #[default]
    Normal,
    Loose,
}

impl LineHeight {
    /// Multiplier applied to the font size.
    pub fn factor(&self) -> f64 {
        match self {
            LineHeight::Tight => 1.25,
            LineHeight::Normal => 1.5,
            LineHeight::Loose => 1.75,
        }
    }
}

/// Per-field typography settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Typography {
    pub font_family: FontFamily,
    pub font_weight: FontWeight,
    pub alignment: TextAlign,
    pub line_height: LineHeight,
    /// Point sizes per field.
    pub name_size: f64,
    pub brand_size: f64,
    pub code_size: f64,
    pub details_size: f64,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: FontFamily::Sans,
            font_weight: FontWeight::Normal,
            alignment: TextAlign::Center,
            line_height: LineHeight::Normal,
            name_size: 24.0,
            brand_size: 14.0,
            code_size: 12.0,
            details_size: 10.0,
        }
    }
}

/// Label dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: 3.0,
            height: 2.0,
        }
    }
}

/// Complete label style. Replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelStyle {
    pub layout: LabelLayout,
    pub shape: LabelShape,
    /// Corner radius in px (at 96 dpi); only meaningful for `Rounded`.
    pub border_radius: f64,
    pub dimensions: Dimensions,
    pub background_color: BackgroundPolicy,
    pub custom_background_color: Option<String>,
    pub text_color: TextPolicy,
    pub custom_text_color: Option<String>,
    pub typography: Typography,
    pub show_brand: bool,
    pub show_code: bool,
    pub show_hex: bool,
    pub show_rgb: bool,
    pub show_sheen: bool,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            layout: LabelLayout::Default,
            shape: LabelShape::Rectangle,
            border_radius: 16.0,
            dimensions: Dimensions::default(),
            background_color: BackgroundPolicy::Color,
            custom_background_color: None,
            text_color: TextPolicy::Auto,
            custom_text_color: None,
            typography: Typography::default(),
            show_brand: true,
            show_code: true,
            show_hex: false,
            show_rgb: false,
            show_sheen: true,
        }
    }
}

impl LabelStyle {
    /// Resolve the background policy to a concrete RGB for a paint color.
    pub fn resolve_background(&self, paint_hex: &str) -> [u8; 3] {
        match self.background_color {
            BackgroundPolicy::Color => hex_to_rgb(paint_hex),
            BackgroundPolicy::White => [255, 255, 255],
            BackgroundPolicy::Black => [0, 0, 0],
            BackgroundPolicy::Custom => self
                .custom_background_color
                .as_deref()
                .map(hex_to_rgb)
                .unwrap_or_else(|| hex_to_rgb(paint_hex)),
        }
    }

    /// Resolve the text policy against the already-resolved background.
    pub fn resolve_text_color(&self, background: [u8; 3]) -> [u8; 3] {
        match self.text_color {
            TextPolicy::Auto => contrast_color(background),
            TextPolicy::Black => [0, 0, 0],
            TextPolicy::White => [255, 255, 255],
            TextPolicy::Custom => self
                .custom_text_color
                .as_deref()
                .map(hex_to_rgb)
                .unwrap_or_else(|| contrast_color(background)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_config() {
        let style = LabelStyle::default();
        assert_eq!(style.layout, LabelLayout::Default);
        assert_eq!(style.dimensions.width, 3.0);
        assert_eq!(style.dimensions.height, 2.0);
        assert_eq!(style.background_color, BackgroundPolicy::Color);
        assert_eq!(style.text_color, TextPolicy::Auto);
        assert!(style.show_brand && style.show_code);
        assert!(!style.show_rgb);
    }

    #[test]
    fn unknown_and_missing_fields_are_tolerated() {
        // Old config with a removed field and several missing ones.
        let json = r#"{"layout":"minimal","fontSize":"large","showBrand":false}"#;
        let style: LabelStyle = serde_json::from_str(json).unwrap();
        assert_eq!(style.layout, LabelLayout::Minimal);
        assert!(!style.show_brand);
        // Missing fields fall back to defaults.
        assert_eq!(style.dimensions.width, 3.0);
        assert_eq!(style.typography.name_size, 24.0);
    }

    #[test]
    fn auto_text_follows_background_luminance() {
        let style = LabelStyle::default();
        let navy = style.resolve_background("#253342");
        assert_eq!(style.resolve_text_color(navy), [255, 255, 255]);
        let pale = style.resolve_background("#CDD4D1");
        assert_eq!(style.resolve_text_color(pale), [0, 0, 0]);
    }

    #[test]
    fn custom_policies_use_custom_colors() {
        let style = LabelStyle {
            background_color: BackgroundPolicy::Custom,
            custom_background_color: Some("#102030".to_string()),
            text_color: TextPolicy::Custom,
            custom_text_color: Some("#fafafa".to_string()),
            ..LabelStyle::default()
        };
        assert_eq!(style.resolve_background("#ff0000"), [16, 32, 48]);
        assert_eq!(style.resolve_text_color([16, 32, 48]), [250, 250, 250]);
    }

    #[test]
    fn custom_policy_without_value_falls_back() {
        let style = LabelStyle {
            background_color: BackgroundPolicy::Custom,
            ..LabelStyle::default()
        };
        assert_eq!(style.resolve_background("#253342"), [37, 51, 66]);
    }

    #[test]
    fn typography_tables_are_exhaustive() {
        assert_eq!(FontWeight::Semibold.numeric(), 600);
        assert_eq!(LineHeight::Tight.factor(), 1.25);
        assert!(FontFamily::Mono.stack().contains("monospace"));
    }
}
