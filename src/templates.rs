//! Label sheet templates and page sizes — fixed reference geometry for
//! commercial adhesive label stock.
//!
//! The registry is static and read-only: sheet definitions change only by
//! editing this source. The single `custom` template is the exception; its
//! geometry is supplied per export through the export configuration.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// A fixed physical grid geometry: rows × columns of equally sized,
/// equally spaced labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSheetTemplate {
    pub name: String,
    pub description: String,
    pub columns: u32,
    pub rows: u32,
    /// Per-label dimensions in inches.
    pub label_width: f64,
    pub label_height: f64,
    /// Inter-label spacing in pixels at 96 dpi.
    pub spacing: f64,
    #[serde(default)]
    pub is_round: bool,
}

impl LabelSheetTemplate {
    /// Labels per composite page.
    pub fn labels_per_page(&self) -> u32 {
        self.columns * self.rows
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &'static str,
    name: &str,
    description: &str,
    columns: u32,
    rows: u32,
    label_width: f64,
    label_height: f64,
    spacing: f64,
    is_round: bool,
) -> (&'static str, LabelSheetTemplate) {
    (
        id,
        LabelSheetTemplate {
            name: name.to_string(),
            description: description.to_string(),
            columns,
            rows,
            label_width,
            label_height,
            spacing,
            is_round,
        },
    )
}

/// All built-in sheet templates, keyed by id.
pub fn registry() -> &'static [(&'static str, LabelSheetTemplate)] {
    static REGISTRY: OnceLock<Vec<(&'static str, LabelSheetTemplate)>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        vec![
            entry("avery-5160", "Avery 5160", "1\" × 2⅝\" Address Labels", 3, 10, 2.625, 1.0, 12.0, false),
            entry("avery-5163", "Avery 5163", "2\" × 4\" Shipping Labels", 2, 5, 4.0, 2.0, 12.0, false),
            entry("avery-5164", "Avery 5164", "3⅓\" × 4\" Shipping Labels", 2, 3, 4.0, 3.33, 12.0, false),
            entry("avery-5167", "Avery 5167", "½\" × 1¾\" Return Address", 4, 20, 1.75, 0.5, 8.0, false),
            entry("avery-5261", "Avery 5261", "4\" × 2\" Easy Peel Labels", 2, 5, 4.0, 2.0, 12.0, false),
            entry("avery-22806", "Avery 22806", "2½\" Round Labels", 3, 2, 2.5, 2.5, 24.0, true),
            entry("custom", "Custom", "Custom dimensions", 2, 5, 4.0, 2.0, 24.0, false),
        ]
    })
}

/// Look up a template by id. Unknown ids resolve to the built-in `custom`
/// template; this never fails.
pub fn get_template(id: &str) -> &'static LabelSheetTemplate {
    let reg = registry();
    let found = reg
        .iter()
        .find(|(key, _)| *key == id)
        .or_else(|| reg.iter().find(|(key, _)| *key == "custom"));
    match found {
        Some((_, t)) => t,
        // The registry literal above always contains "custom".
        None => unreachable!("registry is missing the custom template"),
    }
}

/// Physical page size for one-per-page export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "pageSize")]
pub enum PageSize {
    Letter,
    A4,
    Legal,
    #[serde(rename_all = "camelCase")]
    Custom {
        custom_page_width: f64,
        custom_page_height: f64,
    },
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Letter
    }
}

impl PageSize {
    /// Page dimensions in inches, portrait.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::Letter => (8.5, 11.0),
            PageSize::A4 => (8.27, 11.69),
            PageSize::Legal => (8.5, 14.0),
            PageSize::Custom {
                custom_page_width,
                custom_page_height,
            } => (*custom_page_width, *custom_page_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_template_geometry() {
        let t = get_template("avery-5160");
        assert_eq!(t.name, "Avery 5160");
        assert_eq!((t.columns, t.rows), (3, 10));
        assert_eq!(t.labels_per_page(), 30);
        assert_eq!(t.label_width, 2.625);
        assert!(!t.is_round);
    }

    #[test]
    fn round_template_is_flagged() {
        assert!(get_template("avery-22806").is_round);
    }

    #[test]
    fn unknown_id_falls_back_to_custom() {
        let t = get_template("nonexistent-id");
        assert_eq!(t.name, "Custom");
        assert_eq!(t.labels_per_page(), 10);
    }

    #[test]
    fn page_sizes() {
        assert_eq!(PageSize::Letter.dimensions(), (8.5, 11.0));
        assert_eq!(PageSize::A4.dimensions(), (8.27, 11.69));
        let custom = PageSize::Custom {
            custom_page_width: 5.0,
            custom_page_height: 7.0,
        };
        assert_eq!(custom.dimensions(), (5.0, 7.0));
    }

    #[test]
    fn page_size_json_shape() {
        let ps: PageSize = serde_json::from_str(r#"{"pageSize":"a4"}"#).unwrap();
        assert_eq!(ps, PageSize::A4);
        let ps: PageSize = serde_json::from_str(
            r#"{"pageSize":"custom","customPageWidth":6.0,"customPageHeight":4.0}"#,
        )
        .unwrap();
        assert_eq!(ps.dimensions(), (6.0, 4.0));
    }
}
