//! Static multi-brand paint color catalog.
//!
//! The dataset is fixed reference data built once at first use. The rest
//! of the crate consumes only the [`ColorRecord`] shape and does not care
//! how brands are merged.

use std::sync::OnceLock;

use crate::color::ColorRecord;

/// Search results are capped for responsiveness on broad terms.
pub const SEARCH_RESULT_CAP: usize = 100;

/// (name, hex, code) triples per brand.
const SHERWIN_WILLIAMS: &[(&str, &str, &str)] = &[
    ("Naval", "#253342", "SW 6244"),
    ("Sea Salt", "#CDD4D1", "SW 6204"),
    ("Agreeable Gray", "#D1CBC1", "SW 7029"),
    ("Alabaster", "#EDEAE0", "SW 7008"),
    ("Repose Gray", "#CCC9C0", "SW 7015"),
    ("Tricorn Black", "#2F2F30", "SW 6258"),
    ("Pure White", "#EDECE6", "SW 7005"),
    ("Accessible Beige", "#D1C7B8", "SW 7036"),
    ("Iron Ore", "#434341", "SW 7069"),
    ("Evergreen Fog", "#95978A", "SW 9130"),
];

const BENJAMIN_MOORE: &[(&str, &str, &str)] = &[
    ("Hale Navy", "#434F5B", "HC-154"),
    ("Chantilly Lace", "#F4F6F1", "OC-65"),
    ("Revere Pewter", "#CCC6B9", "HC-172"),
    ("Simply White", "#F6F7F1", "OC-117"),
    ("White Dove", "#F0EFE7", "OC-17"),
    ("Gray Owl", "#D4D5CD", "OC-52"),
    ("Kendall Charcoal", "#686662", "HC-166"),
    ("First Light", "#F3DFDB", "2102-70"),
    ("Caliente", "#AC3835", "AF-290"),
    ("Aegean Teal", "#708584", "2136-40"),
];

const BEHR: &[(&str, &str, &str)] = &[
    ("Blank Canvas", "#EDE6D9", "B-DC-003"),
    ("Polar Bear", "#F4F1E9", "B-75"),
    ("Broadway", "#3F4347", "B-PPU18-20"),
    ("Swiss Coffee", "#F1EDE1", "B-12"),
    ("Back to Nature", "#A8AE8E", "B-S340-4"),
    ("Ultra Pure White", "#F7F9F4", "B-1850"),
    ("Cracked Pepper", "#4A4A48", "B-PPU18-01"),
    ("Blueprint", "#52617D", "B-S470-5"),
];

const VALSPAR: &[(&str, &str, &str)] = &[
    ("Du Jour", "#F2EFE9", "V-7002-6"),
    ("Gravity", "#98948C", "V-4004-2A"),
    ("Blanched Pine", "#E9E2CF", "V-6001-10C"),
    ("Cozy White", "#EFE9DC", "V-7002-16"),
    ("Mark Twain House Ombra Gray", "#8A8B80", "V-CI-112"),
    ("Everglade Deck", "#6C7F74", "V-5006-3C"),
];

const PPG: &[(&str, &str, &str)] = &[
    ("Delicate White", "#F3F1EA", "PPG1001-1"),
    ("Transcend", "#C5B49A", "PPG1079-4"),
    ("Olive Sprig", "#A3A389", "PPG1125-4"),
    ("Night Watch", "#3E4E48", "PPG1145-7"),
    ("Classic Waltz", "#6A5D53", "PPG1077-6"),
    ("Glidden Red Delicious", "#9E3A39", "PPG13-01"),
];

fn brand_colors(brand: &str, entries: &[(&str, &str, &str)]) -> Vec<ColorRecord> {
    entries
        .iter()
        .map(|(name, hex, code)| ColorRecord::new(brand, name, hex, Some(code)))
        .collect()
}

/// All catalog colors across every brand, in stable brand-then-entry order.
pub fn all_colors() -> &'static [ColorRecord] {
    static CATALOG: OnceLock<Vec<ColorRecord>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let mut colors = Vec::new();
        colors.extend(brand_colors("Sherwin Williams", SHERWIN_WILLIAMS));
        colors.extend(brand_colors("Benjamin Moore", BENJAMIN_MOORE));
        colors.extend(brand_colors("Behr", BEHR));
        colors.extend(brand_colors("Valspar", VALSPAR));
        colors.extend(brand_colors("PPG", PPG));
        colors
    })
}

/// Case-insensitive substring search over name, brand, code, and hex.
/// A blank term matches nothing; results are capped at
/// [`SEARCH_RESULT_CAP`].
pub fn search_colors(term: &str) -> Vec<ColorRecord> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    all_colors()
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&term)
                || c.brand.to_lowercase().contains(&term)
                || c.code
                    .as_deref()
                    .is_some_and(|code| code.to_lowercase().contains(&term))
                || c.hex.to_lowercase().contains(&term)
        })
        .take(SEARCH_RESULT_CAP)
        .cloned()
        .collect()
}
