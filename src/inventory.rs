//! Per-sheen, per-size paint can inventory attached to library colors.
//!
//! The sheen enumeration is closed and carries a single canonical ordering
//! ([`Sheen::CANONICAL`]) that the label expander iterates. That order is a
//! contract, not incidental: it determines export numbering and must stay
//! stable for reproducible batches.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Paint finish variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sheen {
    #[serde(rename = "flat")]
    Flat,
    #[serde(rename = "matte")]
    Matte,
    #[serde(rename = "eggshell")]
    Eggshell,
    #[serde(rename = "satin")]
    Satin,
    #[serde(rename = "semiGloss")]
    SemiGloss,
    #[serde(rename = "gloss")]
    Gloss,
}

impl Sheen {
    /// Canonical iteration order for expansion and display. Keep this the
    /// single source of truth — do not restate the list at call sites.
    pub const CANONICAL: [Sheen; 6] = [
        Sheen::Flat,
        Sheen::Matte,
        Sheen::Eggshell,
        Sheen::Satin,
        Sheen::SemiGloss,
        Sheen::Gloss,
    ];

    /// Identifier used in serialized data and expanded label ids.
    pub fn key(&self) -> &'static str {
        match self {
            Sheen::Flat => "flat",
            Sheen::Matte => "matte",
            Sheen::Eggshell => "eggshell",
            Sheen::Satin => "satin",
            Sheen::SemiGloss => "semiGloss",
            Sheen::Gloss => "gloss",
        }
    }

    /// Human-readable name shown on labels.
    pub fn display_name(&self) -> &'static str {
        match self {
            Sheen::Flat => "Flat",
            Sheen::Matte => "Matte",
            Sheen::Eggshell => "Eggshell",
            Sheen::Satin => "Satin",
            Sheen::SemiGloss => "Semi-Gloss",
            Sheen::Gloss => "Gloss",
        }
    }
}

impl fmt::Display for Sheen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Physical can size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanSize {
    #[serde(rename = "sample")]
    Sample,
    #[serde(rename = "quart")]
    Quart,
    #[serde(rename = "gallon")]
    Gallon,
    #[serde(rename = "5-gallon")]
    FiveGallon,
}

impl CanSize {
    pub fn display_name(&self) -> &'static str {
        match self {
            CanSize::Sample => "Sample",
            CanSize::Quart => "Quart",
            CanSize::Gallon => "Gallon",
            CanSize::FiveGallon => "5 Gallon",
        }
    }
}

/// One size entry within a sheen: how many physical cans are on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintCan {
    pub size: CanSize,
    /// Negative values in imported data are clamped to 0 rather than
    /// rejected; the expander then treats them as absent.
    #[serde(deserialize_with = "clamp_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn clamp_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, u32::MAX as i64) as u32)
}

/// Per-sheen can breakdown owned by a library color.
///
/// Invariant: a can entry with quantity 0 is removed on update, never
/// retained as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintInventory {
    #[serde(default)]
    pub sheens: BTreeMap<Sheen, Vec<PaintCan>>,
}

impl PaintInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current quantity for a sheen + size, 0 if absent.
    pub fn quantity_of(&self, sheen: Sheen, size: CanSize) -> u32 {
        self.sheens
            .get(&sheen)
            .and_then(|cans| cans.iter().find(|c| c.size == size))
            .map(|c| c.quantity)
            .unwrap_or(0)
    }

    /// Set the quantity for a sheen + size. Quantity 0 removes the entry,
    /// and a sheen left without entries loses its key.
    pub fn set_quantity(&mut self, sheen: Sheen, size: CanSize, quantity: u32) {
        let cans = self.sheens.entry(sheen).or_default();
        if quantity == 0 {
            cans.retain(|c| c.size != size);
        } else if let Some(can) = cans.iter_mut().find(|c| c.size == size) {
            can.quantity = quantity;
        } else {
            cans.push(PaintCan {
                size,
                quantity,
                notes: None,
            });
        }
        if self.sheens.get(&sheen).is_some_and(|c| c.is_empty()) {
            self.sheens.remove(&sheen);
        }
    }

    /// Adjust a quantity by a signed delta, clamping at zero and pruning
    /// emptied entries.
    pub fn adjust_quantity(&mut self, sheen: Sheen, size: CanSize, delta: i32) {
        let current = self.quantity_of(sheen, size) as i64;
        let next = (current + delta as i64).max(0) as u32;
        self.set_quantity(sheen, size, next);
    }

    /// Total physical cans across all sheens and sizes.
    pub fn total_cans(&self) -> u32 {
        self.sheens
            .values()
            .flat_map(|cans| cans.iter())
            .map(|c| c.quantity)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sheens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_quantity_is_pruned() {
        let mut inv = PaintInventory::new();
        inv.set_quantity(Sheen::Flat, CanSize::Quart, 2);
        assert_eq!(inv.quantity_of(Sheen::Flat, CanSize::Quart), 2);

        inv.set_quantity(Sheen::Flat, CanSize::Quart, 0);
        assert_eq!(inv.quantity_of(Sheen::Flat, CanSize::Quart), 0);
        assert!(inv.is_empty(), "emptied sheen key should be removed");
    }

    #[test]
    fn adjust_clamps_at_zero() {
        let mut inv = PaintInventory::new();
        inv.adjust_quantity(Sheen::Satin, CanSize::Gallon, 1);
        inv.adjust_quantity(Sheen::Satin, CanSize::Gallon, -5);
        assert_eq!(inv.quantity_of(Sheen::Satin, CanSize::Gallon), 0);
        assert!(inv.is_empty());
    }

    #[test]
    fn total_spans_sheens_and_sizes() {
        let mut inv = PaintInventory::new();
        inv.set_quantity(Sheen::Flat, CanSize::Quart, 2);
        inv.set_quantity(Sheen::Flat, CanSize::Gallon, 1);
        inv.set_quantity(Sheen::Gloss, CanSize::Sample, 3);
        assert_eq!(inv.total_cans(), 6);
    }

    #[test]
    fn sheen_serde_names_round_trip() {
        let json = serde_json::to_string(&Sheen::SemiGloss).unwrap();
        assert_eq!(json, "\"semiGloss\"");
        let back: Sheen = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Sheen::SemiGloss);

        let size: CanSize = serde_json::from_str("\"5-gallon\"").unwrap();
        assert_eq!(size, CanSize::FiveGallon);
    }

    #[test]
    fn negative_imported_quantity_clamps_to_zero() {
        let can: PaintCan =
            serde_json::from_str(r#"{"size":"quart","quantity":-3}"#).unwrap();
        assert_eq!(can.quantity, 0);
    }

    #[test]
    fn canonical_order_is_stable() {
        let keys: Vec<&str> = Sheen::CANONICAL.iter().map(|s| s.key()).collect();
        assert_eq!(
            keys,
            ["flat", "matte", "eggshell", "satin", "semiGloss", "gloss"]
        );
    }
}
