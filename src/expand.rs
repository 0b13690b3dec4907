//! Label instance expansion: turns a selection of colors (with optional
//! can inventory) into the flat, ordered list of labels to print — one per
//! physical can, or one per color when no inventory is tracked.

use crate::color::ColorRecord;
use crate::inventory::Sheen;

/// One printable unit. Ephemeral: created fresh for every export batch and
/// discarded afterwards, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelInstance {
    /// Unique within the batch: `{color_id}-{sheen}-{ordinal}` for
    /// inventory-backed labels, the original color id otherwise.
    pub id: String,
    pub color: ColorRecord,
    pub sheen: Option<Sheen>,
}

impl LabelInstance {
    /// Name shown on the label, honoring the user override.
    pub fn display_name(&self) -> &str {
        self.color.display_name()
    }
}

/// Expand colors into label instances.
///
/// Sheens are visited in [`Sheen::CANONICAL`] order and cans in stored
/// order, so the output ordering — and therefore export numbering — is
/// reproducible for a given selection. Each can contributes `quantity`
/// instances; quantities ≤ 0 contribute nothing. The ordinal suffix counts
/// across all cans of one color + sheen, which keeps ids unique even when
/// two can sizes share a sheen.
pub fn expand_labels(colors: &[ColorRecord]) -> Vec<LabelInstance> {
    let mut instances = Vec::new();

    for color in colors {
        let Some(inventory) = &color.inventory else {
            instances.push(LabelInstance {
                id: color.id.clone(),
                color: color.clone(),
                sheen: None,
            });
            continue;
        };

        for sheen in Sheen::CANONICAL {
            let Some(cans) = inventory.sheens.get(&sheen) else {
                continue;
            };
            let mut ordinal = 0u32;
            for can in cans {
                for _ in 0..can.quantity {
                    instances.push(LabelInstance {
                        id: format!("{}-{}-{}", color.id, sheen.key(), ordinal),
                        color: color.clone(),
                        sheen: Some(sheen),
                    });
                    ordinal += 1;
                }
            }
        }
    }

    instances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{CanSize, PaintInventory};

    fn color_with_inventory(inv: PaintInventory) -> ColorRecord {
        let mut color = ColorRecord::new("Sherwin Williams", "Naval", "#253342", Some("SW 6244"));
        color.inventory = Some(inv);
        color
    }

    #[test]
    fn expansion_cardinality() {
        let mut inv = PaintInventory::new();
        inv.set_quantity(Sheen::Flat, CanSize::Quart, 2);
        inv.set_quantity(Sheen::Satin, CanSize::Gallon, 1);
        let labels = expand_labels(&[color_with_inventory(inv)]);

        assert_eq!(labels.len(), 3);
        assert_eq!(
            labels.iter().filter(|l| l.sheen == Some(Sheen::Flat)).count(),
            2
        );
        assert_eq!(
            labels.iter().filter(|l| l.sheen == Some(Sheen::Satin)).count(),
            1
        );

        let mut ids: Vec<&str> = labels.iter().map(|l| l.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3, "expanded ids must be unique");
    }

    #[test]
    fn no_inventory_yields_one_plain_instance() {
        let color = ColorRecord::new("Benjamin Moore", "Hale Navy", "#434F5B", Some("HC-154"));
        let labels = expand_labels(std::slice::from_ref(&color));
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].id, color.id);
        assert_eq!(labels[0].sheen, None);
        assert_eq!(labels[0].color, color);
    }

    #[test]
    fn empty_inventory_yields_nothing() {
        let labels = expand_labels(&[color_with_inventory(PaintInventory::new())]);
        assert!(labels.is_empty());
    }

    #[test]
    fn zero_quantity_cans_contribute_nothing() {
        // Bypass set_quantity's pruning to model imported data carrying an
        // explicit zero entry.
        let mut inv = PaintInventory::new();
        inv.sheens.insert(
            Sheen::Flat,
            vec![crate::inventory::PaintCan {
                size: CanSize::Quart,
                quantity: 0,
                notes: None,
            }],
        );
        assert!(expand_labels(&[color_with_inventory(inv)]).is_empty());
    }

    #[test]
    fn sheen_key_with_empty_can_list_contributes_nothing() {
        let mut inv = PaintInventory::new();
        inv.sheens.insert(Sheen::Eggshell, Vec::new());
        inv.set_quantity(Sheen::Gloss, CanSize::Quart, 1);
        let labels = expand_labels(&[color_with_inventory(inv)]);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].sheen, Some(Sheen::Gloss));
    }

    #[test]
    fn sheen_order_follows_canonical_sequence() {
        let mut inv = PaintInventory::new();
        // Insert in reverse of canonical order.
        inv.set_quantity(Sheen::Gloss, CanSize::Quart, 1);
        inv.set_quantity(Sheen::Eggshell, CanSize::Quart, 1);
        inv.set_quantity(Sheen::Flat, CanSize::Quart, 1);
        let labels = expand_labels(&[color_with_inventory(inv)]);

        let sheens: Vec<Sheen> = labels.iter().filter_map(|l| l.sheen).collect();
        assert_eq!(sheens, [Sheen::Flat, Sheen::Eggshell, Sheen::Gloss]);
    }

    #[test]
    fn ordinal_runs_across_can_sizes_within_a_sheen() {
        let mut inv = PaintInventory::new();
        inv.set_quantity(Sheen::Flat, CanSize::Quart, 1);
        inv.set_quantity(Sheen::Flat, CanSize::Gallon, 1);
        let labels = expand_labels(&[color_with_inventory(inv)]);

        assert_eq!(labels.len(), 2);
        assert_ne!(labels[0].id, labels[1].id);
        assert!(labels[0].id.ends_with("-flat-0"));
        assert!(labels[1].id.ends_with("-flat-1"));
    }

    #[test]
    fn mixed_selection_keeps_input_order() {
        let mut inv = PaintInventory::new();
        inv.set_quantity(Sheen::Flat, CanSize::Quart, 1);
        let with_inv = color_with_inventory(inv);
        let plain = ColorRecord::new("Behr", "Polar Bear", "#f2efe8", Some("75"));

        let labels = expand_labels(&[with_inv.clone(), plain.clone()]);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].color.id, with_inv.id);
        assert_eq!(labels[1].color.id, plain.id);
    }
}
