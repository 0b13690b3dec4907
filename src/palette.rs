//! Named color groups with creation/update timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::color::ColorRecord;
use crate::error::StorageError;
use crate::storage::{Storage, KEY_PALETTES};

/// A named group of colors. Dates round-trip as ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub id: String,
    pub name: String,
    pub colors: Vec<ColorRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user's palette list, owned by the session and persisted as one
/// record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palettes {
    palettes: Vec<Palette>,
}

impl Palettes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn get(&self, id: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.id == id)
    }

    /// Create a palette and return its id. Ids are derived from the name
    /// plus a counter so repeated names stay distinct.
    pub fn create(&mut self, name: &str) -> String {
        let slug: String = name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        let mut id = format!("palette-{slug}");
        let mut n = 1;
        while self.palettes.iter().any(|p| p.id == id) {
            n += 1;
            id = format!("palette-{slug}-{n}");
        }
        let now = Utc::now();
        self.palettes.push(Palette {
            id: id.clone(),
            name: name.to_string(),
            colors: Vec::new(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        match self.palettes.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                p.name = name.to_string();
                p.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.palettes.len();
        self.palettes.retain(|p| p.id != id);
        self.palettes.len() != before
    }

    /// Add a color to a palette, ignoring duplicates by color id.
    pub fn add_color(&mut self, palette_id: &str, color: ColorRecord) -> bool {
        match self.palettes.iter_mut().find(|p| p.id == palette_id) {
            Some(p) => {
                if p.colors.iter().any(|c| c.id == color.id) {
                    return false;
                }
                p.colors.push(color);
                p.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    pub fn remove_color(&mut self, palette_id: &str, color_id: &str) -> bool {
        match self.palettes.iter_mut().find(|p| p.id == palette_id) {
            Some(p) => {
                let before = p.colors.len();
                p.colors.retain(|c| c.id != color_id);
                let removed = p.colors.len() != before;
                if removed {
                    p.updated_at = Utc::now();
                }
                removed
            }
            None => false,
        }
    }

    pub fn export_json(&self) -> String {
        serde_json::to_string_pretty(&self.palettes).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn import_json(&mut self, json: &str) -> Result<usize, StorageError> {
        let palettes: Vec<Palette> = serde_json::from_str(json)?;
        self.palettes = palettes;
        Ok(self.palettes.len())
    }

    /// Persist to storage; failures are logged, in-memory state stays
    /// authoritative.
    pub fn save(&self, storage: &mut dyn Storage) {
        if let Err(e) = storage.save(KEY_PALETTES, &self.export_json()) {
            log::error!("failed to save palettes: {e}");
        }
    }

    pub fn load(storage: &dyn Storage) -> Self {
        let stored = match storage.load(KEY_PALETTES) {
            Ok(s) => s,
            Err(e) => {
                log::error!("failed to load palettes: {e}");
                None
            }
        };
        let Some(json) = stored else {
            return Self::new();
        };
        let mut palettes = Self::new();
        if let Err(e) = palettes.import_json(&json) {
            log::error!("stored palettes are malformed, starting empty: {e}");
        }
        palettes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn naval() -> ColorRecord {
        ColorRecord::new("Sherwin Williams", "Naval", "#253342", Some("SW 6244"))
    }

    #[test]
    fn create_and_dedupe_colors() {
        let mut palettes = Palettes::new();
        let id = palettes.create("Living Room");
        assert!(palettes.add_color(&id, naval()));
        assert!(!palettes.add_color(&id, naval()));
        assert_eq!(palettes.get(&id).unwrap().colors.len(), 1);
    }

    #[test]
    fn repeated_names_get_distinct_ids() {
        let mut palettes = Palettes::new();
        let a = palettes.create("Bedroom");
        let b = palettes.create("Bedroom");
        assert_ne!(a, b);
    }

    #[test]
    fn updated_at_moves_on_mutation() {
        let mut palettes = Palettes::new();
        let id = palettes.create("Hall");
        let created = palettes.get(&id).unwrap().updated_at;
        palettes.add_color(&id, naval());
        assert!(palettes.get(&id).unwrap().updated_at >= created);
    }

    #[test]
    fn dates_round_trip_as_iso_strings() {
        let mut palettes = Palettes::new();
        let id = palettes.create("Hall");
        palettes.add_color(&id, naval());

        let json = palettes.export_json();
        // ISO-8601 timestamps in the serialized form.
        assert!(json.contains("createdAt"));
        assert!(json.contains('T'));

        let mut storage = MemoryStorage::new();
        palettes.save(&mut storage);
        let loaded = Palettes::load(&storage);
        assert_eq!(loaded, palettes);
    }

    #[test]
    fn malformed_palette_import_is_rejected() {
        let mut palettes = Palettes::new();
        palettes.create("Keep Me");
        assert!(palettes.import_json("not json").is_err());
        assert_eq!(palettes.all().len(), 1);
    }
}
