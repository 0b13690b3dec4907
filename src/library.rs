//! The user's color library: an explicit state object owned by the
//! session, mutated only through its action methods.
//!
//! Persistence failures are caught and logged — the in-memory state stays
//! authoritative for the session and the user is never blocked from
//! working with unsaved state.

use chrono::Utc;

use crate::color::ColorRecord;
use crate::error::StorageError;
use crate::inventory::PaintInventory;
use crate::storage::{Storage, KEY_LIBRARY};

/// Saved colors with optional per-color inventory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    colors: Vec<ColorRecord>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colors(&self) -> &[ColorRecord] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ColorRecord> {
        self.colors.iter().find(|c| c.id == id)
    }

    /// Add a color, stamping `added_at`. Duplicate ids are ignored.
    pub fn add(&mut self, color: ColorRecord) -> bool {
        if self.colors.iter().any(|c| c.id == color.id) {
            return false;
        }
        let mut color = color;
        color.added_at = Some(Utc::now());
        self.colors.push(color);
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.colors.len();
        self.colors.retain(|c| c.id != id);
        self.colors.len() != before
    }

    /// Set or clear the user display-name override.
    pub fn set_custom_name(&mut self, id: &str, name: Option<String>) -> bool {
        match self.colors.iter_mut().find(|c| c.id == id) {
            Some(color) => {
                color.custom_name = name.filter(|n| !n.trim().is_empty());
                true
            }
            None => false,
        }
    }

    /// Replace a color's inventory. An empty inventory clears the field
    /// entirely so the color exports as a single plain label again.
    pub fn update_inventory(&mut self, id: &str, inventory: PaintInventory) -> bool {
        match self.colors.iter_mut().find(|c| c.id == id) {
            Some(color) => {
                color.inventory = if inventory.is_empty() {
                    None
                } else {
                    Some(inventory)
                };
                true
            }
            None => false,
        }
    }

    /// Serialize the library for persistence or file export.
    pub fn export_json(&self) -> String {
        serde_json::to_string_pretty(&self.colors).unwrap_or_else(|_| "[]".to_string())
    }

    /// Replace the library contents from exported JSON. Malformed input is
    /// rejected whole — nothing is partially imported.
    pub fn import_json(&mut self, json: &str) -> Result<usize, StorageError> {
        let colors: Vec<ColorRecord> = serde_json::from_str(json)?;
        self.colors = colors;
        Ok(self.colors.len())
    }

    /// Persist to storage. Failures are logged, not propagated: in-memory
    /// state remains authoritative for the session.
    pub fn save(&self, storage: &mut dyn Storage) {
        if let Err(e) = storage.save(KEY_LIBRARY, &self.export_json()) {
            log::error!("failed to save library: {e}");
        }
    }

    /// Load from storage, returning an empty library when nothing is
    /// stored. Read failures are logged and yield the empty library.
    pub fn load(storage: &dyn Storage) -> Self {
        let stored = match storage.load(KEY_LIBRARY) {
            Ok(s) => s,
            Err(e) => {
                log::error!("failed to load library: {e}");
                None
            }
        };
        let Some(json) = stored else {
            return Self::new();
        };
        let mut library = Self::new();
        if let Err(e) = library.import_json(&json) {
            log::error!("stored library is malformed, starting empty: {e}");
        }
        library
    }
}
