//! Shop Registry
//!
//! Loads and caches shop events from TOML files.

use super::definition::{RawShopEvent, ShopEvent};
use crate::error::DataError;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Registry for all shop events
pub struct ShopRegistry {
    shops: HashMap<String, ShopEvent>,
}

impl ShopRegistry {
    /// Create a new empty shop registry
    pub fn new() -> Self {
        Self {
            shops: HashMap::new(),
        }
    }

    /// Load all shop events from `data_dir/shops`
    pub fn load_from_directory(&mut self, data_dir: &Path) -> Result<(), DataError> {
        let shops_dir = data_dir.join("shops");

        if !shops_dir.exists() {
            warn!("Shop directory does not exist: {:?}", shops_dir);
            return Ok(());
        }

        for (path, table) in crate::data::load_toml_tables::<RawShopEvent>(&shops_dir)? {
            for (key, raw) in table {
                if self.shops.contains_key(&key) {
                    warn!("Duplicate shop event '{}' in {:?}, overwriting", key, path);
                }
                self.insert(ShopEvent::from_raw(&key, &raw));
            }
        }

        info!("Loaded {} shop events", self.shops.len());
        Ok(())
    }

    /// Add or replace a shop event
    pub fn insert(&mut self, event: ShopEvent) {
        self.shops.insert(event.key.clone(), event);
    }

    /// Get a shop event by key
    pub fn get(&self, key: &str) -> Option<&ShopEvent> {
        self.shops.get(key)
    }

    /// Get an iterator over all event keys
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.shops.keys()
    }

    /// Check if a shop event exists in the registry
    pub fn contains(&self, key: &str) -> bool {
        self.shops.contains_key(key)
    }

    /// Get the number of shop events in the registry
    pub fn len(&self) -> usize {
        self.shops.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }
}

impl Default for ShopRegistry {
    fn default() -> Self {
        Self::new()
    }
}
