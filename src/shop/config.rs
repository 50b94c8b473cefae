//! Shop Stock Configuration
//!
//! Plugin parameters, loaded from a TOML file. Every key is optional.

use serde::{Deserialize, Deserializer};
use std::path::Path;
use tracing::info;

use super::resolver::StockResolver;
use crate::data::Metadata;
use crate::error::DataError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShopStockConfig {
    /// Event note key naming the shop, ie `<shopName:Map_1_Armor>`
    #[serde(default = "default_shop_note_name")]
    pub shop_note_name: String,
    /// Product note key giving its max stock, ie `<stock:50>`
    #[serde(default = "default_stock_note_name")]
    pub stock_note_name: String,
    /// Selling a product adds it back to the shop's stock
    #[serde(default, deserialize_with = "deserialize_switch")]
    pub selling_restocks: bool,
}

fn default_shop_note_name() -> String { "shopName".to_string() }
fn default_stock_note_name() -> String { "stock".to_string() }

/// Accepts `true`/`false` or the parameter strings `"on"`/`"off"`
fn deserialize_switch<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Switch {
        Bool(bool),
        Text(String),
    }

    Ok(match Switch::deserialize(deserializer)? {
        Switch::Bool(value) => value,
        Switch::Text(text) => text.trim().eq_ignore_ascii_case("on"),
    })
}

impl Default for ShopStockConfig {
    fn default() -> Self {
        Self {
            shop_note_name: default_shop_note_name(),
            stock_note_name: default_stock_note_name(),
            selling_restocks: false,
        }
    }
}

impl ShopStockConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let config: ShopStockConfig = toml::from_str(content)?;
        Ok(config.normalized())
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DataError::io(path, e))?;
        Self::from_toml_str(&content).map_err(|e| DataError::parse(path, e))
    }

    /// Load from a TOML file, or use the defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, DataError> {
        if !path.exists() {
            info!("No shop stock config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Resolver reading this config's stock note key
    pub fn resolver(&self) -> StockResolver<'_> {
        StockResolver::new(&self.stock_note_name)
    }

    /// Shop name from an event's note metadata, if it has one
    pub fn shop_name(&self, event_meta: &Metadata) -> Option<String> {
        event_meta
            .text(&self.shop_note_name)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    // Blank note names fall back to the defaults
    fn normalized(mut self) -> Self {
        if self.shop_note_name.trim().is_empty() {
            self.shop_note_name = default_shop_note_name();
        }
        if self.stock_note_name.trim().is_empty() {
            self.stock_note_name = default_stock_note_name();
        }
        self
    }
}
